// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::error::Error;
use crate::marshal::Marshal;
use crate::node::{Node, Scalar, Value, SCALAR_VALUE_FIELD};
use crate::resolver::context::UnmarshalContext;

/// Reads a standalone scalar node through `T::unmarshall_scalar`.
pub(crate) fn unmarshall_scalar_node<T: Marshal>(
    node: &Node,
    context: &mut UnmarshalContext,
) -> Result<T, Error> {
    context.check_class::<T>(node)?;
    match node.entry(SCALAR_VALUE_FIELD).map(|entry| entry.value()) {
        Some(Value::Scalar(scalar)) => T::unmarshall_scalar(scalar, context),
        Some(Value::Null) => T::unmarshall_null(context),
        Some(Value::Node(nested)) => Err(Error::field_assignment(format!(
            "expected `{}`, found node of class `{}`",
            T::class_name(),
            nested.class_name()
        ))),
        None => Err(Error::invalid_node(format!(
            "scalar node of class `{}` has no `{}` entry",
            node.class_name(),
            SCALAR_VALUE_FIELD
        ))),
    }
}

#[cold]
pub(crate) fn scalar_mismatch(expected: &str, found: &Scalar) -> Error {
    Error::field_assignment(format!(
        "expected `{}`, found {} scalar {}",
        expected,
        found.kind(),
        found
    ))
}

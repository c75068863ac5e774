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
use crate::marshal::{EnumConstant, Marshal};
use crate::node::{Entry, Node, Scalar, Value, ENUM_NAME_FIELD};
use crate::resolver::context::{MarshalContext, UnmarshalContext};

#[inline(always)]
pub fn marshall_enum<T: Marshal + EnumConstant>(
    value: &T,
    context: &mut MarshalContext,
) -> Result<Value, Error> {
    let mut node = context.create_node(&T::class_name(), false, false);
    node.add(Entry::new(
        ENUM_NAME_FIELD,
        Scalar::from(value.constant_name()),
    ));
    Ok(Value::Node(node))
}

/// Resolves the stored constant through the enum-rename lookup of the current class.
pub fn unmarshall_enum<T: Marshal + EnumConstant>(
    node: &Node,
    context: &mut UnmarshalContext,
) -> Result<T, Error> {
    context.check_class::<T>(node)?;
    let stored = match node.entry(ENUM_NAME_FIELD).map(Entry::value) {
        Some(Value::Scalar(Scalar::Str(name))) => name.as_str(),
        Some(other) => {
            return Err(Error::field_assignment(format!(
                "constant name of `{}` must be a string, found {}",
                T::class_name(),
                other.describe()
            )))
        }
        None => {
            return Err(Error::invalid_node(format!(
                "enum node of class `{}` has no `{}` entry",
                node.class_name(),
                ENUM_NAME_FIELD
            )))
        }
    };
    let class_name = T::class_name();
    let migrations = context.migrations();
    let resolved = migrations.resolve_enum_constant_name(&class_name, stored);
    T::from_constant_name(resolved).ok_or_else(|| {
        Error::unknown_constant(format!(
            "`{}` has no constant `{}` (expected one of: {})",
            class_name,
            resolved,
            T::constant_names().join(", ")
        ))
    })
}

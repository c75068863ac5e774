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
use crate::marshal::{Marshal, MarshalDefault, Shape};
use crate::node::{Node, Scalar, Value, NULL_CLASS};
use crate::resolver::context::{MarshalContext, UnmarshalContext};
use std::borrow::Cow;

impl<T: Marshal> Marshal for Option<T> {
    #[inline(always)]
    fn class_name() -> Cow<'static, str> {
        T::class_name()
    }

    #[inline(always)]
    fn node_class_name() -> Cow<'static, str> {
        T::node_class_name()
    }

    #[inline(always)]
    fn shape() -> Shape {
        T::shape()
    }

    fn accepts_class_name(class_name: &str) -> bool {
        class_name == NULL_CLASS || T::accepts_class_name(class_name)
    }

    fn requires_entries() -> bool {
        T::requires_entries()
    }

    fn marshall(&self, context: &mut MarshalContext) -> Result<Value, Error> {
        match self {
            Some(value) => value.marshall(context),
            None => Ok(Value::Null),
        }
    }

    fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
        if node.class_name() == NULL_CLASS && node.is_empty() {
            return Ok(None);
        }
        T::unmarshall_node(node, context).map(Some)
    }

    fn unmarshall_scalar(scalar: &Scalar, context: &mut UnmarshalContext) -> Result<Self, Error> {
        T::unmarshall_scalar(scalar, context).map(Some)
    }

    #[inline(always)]
    fn unmarshall_null(_: &mut UnmarshalContext) -> Result<Self, Error> {
        Ok(None)
    }
}

impl<T> MarshalDefault for Option<T> {
    #[inline(always)]
    fn marshal_default() -> Self {
        None
    }
}

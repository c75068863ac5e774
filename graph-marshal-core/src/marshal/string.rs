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
use crate::marshal::util::{scalar_mismatch, unmarshall_scalar_node};
use crate::marshal::{Marshal, MarshalDefault, Shape};
use crate::node::{Node, Scalar, Value};
use crate::resolver::context::{MarshalContext, UnmarshalContext};
use std::borrow::Cow;

impl Marshal for String {
    #[inline(always)]
    fn class_name() -> Cow<'static, str> {
        Cow::Borrowed("String")
    }

    #[inline(always)]
    fn shape() -> Shape {
        Shape::Scalar
    }

    fn accepts_class_name(class_name: &str) -> bool {
        class_name == "String" || class_name == "char"
    }

    fn marshall(&self, _: &mut MarshalContext) -> Result<Value, Error> {
        Ok(Value::Scalar(Scalar::Str(self.clone())))
    }

    fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
        unmarshall_scalar_node(node, context)
    }

    fn unmarshall_scalar(scalar: &Scalar, _: &mut UnmarshalContext) -> Result<Self, Error> {
        match scalar {
            Scalar::Str(s) => Ok(s.clone()),
            Scalar::Char(c) => Ok(c.to_string()),
            other => Err(scalar_mismatch("String", other)),
        }
    }
}

impl MarshalDefault for String {
    #[inline(always)]
    fn marshal_default() -> Self {
        String::new()
    }
}

impl Marshal for char {
    #[inline(always)]
    fn class_name() -> Cow<'static, str> {
        Cow::Borrowed("char")
    }

    #[inline(always)]
    fn shape() -> Shape {
        Shape::Scalar
    }

    #[inline(always)]
    fn marshall(&self, _: &mut MarshalContext) -> Result<Value, Error> {
        Ok(Value::Scalar(Scalar::Char(*self)))
    }

    fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
        unmarshall_scalar_node(node, context)
    }

    fn unmarshall_scalar(scalar: &Scalar, _: &mut UnmarshalContext) -> Result<Self, Error> {
        match scalar {
            Scalar::Char(c) => Ok(*c),
            Scalar::Str(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(Error::field_assignment(format!(
                        "{} is not a single character",
                        scalar
                    ))),
                }
            }
            other => Err(scalar_mismatch("char", other)),
        }
    }
}

impl MarshalDefault for char {
    #[inline(always)]
    fn marshal_default() -> Self {
        '\0'
    }
}

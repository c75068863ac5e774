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

impl Marshal for bool {
    #[inline(always)]
    fn class_name() -> Cow<'static, str> {
        Cow::Borrowed("bool")
    }

    #[inline(always)]
    fn shape() -> Shape {
        Shape::Scalar
    }

    #[inline(always)]
    fn marshall(&self, _: &mut MarshalContext) -> Result<Value, Error> {
        Ok(Value::Scalar(Scalar::Bool(*self)))
    }

    fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
        unmarshall_scalar_node(node, context)
    }

    fn unmarshall_scalar(scalar: &Scalar, _: &mut UnmarshalContext) -> Result<Self, Error> {
        match scalar {
            Scalar::Bool(v) => Ok(*v),
            Scalar::Str(s) if s == "true" => Ok(true),
            Scalar::Str(s) if s == "false" => Ok(false),
            other => Err(scalar_mismatch("bool", other)),
        }
    }
}

impl MarshalDefault for bool {
    #[inline(always)]
    fn marshal_default() -> Self {
        false
    }
}

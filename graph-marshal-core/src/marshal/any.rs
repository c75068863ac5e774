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
use crate::node::{Node, Value};
use crate::resolver::context::{MarshalContext, UnmarshalContext};
use std::any::Any;
use std::borrow::Cow;

/// Class name reported for dynamic values; nodes always carry the concrete class.
pub const DYNAMIC_CLASS: &str = "any";

impl Marshal for Box<dyn Any> {
    fn class_name() -> Cow<'static, str> {
        Cow::Borrowed(DYNAMIC_CLASS)
    }

    fn shape() -> Shape {
        Shape::Dynamic
    }

    fn accepts_class_name(_: &str) -> bool {
        true
    }

    fn marshall(&self, context: &mut MarshalContext) -> Result<Value, Error> {
        let value: &dyn Any = &**self;
        let registry = context.registry();
        let info = registry.get_by_type_id(value.type_id()).ok_or_else(|| {
            Error::unsupported_shape(
                "value behind `Box<dyn Any>` has a type that was never registered",
            )
        })?;
        info.harness().marshall(value, context).map(Value::Node)
    }

    /// Resolves the concrete type from the node's migrated class name; arrays are
    /// looked up as `<element>[]`.
    fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
        let class_name = context.resolve_class_name(node);
        let registry = context.registry();
        let info = registry.get_by_name(&class_name).ok_or_else(|| {
            Error::class_resolution(format!("no type registered as `{}`", class_name))
        })?;
        info.harness().unmarshall(node, context)
    }
}

impl MarshalDefault for Box<dyn Any> {
    fn marshal_default() -> Self {
        Box::new(())
    }
}

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
use crate::node::{Entry, Node, Scalar, Value, TYPE_LITERAL_CLASS, TYPE_LITERAL_FIELD};
use crate::resolver::context::{MarshalContext, UnmarshalContext};
use std::borrow::Cow;
use std::fmt;

/// A type used as a value.
///
/// Marshals as a node of class `type` naming the referenced class. Unmarshalling
/// passes the stored name through the class-rename lookup and requires the result to
/// be registered with the engine.
///
/// ```rust
/// use graph_marshal_core::TypeHandle;
///
/// let handle = TypeHandle::of::<String>();
/// assert_eq!(handle.class_name(), "String");
/// assert!(handle.is::<String>());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeHandle {
    class_name: Cow<'static, str>,
}

impl TypeHandle {
    pub fn of<T: Marshal>() -> TypeHandle {
        TypeHandle {
            class_name: T::class_name(),
        }
    }

    pub fn named(class_name: impl Into<Cow<'static, str>>) -> TypeHandle {
        TypeHandle {
            class_name: class_name.into(),
        }
    }

    #[inline(always)]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn is<T: Marshal>(&self) -> bool {
        self.class_name == T::class_name()
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.class_name)
    }
}

impl Marshal for TypeHandle {
    fn class_name() -> Cow<'static, str> {
        Cow::Borrowed(TYPE_LITERAL_CLASS)
    }

    fn shape() -> Shape {
        Shape::TypeLiteral
    }

    fn marshall(&self, context: &mut MarshalContext) -> Result<Value, Error> {
        let mut node = context.create_node(TYPE_LITERAL_CLASS, false, false);
        node.add(Entry::new(
            TYPE_LITERAL_FIELD,
            Scalar::from(self.class_name()),
        ));
        Ok(Value::Node(node))
    }

    fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
        context.check_class::<Self>(node)?;
        let stored = match node.entry(TYPE_LITERAL_FIELD).map(Entry::value) {
            Some(Value::Scalar(Scalar::Str(name))) => name.as_str(),
            _ => {
                return Err(Error::invalid_node(format!(
                    "type literal has no string `{}` entry",
                    TYPE_LITERAL_FIELD
                )))
            }
        };
        let migrations = context.migrations();
        let resolved = migrations.resolve_type_name(stored);
        if !context.registry().contains_name(resolved) {
            return Err(Error::class_resolution(format!(
                "type literal names unknown class `{}`",
                stored
            )));
        }
        Ok(TypeHandle::named(resolved.to_string()))
    }
}

impl MarshalDefault for TypeHandle {
    fn marshal_default() -> Self {
        TypeHandle::named("")
    }
}

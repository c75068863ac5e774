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

//! Arrays: `Vec<T>`, `[T; N]` and `Box<[T]>`.
//!
//! An array node is stamped with the element class and `is_array`, and holds one
//! entry per element named by its index. Elements written by older schemas as a
//! chained node are flattened back into the sequence.

use crate::error::Error;
use crate::marshal::{Marshal, MarshalDefault, Shape};
use crate::node::{Entry, Node, Value};
use crate::resolver::context::{MarshalContext, UnmarshalContext};
use std::borrow::Cow;

/// Class name of an array of `T`, as used for dynamic lookups.
pub fn array_class_name<T: Marshal>() -> Cow<'static, str> {
    Cow::Owned(format!("{}[]", T::class_name()))
}

/// Whether `class_name` names an array whose elements can be read as `T`.
pub fn accepts_array_class<T: Marshal>(class_name: &str) -> bool {
    class_name
        .strip_suffix("[]")
        .is_some_and(|element| T::accepts_class_name(element))
}

pub fn marshall_elements<'e, T: Marshal>(
    elements: impl IntoIterator<Item = &'e T>,
    context: &mut MarshalContext,
) -> Result<Value, Error> {
    let mut node = context.create_node(&T::class_name(), true, T::shape() == Shape::Scalar);
    for (index, element) in elements.into_iter().enumerate() {
        let value = context.marshall_value(element)?;
        node.add(Entry::new(index.to_string(), value));
    }
    Ok(Value::Node(node))
}

/// Expands legacy chained entries in place, keeping order.
pub fn recover_chained<'v>(
    values: impl IntoIterator<Item = &'v Value>,
    context: &UnmarshalContext,
) -> Result<Vec<&'v Value>, Error> {
    let backend = context.backend();
    let mut recovered = Vec::new();
    for value in values {
        match value {
            Value::Node(node) => match backend.decode_legacy_chain(node)? {
                Some(chained) => recovered.extend(chained),
                None => recovered.push(value),
            },
            _ => recovered.push(value),
        }
    }
    Ok(recovered)
}

pub fn unmarshall_elements<T: Marshal>(
    node: &Node,
    context: &mut UnmarshalContext,
) -> Result<Vec<T>, Error> {
    context.check_class::<Vec<T>>(node)?;
    if !node.is_array() {
        return Err(Error::field_assignment(format!(
            "expected an array of `{}`, found a node of class `{}`",
            T::class_name(),
            node.class_name()
        )));
    }
    let values = recover_chained(node.entries().iter().map(Entry::value), context)?;
    let mut elements = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        let element = context
            .unmarshall_value::<T>(value)
            .map_err(|e| e.in_field(node.class_name(), &index.to_string()))?;
        elements.push(element);
    }
    Ok(elements)
}

impl<T: Marshal> Marshal for Vec<T> {
    fn class_name() -> Cow<'static, str> {
        array_class_name::<T>()
    }

    fn node_class_name() -> Cow<'static, str> {
        T::class_name()
    }

    fn shape() -> Shape {
        Shape::Array
    }

    fn accepts_class_name(class_name: &str) -> bool {
        accepts_array_class::<T>(class_name)
    }

    fn marshall(&self, context: &mut MarshalContext) -> Result<Value, Error> {
        marshall_elements(self.iter(), context)
    }

    fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
        unmarshall_elements(node, context)
    }
}

impl<T> MarshalDefault for Vec<T> {
    fn marshal_default() -> Self {
        Vec::new()
    }
}

impl<T: Marshal, const N: usize> Marshal for [T; N] {
    fn class_name() -> Cow<'static, str> {
        array_class_name::<T>()
    }

    fn node_class_name() -> Cow<'static, str> {
        T::class_name()
    }

    fn shape() -> Shape {
        Shape::Array
    }

    fn accepts_class_name(class_name: &str) -> bool {
        accepts_array_class::<T>(class_name)
    }

    fn marshall(&self, context: &mut MarshalContext) -> Result<Value, Error> {
        marshall_elements(self.iter(), context)
    }

    fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
        let elements = unmarshall_elements::<T>(node, context)?;
        let len = elements.len();
        elements.try_into().map_err(|_| {
            Error::field_assignment(format!(
                "expected {} elements of `{}`, found {}",
                N,
                T::class_name(),
                len
            ))
        })
    }
}

impl<T: MarshalDefault, const N: usize> MarshalDefault for [T; N] {
    fn marshal_default() -> Self {
        std::array::from_fn(|_| T::marshal_default())
    }
}

impl<T: Marshal> Marshal for Box<[T]> {
    fn class_name() -> Cow<'static, str> {
        array_class_name::<T>()
    }

    fn node_class_name() -> Cow<'static, str> {
        T::class_name()
    }

    fn shape() -> Shape {
        Shape::Array
    }

    fn accepts_class_name(class_name: &str) -> bool {
        accepts_array_class::<T>(class_name)
    }

    fn marshall(&self, context: &mut MarshalContext) -> Result<Value, Error> {
        marshall_elements(self.iter(), context)
    }

    fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
        unmarshall_elements(node, context).map(Vec::into_boxed_slice)
    }
}

impl<T> MarshalDefault for Box<[T]> {
    fn marshal_default() -> Self {
        Vec::new().into_boxed_slice()
    }
}

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
use crate::marshal::array::recover_chained;
use crate::marshal::{Marshal, SequentialContainer};
use crate::node::{Entry, Node};
use crate::resolver::context::{MarshalContext, UnmarshalContext};

/// Hands the container's elements to the backend under its payload tag.
pub fn marshal_sequential_payload<C: SequentialContainer>(
    container: &C,
    node: &mut Node,
    context: &mut MarshalContext,
) -> Result<(), Error> {
    let elements = container.elements();
    let mut values = Vec::with_capacity(elements.len());
    for element in elements {
        values.push(context.marshall_value(element)?);
    }
    context.backend().encode_sequential_entries(node, values)
}

/// Resets the container, then appends every recovered element through
/// [`SequentialContainer::push_element`].
pub fn fill_sequential_payload<C: SequentialContainer + Marshal>(
    container: &mut C,
    entry: &Entry,
    context: &mut UnmarshalContext,
) -> Result<(), Error> {
    let backend = context.backend();
    let elements = backend.decode_container_payload(entry)?.into_elements()?;
    let elements = recover_chained(elements, context)?;
    if C::CUSTOM_INSERT {
        context.report_overridden_insert::<C>("push_element");
    }
    container.reset_elements();
    for value in elements {
        let element = context.unmarshall_value::<C::Element>(value)?;
        container.push_element(element);
    }
    Ok(())
}

macro_rules! impl_sequential_marshal {
    ($seq:ident, $name:literal, $push:ident $(, $bound:ident)*) => {
        impl<T: Marshal $(+ $bound)*> $crate::marshal::SequentialContainer for $seq<T> {
            type Element = T;

            fn elements(&self) -> Vec<&T> {
                self.iter().collect()
            }

            fn reset_elements(&mut self) {
                self.clear();
            }

            fn push_element(&mut self, element: T) {
                self.$push(element);
            }
        }

        impl<T: Marshal $(+ $bound)*> $crate::marshal::Record for $seq<T> {
            fn marshal_fields(
                &self,
                _: &mut $crate::node::Node,
                _: &mut $crate::resolver::context::MarshalContext,
            ) -> Result<(), $crate::error::Error> {
                Ok(())
            }

            fn assign_field(
                &mut self,
                _: &str,
                _: &$crate::node::Value,
                _: &mut $crate::resolver::context::UnmarshalContext,
            ) -> Result<bool, $crate::error::Error> {
                Ok(false)
            }

            fn marshal_payload(
                &self,
                node: &mut $crate::node::Node,
                context: &mut $crate::resolver::context::MarshalContext,
            ) -> Result<(), $crate::error::Error> {
                $crate::marshal::collection::marshal_sequential_payload(self, node, context)
            }

            fn fill_payload(
                &mut self,
                entry: &$crate::node::Entry,
                context: &mut $crate::resolver::context::UnmarshalContext,
            ) -> Result<(), $crate::error::Error> {
                $crate::marshal::collection::fill_sequential_payload(self, entry, context)
            }
        }

        impl<T: Marshal $(+ $bound)*> Marshal for $seq<T> {
            fn class_name() -> std::borrow::Cow<'static, str> {
                std::borrow::Cow::Borrowed($name)
            }

            fn shape() -> $crate::marshal::Shape {
                $crate::marshal::Shape::Sequential
            }

            fn accepts_class_name(class_name: &str) -> bool {
                $crate::marshal::collection::SEQUENCE_CLASSES.contains(&class_name)
            }

            fn marshall(
                &self,
                context: &mut $crate::resolver::context::MarshalContext,
            ) -> Result<$crate::node::Value, $crate::error::Error> {
                $crate::marshal::struct_::marshall_record(self, context)
            }

            fn unmarshall_node(
                node: &$crate::node::Node,
                context: &mut $crate::resolver::context::UnmarshalContext,
            ) -> Result<Self, $crate::error::Error> {
                $crate::marshal::struct_::unmarshall_record(node, context)
            }

            fn unmarshall_into(
                &mut self,
                node: &$crate::node::Node,
                context: &mut $crate::resolver::context::UnmarshalContext,
            ) -> Result<(), $crate::error::Error> {
                $crate::marshal::struct_::fill_record(self, node, context)
            }
        }

        impl<T> $crate::marshal::MarshalDefault for $seq<T> {
            fn marshal_default() -> Self {
                $seq::default()
            }
        }
    };
}

pub(crate) use impl_sequential_marshal;

pub const SEQUENCE_CLASSES: [&str; 4] = ["VecDeque", "LinkedList", "HashSet", "BTreeSet"];

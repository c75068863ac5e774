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
use crate::marshal::struct_::{fill_record, marshall_record, unmarshall_record};
use crate::marshal::{AssociativeContainer, Marshal, MarshalDefault, Record, Shape};
use crate::node::{Entry, Node, Value};
use crate::resolver::context::{MarshalContext, UnmarshalContext};
use indexmap::IndexMap;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

const MAP_CLASSES: [&str; 3] = ["HashMap", "BTreeMap", "IndexMap"];

/// Hands the container's pairs to the backend under its payload tag.
pub fn marshal_associative_payload<C: AssociativeContainer>(
    container: &C,
    node: &mut Node,
    context: &mut MarshalContext,
) -> Result<(), Error> {
    let entries = container.entry_pairs();
    let mut pairs = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        pairs.push((context.marshall_value(key)?, context.marshall_value(value)?));
    }
    context.backend().encode_associative_entries(node, pairs)
}

/// Clears the container, then inserts every recovered pair through
/// [`AssociativeContainer::insert_entry`].
pub fn fill_associative_payload<C: AssociativeContainer + Marshal>(
    container: &mut C,
    entry: &Entry,
    context: &mut UnmarshalContext,
) -> Result<(), Error> {
    let pairs = context
        .backend()
        .decode_container_payload(entry)?
        .into_pairs()?;
    if C::CUSTOM_INSERT {
        context.report_overridden_insert::<C>("insert_entry");
    }
    container.clear_entries();
    for (key, value) in pairs {
        let key = context.unmarshall_value::<C::Key>(key)?;
        let value = context.unmarshall_value::<C::Value>(value)?;
        container.insert_entry(key, value);
    }
    Ok(())
}

macro_rules! impl_map_marshal {
    ($map:ident, $name:literal, $($bound:ident),+) => {
        impl<K: Marshal $(+ $bound)+, V: Marshal> AssociativeContainer for $map<K, V> {
            type Key = K;
            type Value = V;

            fn entry_pairs(&self) -> Vec<(&K, &V)> {
                self.iter().collect()
            }

            fn clear_entries(&mut self) {
                self.clear();
            }

            fn insert_entry(&mut self, key: K, value: V) {
                self.insert(key, value);
            }
        }

        impl<K: Marshal $(+ $bound)+, V: Marshal> Record for $map<K, V> {
            fn marshal_fields(&self, _: &mut Node, _: &mut MarshalContext) -> Result<(), Error> {
                Ok(())
            }

            fn assign_field(
                &mut self,
                _: &str,
                _: &Value,
                _: &mut UnmarshalContext,
            ) -> Result<bool, Error> {
                Ok(false)
            }

            fn marshal_payload(&self, node: &mut Node, context: &mut MarshalContext) -> Result<(), Error> {
                marshal_associative_payload(self, node, context)
            }

            fn fill_payload(&mut self, entry: &Entry, context: &mut UnmarshalContext) -> Result<(), Error> {
                fill_associative_payload(self, entry, context)
            }
        }

        impl<K: Marshal $(+ $bound)+, V: Marshal> Marshal for $map<K, V> {
            fn class_name() -> Cow<'static, str> {
                Cow::Borrowed($name)
            }

            fn shape() -> Shape {
                Shape::Associative
            }

            fn accepts_class_name(class_name: &str) -> bool {
                MAP_CLASSES.contains(&class_name)
            }

            fn marshall(&self, context: &mut MarshalContext) -> Result<Value, Error> {
                marshall_record(self, context)
            }

            fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
                unmarshall_record(node, context)
            }

            fn unmarshall_into(&mut self, node: &Node, context: &mut UnmarshalContext) -> Result<(), Error> {
                fill_record(self, node, context)
            }
        }

        impl<K, V> MarshalDefault for $map<K, V> {
            fn marshal_default() -> Self {
                $map::default()
            }
        }
    };
}

impl_map_marshal!(HashMap, "HashMap", Eq, Hash);
impl_map_marshal!(BTreeMap, "BTreeMap", Ord);
impl_map_marshal!(IndexMap, "IndexMap", Eq, Hash);

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

//! Contract between the engine and the format backends that render nodes to bytes.
//!
//! The engine never looks inside a container payload itself. It hands materialized
//! pairs or elements to the backend when marshalling and asks the backend to decode
//! them again when unmarshalling, so each format can choose its own layout.

use crate::error::Error;
use crate::node::{Entry, Node, Value, SYNTHETIC_KEY};

/// Reserved entry name of the materialized container payload in [`TreeBackend`].
pub const PAYLOAD_TAG: &str = "entries";

/// Class name of one key/value pair inside an associative payload.
pub const PAIR_CLASS: &str = "entry";

pub const PAIR_KEY_FIELD: &str = "key";
pub const PAIR_VALUE_FIELD: &str = "value";

/// Class name of the chained element representation written by older schemas.
pub const LEGACY_CHAIN_CLASS: &str = "$chain";
pub const LEGACY_CHAIN_VALUE_FIELD: &str = "value";
pub const LEGACY_CHAIN_NEXT_FIELD: &str = "next";

/// A decoded container payload.
#[derive(Debug, PartialEq)]
pub enum ContainerPayload<'a> {
    Pairs(Vec<(&'a Value, &'a Value)>),
    Elements(Vec<&'a Value>),
}

impl<'a> ContainerPayload<'a> {
    /// Key/value pairs of an associative payload.
    ///
    /// A flat element list of even length is read as alternating keys and values, the
    /// layout older maps were persisted with.
    pub fn into_pairs(self) -> Result<Vec<(&'a Value, &'a Value)>, Error> {
        match self {
            ContainerPayload::Pairs(pairs) => Ok(pairs),
            ContainerPayload::Elements(elements) => {
                crate::ensure!(
                    elements.len() % 2 == 0,
                    Error::invalid_node(format!(
                        "flat map payload has an odd number of elements ({})",
                        elements.len()
                    ))
                );
                Ok(elements
                    .chunks_exact(2)
                    .map(|chunk| (chunk[0], chunk[1]))
                    .collect())
            }
        }
    }

    /// Elements of a sequential payload.
    pub fn into_elements(self) -> Result<Vec<&'a Value>, Error> {
        match self {
            ContainerPayload::Elements(elements) => Ok(elements),
            ContainerPayload::Pairs(pairs) if pairs.is_empty() => Ok(Vec::new()),
            ContainerPayload::Pairs(pairs) => Err(Error::field_assignment(format!(
                "expected a sequence payload, found {} key/value pairs",
                pairs.len()
            ))),
        }
    }
}

/// Node constructors and container-encoding adapters supplied by a format backend.
pub trait FormatBackend: Send + Sync {
    /// Stamps an empty node for a source value.
    fn create_node(
        &self,
        class_name: &str,
        is_array: bool,
        is_primitive_scalar: bool,
        identity_key: u32,
    ) -> Node {
        Node::new(class_name, is_array, is_primitive_scalar, identity_key)
    }

    /// Entry name identifying the materialized payload of container types.
    fn payload_tag(&self) -> &str;

    fn encode_associative_entries(
        &self,
        node: &mut Node,
        pairs: Vec<(Value, Value)>,
    ) -> Result<(), Error>;

    fn encode_sequential_entries(&self, node: &mut Node, elements: Vec<Value>)
        -> Result<(), Error>;

    fn decode_container_payload<'a>(&self, entry: &'a Entry)
        -> Result<ContainerPayload<'a>, Error>;

    /// Values linked through an obsolete chained representation, or `None` when the
    /// node is an ordinary element.
    fn decode_legacy_chain<'a>(&self, node: &'a Node) -> Result<Option<Vec<&'a Value>>, Error>;
}

/// In-memory backend used by default; renders nothing and keeps the tree as is.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeBackend;

impl FormatBackend for TreeBackend {
    fn payload_tag(&self) -> &str {
        PAYLOAD_TAG
    }

    fn encode_associative_entries(
        &self,
        node: &mut Node,
        pairs: Vec<(Value, Value)>,
    ) -> Result<(), Error> {
        let mut payload = Node::new(PAIR_CLASS, true, false, SYNTHETIC_KEY);
        for (index, (key, value)) in pairs.into_iter().enumerate() {
            let mut pair = Node::new(PAIR_CLASS, false, false, SYNTHETIC_KEY);
            pair.add(Entry::new(PAIR_KEY_FIELD, key));
            pair.add(Entry::new(PAIR_VALUE_FIELD, value));
            payload.add(Entry::new(index.to_string(), pair));
        }
        node.add(Entry::new(PAYLOAD_TAG, payload));
        Ok(())
    }

    fn encode_sequential_entries(
        &self,
        node: &mut Node,
        elements: Vec<Value>,
    ) -> Result<(), Error> {
        let mut payload = Node::new(node.class_name(), true, false, SYNTHETIC_KEY);
        payload.add_all(
            elements
                .into_iter()
                .enumerate()
                .map(|(index, value)| Entry::new(index.to_string(), value)),
        );
        node.add(Entry::new(PAYLOAD_TAG, payload));
        Ok(())
    }

    fn decode_container_payload<'a>(
        &self,
        entry: &'a Entry,
    ) -> Result<ContainerPayload<'a>, Error> {
        let payload = match entry.value() {
            Value::Node(node) => node,
            Value::Null => return Ok(ContainerPayload::Elements(Vec::new())),
            other => {
                return Err(Error::invalid_node(format!(
                    "container payload must be a node, found {}",
                    other.describe()
                )))
            }
        };
        let is_pair = |value: &Value| {
            value
                .as_node()
                .is_some_and(|node| node.class_name() == PAIR_CLASS && !node.is_array())
        };
        if !payload.is_empty() && payload.entries().iter().all(|e| is_pair(e.value())) {
            let mut pairs = Vec::with_capacity(payload.len());
            for pair in payload.entries().iter().filter_map(|e| e.value().as_node()) {
                let key = pair.entry(PAIR_KEY_FIELD).map(Entry::value);
                let value = pair.entry(PAIR_VALUE_FIELD).map(Entry::value);
                match (key, value) {
                    (Some(key), Some(value)) => pairs.push((key, value)),
                    _ => {
                        return Err(Error::invalid_node(
                            "map entry is missing its key or value",
                        ))
                    }
                }
            }
            return Ok(ContainerPayload::Pairs(pairs));
        }
        Ok(ContainerPayload::Elements(
            payload.entries().iter().map(Entry::value).collect(),
        ))
    }

    fn decode_legacy_chain<'a>(&self, node: &'a Node) -> Result<Option<Vec<&'a Value>>, Error> {
        if node.class_name() != LEGACY_CHAIN_CLASS {
            return Ok(None);
        }
        let mut values = Vec::new();
        let mut link = Some(node);
        while let Some(current) = link {
            let value = current.entry(LEGACY_CHAIN_VALUE_FIELD).ok_or_else(|| {
                Error::invalid_node("chained element is missing its value entry")
            })?;
            values.push(value.value());
            link = match current.entry(LEGACY_CHAIN_NEXT_FIELD).map(Entry::value) {
                None | Some(Value::Null) => None,
                Some(Value::Node(next)) if next.class_name() == LEGACY_CHAIN_CLASS => Some(next),
                Some(other) => {
                    return Err(Error::invalid_node(format!(
                        "chained element links to {}",
                        other.describe()
                    )))
                }
            };
        }
        Ok(Some(values))
    }
}

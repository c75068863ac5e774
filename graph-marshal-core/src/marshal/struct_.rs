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

//! Shared walk for record-shaped types, called by derived and built-in impls.

use crate::error::Error;
use crate::marshal::{Marshal, Record};
use crate::node::{Entry, Node, Value};
use crate::resolver::context::{MarshalContext, UnmarshalContext};

/// Housekeeping state of container implementations; never logical state.
pub const CONTAINER_BOOKKEEPING_FIELDS: [&str; 7] = [
    "size",
    "modCount",
    "threshold",
    "loadFactor",
    "capacity",
    "elementCount",
    "capacityIncrement",
];

pub fn marshall_record<T: Record>(record: &T, context: &mut MarshalContext) -> Result<Value, Error> {
    let mut node = context.create_node(&T::class_name(), false, false);
    record.marshal_fields(&mut node, context)?;
    record.marshal_payload(&mut node, context)?;
    Ok(Value::Node(node))
}

#[inline(always)]
pub fn marshall_field<R: Marshal, F: Marshal>(
    node: &mut Node,
    name: &str,
    value: &F,
    context: &mut MarshalContext,
) -> Result<(), Error> {
    let value = context
        .marshall_value(value)
        .map_err(|e| e.in_field(&R::class_name(), name))?;
    node.add(Entry::new(name, value));
    Ok(())
}

pub fn unmarshall_record<T: Record>(node: &Node, context: &mut UnmarshalContext) -> Result<T, Error> {
    let mut record = T::allocate()?;
    fill_record(&mut record, node, context)?;
    Ok(record)
}

/// Assigns every entry of `node` to `record`.
///
/// Declared fields are set in node order. The container payload, if any, is deferred
/// until all declared fields are set, and the post-reconstruction hook runs last.
pub fn fill_record<T: Record>(
    record: &mut T,
    node: &Node,
    context: &mut UnmarshalContext,
) -> Result<(), Error> {
    context.check_class::<T>(node)?;
    let is_container = T::shape().is_container();
    let payload_tag = context.backend().payload_tag();
    // A declared field may share the payload tag; the payload is the last such entry.
    let payload_index = if is_container {
        node.entries().iter().rposition(|entry| entry.name() == payload_tag)
    } else {
        None
    };
    for (index, entry) in node.entries().iter().enumerate() {
        let name = entry.name();
        if Some(index) == payload_index {
            continue;
        }
        let assigned = record
            .assign_field(name, entry.value(), context)
            .map_err(|e| e.in_field(&T::class_name(), name))?;
        if assigned || (is_container && CONTAINER_BOOKKEEPING_FIELDS.contains(&name)) {
            continue;
        }
        context.report_obsolete_field(&T::class_name(), name);
    }
    if let Some(entry) = payload_index.map(|index| &node.entries()[index]) {
        record
            .fill_payload(entry, context)
            .map_err(|e| e.in_field(&T::class_name(), payload_tag))?;
    }
    record.after_unmarshal()
}

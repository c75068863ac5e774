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
use crate::node::{Entry, Node, Scalar, Value};
use crate::resolver::context::{MarshalContext, UnmarshalContext};
use std::borrow::Cow;

/// Engine-only empty constructor.
///
/// Reconstruction starts from this value and overwrites it field by field, so it must
/// not run any initialization that persisted state would contradict. Invariants that
/// ordinary construction establishes belong in [`Record::after_unmarshal`].
pub trait MarshalDefault: Sized {
    fn marshal_default() -> Self;
}

// No blanket impl for `T: Default`: it would conflict with the impls for pointer and
// container types whose `Default` is not what reconstruction needs.

/// How the engine decomposes a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Scalar,
    Array,
    Enumeration,
    TypeLiteral,
    Associative,
    Sequential,
    Record,
    /// Resolved at runtime through the engine's type registry.
    Dynamic,
}

impl Shape {
    #[inline(always)]
    pub fn is_container(self) -> bool {
        matches!(self, Shape::Associative | Shape::Sequential)
    }
}

/// Per-type descriptor used by the marshaller and the unmarshaller.
///
/// Implemented in this crate for scalars, arrays, std containers and pointers, and
/// generated by `#[derive(Marshal)]` for application types.
pub trait Marshal: MarshalDefault + 'static {
    /// Class name stamped on nodes and resolved when unmarshalling.
    fn class_name() -> Cow<'static, str>;

    /// Class name stamped on a node for this type; differs from
    /// [`Marshal::class_name`] only for arrays, whose nodes name the element type.
    fn node_class_name() -> Cow<'static, str> {
        Self::class_name()
    }

    fn shape() -> Shape {
        Shape::Record
    }

    /// Whether a node of the given (already migrated) class can be read as `Self`.
    fn accepts_class_name(class_name: &str) -> bool {
        class_name == Self::class_name()
    }

    /// Whether every node emitted for this type carries at least one entry.
    fn requires_entries() -> bool {
        false
    }

    /// Produces the value stored in the parent entry.
    ///
    /// Scalars return [`Value::Scalar`], absent values [`Value::Null`], everything
    /// else a node stamped with a fresh or shared identity key.
    fn marshall(&self, context: &mut MarshalContext) -> Result<Value, Error>;

    fn unmarshall(value: &Value, context: &mut UnmarshalContext) -> Result<Self, Error> {
        match value {
            Value::Node(node) => Self::unmarshall_node(node, context),
            Value::Scalar(scalar) => Self::unmarshall_scalar(scalar, context),
            Value::Null => Self::unmarshall_null(context),
        }
    }

    fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error>;

    #[allow(unused_variables)]
    fn unmarshall_scalar(scalar: &Scalar, context: &mut UnmarshalContext) -> Result<Self, Error> {
        Err(Error::field_assignment(format!(
            "expected `{}`, found {} scalar",
            Self::class_name(),
            scalar.kind()
        )))
    }

    #[allow(unused_variables)]
    fn unmarshall_null(context: &mut UnmarshalContext) -> Result<Self, Error> {
        Err(Error::field_assignment(format!(
            "null cannot be assigned to `{}`",
            Self::class_name()
        )))
    }

    /// Reconstructs `node` into an already allocated instance.
    ///
    /// Shared pointers register the allocation before calling this, so references
    /// met while filling resolve to it.
    fn unmarshall_into(&mut self, node: &Node, context: &mut UnmarshalContext) -> Result<(), Error> {
        *self = Self::unmarshall_node(node, context)?;
        Ok(())
    }

    fn allocate() -> Result<Self, Error> {
        Ok(Self::marshal_default())
    }
}

/// Named field access for record-shaped types.
pub trait Record: Marshal {
    /// Adds one entry per declared, non-skipped field, in declaration order.
    fn marshal_fields(&self, node: &mut Node, context: &mut MarshalContext) -> Result<(), Error>;

    /// Assigns a declared field by name; `Ok(false)` when no field has that name.
    fn assign_field(
        &mut self,
        name: &str,
        value: &Value,
        context: &mut UnmarshalContext,
    ) -> Result<bool, Error>;

    /// Appends the materialized container payload after the declared fields.
    #[allow(unused_variables)]
    fn marshal_payload(&self, node: &mut Node, context: &mut MarshalContext) -> Result<(), Error> {
        Ok(())
    }

    /// Materializes the deferred container payload once every declared field is set.
    #[allow(unused_variables)]
    fn fill_payload(&mut self, entry: &Entry, context: &mut UnmarshalContext) -> Result<(), Error> {
        Ok(())
    }

    /// Post-reconstruction hook, run once all fields and entries are set.
    fn after_unmarshal(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// Unit-only enumerations addressed by constant name.
pub trait EnumConstant: Sized {
    fn constant_name(&self) -> &'static str;

    /// Accepts current names and declared aliases.
    fn from_constant_name(name: &str) -> Option<Self>;

    fn constant_names() -> &'static [&'static str];
}

/// A container of key/value pairs.
pub trait AssociativeContainer {
    type Key: Marshal;
    type Value: Marshal;

    /// Set when [`AssociativeContainer::insert_entry`] does more than store the pair.
    const CUSTOM_INSERT: bool = false;

    fn entry_pairs(&self) -> Vec<(&Self::Key, &Self::Value)>;

    fn clear_entries(&mut self);

    fn insert_entry(&mut self, key: Self::Key, value: Self::Value);
}

/// A container of elements.
pub trait SequentialContainer {
    type Element: Marshal;

    /// Set when [`SequentialContainer::push_element`] does more than append.
    const CUSTOM_INSERT: bool = false;

    fn elements(&self) -> Vec<&Self::Element>;

    /// Drops every element and any size bookkeeping.
    fn reset_elements(&mut self);

    fn push_element(&mut self, element: Self::Element);
}

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

//! The intermediate representation produced by marshalling.
//!
//! A [`Node`] is an ordered list of named [`Entry`] values plus identity and type
//! metadata. Entry order is significant: declared fields come first in declaration
//! order, and a container's reserved payload entry comes last.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Class name of the node produced for an absent root value.
pub const NULL_CLASS: &str = "null";

/// Class name of nodes holding a type used as a value.
pub const TYPE_LITERAL_CLASS: &str = "type";

/// Entry name holding the wrapped value of a standalone scalar node.
pub const SCALAR_VALUE_FIELD: &str = "value";

/// Entry name holding the constant name of an enumeration node.
pub const ENUM_NAME_FIELD: &str = "name";

/// Entry name holding the referenced class name of a type-literal node.
pub const TYPE_LITERAL_FIELD: &str = "class";

/// Identity key of nodes a backend synthesizes inside a container payload. They stand
/// for no source object, so they never share the key of a real node.
pub const SYNTHETIC_KEY: u32 = u32::MAX;

/// A leaf value that backends render as text or as a native primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
}

impl Scalar {
    /// Short name of the scalar kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::UInt(_) => "uint",
            Scalar::Float(_) => "float",
            Scalar::Char(_) => "char",
            Scalar::Str(_) => "string",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::UInt(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Char(v) => write!(f, "{:?}", v),
            Scalar::Str(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

/// The value side of an [`Entry`]: a scalar, a nested node, or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Scalar(Scalar),
    Node(Node),
}

impl Value {
    #[inline(always)]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Short description of the value kind, used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Scalar(scalar) => format!("{} scalar", scalar.kind()),
            Value::Node(node) => format!("node of class `{}`", node.class_name()),
        }
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<Node> for Value {
    fn from(value: Node) -> Self {
        Value::Node(value)
    }
}

/// A single named value inside a [`Node`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    name: String,
    value: Value,
}

impl Entry {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Entry {
        Entry {
            name: name.into(),
            value: value.into(),
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

/// Backend-agnostic serialized state of one object.
///
/// `class_name` names the target type, or the element type for arrays. A node whose
/// `identity_key` was already seen earlier in the same tree carries no entries: it is
/// a reference to the first occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    class_name: String,
    is_array: bool,
    is_primitive_scalar: bool,
    identity_key: u32,
    entries: Vec<Entry>,
}

impl Node {
    pub fn new(
        class_name: impl Into<String>,
        is_array: bool,
        is_primitive_scalar: bool,
        identity_key: u32,
    ) -> Node {
        Node {
            class_name: class_name.into(),
            is_array,
            is_primitive_scalar,
            identity_key,
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn add_all(&mut self, entries: impl IntoIterator<Item = Entry>) {
        self.entries.extend(entries);
    }

    #[inline(always)]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the first entry with the given name.
    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    #[inline(always)]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    #[inline(always)]
    pub fn is_array(&self) -> bool {
        self.is_array
    }

    #[inline(always)]
    pub fn is_primitive_scalar(&self) -> bool {
        self.is_primitive_scalar
    }

    #[inline(always)]
    pub fn identity_key(&self) -> u32 {
        self.identity_key
    }

    pub(crate) fn set_identity_key(&mut self, identity_key: u32) {
        self.identity_key = identity_key;
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

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

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};

/// Outcome of registering an object with the [`IdentityWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// First occurrence in this session; the object must be walked.
    First(u32),
    /// The object was already emitted under this key.
    Seen(u32),
}

impl Visit {
    #[inline(always)]
    pub fn key(self) -> u32 {
        match self {
            Visit::First(key) | Visit::Seen(key) => key,
        }
    }
}

/// Marshal-side identity table.
///
/// Objects are keyed by the `TypeId` of the pointee together with its address, so two
/// allocations of different types that happen to share an address never collide.
/// Every key handed out, registered or fresh, is unique within the session.
///
/// # Examples
///
/// ```rust
/// use graph_marshal_core::resolver::identity::{IdentityWriter, Visit};
/// use std::rc::Rc;
///
/// let mut identities = IdentityWriter::new();
/// let shared = Rc::new(42);
///
/// let first = identities.register_rc(&shared);
/// assert!(matches!(first, Visit::First(_)));
///
/// let again = identities.register_rc(&shared.clone());
/// assert_eq!(again, Visit::Seen(first.key()));
/// ```
#[derive(Default)]
pub struct IdentityWriter {
    keys: HashMap<(TypeId, usize), u32>,
    owners: HashMap<u32, (TypeId, usize)>,
    next_key: u32,
}

impl IdentityWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key for a value without identity of its own.
    pub fn fresh_key(&mut self) -> u32 {
        let key = self.next_key;
        self.next_key += 1;
        key
    }

    pub fn register(&mut self, type_id: TypeId, address: usize) -> Visit {
        if let Some(&key) = self.keys.get(&(type_id, address)) {
            return Visit::Seen(key);
        }
        let key = self.fresh_key();
        self.keys.insert((type_id, address), key);
        self.owners.insert(key, (type_id, address));
        Visit::First(key)
    }

    /// Whether `key` was handed out to a registered object.
    pub fn is_registered(&self, key: u32) -> bool {
        self.owners.contains_key(&key)
    }

    /// Moves the object registered under `from` onto the key `to`.
    ///
    /// A pointer whose value is itself a shared pointer has no node of its own; it
    /// shares the inner pointer's node, so later visits must answer with that key.
    pub fn rebind(&mut self, from: u32, to: u32) {
        if let Some(owner) = self.owners.remove(&from) {
            self.keys.insert(owner, to);
        }
    }

    pub fn register_rc<T: ?Sized + 'static>(&mut self, rc: &std::rc::Rc<T>) -> Visit {
        let address = std::rc::Rc::as_ptr(rc) as *const () as usize;
        self.register(TypeId::of::<T>(), address)
    }

    pub fn register_arc<T: ?Sized + 'static>(&mut self, arc: &std::sync::Arc<T>) -> Visit {
        let address = std::sync::Arc::as_ptr(arc) as *const () as usize;
        self.register(TypeId::of::<T>(), address)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.owners.clear();
        self.next_key = 0;
    }
}

/// Unmarshal-side identity table.
///
/// Holds the reconstructed shared pointers by (pointer type, identity key) so a later
/// node carrying the same key resolves to the same allocation.
#[derive(Default)]
pub struct IdentityReader {
    instances: HashMap<(TypeId, u32), Box<dyn Any>>,
    keys: HashSet<u32>,
}

impl IdentityReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: 'static>(&mut self, key: u32, instance: T) {
        self.instances
            .insert((TypeId::of::<T>(), key), Box::new(instance));
        self.keys.insert(key);
    }

    /// Whether any pointer was reconstructed under `key`, whatever its type.
    pub fn contains_key(&self, key: u32) -> bool {
        self.keys.contains(&key)
    }

    pub fn lookup<T: Clone + 'static>(&self, key: u32) -> Option<T> {
        self.instances
            .get(&(TypeId::of::<T>(), key))?
            .downcast_ref::<T>()
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.keys.clear();
    }
}

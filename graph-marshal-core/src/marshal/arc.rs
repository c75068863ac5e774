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

//! `Arc<T>` and `Arc<Mutex<T>>`, the thread-safe counterparts of `rc.rs`.

use crate::error::Error;
use crate::marshal::{Marshal, MarshalDefault, Shape};
use crate::node::{Node, Value};
use crate::resolver::context::{MarshalContext, UnmarshalContext};
use crate::resolver::identity::Visit;
use std::borrow::Cow;
use std::sync::{Arc, Mutex, TryLockError};

#[cold]
fn poisoned<T: Marshal>() -> Error {
    Error::unknown(format!("mutex guarding `{}` is poisoned", T::class_name()))
}

impl<T: Marshal> Marshal for Arc<T> {
    fn class_name() -> Cow<'static, str> {
        T::class_name()
    }

    fn node_class_name() -> Cow<'static, str> {
        T::node_class_name()
    }

    fn shape() -> Shape {
        T::shape()
    }

    fn accepts_class_name(class_name: &str) -> bool {
        T::accepts_class_name(class_name)
    }

    fn requires_entries() -> bool {
        T::requires_entries()
    }

    fn marshall(&self, context: &mut MarshalContext) -> Result<Value, Error> {
        match context.identities().register_arc(self) {
            Visit::Seen(key) => Ok(Value::Node(context.reference_node::<T>(key))),
            Visit::First(key) => {
                let value = self.as_ref().marshall(context)?;
                Ok(Value::Node(context.restamp::<T>(value, key)))
            }
        }
    }

    fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
        let key = node.identity_key();
        if let Some(shared) = context.identities().lookup::<Arc<T>>(key) {
            return Ok(shared);
        }
        context.check_complete::<T>(node)?;
        let shared = Arc::new(T::unmarshall_node(node, context)?);
        context.identities().register(key, shared.clone());
        Ok(shared)
    }
}

impl<T: MarshalDefault> MarshalDefault for Arc<T> {
    fn marshal_default() -> Self {
        Arc::new(T::marshal_default())
    }
}

impl<T: Marshal> Marshal for Arc<Mutex<T>> {
    fn class_name() -> Cow<'static, str> {
        T::class_name()
    }

    fn node_class_name() -> Cow<'static, str> {
        T::node_class_name()
    }

    fn shape() -> Shape {
        T::shape()
    }

    fn accepts_class_name(class_name: &str) -> bool {
        T::accepts_class_name(class_name)
    }

    fn requires_entries() -> bool {
        T::requires_entries()
    }

    fn marshall(&self, context: &mut MarshalContext) -> Result<Value, Error> {
        match context.identities().register_arc(self) {
            Visit::Seen(key) => Ok(Value::Node(context.reference_node::<T>(key))),
            Visit::First(key) => {
                let inner = self.try_lock().map_err(|err| match err {
                    TryLockError::WouldBlock => Error::unsupported_shape(format!(
                        "`{}` is locked while being marshalled",
                        T::class_name()
                    )),
                    TryLockError::Poisoned(_) => poisoned::<T>(),
                })?;
                let value = inner.marshall(context)?;
                Ok(Value::Node(context.restamp::<T>(value, key)))
            }
        }
    }

    fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
        let key = node.identity_key();
        if let Some(shared) = context.identities().lookup::<Arc<Mutex<T>>>(key) {
            return Ok(shared);
        }
        context.check_complete::<T>(node)?;
        let shared = Arc::new(Mutex::new(T::allocate()?));
        context.identities().register(key, shared.clone());
        shared
            .lock()
            .map_err(|_| poisoned::<T>())?
            .unmarshall_into(node, context)?;
        Ok(shared)
    }
}

impl<T: MarshalDefault> MarshalDefault for Arc<Mutex<T>> {
    fn marshal_default() -> Self {
        Arc::new(Mutex::new(T::marshal_default()))
    }
}

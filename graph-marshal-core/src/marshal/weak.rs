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

//! Weak back-pointers. A weak reference marshals as the object it points to and
//! unmarshals to a downgrade of that object's shared reconstruction; a dangling one
//! marshals as null.

use crate::error::Error;
use crate::marshal::{Marshal, MarshalDefault, Shape};
use crate::node::{Node, Value, NULL_CLASS};
use crate::resolver::context::{MarshalContext, UnmarshalContext};
use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::{self, Rc};
use std::sync::{self, Arc, Mutex};

impl<T: Marshal> Marshal for rc::Weak<RefCell<T>> {
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
        class_name == NULL_CLASS || T::accepts_class_name(class_name)
    }

    fn requires_entries() -> bool {
        T::requires_entries()
    }

    fn marshall(&self, context: &mut MarshalContext) -> Result<Value, Error> {
        match self.upgrade() {
            Some(shared) => shared.marshall(context),
            None => Ok(Value::Null),
        }
    }

    fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
        if node.class_name() == NULL_CLASS && node.is_empty() {
            return Ok(rc::Weak::new());
        }
        let shared = <Rc<RefCell<T>>>::unmarshall_node(node, context)?;
        Ok(Rc::downgrade(&shared))
    }

    fn unmarshall_null(_: &mut UnmarshalContext) -> Result<Self, Error> {
        Ok(rc::Weak::new())
    }
}

impl<T> MarshalDefault for rc::Weak<RefCell<T>> {
    fn marshal_default() -> Self {
        rc::Weak::new()
    }
}

impl<T: Marshal> Marshal for sync::Weak<Mutex<T>> {
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
        class_name == NULL_CLASS || T::accepts_class_name(class_name)
    }

    fn requires_entries() -> bool {
        T::requires_entries()
    }

    fn marshall(&self, context: &mut MarshalContext) -> Result<Value, Error> {
        match self.upgrade() {
            Some(shared) => shared.marshall(context),
            None => Ok(Value::Null),
        }
    }

    fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
        if node.class_name() == NULL_CLASS && node.is_empty() {
            return Ok(sync::Weak::new());
        }
        let shared = <Arc<Mutex<T>>>::unmarshall_node(node, context)?;
        Ok(Arc::downgrade(&shared))
    }

    fn unmarshall_null(_: &mut UnmarshalContext) -> Result<Self, Error> {
        Ok(sync::Weak::new())
    }
}

impl<T> MarshalDefault for sync::Weak<Mutex<T>> {
    fn marshal_default() -> Self {
        sync::Weak::new()
    }
}

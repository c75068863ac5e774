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
use crate::marshal::{Marshal, MarshalDefault, Shape};
use crate::node::{Node, Scalar, Value};
use crate::resolver::context::{MarshalContext, UnmarshalContext};
use std::borrow::Cow;

// Boxes are uniquely owned and marshal as the value they hold.
impl<T: Marshal> Marshal for Box<T> {
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
        self.as_ref().marshall(context)
    }

    fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
        T::unmarshall_node(node, context).map(Box::new)
    }

    fn unmarshall_scalar(scalar: &Scalar, context: &mut UnmarshalContext) -> Result<Self, Error> {
        T::unmarshall_scalar(scalar, context).map(Box::new)
    }

    fn unmarshall_null(context: &mut UnmarshalContext) -> Result<Self, Error> {
        T::unmarshall_null(context).map(Box::new)
    }

    fn unmarshall_into(&mut self, node: &Node, context: &mut UnmarshalContext) -> Result<(), Error> {
        self.as_mut().unmarshall_into(node, context)
    }

    fn allocate() -> Result<Self, Error> {
        T::allocate().map(Box::new)
    }
}

impl<T: MarshalDefault> MarshalDefault for Box<T> {
    fn marshal_default() -> Self {
        Box::new(T::marshal_default())
    }
}

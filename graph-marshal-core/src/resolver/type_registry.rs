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
use crate::marshal::{Marshal, Shape, TypeHandle};
use crate::node::Node;
use crate::resolver::context::{MarshalContext, UnmarshalContext};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::collections::HashMap;

type MarshalFn = fn(&dyn Any, &mut MarshalContext) -> Result<Node, Error>;
type UnmarshalFn = fn(&Node, &mut UnmarshalContext) -> Result<Box<dyn Any>, Error>;

/// Type-erased entry points for one registered type.
#[derive(Clone, Copy, Debug)]
pub struct Harness {
    marshal_fn: MarshalFn,
    unmarshal_fn: UnmarshalFn,
}

fn marshal_erased<T: Marshal>(value: &dyn Any, context: &mut MarshalContext) -> Result<Node, Error> {
    let value = value.downcast_ref::<T>().ok_or_else(|| {
        Error::unsupported_shape(format!(
            "value is not a `{}` as its registration claims",
            T::class_name()
        ))
    })?;
    context.marshall_node(value)
}

fn unmarshal_erased<T: Marshal>(
    node: &Node,
    context: &mut UnmarshalContext,
) -> Result<Box<dyn Any>, Error> {
    let value: T = context.unmarshall_node(node)?;
    Ok(Box::new(value))
}

impl Harness {
    pub fn new(marshal_fn: MarshalFn, unmarshal_fn: UnmarshalFn) -> Harness {
        Harness {
            marshal_fn,
            unmarshal_fn,
        }
    }

    pub fn of<T: Marshal>() -> Harness {
        Harness::new(marshal_erased::<T>, unmarshal_erased::<T>)
    }

    pub fn marshall(&self, value: &dyn Any, context: &mut MarshalContext) -> Result<Node, Error> {
        (self.marshal_fn)(value, context)
    }

    pub fn unmarshall(
        &self,
        node: &Node,
        context: &mut UnmarshalContext,
    ) -> Result<Box<dyn Any>, Error> {
        (self.unmarshal_fn)(node, context)
    }
}

#[derive(Clone, Debug)]
pub struct TypeInfo {
    class_name: Cow<'static, str>,
    type_id: TypeId,
    shape: Shape,
    harness: Harness,
}

impl TypeInfo {
    pub fn of<T: Marshal>() -> TypeInfo {
        TypeInfo {
            class_name: T::class_name(),
            type_id: TypeId::of::<T>(),
            shape: T::shape(),
            harness: Harness::of::<T>(),
        }
    }

    #[inline(always)]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    #[inline(always)]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline(always)]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[inline(always)]
    pub fn harness(&self) -> &Harness {
        &self.harness
    }
}

/// Class names and runtime type ids of the types that can appear behind
/// `Box<dyn Any>` or be referenced by a [`TypeHandle`].
pub struct TypeRegistry {
    by_type_id: HashMap<TypeId, TypeInfo>,
    by_name: HashMap<String, TypeId>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut registry = TypeRegistry {
            by_type_id: HashMap::new(),
            by_name: HashMap::new(),
        };
        registry.register_builtins();
        registry
    }
}

macro_rules! register_scalars {
    ($registry:expr, $($ty:ty),+ $(,)?) => {
        $(
            $registry.insert(TypeInfo::of::<$ty>());
            $registry.insert(TypeInfo::of::<Vec<$ty>>());
        )+
    };
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn register_builtins(&mut self) {
        register_scalars!(
            self,
            bool,
            i8,
            i16,
            i32,
            i64,
            isize,
            u8,
            u16,
            u32,
            u64,
            usize,
            f32,
            f64,
            char,
            String,
            NaiveDate,
            NaiveDateTime,
            DateTime<Utc>,
        );
        self.insert(TypeInfo::of::<TypeHandle>());
    }

    fn insert(&mut self, info: TypeInfo) {
        self.by_name
            .insert(info.class_name().to_string(), info.type_id());
        self.by_type_id.insert(info.type_id(), info);
    }

    /// Registers `T` under [`Marshal::class_name`].
    ///
    /// Registering the same type twice is a no-op; claiming a name already taken by
    /// another type fails.
    pub fn register<T: Marshal>(&mut self) -> Result<(), Error> {
        let info = TypeInfo::of::<T>();
        if let Some(existing) = self.by_name.get(info.class_name()) {
            if *existing == info.type_id() {
                return Ok(());
            }
            return Err(Error::invalid_registration(format!(
                "class name `{}` is already registered for another type",
                info.class_name()
            )));
        }
        if let Some(existing) = self.by_type_id.get(&info.type_id()) {
            return Err(Error::invalid_registration(format!(
                "type is already registered as `{}`",
                existing.class_name()
            )));
        }
        self.insert(info);
        Ok(())
    }

    pub fn get_by_type_id(&self, type_id: TypeId) -> Option<&TypeInfo> {
        self.by_type_id.get(&type_id)
    }

    pub fn get_by_name(&self, class_name: &str) -> Option<&TypeInfo> {
        self.by_type_id.get(self.by_name.get(class_name)?)
    }

    pub fn contains_name(&self, class_name: &str) -> bool {
        self.by_name.contains_key(class_name)
    }

    pub fn len(&self) -> usize {
        self.by_type_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type_id.is_empty()
    }
}

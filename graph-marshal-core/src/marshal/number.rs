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
use crate::marshal::util::{scalar_mismatch, unmarshall_scalar_node};
use crate::marshal::{Marshal, MarshalDefault, Shape};
use crate::node::{Node, Scalar, Value};
use crate::resolver::context::{MarshalContext, UnmarshalContext};
use std::borrow::Cow;
use std::str::FromStr;

const INTEGER_CLASSES: [&str; 10] = [
    "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64", "usize",
];
const FLOAT_CLASSES: [&str; 2] = ["f32", "f64"];

/// Integer fields accept any integer class so a widened or narrowed field still loads;
/// the value itself is range-checked.
fn integer_from_scalar<T>(scalar: &Scalar, class_name: &str) -> Result<T, Error>
where
    T: TryFrom<i64> + TryFrom<u64> + FromStr,
{
    let narrowed = match scalar {
        Scalar::Int(v) => T::try_from(*v).ok(),
        Scalar::UInt(v) => T::try_from(*v).ok(),
        Scalar::Str(s) => s.trim().parse::<T>().ok(),
        other => return Err(scalar_mismatch(class_name, other)),
    };
    narrowed.ok_or_else(|| {
        Error::field_assignment(format!("{} does not fit in `{}`", scalar, class_name))
    })
}

fn float_from_scalar(scalar: &Scalar, class_name: &str) -> Result<f64, Error> {
    match scalar {
        Scalar::Float(v) => Ok(*v),
        Scalar::Int(v) => Ok(*v as f64),
        Scalar::UInt(v) => Ok(*v as f64),
        Scalar::Str(s) => f64::from_str(s.trim()).map_err(|_| {
            Error::field_assignment(format!("{} is not a valid `{}`", scalar, class_name))
        }),
        other => Err(scalar_mismatch(class_name, other)),
    }
}

macro_rules! impl_int_marshal {
    ($ty:ty, $name:literal, $variant:ident, $wide:ty) => {
        impl Marshal for $ty {
            #[inline(always)]
            fn class_name() -> Cow<'static, str> {
                Cow::Borrowed($name)
            }

            #[inline(always)]
            fn shape() -> Shape {
                Shape::Scalar
            }

            fn accepts_class_name(class_name: &str) -> bool {
                INTEGER_CLASSES.contains(&class_name)
            }

            #[inline(always)]
            fn marshall(&self, _: &mut MarshalContext) -> Result<Value, Error> {
                Ok(Value::Scalar(Scalar::$variant(*self as $wide)))
            }

            fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
                unmarshall_scalar_node(node, context)
            }

            fn unmarshall_scalar(scalar: &Scalar, _: &mut UnmarshalContext) -> Result<Self, Error> {
                integer_from_scalar(scalar, $name)
            }
        }

        impl MarshalDefault for $ty {
            #[inline(always)]
            fn marshal_default() -> Self {
                0
            }
        }
    };
}

impl_int_marshal!(i8, "i8", Int, i64);
impl_int_marshal!(i16, "i16", Int, i64);
impl_int_marshal!(i32, "i32", Int, i64);
impl_int_marshal!(i64, "i64", Int, i64);
impl_int_marshal!(isize, "isize", Int, i64);
impl_int_marshal!(u8, "u8", UInt, u64);
impl_int_marshal!(u16, "u16", UInt, u64);
impl_int_marshal!(u32, "u32", UInt, u64);
impl_int_marshal!(u64, "u64", UInt, u64);
impl_int_marshal!(usize, "usize", UInt, u64);

macro_rules! impl_float_marshal {
    ($ty:ty, $name:literal) => {
        impl Marshal for $ty {
            #[inline(always)]
            fn class_name() -> Cow<'static, str> {
                Cow::Borrowed($name)
            }

            #[inline(always)]
            fn shape() -> Shape {
                Shape::Scalar
            }

            fn accepts_class_name(class_name: &str) -> bool {
                FLOAT_CLASSES.contains(&class_name) || INTEGER_CLASSES.contains(&class_name)
            }

            #[inline(always)]
            fn marshall(&self, _: &mut MarshalContext) -> Result<Value, Error> {
                Ok(Value::Scalar(Scalar::Float(*self as f64)))
            }

            fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
                unmarshall_scalar_node(node, context)
            }

            fn unmarshall_scalar(scalar: &Scalar, _: &mut UnmarshalContext) -> Result<Self, Error> {
                float_from_scalar(scalar, $name).map(|v| v as $ty)
            }
        }

        impl MarshalDefault for $ty {
            #[inline(always)]
            fn marshal_default() -> Self {
                0.0
            }
        }
    };
}

impl_float_marshal!(f32, "f32");
impl_float_marshal!(f64, "f64");

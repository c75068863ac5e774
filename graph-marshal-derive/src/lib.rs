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

//! Derive macro for the graph marshalling engine.
//!
//! `#[derive(Marshal)]` generates `MarshalDefault` and `Marshal` for structs and
//! unit-only enums, plus `Record` for structs and `EnumConstant` for enums. The
//! generated code refers to `graph_marshal_core`, which must be a dependency of the
//! deriving crate.
//!
//! ## Structs
//!
//! Every non-skipped field becomes one entry named after the field, in declaration
//! order. Tuple struct fields are named by position.
//!
//! ```rust,ignore
//! use graph_marshal::Marshal;
//! use std::collections::HashMap;
//!
//! #[derive(Marshal, Debug, PartialEq)]
//! #[marshal(name = "app.Customer", post_unmarshal = "rebuild_index")]
//! struct Customer {
//!     name: String,
//!     #[marshal(rename = "mail", alias = "email")]
//!     address: String,
//!     orders: Vec<i64>,
//!     #[marshal(skip)]
//!     index: HashMap<i64, usize>,
//! }
//!
//! impl Customer {
//!     fn rebuild_index(&mut self) {
//!         self.index = self.orders.iter().enumerate().map(|(i, o)| (*o, i)).collect();
//!     }
//! }
//! ```
//!
//! Container attributes:
//! - `name = "..."`: class name; defaults to the type's module path and name.
//! - `associative` / `sequential`: the type implements `AssociativeContainer` or
//!   `SequentialContainer`, and its entries are marshalled after the declared fields.
//! - `post_unmarshal = "method"`: `fn(&mut self)` run after every field is set.
//! - `allocate = "path"`: `fn() -> Result<Self, Error>` used instead of `MarshalDefault`
//!   to allocate the instance being reconstructed. An `Err` aborts the call.
//!
//! Field attributes: `skip` (restored with `Default::default()`), `rename = "..."`,
//! and `alias = "..."` (repeatable, accepted when unmarshalling).
//!
//! ## Enums
//!
//! Only unit variants are supported. Variants accept `default` (the value
//! `MarshalDefault` returns; the first variant otherwise), `rename` and `alias`.
//!
//! ```rust,ignore
//! #[derive(Marshal, Debug, PartialEq)]
//! enum Status {
//!     #[marshal(default)]
//!     Active,
//!     #[marshal(alias = "Disabled")]
//!     Suspended,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod object;
mod util;

#[proc_macro_derive(Marshal, attributes(marshal))]
pub fn proc_macro_derive_marshal(input: proc_macro::TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    object::derive_marshal(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

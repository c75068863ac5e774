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

//! # Graph Marshal
//!
//! Converts in-memory object graphs into a tree of generic [`Node`]s and back,
//! independently of any textual or binary format.
//!
//! - **Identity**: a value reached through several `Rc`/`Arc` handles is marshalled
//!   once; later occurrences become reference nodes carrying its identity key, and
//!   unmarshalling restores one shared allocation. Cycles through `Rc<RefCell<T>>`
//!   and `Arc<Mutex<T>>` terminate.
//! - **Schema migration**: class names and enum constant names are remapped through
//!   a [`MigrationRegistry`] while unmarshalling, and entries that match no field are
//!   reported as [`Diagnostic::ObsoleteField`] instead of failing.
//! - **Containers**: maps and sequences are materialized through their own insert
//!   operations after the declared fields are set, and legacy payload layouts are
//!   recovered.
//! - **Backends**: a [`FormatBackend`] decides how node trees are built and how
//!   container payloads look; [`TreeBackend`] is the default.
//!
//! ## Quick start
//!
//! ```rust
//! use graph_marshal::{GraphMarshal, Marshal};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! #[derive(Marshal, Debug)]
//! #[marshal(name = "demo.Account")]
//! struct Account {
//!     owner: String,
//!     balance: i64,
//! }
//!
//! #[derive(Marshal, Debug)]
//! #[marshal(name = "demo.Bank")]
//! struct Bank {
//!     accounts: Vec<Rc<RefCell<Account>>>,
//!     largest: Option<Rc<RefCell<Account>>>,
//! }
//!
//! let shared = Rc::new(RefCell::new(Account { owner: "ann".to_string(), balance: 90 }));
//! let bank = Bank {
//!     accounts: vec![shared.clone()],
//!     largest: Some(shared),
//! };
//!
//! let engine = GraphMarshal::default();
//! let node = engine.marshall(&bank).unwrap();
//! let back: Bank = engine.unmarshall(&node).unwrap();
//! assert!(Rc::ptr_eq(&back.accounts[0], back.largest.as_ref().unwrap()));
//! assert_eq!(back.accounts[0].borrow().balance, 90);
//! ```
//!
//! ## Schema migration
//!
//! ```rust
//! use graph_marshal::{GraphMarshal, Marshal, RenameTable};
//!
//! #[derive(Marshal, Debug, PartialEq)]
//! #[marshal(name = "demo.v1.Colour")]
//! enum OldColour {
//!     Crimson,
//! }
//!
//! #[derive(Marshal, Debug, PartialEq)]
//! #[marshal(name = "demo.v2.Color")]
//! enum Color {
//!     Red,
//!     Green,
//! }
//!
//! let stored = GraphMarshal::default().marshall(&OldColour::Crimson).unwrap();
//!
//! let engine = GraphMarshal::default().migrations(
//!     RenameTable::new()
//!         .rename_type("demo.v1.Colour", "demo.v2.Color")
//!         .rename_enum_constant("demo.v2.Color", "Crimson", "Red"),
//! );
//! let color: Color = engine.unmarshall(&stored).unwrap();
//! assert_eq!(color, Color::Red);
//! ```
//!
//! Derived impls refer to `graph_marshal_core`, so crates deriving [`Marshal`] depend
//! on it next to this crate.

pub use graph_marshal_core::{
    backend, marshal, node, AssociativeContainer, Config, ContainerPayload, Diagnostic,
    EnumConstant, Entry, Error, FormatBackend, GraphMarshal, Marshal, MarshalContext,
    MarshalDefault, MigrationRegistry, Node, NoMigrations, Record, RenameTable, Scalar,
    SequentialContainer, Shape, TreeBackend, TypeHandle, UnmarshalContext, Value,
};
pub use graph_marshal_derive::Marshal;

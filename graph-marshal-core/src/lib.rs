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

//! # Graph Marshal Core
//!
//! Core of the graph-marshal engine: it converts application object graphs into a
//! backend-agnostic tree of [`Node`]s ("marshalling") and reconstructs equivalent
//! graphs from such trees ("unmarshalling").
//!
//! ## Architecture
//!
//! - **`node`**: the intermediate representation (`Node`, `Entry`, `Value`, `Scalar`)
//! - **`marshal`**: the `Marshal` descriptor trait and its impls for built-in types
//! - **`resolver`**: identity registry, migration registry, type registry and the
//!   per-call contexts
//! - **`backend`**: the contract format backends implement, plus `TreeBackend`
//! - **`graph_marshal`**: the `GraphMarshal` engine and its public API
//! - **`config`**, **`diagnostics`**, **`error`**: ambient configuration, non-fatal
//!   reports and the error taxonomy
//!
//! ## Key Concepts
//!
//! ### Identity
//!
//! Only shared-ownership pointers carry identity: `Rc<T>`, `Rc<RefCell<T>>`,
//! `Arc<T>`, `Arc<Mutex<T>>` and weak pointers to the cell variants. The first
//! occurrence of an allocation is walked; every later one is emitted as an
//! entry-less node with the same identity key. Unmarshalling restores one shared
//! allocation per key, and cell variants are registered before they are filled, so
//! cycles close on the way back.
//!
//! ### Schema evolution
//!
//! - Class names and enum constants pass through a [`MigrationRegistry`] first.
//! - Fields no longer declared are skipped and reported as diagnostics.
//! - Legacy container encodings (flat key/value payloads, chained arrays) are
//!   recovered.
//!
//! ## Usage
//!
//! This crate is typically used through the `graph-marshal` crate, which adds the
//! `#[derive(Marshal)]` macro.
//!
//! ```rust
//! use graph_marshal_core::{GraphMarshal, Node};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let engine = GraphMarshal::default();
//! let shared = Rc::new(RefCell::new(vec![1i32, 2, 3]));
//! let pair = vec![shared.clone(), shared];
//!
//! let node: Node = engine.marshall(&pair).unwrap();
//! let back: Vec<Rc<RefCell<Vec<i32>>>> = engine.unmarshall(&node).unwrap();
//! assert!(Rc::ptr_eq(&back[0], &back[1]));
//! ```

pub mod backend;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod graph_marshal;
pub mod marshal;
pub mod node;
pub mod resolver;

pub use backend::{ContainerPayload, FormatBackend, TreeBackend};
pub use config::Config;
pub use diagnostics::Diagnostic;
pub use error::Error;
pub use graph_marshal::GraphMarshal;
pub use marshal::{
    AssociativeContainer, EnumConstant, Marshal, MarshalDefault, Record, SequentialContainer,
    Shape, TypeHandle,
};
pub use node::{Entry, Node, Scalar, Value};
pub use resolver::context::{MarshalContext, UnmarshalContext};
pub use resolver::migration::{MigrationRegistry, NoMigrations, RenameTable};

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

//! Rename rules that let data persisted under older type definitions load against
//! the current ones.

use std::collections::{HashMap, HashSet};

/// Pure, total name lookups consulted while unmarshalling.
///
/// Both lookups return the input unchanged when no rule applies.
pub trait MigrationRegistry: Send + Sync {
    fn resolve_type_name<'a>(&'a self, original: &'a str) -> &'a str;

    /// `enum_class_name` is the current class name of the enumeration, after
    /// [`MigrationRegistry::resolve_type_name`] has been applied.
    fn resolve_enum_constant_name<'a>(
        &'a self,
        enum_class_name: &str,
        original: &'a str,
    ) -> &'a str;
}

/// Registry without any rename rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMigrations;

impl MigrationRegistry for NoMigrations {
    fn resolve_type_name<'a>(&'a self, original: &'a str) -> &'a str {
        original
    }

    fn resolve_enum_constant_name<'a>(&'a self, _: &str, original: &'a str) -> &'a str {
        original
    }
}

/// In-memory table of class and enum-constant renames.
///
/// Chained renames (`A -> B`, `B -> C`) resolve to the last name. A cyclic chain stops
/// at the last name before the cycle closes.
///
/// ```rust
/// use graph_marshal_core::resolver::migration::{MigrationRegistry, RenameTable};
///
/// let table = RenameTable::new()
///     .rename_type("app.OldUser", "app.Account")
///     .rename_type("app.Account", "app.User")
///     .rename_enum_constant("app.Color", "GREY", "GRAY");
/// assert_eq!(table.resolve_type_name("app.OldUser"), "app.User");
/// assert_eq!(table.resolve_type_name("app.Other"), "app.Other");
/// assert_eq!(table.resolve_enum_constant_name("app.Color", "GREY"), "GRAY");
/// ```
#[derive(Debug, Default, Clone)]
pub struct RenameTable {
    types: HashMap<String, String>,
    constants: HashMap<String, HashMap<String, String>>,
}

impl RenameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rename_type(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.types.insert(old.into(), new.into());
        self
    }

    pub fn rename_enum_constant(
        mut self,
        enum_class_name: impl Into<String>,
        old: impl Into<String>,
        new: impl Into<String>,
    ) -> Self {
        self.constants
            .entry(enum_class_name.into())
            .or_default()
            .insert(old.into(), new.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.constants.is_empty()
    }
}

fn follow<'a>(rules: &'a HashMap<String, String>, original: &'a str) -> &'a str {
    let mut current = original;
    let mut visited = HashSet::new();
    while let Some(next) = rules.get(current) {
        if !visited.insert(current) || visited.contains(next.as_str()) {
            break;
        }
        current = next;
    }
    current
}

impl MigrationRegistry for RenameTable {
    fn resolve_type_name<'a>(&'a self, original: &'a str) -> &'a str {
        follow(&self.types, original)
    }

    fn resolve_enum_constant_name<'a>(
        &'a self,
        enum_class_name: &str,
        original: &'a str,
    ) -> &'a str {
        match self.constants.get(enum_class_name) {
            Some(rules) => follow(rules, original),
            None => original,
        }
    }
}

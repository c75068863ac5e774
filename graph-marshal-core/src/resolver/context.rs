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

use crate::backend::FormatBackend;
use crate::config::Config;
use crate::diagnostics::{Diagnostic, DiagnosticLog};
use crate::error::Error;
use crate::marshal::{Marshal, Shape};
use crate::node::{Entry, Node, Value, NULL_CLASS, SCALAR_VALUE_FIELD};
use crate::resolver::identity::{IdentityReader, IdentityWriter};
use crate::resolver::migration::MigrationRegistry;
use crate::resolver::type_registry::TypeRegistry;
use std::borrow::Cow;
use std::collections::HashSet;

/// State of one `marshall` call. Dropped when the call returns.
pub struct MarshalContext<'a> {
    backend: &'a dyn FormatBackend,
    registry: &'a TypeRegistry,
    config: &'a Config,
    identities: IdentityWriter,
    depth: u32,
}

impl<'a> MarshalContext<'a> {
    pub fn new(
        backend: &'a dyn FormatBackend,
        registry: &'a TypeRegistry,
        config: &'a Config,
    ) -> MarshalContext<'a> {
        MarshalContext {
            backend,
            registry,
            config,
            identities: IdentityWriter::new(),
            depth: 0,
        }
    }

    #[inline(always)]
    pub fn backend(&self) -> &'a dyn FormatBackend {
        self.backend
    }

    #[inline(always)]
    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    #[inline(always)]
    pub fn config(&self) -> &'a Config {
        self.config
    }

    #[inline(always)]
    pub fn identities(&mut self) -> &mut IdentityWriter {
        &mut self.identities
    }

    /// Stamps an empty node under a fresh identity key.
    pub fn create_node(&mut self, class_name: &str, is_array: bool, is_primitive_scalar: bool) -> Node {
        let key = self.identities.fresh_key();
        self.backend
            .create_node(class_name, is_array, is_primitive_scalar, key)
    }

    /// Entry-less node standing for an object already emitted under `key`.
    pub fn reference_node<T: Marshal>(&self, key: u32) -> Node {
        let shape = T::shape();
        self.backend.create_node(
            &T::node_class_name(),
            shape == Shape::Array,
            shape == Shape::Scalar,
            key,
        )
    }

    pub fn marshall_value<T: Marshal>(&mut self, value: &T) -> Result<Value, Error> {
        self.enter()?;
        let result = value.marshall(self);
        self.leave();
        result
    }

    /// Marshals `value` into a standalone node, wrapping scalars and null.
    pub fn marshall_node<T: Marshal>(&mut self, value: &T) -> Result<Node, Error> {
        let value = self.marshall_value(value)?;
        Ok(match value {
            Value::Node(node) => node,
            other => {
                let key = self.identities.fresh_key();
                self.standalone::<T>(other, key)
            }
        })
    }

    /// Moves a marshalled value under the identity key of the pointer that owns it.
    ///
    /// When the value is already the node of another shared pointer, that node keeps
    /// its key and the owning pointer is rebound to it instead.
    pub fn restamp<T: Marshal>(&mut self, value: Value, key: u32) -> Node {
        match value {
            Value::Node(node)
                if node.identity_key() != key
                    && self.identities.is_registered(node.identity_key()) =>
            {
                self.identities.rebind(key, node.identity_key());
                node
            }
            Value::Node(mut node) => {
                node.set_identity_key(key);
                node
            }
            other => self.standalone::<T>(other, key),
        }
    }

    fn standalone<T: Marshal>(&self, value: Value, key: u32) -> Node {
        match value {
            Value::Node(node) => node,
            Value::Null => self.backend.create_node(NULL_CLASS, false, false, key),
            scalar @ Value::Scalar(_) => {
                let mut node = self
                    .backend
                    .create_node(&T::node_class_name(), false, true, key);
                node.add(Entry::new(SCALAR_VALUE_FIELD, scalar));
                node
            }
        }
    }

    fn enter(&mut self) -> Result<(), Error> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            self.depth -= 1;
            return Err(Error::depth_exceed(format!(
                "maximum nesting depth ({}) exceeded while marshalling",
                self.config.max_depth
            )));
        }
        Ok(())
    }

    #[inline(always)]
    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// State of one `unmarshall` call. Dropped when the call returns.
pub struct UnmarshalContext<'a> {
    backend: &'a dyn FormatBackend,
    registry: &'a TypeRegistry,
    migrations: &'a dyn MigrationRegistry,
    config: &'a Config,
    log: &'a DiagnosticLog,
    identities: IdentityReader,
    diagnostics: Vec<Diagnostic>,
    reported_fields: HashSet<(String, String)>,
    depth: u32,
}

impl<'a> UnmarshalContext<'a> {
    pub fn new(
        backend: &'a dyn FormatBackend,
        registry: &'a TypeRegistry,
        migrations: &'a dyn MigrationRegistry,
        config: &'a Config,
        log: &'a DiagnosticLog,
    ) -> UnmarshalContext<'a> {
        UnmarshalContext {
            backend,
            registry,
            migrations,
            config,
            log,
            identities: IdentityReader::new(),
            diagnostics: Vec::new(),
            reported_fields: HashSet::new(),
            depth: 0,
        }
    }

    #[inline(always)]
    pub fn backend(&self) -> &'a dyn FormatBackend {
        self.backend
    }

    #[inline(always)]
    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    #[inline(always)]
    pub fn migrations(&self) -> &'a dyn MigrationRegistry {
        self.migrations
    }

    #[inline(always)]
    pub fn config(&self) -> &'a Config {
        self.config
    }

    #[inline(always)]
    pub fn identities(&mut self) -> &mut IdentityReader {
        &mut self.identities
    }

    pub fn unmarshall_value<T: Marshal>(&mut self, value: &Value) -> Result<T, Error> {
        self.enter()?;
        let result = T::unmarshall(value, self);
        self.leave();
        result
    }

    pub fn unmarshall_node<T: Marshal>(&mut self, node: &Node) -> Result<T, Error> {
        self.enter()?;
        let result = T::unmarshall_node(node, self);
        self.leave();
        result
    }

    /// Class name of the type a node stands for: the migrated node class, suffixed
    /// with `[]` for arrays.
    pub fn resolve_class_name<'n>(&self, node: &'n Node) -> Cow<'n, str>
    where
        'a: 'n,
    {
        let migrations: &'n dyn MigrationRegistry = self.migrations;
        let resolved = migrations.resolve_type_name(node.class_name());
        if node.is_array() {
            Cow::Owned(format!("{}[]", resolved))
        } else {
            Cow::Borrowed(resolved)
        }
    }

    /// Fails unless the node's resolved class can be read as `T`.
    pub fn check_class<T: Marshal>(&self, node: &Node) -> Result<(), Error> {
        if !self.config.check_class_names {
            return Ok(());
        }
        let resolved = self.resolve_class_name(node);
        if T::accepts_class_name(&resolved) {
            return Ok(());
        }
        Err(Error::class_resolution(format!(
            "class `{}` does not resolve to `{}`",
            resolved,
            T::class_name()
        )))
    }

    /// Fails when an entry-less node stands for a value that always carries entries
    /// and nothing was reconstructed under its key, i.e. it references an object that
    /// was never emitted.
    pub fn check_complete<T: Marshal>(&self, node: &Node) -> Result<(), Error> {
        if node.is_empty()
            && node.class_name() != NULL_CLASS
            && T::requires_entries()
            && !self.identities.contains_key(node.identity_key())
        {
            return Err(Error::invalid_node(format!(
                "node of class `{}` references identity key {} that was never emitted",
                node.class_name(),
                node.identity_key()
            )));
        }
        Ok(())
    }

    pub fn report_obsolete_field(&mut self, class_name: &str, field: &str) {
        if !self.config.report_obsolete_fields {
            return;
        }
        if self
            .reported_fields
            .insert((class_name.to_string(), field.to_string()))
        {
            tracing::debug!(class_name, field, "skipping obsolete field");
            self.diagnostics.push(Diagnostic::ObsoleteField {
                class_name: class_name.to_string(),
                field: field.to_string(),
            });
        }
    }

    pub fn report_overridden_insert<T: Marshal>(&mut self, operation: &'static str) {
        let class_name = T::class_name();
        if self.log.first_report(&class_name, operation) {
            tracing::warn!(
                class_name = %class_name,
                operation,
                "container overrides its insertion operation; entries are inserted through it"
            );
            self.diagnostics.push(Diagnostic::OverriddenInsert {
                class_name: class_name.into_owned(),
                operation,
            });
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn enter(&mut self) -> Result<(), Error> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            self.depth -= 1;
            return Err(Error::depth_exceed(format!(
                "maximum nesting depth ({}) exceeded while unmarshalling",
                self.config.max_depth
            )));
        }
        Ok(())
    }

    #[inline(always)]
    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

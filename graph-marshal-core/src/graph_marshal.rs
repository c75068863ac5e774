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

use crate::backend::{FormatBackend, TreeBackend};
use crate::config::Config;
use crate::diagnostics::{Diagnostic, DiagnosticLog};
use crate::error::Error;
use crate::marshal::Marshal;
use crate::node::Node;
use crate::resolver::context::{MarshalContext, UnmarshalContext};
use crate::resolver::migration::{MigrationRegistry, NoMigrations};
use crate::resolver::type_registry::TypeRegistry;

/// The marshalling engine.
///
/// `GraphMarshal` turns object graphs into [`Node`] trees and back. Shared and
/// cyclic references held through `Rc`, `Arc` and their cell variants are emitted
/// once and restored as shared allocations; data persisted under older type
/// definitions loads through the configured [`MigrationRegistry`].
///
/// Every call opens a private session (identity registry and diagnostics) that is
/// discarded when the call returns, so one engine can serve many threads.
///
/// # Examples
///
/// Basic usage:
///
/// ```rust, ignore
/// use graph_marshal::{GraphMarshal, Marshal};
///
/// #[derive(Marshal, Debug, PartialEq)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// let engine = GraphMarshal::default();
/// let user = User { name: "Alice".to_string(), age: 30 };
/// let node = engine.marshall(&user).unwrap();
/// let back: User = engine.unmarshall(&node).unwrap();
/// assert_eq!(back, user);
/// ```
///
/// Custom configuration:
///
/// ```rust
/// use graph_marshal_core::resolver::migration::RenameTable;
/// use graph_marshal_core::GraphMarshal;
///
/// let engine = GraphMarshal::default()
///     .max_depth(64)
///     .report_obsolete_fields(false)
///     .migrations(RenameTable::new().rename_type("app.OldUser", "app.User"));
/// ```
pub struct GraphMarshal {
    config: Config,
    backend: Box<dyn FormatBackend>,
    migrations: Box<dyn MigrationRegistry>,
    registry: TypeRegistry,
    log: DiagnosticLog,
}

impl Default for GraphMarshal {
    fn default() -> Self {
        GraphMarshal {
            config: Config::default(),
            backend: Box::new(TreeBackend),
            migrations: Box::new(NoMigrations),
            registry: TypeRegistry::new(),
            log: DiagnosticLog::new(),
        }
    }
}

impl GraphMarshal {
    /// Sets the maximum nesting depth of a single call.
    ///
    /// Exceeding it fails with [`Error::DepthExceed`]. The default is
    /// [`DEFAULT_MAX_DEPTH`](crate::config::DEFAULT_MAX_DEPTH), enough for lists of
    /// several thousand links on a generously sized thread stack.
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Enables or disables checking a node's migrated class name against the
    /// requested type. Enabled by default.
    pub fn check_class_names(mut self, check_class_names: bool) -> Self {
        self.config.check_class_names = check_class_names;
        self
    }

    /// Enables or disables [`Diagnostic::ObsoleteField`] reports. Enabled by default.
    pub fn report_obsolete_fields(mut self, report_obsolete_fields: bool) -> Self {
        self.config.report_obsolete_fields = report_obsolete_fields;
        self
    }

    /// Replaces the default [`TreeBackend`].
    pub fn backend(mut self, backend: impl FormatBackend + 'static) -> Self {
        self.backend = Box::new(backend);
        self
    }

    /// Installs the rename rules consulted while unmarshalling.
    pub fn migrations(mut self, migrations: impl MigrationRegistry + 'static) -> Self {
        self.migrations = Box::new(migrations);
        self
    }

    #[inline(always)]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline(always)]
    pub fn get_type_registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Registers a type so it can be marshalled behind `Box<dyn Any>` and named by a
    /// [`TypeHandle`](crate::TypeHandle).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRegistration`] when another type already uses the same class
    /// name.
    ///
    /// # Examples
    ///
    /// ```rust, ignore
    /// use graph_marshal::{GraphMarshal, Marshal};
    ///
    /// #[derive(Marshal)]
    /// #[marshal(name = "app.User")]
    /// struct User { name: String }
    ///
    /// let mut engine = GraphMarshal::default();
    /// engine.register::<User>()?;
    /// ```
    pub fn register<T: Marshal>(&mut self) -> Result<(), Error> {
        self.registry.register::<T>()
    }

    /// Marshals `value` into a node tree.
    ///
    /// The input is never mutated. An absent root (`None`) yields a node of class
    /// `null`, and a scalar root is wrapped in a primitive-scalar node.
    pub fn marshall<T: Marshal>(&self, value: &T) -> Result<Node, Error> {
        tracing::trace!(class_name = %T::class_name(), "marshall");
        let mut context = MarshalContext::new(self.backend.as_ref(), &self.registry, &self.config);
        let node = context.marshall_node(value)?;
        tracing::trace!(
            identities = context.identities().len(),
            entries = node.len(),
            "marshall finished"
        );
        Ok(node)
    }

    /// Reconstructs a `T` from a node tree, discarding diagnostics.
    pub fn unmarshall<T: Marshal>(&self, node: &Node) -> Result<T, Error> {
        self.unmarshall_with_diagnostics(node).map(|(value, _)| value)
    }

    /// Reconstructs a `T` from a node tree together with the non-fatal conditions met
    /// on the way.
    ///
    /// Either the complete graph is returned or the first unrecoverable error; a
    /// partially built graph is never exposed.
    pub fn unmarshall_with_diagnostics<T: Marshal>(
        &self,
        node: &Node,
    ) -> Result<(T, Vec<Diagnostic>), Error> {
        tracing::trace!(
            class_name = %T::class_name(),
            node_class = node.class_name(),
            "unmarshall"
        );
        let mut context = UnmarshalContext::new(
            self.backend.as_ref(),
            &self.registry,
            self.migrations.as_ref(),
            &self.config,
            &self.log,
        );
        let value = context.unmarshall_node::<T>(node)?;
        let diagnostics = context.into_diagnostics();
        tracing::trace!(diagnostics = diagnostics.len(), "unmarshall finished");
        Ok((value, diagnostics))
    }
}

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

//! Non-fatal conditions met while unmarshalling.
//!
//! Obsolete fields and overridden container insertion are adapted to rather than
//! raised as errors. They are returned to the caller as [`Diagnostic`] values and
//! mirrored as `tracing` events.

use std::collections::HashSet;
use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Diagnostic {
    /// A node carried a field the current type no longer declares; it was skipped.
    ObsoleteField { class_name: String, field: String },
    /// A container type routes insertion through a custom operation; every
    /// recovered entry went through it.
    OverriddenInsert {
        class_name: String,
        operation: &'static str,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ObsoleteField { class_name, field } => {
                write!(f, "skipped obsolete field `{}` of `{}`", field, class_name)
            }
            Diagnostic::OverriddenInsert {
                class_name,
                operation,
            } => write!(
                f,
                "`{}` overrides `{}`; entries were inserted through it",
                class_name, operation
            ),
        }
    }
}

/// Engine-wide record of the overridden-insert reports already made.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    reported: Mutex<HashSet<(String, &'static str)>>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time `(class_name, operation)` is seen.
    pub fn first_report(&self, class_name: &str, operation: &'static str) -> bool {
        let mut reported = self
            .reported
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        reported.insert((class_name.to_string(), operation))
    }
}

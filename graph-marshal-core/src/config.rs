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

pub const DEFAULT_MAX_DEPTH: u32 = 16_384;

/// Configuration for a [`GraphMarshal`](crate::GraphMarshal) engine.
///
/// Shared by reference with every marshal and unmarshal session the engine opens.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum number of nested values a single call may descend into.
    ///
    /// Each hop through a field, element or pointer costs one level, so a linked list
    /// needs roughly one level per link. Graphs near the limit need a thread stack
    /// sized for that recursion.
    pub max_depth: u32,
    /// Whether a node's class name must resolve to the requested type.
    pub check_class_names: bool,
    /// Whether fields present in a node but no longer declared are reported.
    pub report_obsolete_fields: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: DEFAULT_MAX_DEPTH,
            check_class_names: true,
            report_obsolete_fields: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    #[inline(always)]
    pub fn is_check_class_names(&self) -> bool {
        self.check_class_names
    }

    #[inline(always)]
    pub fn is_report_obsolete_fields(&self) -> bool {
        self.report_obsolete_fields
    }
}

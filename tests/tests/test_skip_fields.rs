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

use graph_marshal::{Error, GraphMarshal, Marshal};
use std::collections::HashMap;

#[derive(Marshal, Debug)]
#[marshal(name = "test.Catalog", post_unmarshal = "rebuild_index")]
struct Catalog {
    items: Vec<String>,
    #[marshal(skip)]
    index: HashMap<String, usize>,
    #[marshal(skip)]
    rebuilt: bool,
}

impl Catalog {
    fn new(items: &[&str]) -> Catalog {
        let mut catalog = Catalog {
            items: items.iter().map(|s| s.to_string()).collect(),
            index: HashMap::new(),
            rebuilt: false,
        };
        catalog.rebuild_index();
        catalog.rebuilt = false;
        catalog
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.clone(), i))
            .collect();
        self.rebuilt = true;
    }
}

#[test]
fn test_skipped_fields_are_not_marshalled() {
    let engine = GraphMarshal::default();
    let node = engine.marshall(&Catalog::new(&["pen", "ink"])).unwrap();
    assert!(node.entry("items").is_some());
    assert!(node.entry("index").is_none());
    assert!(node.entry("rebuilt").is_none());
    assert_eq!(node.len(), 1);
}

#[test]
fn test_post_unmarshal_hook_restores_derived_state() {
    let engine = GraphMarshal::default();
    let node = engine.marshall(&Catalog::new(&["pen", "ink"])).unwrap();
    let back: Catalog = engine.unmarshall(&node).unwrap();
    assert!(back.rebuilt);
    assert_eq!(back.index.get("ink"), Some(&1));
    assert_eq!(back.items, vec!["pen", "ink"]);
}

#[derive(Marshal, Debug)]
#[marshal(name = "test.Settings")]
struct SettingsV1 {
    timeout: u64,
}

#[derive(Marshal, Debug, PartialEq)]
#[marshal(name = "test.Settings", allocate = "Settings::fallback")]
struct Settings {
    timeout: u64,
    retries: u32,
    #[marshal(skip)]
    cache: Option<String>,
}

impl Settings {
    fn fallback() -> Result<Settings, Error> {
        Ok(Settings {
            timeout: 30,
            retries: 3,
            cache: None,
        })
    }
}

#[test]
fn test_missing_fields_keep_allocated_values() {
    let engine = GraphMarshal::default();
    let node = engine.marshall(&SettingsV1 { timeout: 5 }).unwrap();
    let back: Settings = engine.unmarshall(&node).unwrap();
    assert_eq!(
        back,
        Settings {
            timeout: 5,
            retries: 3,
            cache: None,
        }
    );
}

#[test]
fn test_skipped_field_uses_default_not_stored_value() {
    let engine = GraphMarshal::default();
    let node = engine
        .marshall(&Settings {
            timeout: 1,
            retries: 0,
            cache: Some("warm".to_string()),
        })
        .unwrap();
    let back: Settings = engine.unmarshall(&node).unwrap();
    assert_eq!(back.cache, None);
    assert_eq!(back.retries, 0);
}

#[derive(Marshal, Debug)]
#[marshal(name = "test.Handle", allocate = "Handle::refuse")]
struct Handle {
    fd: i32,
}

impl Handle {
    fn refuse() -> Result<Handle, Error> {
        Err(Error::allocation("handles cannot be restored"))
    }
}

#[test]
fn test_allocation_failure_aborts() {
    let engine = GraphMarshal::default();
    let node = engine.marshall(&vec![Handle { fd: 3 }]).unwrap();
    let err = engine.unmarshall::<Vec<Handle>>(&node).unwrap_err();
    assert!(matches!(err, Error::Allocation(_)));
}

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

use graph_marshal::{GraphMarshal, Marshal, Node};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Marshal, Debug, PartialEq)]
#[marshal(name = "test.Folder")]
struct Folder {
    name: String,
    size: u64,
    weight: f64,
    marker: char,
    files: BTreeMap<String, Vec<u8>>,
    parent: Option<Rc<RefCell<Folder>>>,
}

#[test]
fn test_node_tree_through_json() {
    let engine = GraphMarshal::default();
    let root = Rc::new(RefCell::new(Folder {
        name: "root".to_string(),
        size: u64::MAX,
        weight: 0.5,
        marker: '/',
        files: BTreeMap::from([("a.txt".to_string(), vec![1, 2])]),
        parent: None,
    }));
    let children = vec![
        Folder {
            name: "docs".to_string(),
            size: 1,
            weight: -2.0,
            marker: 'd',
            files: BTreeMap::new(),
            parent: Some(root.clone()),
        },
        Folder {
            name: "src".to_string(),
            size: 2,
            weight: 8.25,
            marker: 's',
            files: BTreeMap::new(),
            parent: Some(root),
        },
    ];

    let node = engine.marshall(&children).unwrap();
    let json = serde_json::to_string(&node).unwrap();
    let parsed: Node = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, node);

    let back: Vec<Folder> = engine.unmarshall(&parsed).unwrap();
    assert_eq!(back, children);
    assert!(Rc::ptr_eq(
        back[0].parent.as_ref().unwrap(),
        back[1].parent.as_ref().unwrap()
    ));
}

#[test]
fn test_json_value_shape() {
    let node = GraphMarshal::default().marshall(&vec![true]).unwrap();
    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json["class_name"], "bool");
    assert_eq!(json["is_array"], true);
    assert_eq!(json["entries"][0]["name"], "0");
}

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

use graph_marshal::{Entry, GraphMarshal, Marshal, Scalar, Value};
use std::collections::HashMap;

#[derive(Marshal, Debug, PartialEq, Clone)]
#[marshal(name = "test.Address")]
struct Address {
    street: String,
    city: String,
}

#[derive(Marshal, Debug, PartialEq)]
#[marshal(name = "test.Person")]
struct Person {
    name: String,
    age: i32,
    height: f64,
    initial: char,
    active: bool,
    address: Address,
    previous: Vec<Address>,
    nickname: Option<String>,
    scores: HashMap<String, u32>,
}

fn person() -> Person {
    Person {
        name: "Ada".to_string(),
        age: 36,
        height: 1.65,
        initial: 'A',
        active: true,
        address: Address {
            street: "1 Analytical Way".to_string(),
            city: "London".to_string(),
        },
        previous: vec![Address {
            street: "2 Difference Row".to_string(),
            city: "Marylebone".to_string(),
        }],
        nickname: None,
        scores: HashMap::from([("chess".to_string(), 7), ("go".to_string(), 3)]),
    }
}

#[test]
fn test_nested_struct_roundtrip() {
    let engine = GraphMarshal::default();
    let value = person();
    let node = engine.marshall(&value).unwrap();
    let back: Person = engine.unmarshall(&node).unwrap();
    assert_eq!(back, value);
}

#[test]
fn test_entries_follow_declaration_order() {
    let engine = GraphMarshal::default();
    let node = engine.marshall(&person()).unwrap();
    assert_eq!(node.class_name(), "test.Person");
    assert!(!node.is_array());
    let names: Vec<&str> = node.entries().iter().map(Entry::name).collect();
    assert_eq!(
        names,
        vec![
            "name", "age", "height", "initial", "active", "address", "previous", "nickname",
            "scores"
        ]
    );
    assert_eq!(
        node.entry("age").unwrap().value(),
        &Value::Scalar(Scalar::Int(36))
    );
    assert_eq!(node.entry("nickname").unwrap().value(), &Value::Null);
    let address = node.entry("address").unwrap().value().as_node().unwrap();
    assert_eq!(address.class_name(), "test.Address");
}

#[test]
fn test_marshall_does_not_mutate_input() {
    let engine = GraphMarshal::default();
    let value = person();
    let first = engine.marshall(&value).unwrap();
    let second = engine.marshall(&value).unwrap();
    assert_eq!(value, person());
    // map iteration order may differ between the two trees
    assert_eq!(first.entries()[..8], second.entries()[..8]);
}

#[test]
fn test_identity_keys_are_distinct_without_sharing() {
    let engine = GraphMarshal::default();
    let copy = Address {
        street: "x".to_string(),
        city: "y".to_string(),
    };
    let node = engine.marshall(&vec![copy.clone(), copy]).unwrap();
    let keys: Vec<u32> = node
        .entries()
        .iter()
        .map(|e| e.value().as_node().unwrap().identity_key())
        .collect();
    assert_ne!(keys[0], keys[1]);
    assert_ne!(keys[0], node.identity_key());
}

#[derive(Marshal, Debug, PartialEq)]
struct Pair(i64, String);

#[derive(Marshal, Debug, PartialEq)]
struct Marker;

#[test]
fn test_tuple_and_unit_structs() {
    let engine = GraphMarshal::default();
    let node = engine.marshall(&Pair(-4, "four".to_string())).unwrap();
    let names: Vec<&str> = node.entries().iter().map(Entry::name).collect();
    assert_eq!(names, vec!["0", "1"]);
    let back: Pair = engine.unmarshall(&node).unwrap();
    assert_eq!(back, Pair(-4, "four".to_string()));

    let node = engine.marshall(&Marker).unwrap();
    assert!(node.is_empty());
    let back: Marker = engine.unmarshall(&node).unwrap();
    assert_eq!(back, Marker);
}

#[test]
fn test_default_class_name_uses_module_path() {
    assert_eq!(Pair::class_name(), "test_struct::Pair");
    assert_eq!(<Vec<Pair>>::class_name(), "test_struct::Pair[]");
}

#[derive(Marshal, Debug, PartialEq)]
#[marshal(name = "test.Labelled")]
struct Labelled<T> {
    label: String,
    value: T,
}

#[test]
fn test_generic_struct() {
    let engine = GraphMarshal::default();
    let value = Labelled {
        label: "ids".to_string(),
        value: vec![1u64, 2, 3],
    };
    let node = engine.marshall(&value).unwrap();
    let back: Labelled<Vec<u64>> = engine.unmarshall(&node).unwrap();
    assert_eq!(back, value);
}

#[derive(Marshal, Debug, PartialEq)]
#[marshal(name = "test.Renamed")]
struct Renamed {
    #[marshal(rename = "fullName")]
    full_name: String,
}

#[test]
fn test_renamed_field_entry() {
    let engine = GraphMarshal::default();
    let node = engine
        .marshall(&Renamed {
            full_name: "Grace Hopper".to_string(),
        })
        .unwrap();
    assert!(node.entry("fullName").is_some());
    assert!(node.entry("full_name").is_none());
    let back: Renamed = engine.unmarshall(&node).unwrap();
    assert_eq!(back.full_name, "Grace Hopper");
}

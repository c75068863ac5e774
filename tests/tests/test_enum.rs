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

use graph_marshal::{EnumConstant, Error, GraphMarshal, Marshal, MarshalDefault, Scalar, Value};

#[derive(Marshal, Debug, PartialEq, Clone, Copy)]
#[marshal(name = "test.Status")]
enum Status {
    Active,
    #[marshal(default)]
    Pending,
    #[marshal(rename = "SUSPENDED", alias = "Disabled")]
    Suspended,
}

#[derive(Marshal, Debug, PartialEq)]
#[marshal(name = "test.Account")]
struct Account {
    id: u32,
    status: Status,
    history: Vec<Status>,
}

#[test]
fn test_enum_node_carries_constant_name() {
    let engine = GraphMarshal::default();
    let node = engine.marshall(&Status::Suspended).unwrap();
    assert_eq!(node.class_name(), "test.Status");
    assert_eq!(
        node.entry("name").unwrap().value(),
        &Value::Scalar(Scalar::from("SUSPENDED"))
    );
    let back: Status = engine.unmarshall(&node).unwrap();
    assert_eq!(back, Status::Suspended);
}

#[test]
fn test_enum_fields_roundtrip() {
    let engine = GraphMarshal::default();
    let account = Account {
        id: 4,
        status: Status::Active,
        history: vec![Status::Pending, Status::Active, Status::Suspended],
    };
    let node = engine.marshall(&account).unwrap();
    let back: Account = engine.unmarshall(&node).unwrap();
    assert_eq!(back, account);
}

#[test]
fn test_constant_names_and_aliases() {
    assert_eq!(Status::constant_names(), &["Active", "Pending", "SUSPENDED"]);
    assert_eq!(Status::Active.constant_name(), "Active");
    assert_eq!(
        Status::from_constant_name("Disabled"),
        Some(Status::Suspended)
    );
    assert_eq!(Status::from_constant_name("Suspended"), None);
    assert_eq!(Status::marshal_default(), Status::Pending);
}

#[derive(Marshal, Debug, PartialEq)]
#[marshal(name = "test.Status")]
enum StatusV0 {
    Active,
    Archived,
}

#[test]
fn test_unknown_constant_fails() {
    let engine = GraphMarshal::default();
    let node = engine.marshall(&StatusV0::Archived).unwrap();
    let err = engine.unmarshall::<Status>(&node).unwrap_err();
    assert!(matches!(err, Error::UnknownConstant(_)));
    assert!(err.to_string().contains("Archived"));

    let node = engine.marshall(&StatusV0::Active).unwrap();
    assert_eq!(engine.unmarshall::<Status>(&node).unwrap(), Status::Active);
}

#[derive(Marshal, Debug, PartialEq)]
enum Direction {
    North,
    South,
}

#[test]
fn test_first_variant_is_default() {
    assert_eq!(Direction::marshal_default(), Direction::North);
    assert_eq!(Direction::class_name(), "test_enum::Direction");
    let engine = GraphMarshal::default();
    let node = engine.marshall(&Direction::South).unwrap();
    assert_eq!(
        engine.unmarshall::<Direction>(&node).unwrap(),
        Direction::South
    );
}

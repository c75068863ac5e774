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

#[test]
fn test_string_array() {
    let engine = GraphMarshal::default();
    let node = engine
        .marshall(&vec!["x".to_string(), "y".to_string()])
        .unwrap();
    assert!(node.is_array());
    assert_eq!(node.class_name(), "String");
    let names: Vec<&str> = node.entries().iter().map(Entry::name).collect();
    assert_eq!(names, vec!["0", "1"]);
    assert_eq!(node.entries()[0].value(), &Value::Scalar(Scalar::from("x")));
    assert_eq!(node.entries()[1].value(), &Value::Scalar(Scalar::from("y")));

    let back: Vec<String> = engine.unmarshall(&node).unwrap();
    assert_eq!(back, vec!["x", "y"]);
}

#[test]
fn test_nested_arrays() {
    let engine = GraphMarshal::default();
    let grid = vec![vec![1i32, 2], vec![], vec![3]];
    let node = engine.marshall(&grid).unwrap();
    assert_eq!(node.class_name(), "i32[]");
    assert!(node.is_array());
    let back: Vec<Vec<i32>> = engine.unmarshall(&node).unwrap();
    assert_eq!(back, grid);
}

#[test]
fn test_array_kinds_are_interchangeable() {
    let engine = GraphMarshal::default();
    let node = engine.marshall(&[1.5f64, 2.5, 3.5]).unwrap();
    let vec: Vec<f64> = engine.unmarshall(&node).unwrap();
    assert_eq!(vec, vec![1.5, 2.5, 3.5]);
    let boxed: Box<[f64]> = engine.unmarshall(&node).unwrap();
    assert_eq!(&*boxed, &[1.5, 2.5, 3.5]);
}

#[test]
fn test_optional_elements() {
    let engine = GraphMarshal::default();
    let optional = vec![Some("a".to_string()), None];
    let node = engine.marshall(&optional).unwrap();
    assert_eq!(node.entries()[1].value(), &Value::Null);
    let back: Vec<Option<String>> = engine.unmarshall(&node).unwrap();
    assert_eq!(back, optional);
}

#[derive(Marshal, Debug, PartialEq)]
#[marshal(name = "test.Point")]
struct Point {
    x: i32,
    y: i32,
}

#[test]
fn test_record_elements() {
    let engine = GraphMarshal::default();
    let points = vec![Point { x: 0, y: 1 }, Point { x: -2, y: 3 }];
    let node = engine.marshall(&points).unwrap();
    assert_eq!(node.class_name(), "test.Point");
    assert!(!node.is_primitive_scalar());
    let back: Vec<Point> = engine.unmarshall(&node).unwrap();
    assert_eq!(back, points);
}

#[test]
fn test_empty_array() {
    let engine = GraphMarshal::default();
    let node = engine.marshall(&Vec::<u16>::new()).unwrap();
    assert!(node.is_array());
    assert!(node.is_empty());
    let back: Vec<u16> = engine.unmarshall(&node).unwrap();
    assert!(back.is_empty());
}

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
use std::any::Any;

#[derive(Marshal, Debug, PartialEq, Clone)]
#[marshal(name = "test.Circle")]
struct Circle {
    radius: f32,
}

#[derive(Marshal, Debug, PartialEq, Clone)]
#[marshal(name = "test.Label")]
struct Label {
    text: String,
}

#[derive(Marshal, Debug)]
#[marshal(name = "test.Canvas")]
struct Canvas {
    items: Vec<Box<dyn Any>>,
}

fn engine() -> GraphMarshal {
    let mut engine = GraphMarshal::default();
    engine.register::<Circle>().unwrap();
    engine.register::<Label>().unwrap();
    engine
}

#[test]
fn test_dynamic_values_keep_concrete_class() {
    let engine = engine();
    let canvas = Canvas {
        items: vec![
            Box::new(Circle { radius: 2.5 }),
            Box::new(Label {
                text: "hi".to_string(),
            }),
            Box::new(42i32),
            Box::new(vec!["a".to_string()]),
        ],
    };
    let node = engine.marshall(&canvas).unwrap();
    let items = node.entry("items").unwrap().value().as_node().unwrap();
    assert_eq!(items.class_name(), "any");
    let classes: Vec<&str> = items
        .entries()
        .iter()
        .map(|e| e.value().as_node().unwrap().class_name())
        .collect();
    assert_eq!(classes, vec!["test.Circle", "test.Label", "i32", "String"]);

    let back: Canvas = engine.unmarshall(&node).unwrap();
    assert_eq!(
        back.items[0].downcast_ref::<Circle>(),
        Some(&Circle { radius: 2.5 })
    );
    assert_eq!(back.items[1].downcast_ref::<Label>().unwrap().text, "hi");
    assert_eq!(back.items[2].downcast_ref::<i32>(), Some(&42));
    assert_eq!(
        back.items[3].downcast_ref::<Vec<String>>(),
        Some(&vec!["a".to_string()])
    );
}

#[test]
fn test_unregistered_dynamic_value_fails() {
    struct Opaque;
    let engine = engine();
    let value: Box<dyn Any> = Box::new(Opaque);
    let err = engine.marshall(&value).unwrap_err();
    assert!(matches!(err, Error::UnsupportedShape(_)));
}

#[test]
fn test_unknown_dynamic_class_fails() {
    let node = engine().marshall(&(Box::new(Circle { radius: 1.0 }) as Box<dyn Any>)).unwrap();
    let err = GraphMarshal::default()
        .unmarshall::<Box<dyn Any>>(&node)
        .unwrap_err();
    assert!(matches!(err, Error::ClassResolution(_)));
}

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

use graph_marshal::{Error, GraphMarshal, Marshal, Node, Value};
use std::cell::RefCell;
use std::rc::{self, Rc};
use std::sync::{Arc, Mutex};

#[derive(Marshal, Debug, PartialEq)]
#[marshal(name = "test.Leaf")]
struct Leaf {
    value: i32,
}

#[derive(Marshal, Debug)]
#[marshal(name = "test.Holder")]
struct Holder {
    first: Rc<RefCell<Leaf>>,
    second: Rc<RefCell<Leaf>>,
    others: Vec<Rc<RefCell<Leaf>>>,
}

fn entry_node<'n>(node: &'n Node, name: &str) -> &'n Node {
    node.entry(name).unwrap().value().as_node().unwrap()
}

#[test]
fn test_shared_refcell_is_emitted_once() {
    let engine = GraphMarshal::default();
    let leaf = Rc::new(RefCell::new(Leaf { value: 7 }));
    let holder = Holder {
        first: leaf.clone(),
        second: leaf.clone(),
        others: vec![leaf.clone(), Rc::new(RefCell::new(Leaf { value: 8 }))],
    };
    let node = engine.marshall(&holder).unwrap();

    let first = entry_node(&node, "first");
    let second = entry_node(&node, "second");
    assert_eq!(first.class_name(), "test.Leaf");
    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert_eq!(second.class_name(), "test.Leaf");
    assert_eq!(first.identity_key(), second.identity_key());

    let back: Holder = engine.unmarshall(&node).unwrap();
    assert!(Rc::ptr_eq(&back.first, &back.second));
    assert!(Rc::ptr_eq(&back.first, &back.others[0]));
    assert!(!Rc::ptr_eq(&back.first, &back.others[1]));
    back.first.borrow_mut().value = 70;
    assert_eq!(back.others[0].borrow().value, 70);
    assert_eq!(back.others[1].borrow().value, 8);
}

#[test]
fn test_distinct_but_equal_values_stay_distinct() {
    let engine = GraphMarshal::default();
    let holder = Holder {
        first: Rc::new(RefCell::new(Leaf { value: 1 })),
        second: Rc::new(RefCell::new(Leaf { value: 1 })),
        others: vec![],
    };
    let node = engine.marshall(&holder).unwrap();
    assert_ne!(
        entry_node(&node, "first").identity_key(),
        entry_node(&node, "second").identity_key()
    );
    let back: Holder = engine.unmarshall(&node).unwrap();
    assert!(!Rc::ptr_eq(&back.first, &back.second));
}

#[test]
fn test_shared_immutable_rc() {
    let engine = GraphMarshal::default();
    let shared = Rc::new("shared".to_string());
    let values = vec![shared.clone(), shared, Rc::new("own".to_string())];
    let node = engine.marshall(&values).unwrap();

    let first = node.entries()[0].value().as_node().unwrap();
    let second = node.entries()[1].value().as_node().unwrap();
    assert!(first.is_primitive_scalar());
    assert_eq!(first.class_name(), "String");
    assert!(second.is_empty());
    assert_eq!(first.identity_key(), second.identity_key());

    let back: Vec<Rc<String>> = engine.unmarshall(&node).unwrap();
    assert!(Rc::ptr_eq(&back[0], &back[1]));
    assert!(!Rc::ptr_eq(&back[0], &back[2]));
    assert_eq!(*back[2], "own");
}

#[test]
fn test_shared_array_behind_rc() {
    let engine = GraphMarshal::default();
    let numbers = Rc::new(RefCell::new(vec![1, 2, 3]));
    let node = engine.marshall(&vec![numbers.clone(), numbers]).unwrap();
    let reference = node.entries()[1].value().as_node().unwrap();
    assert!(reference.is_array());
    assert!(reference.is_empty());
    let back: Vec<Rc<RefCell<Vec<i32>>>> = engine.unmarshall(&node).unwrap();
    back[0].borrow_mut().push(4);
    assert_eq!(*back[1].borrow(), vec![1, 2, 3, 4]);
}

#[test]
fn test_shared_arc_mutex() {
    let engine = GraphMarshal::default();
    let leaf = Arc::new(Mutex::new(Leaf { value: 5 }));
    let values = vec![leaf.clone(), leaf];
    let node = engine.marshall(&values).unwrap();
    let back: Vec<Arc<Mutex<Leaf>>> = engine.unmarshall(&node).unwrap();
    assert!(Arc::ptr_eq(&back[0], &back[1]));
    back[0].lock().unwrap().value = 6;
    assert_eq!(back[1].lock().unwrap().value, 6);
}

#[test]
fn test_shared_arc() {
    let engine = GraphMarshal::default();
    let leaf = Arc::new(Leaf { value: 11 });
    let values = [leaf.clone(), leaf.clone(), leaf];
    let node = engine.marshall(&values).unwrap();
    let back: [Arc<Leaf>; 3] = engine.unmarshall(&node).unwrap();
    assert!(Arc::ptr_eq(&back[0], &back[2]));
    assert_eq!(*back[1], Leaf { value: 11 });
}

#[derive(Marshal, Debug)]
#[marshal(name = "test.Watcher")]
struct Watcher {
    target: rc::Weak<RefCell<Leaf>>,
    owner: Option<Rc<RefCell<Leaf>>>,
}

#[test]
fn test_weak_resolves_to_shared_target() {
    let engine = GraphMarshal::default();
    let leaf = Rc::new(RefCell::new(Leaf { value: 3 }));
    let watcher = Watcher {
        target: Rc::downgrade(&leaf),
        owner: Some(leaf),
    };
    let node = engine.marshall(&watcher).unwrap();
    assert!(entry_node(&node, "owner").is_empty());

    let back: Watcher = engine.unmarshall(&node).unwrap();
    let owner = back.owner.as_ref().unwrap();
    let target = back.target.upgrade().unwrap();
    assert!(Rc::ptr_eq(owner, &target));
}

#[test]
fn test_dangling_weak_is_null() {
    let engine = GraphMarshal::default();
    let watcher = Watcher {
        target: rc::Weak::new(),
        owner: None,
    };
    let node = engine.marshall(&watcher).unwrap();
    assert_eq!(node.entry("target").unwrap().value(), &Value::Null);
    let back: Watcher = engine.unmarshall(&node).unwrap();
    assert!(back.target.upgrade().is_none());
    assert!(back.owner.is_none());
}

#[derive(Marshal, Debug)]
#[marshal(name = "test.Layered")]
struct Layered {
    outer: Rc<Option<Rc<RefCell<Leaf>>>>,
    direct: Rc<RefCell<Leaf>>,
}

#[test]
fn test_pointer_inside_pointer_keeps_inner_identity() {
    let engine = GraphMarshal::default();
    let leaf = Rc::new(RefCell::new(Leaf { value: 7 }));
    let layered = Layered {
        outer: Rc::new(Some(leaf.clone())),
        direct: leaf,
    };
    let node = engine.marshall(&layered).unwrap();
    let outer = entry_node(&node, "outer");
    let direct = entry_node(&node, "direct");
    assert_eq!(outer.len(), 1);
    assert!(direct.is_empty());
    assert_eq!(outer.identity_key(), direct.identity_key());

    let back: Layered = engine.unmarshall(&node).unwrap();
    let inner = back.outer.as_ref().as_ref().unwrap();
    assert!(Rc::ptr_eq(inner, &back.direct));
    assert_eq!(back.direct.borrow().value, 7);
}

#[derive(Marshal, Debug)]
#[marshal(name = "test.LayeredAfter")]
struct LayeredAfter {
    direct: Rc<RefCell<Leaf>>,
    outer: Rc<Option<Rc<RefCell<Leaf>>>>,
    again: Rc<Option<Rc<RefCell<Leaf>>>>,
}

#[test]
fn test_pointer_inside_pointer_after_inner_was_emitted() {
    let engine = GraphMarshal::default();
    let leaf = Rc::new(RefCell::new(Leaf { value: 5 }));
    let outer = Rc::new(Some(leaf.clone()));
    let layered = LayeredAfter {
        direct: leaf,
        again: outer.clone(),
        outer,
    };
    let node = engine.marshall(&layered).unwrap();
    let key = entry_node(&node, "direct").identity_key();
    assert_eq!(entry_node(&node, "outer").identity_key(), key);
    assert_eq!(entry_node(&node, "again").identity_key(), key);

    let back: LayeredAfter = engine.unmarshall(&node).unwrap();
    assert!(Rc::ptr_eq(&back.outer, &back.again));
    assert!(Rc::ptr_eq(back.outer.as_ref().as_ref().unwrap(), &back.direct));
    assert_eq!(back.direct.borrow().value, 5);
}

#[derive(Marshal, Debug, PartialEq)]
#[marshal(name = "test.Marker")]
struct Marker;

#[test]
fn test_reference_to_unemitted_object_is_invalid() {
    let engine = GraphMarshal::default();
    let dangling = Node::new("test.Leaf", false, false, 42);
    let err = engine
        .unmarshall::<Rc<RefCell<Leaf>>>(&dangling)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidNode(_)));

    let err = engine.unmarshall::<Arc<Leaf>>(&dangling).unwrap_err();
    assert!(matches!(err, Error::InvalidNode(_)));

    let empty = engine.marshall(&Rc::new(Marker)).unwrap();
    assert!(empty.is_empty());
    let back: Rc<Marker> = engine.unmarshall(&empty).unwrap();
    assert_eq!(*back, Marker);
}

#[test]
fn test_locked_mutex_is_unsupported() {
    let engine = GraphMarshal::default();
    let shared = Arc::new(Mutex::new(Leaf { value: 1 }));
    let guard = shared.lock().unwrap();
    let err = engine.marshall(&shared).unwrap_err();
    assert!(matches!(err, Error::UnsupportedShape(_)));
    drop(guard);

    let node = engine.marshall(&shared).unwrap();
    let back: Arc<Mutex<Leaf>> = engine.unmarshall(&node).unwrap();
    assert_eq!(back.lock().unwrap().value, 1);
}

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

use graph_marshal::{GraphMarshal, Marshal};
use std::cell::RefCell;
use std::rc::{self, Rc};
use std::sync::{self as stdsync, Arc, Mutex};

#[derive(Marshal, Debug)]
#[marshal(name = "test.ListNode")]
struct ListNode {
    value: i32,
    next: Option<Rc<RefCell<ListNode>>>,
    prev: rc::Weak<RefCell<ListNode>>,
}

fn link(values: &[i32]) -> Rc<RefCell<ListNode>> {
    let nodes: Vec<Rc<RefCell<ListNode>>> = values
        .iter()
        .map(|v| {
            Rc::new(RefCell::new(ListNode {
                value: *v,
                next: None,
                prev: rc::Weak::new(),
            }))
        })
        .collect();
    for pair in nodes.windows(2) {
        pair[0].borrow_mut().next = Some(pair[1].clone());
        pair[1].borrow_mut().prev = Rc::downgrade(&pair[0]);
    }
    nodes[0].clone()
}

#[test]
fn test_doubly_linked_list() {
    let engine = GraphMarshal::default();
    let head = link(&[1, 2, 3]);
    let node = engine.marshall(&head).unwrap();
    let back: Rc<RefCell<ListNode>> = engine.unmarshall(&node).unwrap();

    let second = back.borrow().next.clone().unwrap();
    let third = second.borrow().next.clone().unwrap();
    assert_eq!(back.borrow().value, 1);
    assert_eq!(second.borrow().value, 2);
    assert_eq!(third.borrow().value, 3);
    assert!(third.borrow().next.is_none());
    assert!(Rc::ptr_eq(&second.borrow().prev.upgrade().unwrap(), &back));
    assert!(Rc::ptr_eq(&third.borrow().prev.upgrade().unwrap(), &second));
    assert!(back.borrow().prev.upgrade().is_none());
}

#[test]
fn test_long_list_with_default_depth() {
    let walk = std::thread::Builder::new()
        .stack_size(256 * 1024 * 1024)
        .spawn(|| {
            let engine = GraphMarshal::default();
            let values: Vec<i32> = (0..2000).collect();
            let head = link(&values);
            let node = engine.marshall(&head).unwrap();
            let back: Rc<RefCell<ListNode>> = engine.unmarshall(&node).unwrap();

            let mut count = 0;
            let mut cursor = Some(back);
            while let Some(current) = cursor {
                assert_eq!(current.borrow().value, count);
                count += 1;
                cursor = current.borrow().next.clone();
            }
            count
        })
        .unwrap();
    assert_eq!(walk.join().unwrap(), 2000);
}

#[derive(Marshal, Debug)]
#[marshal(name = "test.Ring")]
struct Ring {
    id: u8,
    peer: Option<Rc<RefCell<Ring>>>,
}

#[test]
fn test_self_reference() {
    let engine = GraphMarshal::default();
    let ring = Rc::new(RefCell::new(Ring { id: 9, peer: None }));
    ring.borrow_mut().peer = Some(ring.clone());

    let node = engine.marshall(&ring).unwrap();
    let peer = node.entry("peer").unwrap().value().as_node().unwrap();
    assert!(peer.is_empty());
    assert_eq!(peer.identity_key(), node.identity_key());

    let back: Rc<RefCell<Ring>> = engine.unmarshall(&node).unwrap();
    let peer = back.borrow().peer.clone().unwrap();
    assert!(Rc::ptr_eq(&peer, &back));
    assert_eq!(peer.borrow().id, 9);

    ring.borrow_mut().peer = None;
    back.borrow_mut().peer = None;
}

#[test]
fn test_two_node_cycle() {
    let engine = GraphMarshal::default();
    let a = Rc::new(RefCell::new(Ring { id: 1, peer: None }));
    let b = Rc::new(RefCell::new(Ring {
        id: 2,
        peer: Some(a.clone()),
    }));
    a.borrow_mut().peer = Some(b.clone());

    let node = engine.marshall(&a).unwrap();
    let back: Rc<RefCell<Ring>> = engine.unmarshall(&node).unwrap();
    let other = back.borrow().peer.clone().unwrap();
    assert_eq!(other.borrow().id, 2);
    let round = other.borrow().peer.clone().unwrap();
    assert!(Rc::ptr_eq(&round, &back));

    a.borrow_mut().peer = None;
    back.borrow_mut().peer = None;
}

#[derive(Marshal, Debug)]
#[marshal(name = "test.SyncNode")]
struct SyncNode {
    name: String,
    children: Vec<Arc<Mutex<SyncNode>>>,
    parent: stdsync::Weak<Mutex<SyncNode>>,
}

#[test]
fn test_arc_mutex_tree_with_parent_links() {
    let engine = GraphMarshal::default();
    let root = Arc::new(Mutex::new(SyncNode {
        name: "root".to_string(),
        children: vec![],
        parent: stdsync::Weak::new(),
    }));
    for name in ["left", "right"] {
        let child = Arc::new(Mutex::new(SyncNode {
            name: name.to_string(),
            children: vec![],
            parent: Arc::downgrade(&root),
        }));
        root.lock().unwrap().children.push(child);
    }

    let node = engine.marshall(&root).unwrap();
    let back: Arc<Mutex<SyncNode>> = engine.unmarshall(&node).unwrap();
    let children = back.lock().unwrap().children.clone();
    assert_eq!(children.len(), 2);
    for child in &children {
        let parent = child.lock().unwrap().parent.upgrade().unwrap();
        assert!(Arc::ptr_eq(&parent, &back));
    }
    assert_eq!(children[1].lock().unwrap().name, "right");
}

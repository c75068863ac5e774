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

use graph_marshal::{Diagnostic, GraphMarshal, Marshal, RenameTable};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Marshal, Debug, PartialEq)]
#[marshal(name = "test.Job")]
struct Job {
    id: i32,
    owner: String,
}

#[test]
fn test_simple_multi_thread() {
    let engine = Arc::new(GraphMarshal::default());
    let src: HashSet<i32> = [41, 42, 43, 45, 46, 47].into_iter().collect();
    let mut handles = vec![];
    for id in &src {
        let engine = Arc::clone(&engine);
        let id = *id;
        handles.push(thread::spawn(move || {
            let job = Job {
                id,
                owner: format!("worker-{id}"),
            };
            let node = engine.marshall(&job).unwrap();
            let back: Job = engine.unmarshall(&node).unwrap();
            assert_eq!(back, job);
            back.id
        }));
    }
    let dest: HashSet<i32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(dest, src);
}

#[test]
fn test_shared_graph_across_threads() {
    let engine = Arc::new(GraphMarshal::default());
    let shared = Arc::new(Mutex::new(Job {
        id: 1,
        owner: "ops".to_string(),
    }));
    let node = engine.marshall(&vec![shared.clone(), shared]).unwrap();
    let node = Arc::new(node);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let node = Arc::clone(&node);
            thread::spawn(move || {
                let back: Vec<Arc<Mutex<Job>>> = engine.unmarshall(&node).unwrap();
                Arc::ptr_eq(&back[0], &back[1])
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[derive(Marshal, Debug)]
#[marshal(name = "test.v1.Job")]
struct JobV1 {
    id: i32,
    owner: String,
    priority: u8,
}

#[test]
fn test_sessions_do_not_share_diagnostics() {
    let engine = Arc::new(
        GraphMarshal::default().migrations(RenameTable::new().rename_type("test.v1.Job", "test.Job")),
    );
    let node = Arc::new(
        GraphMarshal::default()
            .marshall(&JobV1 {
                id: 3,
                owner: "qa".to_string(),
                priority: 1,
            })
            .unwrap(),
    );
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let node = Arc::clone(&node);
            thread::spawn(move || engine.unmarshall_with_diagnostics::<Job>(&node).unwrap().1)
        })
        .collect();
    for handle in handles {
        assert_eq!(
            handle.join().unwrap(),
            vec![Diagnostic::ObsoleteField {
                class_name: "test.Job".to_string(),
                field: "priority".to_string(),
            }]
        );
    }
}

// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Concurrency tests for memoized builds

use std::sync::{Arc, Barrier};
use std::thread;

use octofhir_saner::formats::{cdc_patient_impact, fema_daily};
use octofhir_saner::*;
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn concurrent_first_calls_share_one_build() {
    init_logging();
    let registry = Arc::new(FormatRegistry::default());
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (
                    registry.questionnaire(cdc_patient_impact::NAME).unwrap(),
                    registry.measure(cdc_patient_impact::NAME).unwrap(),
                )
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let (first_q, first_m) = &results[0];
    for (q, m) in &results[1..] {
        assert!(Arc::ptr_eq(first_q, q));
        assert!(Arc::ptr_eq(first_m, m));
    }
}

#[test]
fn independent_registries_build_identical_documents() {
    let a = FormatRegistry::default();
    let b = FormatRegistry::default();

    for name in [cdc_patient_impact::NAME, fema_daily::NAME] {
        assert_eq!(*a.questionnaire(name).unwrap(), *b.questionnaire(name).unwrap());
        assert_eq!(*a.measure(name).unwrap(), *b.measure(name).unwrap());
    }
}

#[test]
fn standard_registry_is_shared() {
    assert!(std::ptr::eq(FormatRegistry::standard(), FormatRegistry::standard()));
    let first = FormatRegistry::standard().measure(fema_daily::NAME).unwrap();
    let second = FormatRegistry::standard().measure(fema_daily::NAME).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn registry_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FormatRegistry>();
}

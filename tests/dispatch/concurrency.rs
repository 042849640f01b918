//! Concurrent dispatch: binding dedup under racing first-time
//! resolution, and independent interleaving.

use std::sync::Arc;

use tokio::sync::Barrier;

use medbus::CancelToken;

use crate::support::{study_bus, ArchiveStudies, ListStudyCodes, RegisterStudy, SlowArchiveHandler, StudyStore};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_first_dispatches_install_exactly_one_binding() {
    let store = StudyStore::new();
    let bus = Arc::new(study_bus(&store));
    let barrier = Arc::new(Barrier::new(16));

    let mut tasks = Vec::new();
    for i in 0..16 {
        let bus = bus.clone();
        let barrier = barrier.clone();
        tasks.push(tokio::spawn(async move {
            barrier.wait().await;
            bus.send(
                RegisterStudy {
                    study_code: format!("STU-{i:03}"),
                    title: "Concurrent cohort".into(),
                },
                CancelToken::new(),
            )
            .await
        }));
    }

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(bus.cached_bindings(), 1);
    assert_eq!(store.all().len(), 16);
}

#[tokio::test]
async fn dispatches_interleave_without_blocking_each_other() {
    let store = StudyStore::new();
    store.insert(crate::support::StudyRecord {
        study_code: "STU-001".into(),
        title: "Sleep study".into(),
        enrolled: 0,
    });

    let list_store = store.clone();
    let bus = medbus::Bus::builder()
        .command::<ArchiveStudies, _, _>(|| SlowArchiveHandler)
        .query::<ListStudyCodes, _, _>(move || {
            crate::support::ListStudyCodesHandler::new(list_store.clone())
        })
        .build();

    let (archive, codes) = tokio::join!(
        bus.send(ArchiveStudies, CancelToken::new()),
        bus.query(ListStudyCodes, CancelToken::new()),
    );

    assert_eq!(archive, Ok(()));
    assert_eq!(codes, Ok(vec!["STU-001".into()]));
    assert_eq!(bus.cached_bindings(), 2);
}

//! Core dispatch behavior: routing, kinds, logging, instance lifetime.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::Level;

use medbus::{Bus, CancelToken, ErrorKind};

use crate::support::{
    study_bus, EnrollParticipant, ListStudyCodes, RecordingSubscriber, RegisterStudy,
    RegisterStudyHandler, StudyStore,
};

fn register(code: &str, title: &str) -> RegisterStudy {
    RegisterStudy {
        study_code: code.into(),
        title: title.into(),
    }
}

#[tokio::test]
async fn command_routes_to_its_handler_and_mutates_the_store() {
    let store = StudyStore::new();
    let bus = study_bus(&store);

    let result = bus
        .send(register("STU-001", "Hypertension cohort"), CancelToken::new())
        .await;

    assert_eq!(result, Ok(()));
    assert!(store.contains("STU-001"));
}

#[tokio::test]
async fn value_returning_command_carries_its_payload() {
    let store = StudyStore::new();
    let bus = study_bus(&store);
    bus.send(register("STU-002", "Sleep study"), CancelToken::new())
        .await
        .unwrap();

    let first = bus
        .send(
            EnrollParticipant {
                study_code: "STU-002".into(),
            },
            CancelToken::new(),
        )
        .await;
    let second = bus
        .send(
            EnrollParticipant {
                study_code: "STU-002".into(),
            },
            CancelToken::new(),
        )
        .await;

    assert_eq!(first, Ok(1));
    assert_eq!(second, Ok(2));
}

#[tokio::test]
async fn handler_failures_keep_their_error_kind() {
    let store = StudyStore::new();
    let bus = study_bus(&store);
    bus.send(register("STU-003", "Asthma registry"), CancelToken::new())
        .await
        .unwrap();

    let conflict = bus
        .send(register("STU-003", "Asthma registry"), CancelToken::new())
        .await
        .unwrap_err();
    assert_eq!(conflict.kind(), ErrorKind::Conflict);

    let missing = bus
        .send(
            EnrollParticipant {
                study_code: "STU-404".into(),
            },
            CancelToken::new(),
        )
        .await
        .unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::NotFound);
    assert!(missing.message().contains("STU-404"));
}

#[tokio::test]
async fn query_success_returns_payload_and_logs_exactly_once() {
    let subscriber = RecordingSubscriber::new();
    let _guard = tracing::subscriber::set_default(subscriber.clone());

    let store = StudyStore::new();
    let bus = study_bus(&store);
    for code in ["a", "b", "c"] {
        bus.send(register(code, "title"), CancelToken::new())
            .await
            .unwrap();
    }

    let result = bus.query(ListStudyCodes, CancelToken::new()).await;

    assert_eq!(result, Ok(vec!["a".into(), "b".into(), "c".into()]));
    assert_eq!(subscriber.count(Level::DEBUG, "query succeeded"), 1);
    assert_eq!(subscriber.count_level(Level::WARN), 0);
    assert_eq!(subscriber.count_level(Level::ERROR), 0);
}

#[tokio::test]
async fn handler_failure_logs_a_warning() {
    let subscriber = RecordingSubscriber::new();
    let _guard = tracing::subscriber::set_default(subscriber.clone());

    let store = StudyStore::new();
    let bus = study_bus(&store);
    let _ = bus
        .send(
            EnrollParticipant {
                study_code: "STU-404".into(),
            },
            CancelToken::new(),
        )
        .await;

    assert_eq!(subscriber.count(Level::WARN, "command failed"), 1);
    assert_eq!(subscriber.count_level(Level::ERROR), 0);
}

#[tokio::test]
async fn a_fresh_handler_instance_is_resolved_per_dispatch() {
    let instances = Arc::new(AtomicUsize::new(0));
    let counter = instances.clone();
    let store = StudyStore::new();
    let handler_store = store.clone();

    let bus = Bus::builder()
        .command::<RegisterStudy, _, _>(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            RegisterStudyHandler::new(handler_store.clone())
        })
        .build();

    for code in ["x", "y", "z"] {
        bus.send(register(code, "title"), CancelToken::new())
            .await
            .unwrap();
    }

    assert_eq!(instances.load(Ordering::SeqCst), 3);
    // The binding is cached once; only instances are per-call.
    assert_eq!(bus.cached_bindings(), 1);
}

#[tokio::test]
async fn a_cancelled_token_is_observed_by_the_handler() {
    let store = StudyStore::new();
    let bus = study_bus(&store);

    let cancel = CancelToken::new();
    cancel.cancel();

    let failure = bus
        .send(register("STU-005", "Migraine study"), cancel)
        .await
        .unwrap_err();

    assert_eq!(failure.kind(), ErrorKind::InvalidOperation);
    assert!(!store.contains("STU-005"));
}

#[tokio::test]
#[should_panic(expected = "no command handler registered for EnrollParticipant")]
async fn dispatching_an_unregistered_command_fails_fast() {
    let store = StudyStore::new();
    let handler_store = store.clone();
    let bus = Bus::builder()
        .command::<RegisterStudy, _, _>(move || RegisterStudyHandler::new(handler_store.clone()))
        .build();

    let _ = bus
        .send(
            EnrollParticipant {
                study_code: "STU-001".into(),
            },
            CancelToken::new(),
        )
        .await;
}

#[test]
#[should_panic(expected = "duplicate command handler registration for RegisterStudy")]
fn duplicate_registration_is_rejected_at_startup() {
    let store = StudyStore::new();
    let first = store.clone();
    let second = store.clone();
    let _ = Bus::builder()
        .command::<RegisterStudy, _, _>(move || RegisterStudyHandler::new(first.clone()))
        .command::<RegisterStudy, _, _>(move || RegisterStudyHandler::new(second.clone()));
}

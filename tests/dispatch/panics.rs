//! Infrastructure faults: a panic out of a handler is logged once at
//! ERROR and rethrown, never converted into a failure result.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::Level;

use medbus::{Bus, CancelToken};

use crate::support::{PanickingArchiveHandler, RebuildArchive, RecordingSubscriber};

#[tokio::test]
async fn a_handler_panic_is_rethrown_after_one_error_log() {
    let subscriber = RecordingSubscriber::new();
    let _guard = tracing::subscriber::set_default(subscriber.clone());

    let bus = Bus::builder()
        .command::<RebuildArchive, _, _>(|| PanickingArchiveHandler)
        .build();

    let outcome = AssertUnwindSafe(bus.send(RebuildArchive, CancelToken::new()))
        .catch_unwind()
        .await;

    // The original panic payload surfaces unchanged.
    let payload = outcome.unwrap_err();
    let message = payload
        .downcast_ref::<&str>()
        .copied()
        .unwrap_or_else(|| payload.downcast_ref::<String>().map(String::as_str).unwrap());
    assert_eq!(message, "study archive corrupted");

    assert_eq!(subscriber.count(Level::ERROR, "command handler panicked"), 1);
    // Panics are faults, not business failures: no warning is emitted.
    assert_eq!(subscriber.count_level(Level::WARN), 0);
}

#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

pub mod corenlp;
pub mod retry;
pub mod socket;

use std::sync::Arc;
use tracing::info;

use medex_core::{NerBackend, NerBackendKind, NerConfig};

pub use corenlp::CoreNlpNer;
pub use retry::retry_with_backoff;
pub use socket::SocketNer;

/// Construct the configured NER client, or `None` when tagging is disabled.
pub fn build_backend(config: &NerConfig) -> Option<Arc<dyn NerBackend>> {
    info!("NER backend: {}", config.backend.as_str());
    match config.backend {
        NerBackendKind::Socket => Some(Arc::new(SocketNer::from_config(config))),
        NerBackendKind::CoreNlp => Some(Arc::new(CoreNlpNer::from_config(config))),
        NerBackendKind::None => None,
    }
}

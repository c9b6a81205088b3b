//! Ordered endpoint-variant probing
//!
//! Canto exposes several endpoint families that may or may not answer
//! for a given id (an asset is reachable under exactly one of the
//! image/video/document detail endpoints; a container listing may live
//! under `album`, `folder` or an albumId-constrained search). Callers
//! build an ordered list of strategies and take the first success;
//! individual failures are logged and swallowed, exhaustion is reported
//! to the caller as `None`.

use async_trait::async_trait;
use tracing::debug;

use crate::errors::CantoError;

/// One attempt at fetching a value from a specific endpoint variant
#[async_trait]
pub trait ProbeStrategy<T>: Send + Sync {
    /// Short name used in logs
    fn label(&self) -> &str;

    async fn attempt(&self) -> Result<T, CantoError>;
}

/// Run probes in order, returning the first successful value.
///
/// Probes after the first success are never consulted. `None` means
/// every variant failed; the caller decides whether that is a
/// not-found, an empty listing, or something else.
pub async fn first_success<T>(probes: Vec<Box<dyn ProbeStrategy<T> + '_>>) -> Option<T> {
    for probe in &probes {
        match probe.attempt().await {
            Ok(value) => {
                debug!("probe '{}' succeeded", probe.label());
                return Some(value);
            }
            Err(err) => {
                debug!("probe '{}' failed: {}", probe.label(), err);
            }
        }
    }
    None
}

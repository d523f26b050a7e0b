//! Location port - where the user currently is.

use async_trait::async_trait;

/// Resolves the common name of the country the user is in.
///
/// `None` is the normal "unresolved" answer (permission denied, no fix, no
/// country in the geocoding result); it is not an error.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait LocationPort: Send + Sync {
    async fn resolve_country(&self) -> Option<String>;
}

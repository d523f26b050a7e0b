//! Directory port - the remote country catalog.

use async_trait::async_trait;
use countrylist_domain::Country;

use super::DirectoryError;

/// Fetches the complete country catalog in one call.
///
/// No pagination and no filtering: implementations return every entry the
/// service knows, in service order.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DirectoryPort: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Country>, DirectoryError>;
}

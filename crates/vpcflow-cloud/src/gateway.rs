//! License gateway trait definition

use crate::error::Result;
use crate::model::LicenseRecord;
use async_trait::async_trait;

/// Provider-side license operations
///
/// Implementations talk to a cloud provider's API. They own transport,
/// authentication and wire formats; callers only see [`LicenseRecord`]s and
/// [`crate::LicenseError`]s.
#[async_trait]
pub trait LicenseGateway: Send + Sync {
    /// Returns the provider name (e.g., "selectel")
    fn name(&self) -> &str;

    /// List licenses visible to the caller
    ///
    /// With `project_id` only that project's licenses are returned.
    async fn list_licenses(
        &self,
        project_id: Option<&str>,
        detailed: bool,
    ) -> Result<Vec<LicenseRecord>>;

    /// Get a single license, `NotFound` if it does not exist
    async fn show_license(&self, license_id: &str, detailed: bool) -> Result<LicenseRecord>;

    /// Create `quantity` licenses of `license_type` in `region`
    async fn create_licenses(
        &self,
        project_id: &str,
        region: &str,
        license_type: &str,
        quantity: u64,
    ) -> Result<Vec<LicenseRecord>>;

    /// Delete a license, `NotFound` if it is already gone
    async fn delete_license(&self, license_id: &str) -> Result<()>;

    /// Resolve a project name to its id, `ProjectNotFound` otherwise
    async fn resolve_project_by_name(&self, name: &str) -> Result<String>;
}

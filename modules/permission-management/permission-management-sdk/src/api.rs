//! Public API trait for permission management.

use async_trait::async_trait;

use crate::error::PermissionManagementError;
use crate::models::{GetPermissionListResultDto, ProviderRef, UpdatePermissionsDto};

/// Client for reading and updating the permission set of a provider.
///
/// Registered in the [`ServiceHub`](adminkit::ServiceHub) by
/// [`register_services`](crate::register_services):
///
/// ```ignore
/// let client = hub.get::<dyn PermissionManagementClient>()?;
/// let result = client.get(&ProviderRef::role("admin")).await?;
/// ```
#[async_trait]
pub trait PermissionManagementClient: Send + Sync {
    /// Every permission group of the provider, with current grants.
    async fn get(
        &self,
        provider: &ProviderRef,
    ) -> Result<GetPermissionListResultDto, PermissionManagementError>;

    /// Apply `{name, isGranted}` changes to the provider.
    async fn update(
        &self,
        provider: &ProviderRef,
        input: &UpdatePermissionsDto,
    ) -> Result<(), PermissionManagementError>;
}

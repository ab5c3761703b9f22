//! Permission management state: opens edit sessions and saves their diff.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, instrument};

use crate::api::PermissionManagementClient;
use crate::config::PermissionManagementConfig;
use crate::error::PermissionManagementError;
use crate::models::{ProviderRef, ROLE_PROVIDER, USER_PROVIDER, UpdatePermissionsDto};
use crate::session::PermissionEditSession;

/// The signed-in user, used to decide whether a save affects its own grants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing changed; no request was sent.
    Skipped,
    Saved {
        /// Number of permissions sent in the update.
        changed: usize,
        /// The edited provider is the current user or one of its roles, so
        /// the caller should reload the current user's grants.
        refresh_current_user: bool,
    },
}

pub struct PermissionManagementState {
    client: Arc<dyn PermissionManagementClient>,
    config: PermissionManagementConfig,
    current_user: RwLock<Option<CurrentUser>>,
}

impl PermissionManagementState {
    #[must_use]
    pub fn new(
        client: Arc<dyn PermissionManagementClient>,
        config: PermissionManagementConfig,
    ) -> Self {
        Self {
            client,
            config,
            current_user: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn config(&self) -> &PermissionManagementConfig {
        &self.config
    }

    pub fn set_current_user(&self, user: Option<CurrentUser>) {
        *self.current_user.write() = user;
    }

    #[must_use]
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.current_user.read().clone()
    }

    /// Fetch the full permission set of `provider` into a new edit session.
    ///
    /// # Errors
    /// Returns the REST error of the fetch.
    #[instrument(skip_all, fields(provider_name = %provider.provider_name, provider_key = %provider.provider_key))]
    pub async fn open(
        &self,
        provider: ProviderRef,
    ) -> Result<PermissionEditSession, PermissionManagementError> {
        let result = self.client.get(&provider).await?;
        debug!(groups = result.groups.len(), "permission set loaded");
        Ok(PermissionEditSession::new(
            provider,
            result,
            self.config.cascade,
        ))
    }

    /// Send the session's changes. On success the session is rebased on the
    /// saved state; on failure it keeps its edits.
    ///
    /// # Errors
    /// Returns the REST error of the update.
    #[instrument(skip_all, fields(provider_name = %session.provider().provider_name, provider_key = %session.provider().provider_key))]
    pub async fn save(
        &self,
        session: &mut PermissionEditSession,
    ) -> Result<SaveOutcome, PermissionManagementError> {
        let permissions = session.changes();
        if permissions.is_empty() {
            debug!("no permission changes; update skipped");
            return Ok(SaveOutcome::Skipped);
        }

        let changed = permissions.len();
        self.client
            .update(session.provider(), &UpdatePermissionsDto { permissions })
            .await?;
        session.commit();

        let refresh_current_user = self.affects_current_user(session.provider());
        info!(changed, refresh_current_user, "permissions updated");
        Ok(SaveOutcome::Saved {
            changed,
            refresh_current_user,
        })
    }

    fn affects_current_user(&self, provider: &ProviderRef) -> bool {
        let guard = self.current_user.read();
        let Some(user) = guard.as_ref() else {
            return false;
        };
        match provider.provider_name.as_str() {
            USER_PROVIDER => provider.provider_key == user.id,
            ROLE_PROVIDER => user.roles.iter().any(|r| *r == provider.provider_key),
            _ => false,
        }
    }
}

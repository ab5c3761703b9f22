//! Role and user list state.

use std::collections::HashSet;
use std::sync::Arc;

use adminkit::{ListState, PagedAndSortedResultRequestDto};
use parking_lot::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::api::{IdentityRoleClient, IdentityUserClient};
use crate::config::IdentityConfig;
use crate::error::IdentityError;
use crate::models::{
    GetIdentityUsersInput, IdentityRoleCreateDto, IdentityRoleDto, IdentityRoleUpdateDto,
    IdentityUserCreateDto, IdentityUserDto, IdentityUserUpdateDto, IdentityUserUpdateRolesDto,
    RoleAssignment,
};

/// Which fetch filled the role cache; a refresh repeats it.
#[derive(Debug, Clone)]
enum RoleQuery {
    All,
    Paged(PagedAndSortedResultRequestDto),
}

pub struct IdentityStateService {
    roles_client: Arc<dyn IdentityRoleClient>,
    users_client: Arc<dyn IdentityUserClient>,
    roles: ListState<IdentityRoleDto>,
    users: ListState<IdentityUserDto>,
    role_query: RwLock<RoleQuery>,
    user_query: RwLock<GetIdentityUsersInput>,
}

impl IdentityStateService {
    #[must_use]
    pub fn new(
        roles_client: Arc<dyn IdentityRoleClient>,
        users_client: Arc<dyn IdentityUserClient>,
        config: &IdentityConfig,
    ) -> Self {
        Self {
            roles_client,
            users_client,
            roles: ListState::new(),
            users: ListState::new(),
            role_query: RwLock::new(RoleQuery::Paged(config.first_page())),
            user_query: RwLock::new(GetIdentityUsersInput {
                filter: None,
                paging: config.first_page(),
            }),
        }
    }

    // ========== roles ==========

    #[must_use]
    pub fn roles(&self) -> Vec<IdentityRoleDto> {
        self.roles.items()
    }

    #[must_use]
    pub fn roles_total_count(&self) -> u64 {
        self.roles.total_count()
    }

    /// # Errors
    /// Returns the REST error of the list call.
    #[instrument(skip_all)]
    pub async fn fetch_roles(&self, input: PagedAndSortedResultRequestDto) -> Result<(), IdentityError> {
        let page = self.roles_client.get_list(&input).await?;
        debug!(items = page.items.len(), total = page.total_count, "role list refreshed");
        self.roles.replace_page(page);
        *self.role_query.write() = RoleQuery::Paged(input);
        Ok(())
    }

    /// Load every role into the cache, unpaged.
    ///
    /// # Errors
    /// Returns the REST error of the list call.
    #[instrument(skip_all)]
    pub async fn fetch_all_roles(&self) -> Result<(), IdentityError> {
        let list = self.roles_client.get_all_list().await?;
        debug!(items = list.items.len(), "role list refreshed");
        self.roles.replace_list(list);
        *self.role_query.write() = RoleQuery::All;
        Ok(())
    }

    /// Repeat the last role fetch, paged or unpaged.
    ///
    /// # Errors
    /// Returns the REST error of the list call.
    pub async fn refresh_roles(&self) -> Result<(), IdentityError> {
        let query = self.role_query.read().clone();
        match query {
            RoleQuery::All => self.fetch_all_roles().await,
            RoleQuery::Paged(input) => self.fetch_roles(input).await,
        }
    }

    /// # Errors
    /// Returns the REST error of the create or of the refresh.
    pub async fn create_role(
        &self,
        input: &IdentityRoleCreateDto,
    ) -> Result<IdentityRoleDto, IdentityError> {
        let role = self.roles_client.create(input).await?;
        self.refresh_roles().await?;
        Ok(role)
    }

    /// # Errors
    /// Returns the REST error of the update or of the refresh.
    pub async fn update_role(
        &self,
        id: Uuid,
        input: &IdentityRoleUpdateDto,
    ) -> Result<IdentityRoleDto, IdentityError> {
        let role = self.roles_client.update(id, input).await?;
        self.refresh_roles().await?;
        Ok(role)
    }

    /// Delete a role, refusing static roles before any request is sent.
    ///
    /// # Errors
    /// Returns `StaticRole` for a static role, or the REST error of a call.
    #[instrument(skip(self))]
    pub async fn delete_role(&self, id: Uuid) -> Result<(), IdentityError> {
        let role = match self.roles.find(|r| r.id == id) {
            Some(role) => role,
            None => self.roles_client.get(id).await?,
        };
        if role.is_static {
            return Err(IdentityError::StaticRole { name: role.name });
        }
        self.roles_client.delete(id).await?;
        self.refresh_roles().await
    }

    // ========== users ==========

    #[must_use]
    pub fn users(&self) -> Vec<IdentityUserDto> {
        self.users.items()
    }

    #[must_use]
    pub fn users_total_count(&self) -> u64 {
        self.users.total_count()
    }

    /// # Errors
    /// Returns the REST error of the list call.
    #[instrument(skip_all, fields(filter = ?input.filter))]
    pub async fn fetch_users(&self, input: GetIdentityUsersInput) -> Result<(), IdentityError> {
        let page = self.users_client.get_list(&input).await?;
        debug!(items = page.items.len(), total = page.total_count, "user list refreshed");
        self.users.replace_page(page);
        *self.user_query.write() = input;
        Ok(())
    }

    /// # Errors
    /// Returns the REST error of the list call.
    pub async fn refresh_users(&self) -> Result<(), IdentityError> {
        let input = self.user_query.read().clone();
        self.fetch_users(input).await
    }

    /// # Errors
    /// Returns the REST error of the create or of the refresh.
    pub async fn create_user(
        &self,
        input: &IdentityUserCreateDto,
    ) -> Result<IdentityUserDto, IdentityError> {
        let user = self.users_client.create(input).await?;
        self.refresh_users().await?;
        Ok(user)
    }

    /// # Errors
    /// Returns the REST error of the update or of the refresh.
    pub async fn update_user(
        &self,
        id: Uuid,
        input: &IdentityUserUpdateDto,
    ) -> Result<IdentityUserDto, IdentityError> {
        let user = self.users_client.update(id, input).await?;
        self.refresh_users().await?;
        Ok(user)
    }

    /// # Errors
    /// Returns the REST error of the delete or of the refresh.
    pub async fn delete_user(&self, id: Uuid) -> Result<(), IdentityError> {
        self.users_client.delete(id).await?;
        self.refresh_users().await
    }

    /// # Errors
    /// Returns the REST error of the call.
    pub async fn update_user_roles(
        &self,
        id: Uuid,
        role_names: Vec<String>,
    ) -> Result<(), IdentityError> {
        self.users_client
            .update_roles(id, &IdentityUserUpdateRolesDto { role_names })
            .await
    }

    /// Names of the assignable roles flagged as default.
    ///
    /// # Errors
    /// Returns the REST error of the call.
    pub async fn default_role_names(&self) -> Result<Vec<String>, IdentityError> {
        let assignable = self.users_client.get_assignable_roles().await?;
        Ok(assignable
            .items
            .into_iter()
            .filter(|r| r.is_default)
            .map(|r| r.name)
            .collect())
    }

    /// Assignable roles with their checkbox state for a user form.
    ///
    /// For an existing user the user's current roles are checked; for a new
    /// user (`None`) the default roles are.
    ///
    /// # Errors
    /// Returns the REST error of a call.
    #[instrument(skip(self))]
    pub async fn role_assignments(
        &self,
        user_id: Option<Uuid>,
    ) -> Result<Vec<RoleAssignment>, IdentityError> {
        let assignable = self.users_client.get_assignable_roles().await?;
        let assigned: HashSet<String> = match user_id {
            Some(id) => self
                .users_client
                .get_roles(id)
                .await?
                .items
                .into_iter()
                .map(|r| r.name)
                .collect(),
            None => assignable
                .items
                .iter()
                .filter(|r| r.is_default)
                .map(|r| r.name.clone())
                .collect(),
        };

        Ok(assignable
            .items
            .into_iter()
            .map(|role| RoleAssignment {
                is_assigned: assigned.contains(&role.name),
                name: role.name,
            })
            .collect())
    }
}

//! Client traits of the identity API.

use adminkit::{ListResultDto, PagedAndSortedResultRequestDto, PagedResultDto};
use async_trait::async_trait;
use uuid::Uuid;

use crate::error::IdentityError;
use crate::models::{
    GetIdentityUsersInput, IdentityRoleCreateDto, IdentityRoleDto, IdentityRoleUpdateDto,
    IdentityUserCreateDto, IdentityUserDto, IdentityUserUpdateDto, IdentityUserUpdateRolesDto,
};

#[async_trait]
pub trait IdentityRoleClient: Send + Sync {
    /// Every role, unpaged.
    async fn get_all_list(&self) -> Result<ListResultDto<IdentityRoleDto>, IdentityError>;

    async fn get_list(
        &self,
        input: &PagedAndSortedResultRequestDto,
    ) -> Result<PagedResultDto<IdentityRoleDto>, IdentityError>;

    async fn get(&self, id: Uuid) -> Result<IdentityRoleDto, IdentityError>;

    async fn create(&self, input: &IdentityRoleCreateDto)
    -> Result<IdentityRoleDto, IdentityError>;

    async fn update(
        &self,
        id: Uuid,
        input: &IdentityRoleUpdateDto,
    ) -> Result<IdentityRoleDto, IdentityError>;

    async fn delete(&self, id: Uuid) -> Result<(), IdentityError>;
}

#[async_trait]
pub trait IdentityUserClient: Send + Sync {
    async fn get_list(
        &self,
        input: &GetIdentityUsersInput,
    ) -> Result<PagedResultDto<IdentityUserDto>, IdentityError>;

    async fn get(&self, id: Uuid) -> Result<IdentityUserDto, IdentityError>;

    async fn create(&self, input: &IdentityUserCreateDto)
    -> Result<IdentityUserDto, IdentityError>;

    async fn update(
        &self,
        id: Uuid,
        input: &IdentityUserUpdateDto,
    ) -> Result<IdentityUserDto, IdentityError>;

    async fn delete(&self, id: Uuid) -> Result<(), IdentityError>;

    /// Roles currently assigned to the user.
    async fn get_roles(&self, id: Uuid) -> Result<ListResultDto<IdentityRoleDto>, IdentityError>;

    /// Roles the caller may assign to users.
    async fn get_assignable_roles(&self) -> Result<ListResultDto<IdentityRoleDto>, IdentityError>;

    async fn update_roles(
        &self,
        id: Uuid,
        input: &IdentityUserUpdateRolesDto,
    ) -> Result<(), IdentityError>;

    async fn find_by_username(&self, user_name: &str) -> Result<IdentityUserDto, IdentityError>;

    async fn find_by_email(&self, email: &str) -> Result<IdentityUserDto, IdentityError>;
}

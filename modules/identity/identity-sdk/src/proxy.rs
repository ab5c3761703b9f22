use adminkit::{
    ListResultDto, PagedAndSortedResultRequestDto, PagedResultDto, RestClient, RestRequest,
    path_segment,
};
use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::api::{IdentityRoleClient, IdentityUserClient};
use crate::error::IdentityError;
use crate::models::{
    GetIdentityUsersInput, IdentityRoleCreateDto, IdentityRoleDto, IdentityRoleUpdateDto,
    IdentityUserCreateDto, IdentityUserDto, IdentityUserUpdateDto, IdentityUserUpdateRolesDto,
};

const ROLES_URL: &str = "/api/identity/roles";
const USERS_URL: &str = "/api/identity/users";

#[derive(Debug, Clone)]
pub struct IdentityRoleProxy {
    rest: RestClient,
}

impl IdentityRoleProxy {
    #[must_use]
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl IdentityRoleClient for IdentityRoleProxy {
    #[instrument(skip_all)]
    async fn get_all_list(&self) -> Result<ListResultDto<IdentityRoleDto>, IdentityError> {
        let request = RestRequest::get(format!("{ROLES_URL}/all"));
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip_all)]
    async fn get_list(
        &self,
        input: &PagedAndSortedResultRequestDto,
    ) -> Result<PagedResultDto<IdentityRoleDto>, IdentityError> {
        let request = input.apply_to(RestRequest::get(ROLES_URL));
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: Uuid) -> Result<IdentityRoleDto, IdentityError> {
        Ok(self.rest.send(RestRequest::get(format!("{ROLES_URL}/{id}"))).await?)
    }

    #[instrument(skip_all, fields(name = %input.name))]
    async fn create(
        &self,
        input: &IdentityRoleCreateDto,
    ) -> Result<IdentityRoleDto, IdentityError> {
        let request = RestRequest::post(ROLES_URL).json(input)?;
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip(self, input))]
    async fn update(
        &self,
        id: Uuid,
        input: &IdentityRoleUpdateDto,
    ) -> Result<IdentityRoleDto, IdentityError> {
        let request = RestRequest::put(format!("{ROLES_URL}/{id}")).json(input)?;
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), IdentityError> {
        Ok(self
            .rest
            .send_unit(RestRequest::delete(format!("{ROLES_URL}/{id}")))
            .await?)
    }
}

#[derive(Debug, Clone)]
pub struct IdentityUserProxy {
    rest: RestClient,
}

impl IdentityUserProxy {
    #[must_use]
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl IdentityUserClient for IdentityUserProxy {
    #[instrument(skip_all, fields(filter = ?input.filter))]
    async fn get_list(
        &self,
        input: &GetIdentityUsersInput,
    ) -> Result<PagedResultDto<IdentityUserDto>, IdentityError> {
        let request = input.apply_to(RestRequest::get(USERS_URL));
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: Uuid) -> Result<IdentityUserDto, IdentityError> {
        Ok(self.rest.send(RestRequest::get(format!("{USERS_URL}/{id}"))).await?)
    }

    #[instrument(skip_all, fields(user_name = %input.user_name))]
    async fn create(
        &self,
        input: &IdentityUserCreateDto,
    ) -> Result<IdentityUserDto, IdentityError> {
        let request = RestRequest::post(USERS_URL).json(input)?;
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip(self, input))]
    async fn update(
        &self,
        id: Uuid,
        input: &IdentityUserUpdateDto,
    ) -> Result<IdentityUserDto, IdentityError> {
        let request = RestRequest::put(format!("{USERS_URL}/{id}")).json(input)?;
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), IdentityError> {
        Ok(self
            .rest
            .send_unit(RestRequest::delete(format!("{USERS_URL}/{id}")))
            .await?)
    }

    #[instrument(skip(self))]
    async fn get_roles(&self, id: Uuid) -> Result<ListResultDto<IdentityRoleDto>, IdentityError> {
        let request = RestRequest::get(format!("{USERS_URL}/{id}/roles"));
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip_all)]
    async fn get_assignable_roles(&self) -> Result<ListResultDto<IdentityRoleDto>, IdentityError> {
        let request = RestRequest::get(format!("{USERS_URL}/assignable-roles"));
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip(self, input), fields(roles = input.role_names.len()))]
    async fn update_roles(
        &self,
        id: Uuid,
        input: &IdentityUserUpdateRolesDto,
    ) -> Result<(), IdentityError> {
        let request = RestRequest::put(format!("{USERS_URL}/{id}/roles")).json(input)?;
        Ok(self.rest.send_unit(request).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, user_name: &str) -> Result<IdentityUserDto, IdentityError> {
        let request = RestRequest::get(format!(
            "{USERS_URL}/by-username/{}",
            path_segment(user_name)
        ));
        Ok(self.rest.send(request).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<IdentityUserDto, IdentityError> {
        let request = RestRequest::get(format!("{USERS_URL}/by-email/{}", path_segment(email)));
        Ok(self.rest.send(request).await?)
    }
}

use crate::{APIResponse, BaseClient};
use pillbox_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserClient {
    base: Arc<BaseClient>,
}

#[derive(Default)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub timezone: Option<String>,
}

impl UserClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_profile(&self) -> APIResponse<get_profile::APIResponse> {
        self.base.get("users/profile".into(), StatusCode::OK).await
    }

    pub async fn update_profile(
        &self,
        input: UpdateProfileInput,
    ) -> APIResponse<update_profile::APIResponse> {
        let body = update_profile::RequestBody {
            name: input.name,
            phone: input.phone,
            avatar: input.avatar,
            timezone: input.timezone,
        };
        self.base
            .put(body, "users/profile".into(), StatusCode::OK)
            .await
    }
}

use crate::{APIResponse, BaseClient};
use pillbox_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthClient {
    base: Arc<BaseClient>,
}

impl AuthClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Exchanges the identity token for the `User` it belongs to
    pub async fn google_login<T: Into<String>>(
        &self,
        id_token: T,
    ) -> APIResponse<google_login::APIResponse> {
        let body = google_login::RequestBody {
            id_token: Some(id_token.into()),
        };
        self.base
            .post(body, "auth/google".into(), StatusCode::OK)
            .await
    }
}

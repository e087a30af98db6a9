use crate::dtos::UserDTO;
use pillbox_domain::User;
use serde::{Deserialize, Serialize};

pub mod google_login {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub id_token: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        pub user: UserDTO,
        /// Whether the `User` was provisioned by this login
        pub created: bool,
    }

    impl APIResponse {
        pub fn new(user: User, created: bool) -> Self {
            Self {
                message: "Authentication successful".into(),
                user: UserDTO::new(user),
                created,
            }
        }
    }
}

use pillbox_domain::User;
use serde::{Deserialize, Serialize};

use crate::dtos::UserDTO;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user: UserDTO,
}

impl UserResponse {
    pub fn new(user: User) -> Self {
        Self {
            user: UserDTO::new(user),
        }
    }
}

pub mod get_profile {
    use super::*;

    pub type APIResponse = UserResponse;
}

pub mod update_profile {
    use super::*;

    /// Fields that are left out are not changed
    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub phone: Option<String>,
        #[serde(default)]
        pub avatar: Option<String>,
        /// IANA timezone name, e.g. `Asia/Kolkata`
        #[serde(default)]
        pub timezone: Option<String>,
    }

    pub type APIResponse = UserResponse;
}

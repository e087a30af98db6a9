use serde::{Deserialize, Serialize};

pub mod get_service_health {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub status: String,
        pub message: String,
        pub timestamp: String,
        /// Either `mongodb` or `inmemory`
        pub storage: String,
        pub version: String,
    }
}

pub mod get_api_docs {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub title: String,
        pub version: String,
        pub endpoints: Vec<String>,
        pub authentication: String,
    }
}

pub mod route_not_found {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub message: String,
        pub path: String,
        pub available_routes: Vec<String>,
    }
}

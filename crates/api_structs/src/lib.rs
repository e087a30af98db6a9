mod adherence;
mod auth;
mod medicine;
mod reminder;
mod status;
mod user;

pub mod dtos {
    pub use crate::adherence::dtos::*;
    pub use crate::medicine::dtos::*;
    pub use crate::reminder::dtos::*;
    pub use crate::user::dtos::*;
}

pub use crate::adherence::api::*;
pub use crate::auth::api::*;
pub use crate::medicine::api::*;
pub use crate::reminder::api::*;
pub use crate::status::api::*;
pub use crate::user::api::*;

use crate::shared::entity::{Entity, ID};
use chrono_tz::{Tz, UTC};

/// A `User` is the owner of `Medicine`s and their `Reminder`s.
///
/// Users are provisioned the first time a verified token for an unknown
/// subject reaches the server, `external_id` holds that subject.
#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub external_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    /// Timezone in which the reminder times of the `User`s medicines are given
    pub timezone: Tz,
    pub created: i64,
}

impl User {
    pub fn new(external_id: String, created: i64) -> Self {
        Self {
            id: Default::default(),
            external_id,
            name: "User".into(),
            email: None,
            phone: None,
            avatar: None,
            timezone: UTC,
            created,
        }
    }

    /// Sets the timezone from an IANA name, e.g. `Asia/Kolkata`.
    /// Returns false and leaves the timezone untouched when the name is unknown.
    pub fn set_timezone(&mut self, timezone: &str) -> bool {
        match timezone.parse::<Tz>() {
            Ok(tz) => {
                self.timezone = tz;
                true
            }
            Err(_) => false,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::iso_millis;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Driver {
    pub fn new(name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email,
            created_at: Utc::now().trunc_subsecs(3),
        }
    }
}

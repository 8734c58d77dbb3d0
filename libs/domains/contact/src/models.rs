use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Message left through the website contact form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Set once the board has answered
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn new(input: SubmitContact) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            subject: input.subject.trim().to_string(),
            message: input.message,
            resolved: false,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubmitContact {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

/// Query parameters for the admin inbox
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ContactFilter {
    /// `false` for the open inbox, `true` for the archive
    pub resolved: Option<bool>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

impl Default for ContactFilter {
    fn default() -> Self {
        Self {
            resolved: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

fn default_limit() -> u64 {
    50
}

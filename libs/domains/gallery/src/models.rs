use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

fn validate_image_url(url: &str) -> Result<(), validator::ValidationError> {
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(validator::ValidationError::new("http_url")
            .with_message("image_url must be an http(s) URL".into()));
    }
    Ok(())
}

/// Gallery photo. The image itself lives elsewhere; only its URL is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Photo {
    pub id: Uuid,
    pub title: String,
    pub caption: String,
    pub image_url: String,
    /// Event the photo was taken at
    pub event_id: Option<Uuid>,
    pub taken_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Photo {
    pub fn new(input: CreatePhoto) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            caption: input.caption,
            image_url: input.image_url,
            event_id: input.event_id,
            taken_at: input.taken_at,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePhoto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub caption: String,
    #[validate(url, length(max = 2048), custom(function = "validate_image_url"))]
    pub image_url: String,
    pub event_id: Option<Uuid>,
    pub taken_at: Option<DateTime<Utc>>,
}

/// Query parameters for listing photos
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct PhotoFilter {
    /// Only photos from this event
    pub event_id: Option<Uuid>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

impl Default for PhotoFilter {
    fn default() -> Self {
        Self {
            event_id: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

fn default_limit() -> u64 {
    50
}

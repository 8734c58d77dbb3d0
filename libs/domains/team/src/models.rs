use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Board or committee member shown on the team page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    pub position: String,
    pub bio: String,
    pub photo_url: Option<String>,
    pub email: Option<String>,
    /// Ascending sort key on the team page
    pub display_order: i32,
    /// Inactive members are hidden from the public list
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TeamMember {
    pub fn new(input: CreateTeamMember) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            position: input.position,
            bio: input.bio,
            photo_url: input.photo_url,
            email: input.email,
            display_order: input.display_order,
            active: input.active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateTeamMember) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(position) = update.position {
            self.position = position;
        }
        if let Some(bio) = update.bio {
            self.bio = bio;
        }
        if let Some(photo_url) = update.photo_url {
            self.photo_url = photo_url;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(display_order) = update.display_order {
            self.display_order = display_order;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        self.updated_at = Utc::now();
    }
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTeamMember {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub position: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub bio: String,
    #[validate(url)]
    pub photo_url: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Partial update. `photo_url` and `email` accept `null` to clear the value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTeamMember {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub position: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(url)]
    pub photo_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(email)]
    pub email: Option<Option<String>>,
    pub display_order: Option<i32>,
    pub active: Option<bool>,
}

/// Distinguishes an explicit `null` from an absent field
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> CreateTeamMember {
        CreateTeamMember {
            name: "Linus".to_string(),
            position: "Treasurer".to_string(),
            bio: String::new(),
            photo_url: Some("https://cdn.club.test/linus.jpg".to_string()),
            email: None,
            display_order: 2,
            active: true,
        }
    }

    #[test]
    fn test_create_validation() {
        assert!(create().validate().is_ok());

        let bad = CreateTeamMember {
            photo_url: Some("not a url".to_string()),
            email: Some("nope".to_string()),
            ..create()
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("photo_url"));
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_update_can_clear_photo() {
        let mut member = TeamMember::new(create());
        let update: UpdateTeamMember =
            serde_json::from_str(r#"{ "photo_url": null, "position": "Chair" }"#).unwrap();
        member.apply_update(update);

        assert_eq!(member.photo_url, None);
        assert_eq!(member.position, "Chair");
        assert_eq!(member.display_order, 2);
    }

    #[test]
    fn test_absent_fields_are_untouched() {
        let mut member = TeamMember::new(create());
        let update: UpdateTeamMember = serde_json::from_str("{}").unwrap();
        member.apply_update(update);
        assert!(member.photo_url.is_some());
    }

    #[test]
    fn test_active_defaults_to_true() {
        let input: CreateTeamMember =
            serde_json::from_str(r#"{ "name": "Ada", "position": "Chair" }"#).unwrap();
        assert!(input.active);
        assert_eq!(input.display_order, 0);
    }
}

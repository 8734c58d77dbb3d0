use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    RegistrationConfirmed {
        event_id: Uuid,
        event_title: String,
        registration_id: Uuid,
        participant_name: String,
        participant_email: String,
    },
    RegistrationCancelled {
        event_id: Uuid,
        event_title: String,
        registration_id: Uuid,
        participant_email: String,
    },
    /// Sent to the club inbox, not to the visitor
    ContactReceived {
        message_id: Uuid,
        name: String,
        email: String,
        subject: String,
    },
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RegistrationConfirmed { .. } => "registration_confirmed",
            Self::RegistrationCancelled { .. } => "registration_cancelled",
            Self::ContactReceived { .. } => "contact_received",
        }
    }

    /// Address the message is about; `None` for club-internal notices
    pub fn recipient(&self) -> Option<&str> {
        match self {
            Self::RegistrationConfirmed {
                participant_email, ..
            }
            | Self::RegistrationCancelled {
                participant_email, ..
            } => Some(participant_email),
            Self::ContactReceived { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_kind_tag() {
        let n = Notification::ContactReceived {
            message_id: Uuid::nil(),
            name: "Sam".to_string(),
            email: "sam@uni.test".to_string(),
            subject: "Sponsorship".to_string(),
        };
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["kind"], n.kind());
        assert_eq!(json["subject"], "Sponsorship");
        assert_eq!(n.recipient(), None);
    }

    #[test]
    fn test_registration_recipient() {
        let n = Notification::RegistrationConfirmed {
            event_id: Uuid::nil(),
            event_title: "Hack Night".to_string(),
            registration_id: Uuid::nil(),
            participant_name: "Ada".to_string(),
            participant_email: "ada@uni.test".to_string(),
        };
        assert_eq!(n.recipient(), Some("ada@uni.test"));
        assert_eq!(n.kind(), "registration_confirmed");
    }
}

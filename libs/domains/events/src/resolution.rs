//! Participant identity resolution.
//!
//! A visitor is identified by email or by student number. Stores look up
//! both keys and hand the candidates to [`resolve_participant`], which decides
//! whether an existing participant is reused or a new one must be created.

use crate::models::{NewParticipant, Participant};

#[derive(Debug, Clone, PartialEq)]
pub enum ParticipantResolution {
    MatchedByEmail(Participant),
    MatchedByExternalId(Participant),
    New(NewParticipant),
}

impl ParticipantResolution {
    /// The matched participant, if any
    pub fn existing(&self) -> Option<&Participant> {
        match self {
            Self::MatchedByEmail(p) | Self::MatchedByExternalId(p) => Some(p),
            Self::New(_) => None,
        }
    }
}

/// Email wins when the two keys point at different participants. A matched
/// participant is reused as stored; the submitted profile is not applied.
pub fn resolve_participant(
    by_email: Option<Participant>,
    by_external_id: Option<Participant>,
    info: NewParticipant,
) -> ParticipantResolution {
    match (by_email, by_external_id) {
        (Some(participant), other) => {
            if let Some(other) = other.filter(|o| o.id != participant.id) {
                tracing::debug!(
                    participant_id = %participant.id,
                    other_participant_id = %other.id,
                    "Email and student number match different participants, using email match"
                );
            }
            ParticipantResolution::MatchedByEmail(participant)
        }
        (None, Some(participant)) => ParticipantResolution::MatchedByExternalId(participant),
        (None, None) => ParticipantResolution::New(info),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(email: &str, external_id: Option<&str>) -> NewParticipant {
        NewParticipant {
            name: "Grace Hopper".to_string(),
            email: email.to_string(),
            external_id: external_id.map(str::to_string),
            program: "Mathematics".to_string(),
            year: 3,
        }
    }

    fn stored(email: &str, external_id: Option<&str>) -> Participant {
        Participant::new(info(email, external_id))
    }

    #[test]
    fn test_no_match_creates_new() {
        let resolution = resolve_participant(None, None, info("g@uni.test", Some("S9")));
        assert_eq!(
            resolution,
            ParticipantResolution::New(info("g@uni.test", Some("S9")))
        );
        assert!(resolution.existing().is_none());
    }

    #[test]
    fn test_email_match() {
        let p = stored("g@uni.test", None);
        let resolution = resolve_participant(Some(p.clone()), None, info("g@uni.test", None));
        assert_eq!(resolution, ParticipantResolution::MatchedByEmail(p));
    }

    #[test]
    fn test_external_id_match_with_new_email() {
        let p = stored("old@uni.test", Some("S9"));
        let resolution =
            resolve_participant(None, Some(p.clone()), info("new@uni.test", Some("S9")));
        assert_eq!(resolution, ParticipantResolution::MatchedByExternalId(p));
    }

    #[test]
    fn test_email_wins_over_external_id() {
        let by_email = stored("g@uni.test", Some("S1"));
        let by_external = stored("other@uni.test", Some("S2"));
        let resolution = resolve_participant(
            Some(by_email.clone()),
            Some(by_external),
            info("g@uni.test", Some("S2")),
        );
        assert_eq!(resolution, ParticipantResolution::MatchedByEmail(by_email));
    }

    #[test]
    fn test_existing_profile_is_not_overwritten() {
        let p = stored("g@uni.test", None);
        let mut submitted = info("g@uni.test", None);
        submitted.name = "Someone Else".to_string();

        let resolution = resolve_participant(Some(p.clone()), None, submitted);
        assert_eq!(resolution.existing().map(|e| e.name.as_str()), Some("Grace Hopper"));
    }
}

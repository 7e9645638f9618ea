//! JSON codec for the stored user record.
//!
//! Shape: `{email, name, picture, points, progress: {completedSections,
//! completedInteractives}, lastViewedSection}`. Decoding is lenient per
//! field: a missing or wrongly typed field is filled with its default and
//! reported, the rest of the record is kept, and the caller can write the
//! patched record back.

use serde::Serialize;
use serde_json::{Map, Value};
use vanguard_core::model::{Identity, InteractiveId, SectionId, UserProgress, UserProgressDraft};

use crate::repository::StorageError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord<'a> {
    email: &'a str,
    name: &'a str,
    picture: &'a str,
    points: u32,
    progress: ProgressRecord<'a>,
    last_viewed_section: &'a SectionId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressRecord<'a> {
    completed_sections: Vec<&'a SectionId>,
    completed_interactives: Vec<&'a InteractiveId>,
}

/// How faithfully the stored text described a full record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStatus {
    Intact,
    /// Parsed, but these fields were absent or unusable and got defaults.
    Patched { missing: Vec<&'static str> },
    /// Not a JSON object; defaults were used instead.
    Malformed,
}

impl RecordStatus {
    /// Whether the stored copy should be rewritten.
    #[must_use]
    pub fn needs_rewrite(&self) -> bool {
        !matches!(self, Self::Intact)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedUser {
    pub progress: UserProgress,
    pub status: RecordStatus,
}

/// Encode a record to its stored JSON text.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if JSON encoding fails.
pub fn encode_user(user: &UserProgress) -> Result<String, StorageError> {
    let identity = user.identity();
    let record = UserRecord {
        email: &identity.email,
        name: &identity.name,
        picture: &identity.picture,
        points: user.points(),
        progress: ProgressRecord {
            completed_sections: user.completed_sections().iter().collect(),
            completed_interactives: user.completed_interactives().iter().collect(),
        },
        last_viewed_section: user.last_viewed_section(),
    };
    serde_json::to_string(&record).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Decode stored text, patching in defaults for anything missing or invalid.
#[must_use]
pub fn decode_user(text: &str) -> DecodedUser {
    let Ok(Value::Object(stored)) = serde_json::from_str::<Value>(text) else {
        return DecodedUser {
            progress: UserProgress::default(),
            status: RecordStatus::Malformed,
        };
    };

    let mut missing = Vec::new();
    let defaults = Identity::default();
    let identity = Identity {
        email: text_field(&stored, "email", &mut missing).unwrap_or(defaults.email),
        name: text_field(&stored, "name", &mut missing).unwrap_or(defaults.name),
        picture: text_field(&stored, "picture", &mut missing).unwrap_or(defaults.picture),
    };

    let points = stored
        .get("points")
        .and_then(Value::as_u64)
        .and_then(|points| u32::try_from(points).ok());
    if points.is_none() {
        missing.push("points");
    }

    let (completed_sections, completed_interactives) = match stored.get("progress") {
        Some(Value::Object(progress)) => (
            id_list(progress, "completedSections", "progress.completedSections", &mut missing),
            id_list(
                progress,
                "completedInteractives",
                "progress.completedInteractives",
                &mut missing,
            ),
        ),
        _ => {
            missing.push("progress");
            (Vec::new(), Vec::new())
        }
    };

    let last_viewed_section = stored
        .get("lastViewedSection")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(SectionId::from);
    if last_viewed_section.is_none() {
        missing.push("lastViewedSection");
    }

    let progress = UserProgress::from_persisted(UserProgressDraft {
        identity,
        points: points.unwrap_or(0),
        completed_sections,
        completed_interactives,
        last_viewed_section,
    });

    let status = if missing.is_empty() {
        RecordStatus::Intact
    } else {
        RecordStatus::Patched { missing }
    };
    DecodedUser { progress, status }
}

fn text_field(
    object: &Map<String, Value>,
    key: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    let value = object.get(key).and_then(Value::as_str).map(str::to_owned);
    if value.is_none() {
        missing.push(key);
    }
    value
}

/// Keeps every non-empty string id; the field is reported if anything was dropped.
fn id_list<T: From<String>>(
    object: &Map<String, Value>,
    key: &str,
    label: &'static str,
    missing: &mut Vec<&'static str>,
) -> Vec<T> {
    let Some(Value::Array(items)) = object.get(key) else {
        missing.push(label);
        return Vec::new();
    };
    let ids: Vec<T> = items
        .iter()
        .filter_map(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(|id| T::from(id.to_owned()))
        .collect();
    if ids.len() != items.len() {
        missing.push(label);
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_shape_matches_stored_layout() {
        let mut user = UserProgress::default();
        user.mark_interactive_complete(InteractiveId::from("simple-model-1"));
        let value: serde_json::Value = serde_json::from_str(&encode_user(&user).unwrap()).unwrap();
        assert_eq!(value["email"], "user@example.com");
        assert_eq!(value["name"], "Zen Vanguard");
        assert_eq!(value["picture"], "");
        assert_eq!(value["points"], 0);
        assert_eq!(value["progress"]["completedSections"], serde_json::json!([]));
        assert_eq!(
            value["progress"]["completedInteractives"],
            serde_json::json!(["simple-model-1"])
        );
        assert_eq!(value["lastViewedSection"], "overview");
    }

    #[test]
    fn older_record_without_last_viewed_is_patched() {
        let text = r#"{"email":"a@b.c","name":"Ada","picture":"","points":40,
            "progress":{"completedSections":["1-1","1-2"],"completedInteractives":[]}}"#;
        let decoded = decode_user(text);
        assert_eq!(
            decoded.status,
            RecordStatus::Patched {
                missing: vec!["lastViewedSection"]
            }
        );
        assert!(decoded.status.needs_rewrite());
        assert_eq!(decoded.progress.points(), 40);
        assert_eq!(decoded.progress.completed_sections().len(), 2);
        assert_eq!(decoded.progress.last_viewed_section(), &SectionId::root());
    }

    #[test]
    fn missing_progress_block_gets_empty_sets() {
        let decoded = decode_user(r#"{"points":5}"#);
        let RecordStatus::Patched { missing } = decoded.status else {
            panic!("expected patched record");
        };
        assert!(missing.contains(&"progress"));
        assert!(missing.contains(&"email"));
        assert_eq!(decoded.progress.points(), 5);
        assert!(decoded.progress.completed_sections().is_empty());
        assert_eq!(decoded.progress.identity().name, "Zen Vanguard");
    }

    #[test]
    fn wrong_shape_is_malformed() {
        for text in ["", "[]", "42", "null", "{not json"] {
            assert_eq!(decode_user(text).status, RecordStatus::Malformed, "{text}");
        }
    }

    #[test]
    fn wrongly_typed_field_keeps_the_rest_of_the_record() {
        let text = r#"{"email":"a@b.c","name":"Ada","picture":"","points":30.0,
            "progress":{"completedSections":["1-1","1-2"],"completedInteractives":[]},
            "lastViewedSection":"1-2"}"#;
        let decoded = decode_user(text);
        assert_eq!(
            decoded.status,
            RecordStatus::Patched {
                missing: vec!["points"]
            }
        );
        assert_eq!(decoded.progress.points(), 0);
        assert_eq!(decoded.progress.completed_sections().len(), 2);
        assert_eq!(decoded.progress.last_viewed_section(), &SectionId::from("1-2"));
        assert_eq!(decoded.progress.identity().name, "Ada");
    }

    #[test]
    fn negative_points_and_bad_ids_are_patched() {
        let text = r#"{"email":"a@b.c","name":"Ada","picture":"","points":-3,
            "progress":{"completedSections":["1-1",7,""],"completedInteractives":[]},
            "lastViewedSection":"1-1"}"#;
        let decoded = decode_user(text);
        assert_eq!(
            decoded.status,
            RecordStatus::Patched {
                missing: vec!["points", "progress.completedSections"]
            }
        );
        assert_eq!(decoded.progress.completed_sections().len(), 1);
        assert!(decoded.progress.is_section_complete(&SectionId::from("1-1")));
    }

    #[test]
    fn empty_last_viewed_falls_back_to_root() {
        let text = r#"{"email":"a@b.c","name":"Ada","picture":"","points":10,
            "progress":{"completedSections":["1-1"],"completedInteractives":[]},
            "lastViewedSection":""}"#;
        let decoded = decode_user(text);
        assert_eq!(
            decoded.status,
            RecordStatus::Patched {
                missing: vec!["lastViewedSection"]
            }
        );
        assert_eq!(decoded.progress.last_viewed_section(), &SectionId::root());
    }
}

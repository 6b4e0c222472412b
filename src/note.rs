//! Wire types for the OpenReview `/notes` and `/groups` endpoints.
//!
//! A note is the platform's generic container for any submitted or reply
//! content (submission, decision, comment). Its `content` mapping is kept
//! opaque here because its shape differs between the two API schema
//! variants; the variant-aware extraction lives in [`crate::paper`].

use serde::Deserialize;
use serde_json::{Map, Value};

/// A single note as returned by either API version.
#[derive(Debug, Clone, Deserialize)]
pub struct Note {
    /// Platform-assigned note identifier
    pub id: String,
    /// Forum this note belongs to (the root submission's id)
    #[serde(default)]
    pub forum: Option<String>,
    /// Invitation under which the note was posted (v1 only)
    #[serde(default)]
    pub invitation: Option<String>,
    /// Opaque content mapping; shape is schema-variant dependent
    #[serde(default)]
    pub content: Map<String, Value>,
    /// Extra per-note details requested via the `details` query parameter
    #[serde(default)]
    pub details: Option<NoteDetails>,
}

/// Requested note details. Only direct reply threads are used here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteDetails {
    #[serde(rename = "directReplies", default)]
    pub direct_replies: Vec<Reply>,
}

/// A direct reply to a submission (v1). Decision notes are replies whose
/// invitation ends with `Decision`.
#[derive(Debug, Clone, Deserialize)]
pub struct Reply {
    #[serde(default)]
    pub invitation: String,
    /// Parent submission's id
    #[serde(default)]
    pub forum: String,
    #[serde(default)]
    pub content: Map<String, Value>,
}

impl Reply {
    /// True when this reply is a decision note.
    pub fn is_decision(&self) -> bool {
        self.invitation.ends_with("Decision")
    }

    /// The decision text, if this reply carries one.
    pub fn decision(&self) -> Option<&str> {
        self.content.get("decision").and_then(Value::as_str)
    }
}

/// An organizational group as returned by `/groups`.
///
/// Only the `domain` attribute matters here: legacy venues have none.
#[derive(Debug, Clone, Deserialize)]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub domain: Option<String>,
}

/// Envelope for `/notes` responses.
#[derive(Debug, Deserialize)]
pub struct NotesResponse {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub count: Option<i64>,
}

/// Envelope for `/groups` responses.
#[derive(Debug, Deserialize)]
pub struct GroupsResponse {
    #[serde(default)]
    pub groups: Vec<Group>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reply_decision_detection() {
        let reply: Reply = serde_json::from_value(json!({
            "invitation": "ICLR.cc/2021/Conference/Paper1/-/Decision",
            "forum": "abc123",
            "content": {"decision": "Accept (Poster)"}
        }))
        .expect("valid reply");

        assert!(reply.is_decision());
        assert_eq!(reply.decision(), Some("Accept (Poster)"));
    }

    #[test]
    fn test_non_decision_reply() {
        let reply: Reply = serde_json::from_value(json!({
            "invitation": "ICLR.cc/2021/Conference/Paper1/-/Official_Review",
            "forum": "abc123",
            "content": {"review": "Looks fine."}
        }))
        .expect("valid reply");

        assert!(!reply.is_decision());
        assert_eq!(reply.decision(), None);
    }

    #[test]
    fn test_note_without_details() {
        let note: Note = serde_json::from_value(json!({
            "id": "n1",
            "content": {"title": "A Paper"}
        }))
        .expect("valid note");

        assert_eq!(note.id, "n1");
        assert!(note.details.is_none());
        assert!(note.invitation.is_none());
    }
}

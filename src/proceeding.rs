//! Schema detection and proceeding retrieval.
//!
//! Two steps, composed in strict sequence: detect which API schema variant
//! the venue was published under, then query the matching endpoints and map
//! every accepted submission into a canonical [`Paper`].
//!
//! The legacy (v1) path is an explicit three-stage pipeline: index the blind
//! submissions by id, collect their decision replies, then join accepting
//! decisions back to their parent submissions via the `forum` reference.
//! The current (v2) path is a single `content.venueid` query; the platform
//! already returns only notes published under the venue.

use crate::client::{OpenReviewClient, API_V1_BASE, API_V2_BASE};
use crate::error::Result;
use crate::note::Note;
use crate::paper::{Paper, Schema};
use std::collections::HashMap;
use tracing::{debug, info};

/// Fixed namespace prefix for venue group ids
pub const VENUE_NAMESPACE: &str = "ICLR.cc";

/// Decision text marking an accepted submission (substring match, so
/// "Accept (Oral)" and "Accept (Poster)" both qualify)
const ACCEPT_MARKER: &str = "Accept";

/// Composite group id for one venue instance, e.g. `ICLR.cc/2024/Conference`.
pub fn venue_group_id(year: i32, venue: &str) -> String {
    format!("{}/{}/{}", VENUE_NAMESPACE, year, venue)
}

/// Invitation key for a legacy venue's blind submissions.
fn blind_submission_invitation(year: i32, venue: &str) -> String {
    format!("{}/-/Blind_Submission", venue_group_id(year, venue))
}

/// Decide whether a venue uses the legacy (v1) schema.
///
/// Looks up the venue's organizational group on the v2 endpoint; legacy
/// venues are the ones whose group declares no `domain` attribute.
///
/// Fails with [`crate::error::DownloadError::NotFound`] when no group exists
/// for the given year/venue.
pub async fn detect_legacy(
    year: i32,
    venue: &str,
    username: &str,
    password: &str,
) -> Result<bool> {
    let client = OpenReviewClient::connect(API_V2_BASE, username, password).await?;
    let group = client.get_group(&venue_group_id(year, venue)).await?;

    let legacy = group.domain.as_deref().map_or(true, str::is_empty);
    info!(group = %group.id, legacy = legacy, "Detected schema variant");
    Ok(legacy)
}

/// Retrieve all accepted submissions for a venue/year as canonical records.
///
/// One fresh authenticated client per call; nothing is cached across
/// invocations. Records come back in the order the remote queries returned
/// their notes.
pub async fn get_proceeding(
    year: i32,
    venue: &str,
    username: &str,
    password: &str,
) -> Result<Vec<Paper>> {
    let schema = if detect_legacy(year, venue, username, password).await? {
        Schema::Legacy
    } else {
        Schema::Current
    };

    let base_url = match schema {
        Schema::Legacy => API_V1_BASE,
        Schema::Current => API_V2_BASE,
    };
    let client = OpenReviewClient::connect(base_url, username, password).await?;

    let notes = match schema {
        Schema::Legacy => {
            let invitation = blind_submission_invitation(year, venue);
            let submissions = client.notes_by_invitation(&invitation).await?;
            debug!(submissions = submissions.len(), "Fetched blind submissions");
            accepted_submissions(submissions)
        }
        Schema::Current => client.notes_by_venueid(&venue_group_id(year, venue)).await?,
    };

    info!(year = year, venue = venue, papers = notes.len(), "Proceeding fetched");

    notes.iter().map(|note| schema.extract(note, year)).collect()
}

/// Filter legacy blind submissions down to the accepted ones.
///
/// A submission is included once per decision reply whose decision text
/// contains "Accept"; multiple accepting decisions are not collapsed.
/// Submissions with no accepting decision are excluded entirely.
fn accepted_submissions(submissions: Vec<Note>) -> Vec<Note> {
    let index: HashMap<&str, &Note> = submissions
        .iter()
        .map(|note| (note.id.as_str(), note))
        .collect();

    submissions
        .iter()
        .flat_map(|submission| {
            submission
                .details
                .as_ref()
                .map(|d| d.direct_replies.as_slice())
                .unwrap_or(&[])
        })
        .filter(|reply| reply.is_decision())
        .filter(|reply| {
            reply
                .decision()
                .is_some_and(|decision| decision.contains(ACCEPT_MARKER))
        })
        .filter_map(|reply| index.get(reply.forum.as_str()))
        .map(|&note| note.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission(id: &str, decisions: &[&str]) -> Note {
        let replies: Vec<_> = decisions
            .iter()
            .map(|decision| {
                json!({
                    "invitation": format!("ICLR.cc/2021/Conference/{}/-/Decision", id),
                    "forum": id,
                    "content": {"decision": decision}
                })
            })
            .collect();

        serde_json::from_value(json!({
            "id": id,
            "content": {"title": format!("Paper {}", id)},
            "details": {"directReplies": replies}
        }))
        .expect("valid submission")
    }

    #[test]
    fn test_venue_group_id() {
        assert_eq!(venue_group_id(2024, "Conference"), "ICLR.cc/2024/Conference");
        assert_eq!(
            blind_submission_invitation(2021, "Conference"),
            "ICLR.cc/2021/Conference/-/Blind_Submission"
        );
    }

    #[test]
    fn test_reject_excluded_accept_kept() {
        let notes = vec![
            submission("s1", &["Reject"]),
            submission("s2", &["Accept (Poster)"]),
        ];

        let accepted = accepted_submissions(notes);
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].id, "s2");
    }

    #[test]
    fn test_substring_match_covers_oral_and_poster() {
        let notes = vec![
            submission("s1", &["Accept (Oral)"]),
            submission("s2", &["Accept (Poster)"]),
            submission("s3", &["Invite to Workshop"]),
        ];

        let ids: Vec<_> = accepted_submissions(notes)
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["s1", "s2"]);
    }

    #[test]
    fn test_multiple_accepting_decisions_not_deduplicated() {
        let notes = vec![submission("s1", &["Accept (Oral)", "Accept (Poster)"])];

        let accepted = accepted_submissions(notes);
        assert_eq!(accepted.len(), 2);
        assert!(accepted.iter().all(|n| n.id == "s1"));
    }

    #[test]
    fn test_non_decision_replies_ignored() {
        let note: Note = serde_json::from_value(json!({
            "id": "s1",
            "content": {"title": "Paper s1"},
            "details": {"directReplies": [{
                "invitation": "ICLR.cc/2021/Conference/s1/-/Official_Review",
                "forum": "s1",
                "content": {"decision": "Accept (Poster)"}
            }]}
        }))
        .expect("valid note");

        assert!(accepted_submissions(vec![note]).is_empty());
    }

    #[test]
    fn test_no_replies_excluded() {
        let note: Note = serde_json::from_value(json!({
            "id": "s1",
            "content": {"title": "Paper s1"}
        }))
        .expect("valid note");

        assert!(accepted_submissions(vec![note]).is_empty());
    }
}

//! OpenReview API client.
//!
//! Handles the login exchange (username/password for a bearer token) and the
//! `/groups` and `/notes` endpoints shared by both API versions. The two
//! versions live at different base URLs but speak the same envelope format;
//! only the note *content* shape differs, which is handled in [`crate::paper`].
//!
//! Pagination over `/notes` is internal: callers always get the full result
//! set, concatenated in the order the API returned it.

use crate::error::{DownloadError, Result};
use crate::note::{Group, GroupsResponse, Note, NotesResponse};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Base URL of the legacy (v1) API
pub const API_V1_BASE: &str = "https://api.openreview.net";

/// Base URL of the current (v2) API
pub const API_V2_BASE: &str = "https://api2.openreview.net";

/// Maximum notes per page (OpenReview limit)
const PAGE_LIMIT: usize = 1000;

/// Request timeout for all calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    id: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// An authenticated client scoped to one API base URL.
///
/// Constructed fresh for every fetch invocation; tokens are never cached or
/// shared across calls.
pub struct OpenReviewClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl OpenReviewClient {
    /// Log in against `base_url` and return an authenticated client.
    pub async fn connect(base_url: &str, username: &str, password: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("iclr-downloader/0.1")
            .build()
            .map_err(|e| DownloadError::Config(format!("Failed to build HTTP client: {}", e)))?;

        debug!(base_url = base_url, "Logging in");

        let response = http
            .post(format!("{}/login", base_url))
            .json(&LoginRequest {
                id: username,
                password,
            })
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::BAD_REQUEST
        {
            return Err(DownloadError::Auth(format!(
                "login rejected for user {}",
                username
            )));
        }
        if !status.is_success() {
            return Err(api_error(status, "login failed"));
        }

        let login: LoginResponse = response.json().await?;
        info!(base_url = base_url, "Authenticated");

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            token: login.token,
        })
    }

    /// Fetch the organizational group with the given id.
    ///
    /// Fails with [`DownloadError::NotFound`] when no such group exists.
    pub async fn get_group(&self, group_id: &str) -> Result<Group> {
        let url = format!(
            "{}/groups?id={}",
            self.base_url,
            urlencoding::encode(group_id)
        );
        debug!(url = %url, "Fetching group");

        let response = self.get(&url).await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DownloadError::NotFound(format!("group {}", group_id)));
        }
        if !status.is_success() {
            return Err(api_error(status, "group query failed"));
        }

        let body: GroupsResponse = response.json().await?;
        body.groups
            .into_iter()
            .next()
            .ok_or_else(|| DownloadError::NotFound(format!("group {}", group_id)))
    }

    /// Fetch every note posted under `invitation`, with direct reply threads.
    ///
    /// Used by the legacy (v1) path; the replies carry the decision notes.
    pub async fn notes_by_invitation(&self, invitation: &str) -> Result<Vec<Note>> {
        self.all_notes(&format!(
            "invitation={}&details=directReplies",
            urlencoding::encode(invitation)
        ))
        .await
    }

    /// Fetch every note whose content tags it with `venueid`.
    ///
    /// Used by the current (v2) path; the platform only returns notes
    /// published under that venue.
    pub async fn notes_by_venueid(&self, venueid: &str) -> Result<Vec<Note>> {
        self.all_notes(&format!(
            "content.venueid={}",
            urlencoding::encode(venueid)
        ))
        .await
    }

    /// Walk the paginated `/notes` endpoint until a short page is returned.
    async fn all_notes(&self, query: &str) -> Result<Vec<Note>> {
        paginate(PAGE_LIMIT, |offset| {
            let url = build_notes_url(&self.base_url, query, PAGE_LIMIT, offset);
            async move {
                debug!(url = %url, offset = offset, "Fetching notes page");

                let response = self.get(&url).await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(api_error(status, "notes query failed"));
                }

                let page: NotesResponse = response.json().await?;
                Ok(page.notes)
            }
        })
        .await
    }

    /// Issue one authenticated GET, mapping auth and rate-limit statuses.
    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(DownloadError::Auth("token rejected".to_string()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DownloadError::RateLimited {
                retry_after: retry_after_hint(response.headers()),
            });
        }

        Ok(response)
    }
}

/// Fetch pages at increasing offsets, concatenating them in order, until a
/// page comes back shorter than `limit`.
async fn paginate<F, Fut>(limit: usize, mut fetch_page: F) -> Result<Vec<Note>>
where
    F: FnMut(usize) -> Fut,
    Fut: std::future::Future<Output = Result<Vec<Note>>>,
{
    let mut notes = Vec::new();
    let mut offset = 0usize;

    loop {
        let page = fetch_page(offset).await?;
        let fetched = page.len();
        notes.extend(page);

        debug!(fetched = fetched, total = notes.len(), "Notes page parsed");

        if fetched < limit {
            break;
        }
        offset += limit;
    }

    info!(count = notes.len(), "Notes query complete");
    Ok(notes)
}

/// Seconds-to-wait hint from a `Retry-After` header, when present.
fn retry_after_hint(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

/// Build one page's `/notes` URL.
fn build_notes_url(base_url: &str, query: &str, limit: usize, offset: usize) -> String {
    format!(
        "{}/notes?{}&limit={}&offset={}",
        base_url, query, limit, offset
    )
}

fn api_error(status: reqwest::StatusCode, context: &str) -> DownloadError {
    DownloadError::Api {
        code: status.as_u16() as i32,
        message: format!("{}: {}", context, status),
    }
}

//! # iclr-downloader
//!
//! Downloads the accepted papers of an ICLR venue/year from OpenReview and
//! normalizes them into one flat record shape across the two incompatible
//! API versions.
//!
//! ## Modules
//!
//! - [`client`] - Authenticated OpenReview API client
//! - [`note`] - Wire types for notes, replies and groups
//! - [`paper`] - Canonical record and dual-schema field extraction
//! - [`proceeding`] - Schema detection and proceeding retrieval
//! - [`output`] - JSONL serialization
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use iclr_downloader::proceeding;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let papers = proceeding::get_proceeding(2024, "Conference", "user", "pass").await?;
//!     println!("Fetched {} accepted papers", papers.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod note;
pub mod output;
pub mod paper;
pub mod proceeding;

pub use error::{DownloadError, Result};

//! Screenshot lifecycle orchestration.
//!
//! Ties the validator, media handling, and persistence layers together
//! behind one mutation surface: every create/update/delete of a screenshot
//! goes through [`ScreenshotLifecycle`], which runs the post-save and
//! post-delete steps that keep the one-primary-per-(game, kind) invariant
//! and the games' legacy display fields consistent.

pub mod error;
pub mod lifecycle;
pub mod upload;

pub use error::ScreenshotError;
pub use lifecycle::{SaveContext, ScreenshotLifecycle};
pub use upload::{sha1_hex, UploadLimits, UploadRequest};

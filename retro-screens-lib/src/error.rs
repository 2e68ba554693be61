use retro_screens_core::{ResolutionMismatch, ScreenshotKind};
use retro_screens_db::OperationError;
use retro_screens_media::MediaError;

/// Errors surfaced by the screenshot mutation surface.
///
/// The first four variants are uploader-recoverable rejections; the rest
/// are system faults in the invariant-critical path and propagate hard.
#[derive(Debug, thiserror::Error)]
pub enum ScreenshotError {
    #[error("{0}")]
    Resolution(#[from] ResolutionMismatch),

    #[error("Uploaded file is not a valid image: {0}")]
    Decode(#[source] MediaError),

    #[error("Uploaded file is too large: {actual} bytes (limit {limit})")]
    FileTooLarge { actual: u64, limit: u64 },

    #[error("This game already has the maximum of {limit} {kind} screenshot(s)")]
    LimitReached { kind: ScreenshotKind, limit: u32 },

    #[error("An identical screenshot already exists for this game")]
    Duplicate,

    #[error("Database error: {0}")]
    Db(#[from] OperationError),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),
}

impl ScreenshotError {
    /// True when the uploader can fix the problem by resubmitting.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Resolution(_)
                | Self::Decode(_)
                | Self::FileTooLarge { .. }
                | Self::LimitReached { .. }
                | Self::Duplicate
        )
    }
}

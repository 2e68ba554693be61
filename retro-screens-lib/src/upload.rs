use retro_screens_core::{ScreenshotKind, ScreenshotStatus};
use sha1::Digest;

/// One upload request, as handed over by the web layer.
///
/// Authorization and moderation policy are the caller's concern, which is
/// why the initial `status` arrives as data rather than being decided here.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub game_id: i64,
    pub kind: ScreenshotKind,
    pub bytes: Vec<u8>,
    pub description: Option<String>,
    pub captured_by_user_id: Option<i64>,
    pub status: ScreenshotStatus,
}

/// Upload caps, passed in as configuration rather than hardcoded.
#[derive(Debug, Clone)]
pub struct UploadLimits {
    pub max_title: u32,
    pub max_ingame: u32,
    pub max_completion: u32,
    pub max_file_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_title: 1,
            max_ingame: 20,
            max_completion: 1,
            max_file_bytes: 2 * 1024 * 1024,
        }
    }
}

impl UploadLimits {
    /// Cap on screenshots of one kind per game.
    pub fn max_for(&self, kind: ScreenshotKind) -> u32 {
        match kind {
            ScreenshotKind::Title => self.max_title,
            ScreenshotKind::Ingame => self.max_ingame,
            ScreenshotKind::Completion => self.max_completion,
        }
    }
}

/// Lower-hex SHA-1 digest of an upload, used for per-game dedup.
pub fn sha1_hex(bytes: &[u8]) -> String {
    let mut sha = sha1::Sha1::new();
    sha.update(bytes);
    format!("{:x}", sha.finalize())
}

pub mod kind;
pub mod resolution;
pub mod screenshot;
pub mod system;

pub use kind::{KindParseError, ScreenshotKind};
pub use resolution::{validate_dimensions, ResolutionMismatch, MAX_SCALE_FACTOR};
pub use screenshot::{
    MediaRecord, Screenshot, ScreenshotStatus, StatusParseError, PLACEHOLDER_LEGACY_PATH,
    PROP_LEGACY_PATH, PROP_SHA1,
};
pub use system::{Resolution, SystemProfile, SMPTE_601_RESOLUTIONS};

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::kind::ScreenshotKind;

/// Legacy game field value used when no primary screenshot exists for a kind.
pub const PLACEHOLDER_LEGACY_PATH: &str = "/Images/000001.png";

/// Media custom-property key holding the upload's SHA-1 digest (dedup).
pub const PROP_SHA1: &str = "sha1";

/// Media custom-property key pointing at the legacy-format render.
pub const PROP_LEGACY_PATH: &str = "legacy_path";

/// Moderation state of an uploaded screenshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenshotStatus {
    Pending,
    Approved,
    Rejected,
}

impl ScreenshotStatus {
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ScreenshotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Error returned when a string cannot be parsed into a `ScreenshotStatus`.
#[derive(Debug, Clone)]
pub struct StatusParseError(pub String);

impl std::fmt::Display for StatusParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown screenshot status: '{}'", self.0)
    }
}

impl std::error::Error for StatusParseError {}

impl std::str::FromStr for ScreenshotStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(StatusParseError(s.to_string())),
        }
    }
}

/// One uploaded screenshot attached to a game.
///
/// At most one screenshot per `(game_id, kind)` has `is_primary` set; that
/// one drives the game's legacy display field for the kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    pub id: i64,
    pub game_id: i64,
    pub media_id: i64,
    pub kind: ScreenshotKind,
    pub is_primary: bool,
    pub status: ScreenshotStatus,
    pub description: Option<String>,
    pub captured_by_user_id: Option<i64>,
    pub reviewed_by_user_id: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Sort position within `(game_id, kind)`.
    pub order_column: i64,
}

/// Stored-binary record backing a screenshot (1:1 ownership).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: i64,
    /// Remote object path of the original upload.
    pub path: String,
    /// Flexible property bag; only `sha1` and `legacy_path` matter here.
    pub custom_properties: BTreeMap<String, serde_json::Value>,
}

impl MediaRecord {
    pub fn new(id: i64, path: impl Into<String>) -> Self {
        Self {
            id,
            path: path.into(),
            custom_properties: BTreeMap::new(),
        }
    }

    /// Read a string-valued custom property.
    pub fn custom_property(&self, name: &str) -> Option<&str> {
        self.custom_properties.get(name).and_then(|v| v.as_str())
    }

    pub fn set_custom_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.custom_properties
            .insert(name.into(), serde_json::Value::String(value.into()));
    }

    pub fn legacy_path(&self) -> Option<&str> {
        self.custom_property(PROP_LEGACY_PATH)
    }

    pub fn sha1(&self) -> Option<&str> {
        self.custom_property(PROP_SHA1)
    }
}

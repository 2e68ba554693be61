use serde::{Deserialize, Serialize};

/// Screenshot categories a game can carry.
///
/// This enum centralizes screenshot identity — short names, display names,
/// and the legacy game column each category syncs to — in one place,
/// replacing ad-hoc string matching throughout the codebase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenshotKind {
    /// Title screen capture
    Title,
    /// In-game capture
    Ingame,
    /// Completion / ending screen capture
    Completion,
}

/// All kind variants in registration order.
const ALL_KINDS: &[ScreenshotKind] = &[
    ScreenshotKind::Title,
    ScreenshotKind::Ingame,
    ScreenshotKind::Completion,
];

impl ScreenshotKind {
    /// Canonical short name used for storage rows and identifiers.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Ingame => "ingame",
            Self::Completion => "completion",
        }
    }

    /// Full display name for the kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Title => "Title Screen",
            Self::Ingame => "In-Game",
            Self::Completion => "Completion",
        }
    }

    /// Column on the game row that mirrors this kind's primary screenshot.
    pub fn legacy_column(&self) -> &'static str {
        match self {
            Self::Title => "image_title_path",
            Self::Ingame => "image_ingame_path",
            Self::Completion => "image_completion_path",
        }
    }

    /// All three kind variants.
    pub fn all() -> &'static [ScreenshotKind] {
        ALL_KINDS
    }
}

impl std::fmt::Display for ScreenshotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error returned when a string cannot be parsed into a `ScreenshotKind`.
#[derive(Debug, Clone)]
pub struct KindParseError(pub String);

impl std::fmt::Display for KindParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown screenshot kind: '{}'", self.0)
    }
}

impl std::error::Error for KindParseError {}

impl std::str::FromStr for ScreenshotKind {
    type Err = KindParseError;

    /// Parse a kind from its canonical short name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        for &kind in ALL_KINDS {
            if kind.short_name() == lower {
                return Ok(kind);
            }
        }
        Err(KindParseError(s.to_string()))
    }
}

use serde::{Deserialize, Serialize};

/// A pixel resolution, displayed as `WxH` (e.g. `256x224`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// SMPTE 601 analog digitization resolutions.
///
/// Systems with analog TV output accept these as alternate exact matches,
/// since capture hardware digitizes the analog signal at these sizes rather
/// than the console's native framebuffer size. Never subject to scaling.
pub const SMPTE_601_RESOLUTIONS: [Resolution; 5] = [
    // NTSC
    Resolution::new(704, 480),
    Resolution::new(720, 480),
    Resolution::new(720, 486),
    // PAL
    Resolution::new(704, 576),
    Resolution::new(720, 576),
];

/// Screenshot acceptance profile for one console/system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemProfile {
    /// Display name, used only in rejection messages.
    pub name: String,

    /// Canonical base resolutions. An empty list means the system has no
    /// configured constraint and any dimensions are accepted.
    pub screenshot_resolutions: Vec<Resolution>,

    /// Whether clean 2x/3x integer upscales of a base resolution are
    /// also accepted (emulators commonly render at integer multiples).
    pub supports_resolution_scaling: bool,

    /// Whether the fixed SMPTE 601 analog capture resolutions are
    /// additionally accepted (exact match only).
    pub has_analog_tv_output: bool,
}

impl SystemProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.screenshot_resolutions
            .push(Resolution::new(width, height));
        self
    }

    pub fn with_scaling(mut self, enabled: bool) -> Self {
        self.supports_resolution_scaling = enabled;
        self
    }

    pub fn with_analog_tv_output(mut self, enabled: bool) -> Self {
        self.has_analog_tv_output = enabled;
        self
    }
}

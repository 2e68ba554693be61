//! Screenshot dimension validation against a system's acceptance profile.
//!
//! A candidate size passes when it exactly matches a configured base
//! resolution, is a clean symmetric 2x/3x multiple of one (when the system
//! allows scaling), or exactly matches an SMPTE 601 analog capture size
//! (when the system has analog TV output). Systems with no configured
//! resolutions accept everything.

use crate::system::{Resolution, SystemProfile, SMPTE_601_RESOLUTIONS};

/// Largest accepted integer upscale of a base resolution.
pub const MAX_SCALE_FACTOR: u32 = 3;

/// Rejection produced when a candidate size matches nothing the system
/// accepts. `Display` renders the full user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionMismatch {
    pub width: u32,
    pub height: u32,
    pub system_name: String,
    pub accepted: Vec<Resolution>,
    pub analog_accepted: bool,
}

impl std::fmt::Display for ResolutionMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let list = self
            .accepted
            .iter()
            .map(Resolution::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "{}x{} is not a valid screenshot resolution for {}. \
             Supported resolutions: {} (2x and 3x integer multiples are also accepted).",
            self.width, self.height, self.system_name, list
        )?;
        if self.analog_accepted {
            let smpte = SMPTE_601_RESOLUTIONS
                .iter()
                .map(Resolution::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, " SMPTE 601 analog captures are also accepted: {}.", smpte)?;
        }
        Ok(())
    }
}

impl std::error::Error for ResolutionMismatch {}

/// Validate a decoded image's pixel dimensions against a system profile.
///
/// Callers must decode the image themselves first; a file that fails to
/// decode is its own earlier-stage error and must never reach here as a
/// `0x0` candidate.
pub fn validate_dimensions(
    system: &SystemProfile,
    width: u32,
    height: u32,
) -> Result<(), ResolutionMismatch> {
    // No configured constraint: accept anything.
    if system.screenshot_resolutions.is_empty() {
        return Ok(());
    }

    for base in &system.screenshot_resolutions {
        if width == base.width && height == base.height {
            return Ok(());
        }
        if system.supports_resolution_scaling && is_integer_multiple(base, width, height) {
            return Ok(());
        }
    }

    // Analog capture hardware digitizes at fixed SMPTE 601 sizes regardless
    // of the console's framebuffer, so these match exactly only.
    if system.has_analog_tv_output
        && SMPTE_601_RESOLUTIONS
            .iter()
            .any(|r| r.width == width && r.height == height)
    {
        return Ok(());
    }

    Err(ResolutionMismatch {
        width,
        height,
        system_name: system.name.clone(),
        accepted: system.screenshot_resolutions.clone(),
        analog_accepted: system.has_analog_tv_output,
    })
}

/// True when `(width, height)` is a symmetric integer upscale of `base`
/// with factor in `2..=MAX_SCALE_FACTOR`.
///
/// Divisibility is checked with integer modulo and the factors compared
/// with strict equality — anamorphic stretches like `2x` wide by `1x`
/// tall never pass. 1x is handled by the exact-match check.
fn is_integer_multiple(base: &Resolution, width: u32, height: u32) -> bool {
    if base.width == 0 || base.height == 0 {
        return false;
    }
    if width % base.width != 0 || height % base.height != 0 {
        return false;
    }
    let scale_x = width / base.width;
    let scale_y = height / base.height;
    scale_x == scale_y && scale_x >= 2 && scale_x <= MAX_SCALE_FACTOR
}

#[cfg(test)]
#[path = "tests/resolution_tests.rs"]
mod tests;

//! Legacy-format render of an uploaded screenshot.
//!
//! Backward-compatible serving paths predate the media system and expect a
//! small PNG under `/Images/<sequential-id>.png`, capped to a 320x240 box.
//! Rendering is best-effort: any failure is logged and reported as `None`
//! so primary promotion and legacy-field resync can still proceed.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use image::imageops::{self, FilterType};

use crate::error::MediaError;
use crate::store::ObjectStore;

/// Bounding box for legacy renders.
pub const LEGACY_BOX_WIDTH: u32 = 320;
pub const LEGACY_BOX_HEIGHT: u32 = 240;

/// Store path prefix legacy renders are published under.
pub const LEGACY_PATH_PREFIX: &str = "/Images";

/// Numbering authority for legacy filenames.
///
/// The sequential id space is shared with other legacy assets and owned by
/// an external collaborator, so the generator is injected rather than
/// derived from local state.
pub trait LegacyIdAllocator: Send + Sync {
    fn next_id(&self) -> Result<u64, MediaError>;
}

/// Process-local allocator for tests and single-host setups.
#[derive(Debug)]
pub struct SequentialIdAllocator {
    next: AtomicU64,
}

impl SequentialIdAllocator {
    pub fn new(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl LegacyIdAllocator for SequentialIdAllocator {
    fn next_id(&self) -> Result<u64, MediaError> {
        Ok(self.next.fetch_add(1, Ordering::SeqCst))
    }
}

/// Store path for a legacy render id, e.g. `/Images/000042.png`.
pub fn legacy_image_path(id: u64) -> String {
    format!("{}/{:06}.png", LEGACY_PATH_PREFIX, id)
}

/// Extract pixel dimensions from an uploaded file's bytes.
///
/// A file that does not decode as a raster image is reported as a decode
/// error here, before any resolution validation can see it — never as a
/// `0x0` candidate.
pub fn decode_dimensions(bytes: &[u8]) -> Result<(u32, u32), MediaError> {
    let img = image::load_from_memory(bytes)?;
    Ok((img.width(), img.height()))
}

/// Fit dimensions into the legacy 320x240 box, preserving aspect ratio.
///
/// Two sequential proportional passes: first clamp the width, then clamp
/// the height of the already-width-clamped result. The second pass runs on
/// the output of the first, not on the original dimensions.
pub fn legacy_box_fit(width: u32, height: u32) -> (u32, u32) {
    let mut w = width as f64;
    let mut h = height as f64;

    if w > LEGACY_BOX_WIDTH as f64 {
        let scale = LEGACY_BOX_WIDTH as f64 / w;
        h = (h * scale).floor();
        w = LEGACY_BOX_WIDTH as f64;
    }
    if h > LEGACY_BOX_HEIGHT as f64 {
        let scale = LEGACY_BOX_HEIGHT as f64 / h;
        w = (w * scale).floor();
        h = LEGACY_BOX_HEIGHT as f64;
    }

    ((w as u32).max(1), (h as u32).max(1))
}

/// Produce and publish a legacy render of an uploaded image.
///
/// Decodes `bytes`, resamples into the legacy box, stages the PNG under
/// `staging_dir`, uploads it to the store, and returns the store path.
/// Returns `None` on any failure (decode, id allocation, io, upload).
pub fn materialize_legacy_render(
    bytes: &[u8],
    allocator: &dyn LegacyIdAllocator,
    staging_dir: &Path,
    store: &dyn ObjectStore,
) -> Option<String> {
    match try_materialize(bytes, allocator, staging_dir, store) {
        Ok(path) => Some(path),
        Err(e) => {
            log::warn!("skipping legacy render: {}", e);
            None
        }
    }
}

fn try_materialize(
    bytes: &[u8],
    allocator: &dyn LegacyIdAllocator,
    staging_dir: &Path,
    store: &dyn ObjectStore,
) -> Result<String, MediaError> {
    let source = image::load_from_memory(bytes)?.into_rgba8();
    let (w, h) = legacy_box_fit(source.width(), source.height());
    let render = imageops::resize(&source, w, h, FilterType::Lanczos3);

    let id = allocator.next_id()?;
    let remote = legacy_image_path(id);

    std::fs::create_dir_all(staging_dir)?;
    let local = staging_dir.join(format!("{:06}.png", id));
    render.save(&local)?;
    store.put(&local, &remote)?;

    Ok(remote)
}

#[cfg(test)]
#[path = "tests/legacy_tests.rs"]
mod tests;

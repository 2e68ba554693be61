use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::legacy::{
    decode_dimensions, legacy_box_fit, legacy_image_path, materialize_legacy_render,
    LegacyIdAllocator, SequentialIdAllocator, LEGACY_BOX_HEIGHT, LEGACY_BOX_WIDTH,
};
use crate::store::{FsObjectStore, ObjectStore};
use crate::MediaError;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([40, 80, 120, 255]));
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .unwrap();
    bytes
}

#[test]
fn fit_leaves_small_images_alone() {
    assert_eq!(legacy_box_fit(320, 240), (320, 240));
    assert_eq!(legacy_box_fit(160, 144), (160, 144));
    assert_eq!(legacy_box_fit(1, 1), (1, 1));
}

#[test]
fn fit_clamps_wide_images_by_width() {
    // 640x480 -> width pass scales both halves: 320x240
    assert_eq!(legacy_box_fit(640, 480), (320, 240));
    // 512x224 -> width pass: 320x140, height already fits
    assert_eq!(legacy_box_fit(512, 224), (320, 140));
}

#[test]
fn fit_second_pass_operates_on_first_pass_output() {
    // 500x1000: width pass -> 320x640, then height pass on that -> 120x240
    assert_eq!(legacy_box_fit(500, 1000), (120, 240));
}

#[test]
fn fit_clamps_tall_images_by_height_only() {
    // Width already fits; only the height pass runs.
    assert_eq!(legacy_box_fit(300, 600), (150, 240));
}

#[test]
fn fit_preserves_aspect_ratio_within_a_pixel() {
    for (w, h) in [(500, 1000), (1920, 1080), (640, 480), (257, 241)] {
        let (fw, fh) = legacy_box_fit(w, h);
        assert!(fw <= LEGACY_BOX_WIDTH);
        assert!(fh <= LEGACY_BOX_HEIGHT);
        // Reprojecting the fitted width through the original ratio should
        // land within 1px of the fitted height.
        let expected_h = fw as f64 * h as f64 / w as f64;
        assert!(
            (expected_h - fh as f64).abs() <= 1.0,
            "{}x{} -> {}x{} distorts aspect ratio",
            w,
            h,
            fw,
            fh
        );
    }
}

#[test]
fn legacy_paths_are_zero_padded() {
    assert_eq!(legacy_image_path(7), "/Images/000007.png");
    assert_eq!(legacy_image_path(1234567), "/Images/1234567.png");
}

#[test]
fn decode_dimensions_reads_the_actual_file() {
    let (w, h) = decode_dimensions(&png_bytes(512, 448)).unwrap();
    assert_eq!((w, h), (512, 448));
}

#[test]
fn decode_dimensions_rejects_garbage() {
    assert!(decode_dimensions(b"definitely not an image").is_err());
}

#[test]
fn materialize_writes_a_fitted_png_to_the_store() {
    let root = tempfile::tempdir().unwrap();
    let staging = tempfile::tempdir().unwrap();
    let store = FsObjectStore::new(root.path());
    let allocator = SequentialIdAllocator::new(42);

    let path = materialize_legacy_render(
        &png_bytes(640, 480),
        &allocator,
        staging.path(),
        &store,
    )
    .unwrap();
    assert_eq!(path, "/Images/000042.png");

    let stored = store.get(&path).unwrap();
    let (w, h) = decode_dimensions(&stored).unwrap();
    assert_eq!((w, h), (320, 240));
}

#[test]
fn materialize_fails_soft_on_undecodable_input() {
    let root = tempfile::tempdir().unwrap();
    let staging = tempfile::tempdir().unwrap();
    let store = FsObjectStore::new(root.path());
    let allocator = SequentialIdAllocator::new(1);

    let result =
        materialize_legacy_render(b"garbage", &allocator, staging.path(), &store);
    assert!(result.is_none());
}

struct ExhaustedAllocator;

impl LegacyIdAllocator for ExhaustedAllocator {
    fn next_id(&self) -> Result<u64, MediaError> {
        Err(MediaError::store("id authority unavailable"))
    }
}

struct RejectingStore;

impl ObjectStore for RejectingStore {
    fn get(&self, path: &str) -> Result<Vec<u8>, MediaError> {
        Err(MediaError::store(format!("no such object: {}", path)))
    }

    fn put(&self, _local: &Path, _remote: &str) -> Result<(), MediaError> {
        Err(MediaError::store("store offline"))
    }
}

#[test]
fn materialize_fails_soft_on_allocator_and_store_errors() {
    let staging = tempfile::tempdir().unwrap();
    let bytes = png_bytes(320, 240);

    let root = tempfile::tempdir().unwrap();
    let store = FsObjectStore::new(root.path());
    assert!(
        materialize_legacy_render(&bytes, &ExhaustedAllocator, staging.path(), &store).is_none()
    );

    let allocator = SequentialIdAllocator::new(1);
    assert!(
        materialize_legacy_render(&bytes, &allocator, staging.path(), &RejectingStore).is_none()
    );
}

//! Binary media handling for the screenshot subsystem: object storage,
//! upload-time image decoding, and legacy-format render materialization.

pub mod error;
pub mod legacy;
pub mod store;

pub use error::MediaError;
pub use legacy::{
    decode_dimensions, legacy_box_fit, legacy_image_path, materialize_legacy_render,
    LegacyIdAllocator, SequentialIdAllocator, LEGACY_BOX_HEIGHT, LEGACY_BOX_WIDTH,
    LEGACY_PATH_PREFIX,
};
pub use store::{FsObjectStore, ObjectStore};

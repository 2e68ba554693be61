//! SQLite persistence layer for games, media, and screenshots.
//!
//! Provides schema creation, CRUD operations, and query APIs
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    delete_screenshot, insert_game, insert_media, insert_screenshot, set_game_legacy_field,
    set_primary, set_review, set_status, update_description, update_media_properties,
    NewScreenshot, OperationError,
};
pub use queries::{
    approved_siblings, find_media_by_sha1, game_legacy_field, get_media, get_screenshot,
    primary_screenshot, next_order_column, screenshot_count, screenshots_for_game,
};
pub use schema::{open_database, open_memory, SchemaError};

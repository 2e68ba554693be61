//! Write operations for games, media, and screenshot rows.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use retro_screens_core::{ScreenshotKind, ScreenshotStatus};
use rusqlite::{params, Connection};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Property serialization error: {0}")]
    Properties(#[from] serde_json::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: i64 },
}

impl OperationError {
    pub fn not_found(entity_type: &str, id: i64) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id,
        }
    }
}

/// Fields needed to create a screenshot row.
#[derive(Debug, Clone)]
pub struct NewScreenshot {
    pub game_id: i64,
    pub media_id: i64,
    pub kind: ScreenshotKind,
    pub is_primary: bool,
    pub status: ScreenshotStatus,
    pub description: Option<String>,
    pub captured_by_user_id: Option<i64>,
    pub order_column: i64,
}

/// Insert a game row with placeholder legacy fields. Returns the new id.
pub fn insert_game(conn: &Connection, title: &str) -> Result<i64, OperationError> {
    conn.execute("INSERT INTO games (title) VALUES (?1)", params![title])?;
    Ok(conn.last_insert_rowid())
}

/// Insert a media row. Returns the new id.
pub fn insert_media(
    conn: &Connection,
    path: &str,
    custom_properties: &BTreeMap<String, serde_json::Value>,
) -> Result<i64, OperationError> {
    let props = serde_json::to_string(custom_properties)?;
    conn.execute(
        "INSERT INTO media (path, custom_properties) VALUES (?1, ?2)",
        params![path, props],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Replace a media row's custom-property bag.
pub fn update_media_properties(
    conn: &Connection,
    media_id: i64,
    custom_properties: &BTreeMap<String, serde_json::Value>,
) -> Result<(), OperationError> {
    let props = serde_json::to_string(custom_properties)?;
    let updated = conn.execute(
        "UPDATE media SET custom_properties = ?1 WHERE id = ?2",
        params![props, media_id],
    )?;
    if updated == 0 {
        return Err(OperationError::not_found("media", media_id));
    }
    Ok(())
}

/// Insert a screenshot row. Returns the new id.
pub fn insert_screenshot(
    conn: &Connection,
    screenshot: &NewScreenshot,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO screenshots
             (game_id, media_id, kind, is_primary, status, description,
              captured_by_user_id, order_column)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            screenshot.game_id,
            screenshot.media_id,
            screenshot.kind.short_name(),
            screenshot.is_primary,
            screenshot.status.short_name(),
            screenshot.description,
            screenshot.captured_by_user_id,
            screenshot.order_column,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Set or clear a screenshot's primary flag.
pub fn set_primary(conn: &Connection, id: i64, is_primary: bool) -> Result<(), OperationError> {
    let updated = conn.execute(
        "UPDATE screenshots SET is_primary = ?1 WHERE id = ?2",
        params![is_primary, id],
    )?;
    if updated == 0 {
        return Err(OperationError::not_found("screenshot", id));
    }
    Ok(())
}

/// Set a screenshot's moderation status without review metadata.
pub fn set_status(
    conn: &Connection,
    id: i64,
    status: ScreenshotStatus,
) -> Result<(), OperationError> {
    let updated = conn.execute(
        "UPDATE screenshots SET status = ?1 WHERE id = ?2",
        params![status.short_name(), id],
    )?;
    if updated == 0 {
        return Err(OperationError::not_found("screenshot", id));
    }
    Ok(())
}

/// Record a moderation decision.
pub fn set_review(
    conn: &Connection,
    id: i64,
    status: ScreenshotStatus,
    reviewed_by_user_id: i64,
    reviewed_at: DateTime<Utc>,
) -> Result<(), OperationError> {
    let updated = conn.execute(
        "UPDATE screenshots
         SET status = ?1, reviewed_by_user_id = ?2, reviewed_at = ?3
         WHERE id = ?4",
        params![status.short_name(), reviewed_by_user_id, reviewed_at, id],
    )?;
    if updated == 0 {
        return Err(OperationError::not_found("screenshot", id));
    }
    Ok(())
}

/// Update a screenshot's description.
pub fn update_description(
    conn: &Connection,
    id: i64,
    description: Option<&str>,
) -> Result<(), OperationError> {
    let updated = conn.execute(
        "UPDATE screenshots SET description = ?1 WHERE id = ?2",
        params![description, id],
    )?;
    if updated == 0 {
        return Err(OperationError::not_found("screenshot", id));
    }
    Ok(())
}

/// Delete a screenshot row.
pub fn delete_screenshot(conn: &Connection, id: i64) -> Result<(), OperationError> {
    let deleted = conn.execute("DELETE FROM screenshots WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(OperationError::not_found("screenshot", id));
    }
    Ok(())
}

/// Write a game's legacy display field for one screenshot kind.
pub fn set_game_legacy_field(
    conn: &Connection,
    game_id: i64,
    kind: ScreenshotKind,
    path: &str,
) -> Result<(), OperationError> {
    // Column names come from a fixed enum table, not user input.
    let sql = format!(
        "UPDATE games SET {} = ?1 WHERE id = ?2",
        kind.legacy_column()
    );
    let updated = conn.execute(&sql, params![path, game_id])?;
    if updated == 0 {
        return Err(OperationError::not_found("game", game_id));
    }
    Ok(())
}

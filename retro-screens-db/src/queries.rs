//! Read queries for the screenshot database.

use retro_screens_core::{MediaRecord, Screenshot, ScreenshotKind, ScreenshotStatus};
use rusqlite::types::Type;
use rusqlite::{params, Connection};

use crate::operations::OperationError;

const SCREENSHOT_COLUMNS: &str = "id, game_id, media_id, kind, is_primary, status, description,
     captured_by_user_id, reviewed_by_user_id, reviewed_at, order_column";

/// Load one screenshot by id.
pub fn get_screenshot(conn: &Connection, id: i64) -> Result<Screenshot, OperationError> {
    let sql = format!(
        "SELECT {} FROM screenshots WHERE id = ?1",
        SCREENSHOT_COLUMNS
    );
    conn.query_row(&sql, params![id], row_to_screenshot)
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => OperationError::not_found("screenshot", id),
            other => other.into(),
        })
}

/// Load one media row by id.
pub fn get_media(conn: &Connection, id: i64) -> Result<MediaRecord, OperationError> {
    conn.query_row(
        "SELECT id, path, custom_properties FROM media WHERE id = ?1",
        params![id],
        row_to_media,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => OperationError::not_found("media", id),
        other => other.into(),
    })
}

/// All screenshots of a game and kind, ordered by sort position.
pub fn screenshots_for_game(
    conn: &Connection,
    game_id: i64,
    kind: ScreenshotKind,
) -> Result<Vec<Screenshot>, OperationError> {
    let sql = format!(
        "SELECT {} FROM screenshots
         WHERE game_id = ?1 AND kind = ?2
         ORDER BY order_column",
        SCREENSHOT_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![game_id, kind.short_name()], row_to_screenshot)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Approved screenshots of a game and kind, ordered by sort position.
///
/// This is the promotion candidate list used when a primary is deleted.
pub fn approved_siblings(
    conn: &Connection,
    game_id: i64,
    kind: ScreenshotKind,
) -> Result<Vec<Screenshot>, OperationError> {
    let sql = format!(
        "SELECT {} FROM screenshots
         WHERE game_id = ?1 AND kind = ?2 AND status = ?3
         ORDER BY order_column",
        SCREENSHOT_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![
            game_id,
            kind.short_name(),
            ScreenshotStatus::Approved.short_name()
        ],
        row_to_screenshot,
    )?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// The current primary screenshot for a game and kind, if any.
pub fn primary_screenshot(
    conn: &Connection,
    game_id: i64,
    kind: ScreenshotKind,
) -> Result<Option<Screenshot>, OperationError> {
    let sql = format!(
        "SELECT {} FROM screenshots
         WHERE game_id = ?1 AND kind = ?2 AND is_primary = 1",
        SCREENSHOT_COLUMNS
    );
    match conn.query_row(&sql, params![game_id, kind.short_name()], row_to_screenshot) {
        Ok(screenshot) => Ok(Some(screenshot)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Number of screenshots a game has of one kind.
pub fn screenshot_count(
    conn: &Connection,
    game_id: i64,
    kind: ScreenshotKind,
) -> Result<i64, OperationError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM screenshots WHERE game_id = ?1 AND kind = ?2",
        params![game_id, kind.short_name()],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Next free sort position within a game and kind.
pub fn next_order_column(
    conn: &Connection,
    game_id: i64,
    kind: ScreenshotKind,
) -> Result<i64, OperationError> {
    let max: i64 = conn.query_row(
        "SELECT COALESCE(MAX(order_column), 0) FROM screenshots
         WHERE game_id = ?1 AND kind = ?2",
        params![game_id, kind.short_name()],
        |row| row.get(0),
    )?;
    Ok(max + 1)
}

/// Find a media row already holding this digest among a game's screenshots.
///
/// The digest lives in the JSON property bag, so candidates (at most a few
/// dozen per game) are filtered in Rust rather than with SQL JSON functions.
pub fn find_media_by_sha1(
    conn: &Connection,
    game_id: i64,
    sha1: &str,
) -> Result<Option<i64>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT m.id, m.path, m.custom_properties
         FROM media m
         JOIN screenshots s ON s.media_id = m.id
         WHERE s.game_id = ?1",
    )?;
    let rows = stmt.query_map(params![game_id], row_to_media)?;
    for media in rows {
        let media = media?;
        if media.sha1() == Some(sha1) {
            return Ok(Some(media.id));
        }
    }
    Ok(None)
}

/// Read back a game's legacy display field for one kind.
pub fn game_legacy_field(
    conn: &Connection,
    game_id: i64,
    kind: ScreenshotKind,
) -> Result<String, OperationError> {
    let sql = format!(
        "SELECT {} FROM games WHERE id = ?1",
        kind.legacy_column()
    );
    conn.query_row(&sql, params![game_id], |row| row.get(0))
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => OperationError::not_found("game", game_id),
            other => other.into(),
        })
}

// ── Row Mappers ─────────────────────────────────────────────────────────────

fn row_to_screenshot(row: &rusqlite::Row<'_>) -> rusqlite::Result<Screenshot> {
    let kind_str: String = row.get(3)?;
    let status_str: String = row.get(5)?;
    Ok(Screenshot {
        id: row.get(0)?,
        game_id: row.get(1)?,
        media_id: row.get(2)?,
        kind: parse_column::<ScreenshotKind>(3, &kind_str)?,
        is_primary: row.get(4)?,
        status: parse_column::<ScreenshotStatus>(5, &status_str)?,
        description: row.get(6)?,
        captured_by_user_id: row.get(7)?,
        reviewed_by_user_id: row.get(8)?,
        reviewed_at: row.get(9)?,
        order_column: row.get(10)?,
    })
}

fn row_to_media(row: &rusqlite::Row<'_>) -> rusqlite::Result<MediaRecord> {
    let props_str: String = row.get(2)?;
    let custom_properties = serde_json::from_str(&props_str)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
    Ok(MediaRecord {
        id: row.get(0)?,
        path: row.get(1)?,
        custom_properties,
    })
}

fn parse_column<T>(index: usize, value: &str) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .map_err(|e: T::Err| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

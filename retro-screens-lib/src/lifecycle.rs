//! The primary-screenshot state machine.
//!
//! The reference behavior is event-driven: saving or deleting a screenshot
//! triggers side effects that keep exactly one primary per `(game, kind)`
//! and mirror it into the game's legacy display field. Here those hooks are
//! explicit — all mutations go through [`ScreenshotLifecycle`] methods,
//! each of which runs the post-processing step inside its own transaction.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use retro_screens_core::{
    validate_dimensions, Screenshot, ScreenshotKind, ScreenshotStatus, SystemProfile,
    PLACEHOLDER_LEGACY_PATH, PROP_LEGACY_PATH, PROP_SHA1,
};
use retro_screens_db::{operations, queries, NewScreenshot};
use retro_screens_media::{
    decode_dimensions, materialize_legacy_render, LegacyIdAllocator, MediaError, ObjectStore,
};

use crate::error::ScreenshotError;
use crate::upload::{sha1_hex, UploadLimits, UploadRequest};

/// What a save meant, so the post-save hook can decide relevance without
/// ORM-style dirty tracking. Edits to unrelated fields (description,
/// review metadata) must not re-trigger materialization or resync.
#[derive(Debug, Clone, Copy)]
pub struct SaveContext {
    pub created: bool,
    pub primary_changed: bool,
}

impl SaveContext {
    /// The screenshot row was just inserted.
    pub fn created() -> Self {
        Self {
            created: true,
            primary_changed: false,
        }
    }

    /// An update flipped `is_primary`.
    pub fn primary_toggled() -> Self {
        Self {
            created: false,
            primary_changed: true,
        }
    }

    /// An update touched only fields the lifecycle does not care about.
    pub fn unrelated() -> Self {
        Self {
            created: false,
            primary_changed: false,
        }
    }

    fn is_primary_relevant(&self) -> bool {
        self.created || self.primary_changed
    }
}

/// Mutation surface for screenshots.
///
/// Owns the database connection plus the collaborators the hooks need:
/// the object store holding the binaries, the legacy-id numbering
/// authority, and a local staging directory for renders in flight.
pub struct ScreenshotLifecycle {
    conn: Connection,
    store: Arc<dyn ObjectStore>,
    allocator: Box<dyn LegacyIdAllocator>,
    staging_dir: PathBuf,
}

impl ScreenshotLifecycle {
    pub fn new(
        conn: Connection,
        store: Arc<dyn ObjectStore>,
        allocator: Box<dyn LegacyIdAllocator>,
        staging_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            conn,
            store,
            allocator,
            staging_dir: staging_dir.into(),
        }
    }

    /// Read access for queries outside the mutation surface.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Validate and persist an upload.
    ///
    /// The upload becomes primary iff its `(game, kind)` has no primary
    /// yet; in that case its legacy render is materialized eagerly from
    /// the bytes in hand, so the save hook has nothing left to fetch.
    pub fn upload(
        &mut self,
        request: UploadRequest,
        system: &SystemProfile,
        limits: &UploadLimits,
    ) -> Result<Screenshot, ScreenshotError> {
        if request.bytes.len() as u64 > limits.max_file_bytes {
            return Err(ScreenshotError::FileTooLarge {
                actual: request.bytes.len() as u64,
                limit: limits.max_file_bytes,
            });
        }

        // Decode failure is its own rejection; dimensions never reach the
        // resolution validator as 0x0.
        let (width, height) =
            decode_dimensions(&request.bytes).map_err(ScreenshotError::Decode)?;
        validate_dimensions(system, width, height)?;

        let limit = limits.max_for(request.kind);
        let count = queries::screenshot_count(&self.conn, request.game_id, request.kind)?;
        if count >= i64::from(limit) {
            return Err(ScreenshotError::LimitReached {
                kind: request.kind,
                limit,
            });
        }

        let digest = sha1_hex(&request.bytes);
        if queries::find_media_by_sha1(&self.conn, request.game_id, &digest)?.is_some() {
            return Err(ScreenshotError::Duplicate);
        }

        let becomes_primary =
            queries::primary_screenshot(&self.conn, request.game_id, request.kind)?.is_none();

        let object_path = format!("screenshots/{}/{}.png", request.game_id, digest);
        self.publish_original(&request.bytes, &digest, &object_path)?;

        let mut properties = BTreeMap::new();
        properties.insert(
            PROP_SHA1.to_string(),
            serde_json::Value::String(digest.clone()),
        );
        if becomes_primary {
            if let Some(path) = materialize_legacy_render(
                &request.bytes,
                &*self.allocator,
                &self.staging_dir,
                &*self.store,
            ) {
                properties.insert(PROP_LEGACY_PATH.to_string(), serde_json::Value::String(path));
            }
        }

        let order_column = queries::next_order_column(&self.conn, request.game_id, request.kind)?;

        let tx = self.conn.transaction()?;
        let media_id = operations::insert_media(&tx, &object_path, &properties)?;
        let id = operations::insert_screenshot(
            &tx,
            &NewScreenshot {
                game_id: request.game_id,
                media_id,
                kind: request.kind,
                is_primary: becomes_primary,
                status: request.status,
                description: request.description.clone(),
                captured_by_user_id: request.captured_by_user_id,
                order_column,
            },
        )?;
        let screenshot = queries::get_screenshot(&tx, id)?;
        Self::after_save(
            &tx,
            &*self.store,
            &*self.allocator,
            &self.staging_dir,
            &screenshot,
            SaveContext::created(),
        )?;
        tx.commit()?;
        Ok(screenshot)
    }

    /// Make a screenshot the primary of its `(game, kind)`.
    ///
    /// Demotes the current primary to non-primary Pending, promotes the
    /// target, and resyncs — all in one transaction so the unique primary
    /// index never sees two primaries and readers never see a half state.
    pub fn promote(&mut self, id: i64) -> Result<Screenshot, ScreenshotError> {
        let tx = self.conn.transaction()?;
        let target = queries::get_screenshot(&tx, id)?;
        if target.is_primary {
            return Ok(target);
        }

        if let Some(current) = queries::primary_screenshot(&tx, target.game_id, target.kind)? {
            operations::set_primary(&tx, current.id, false)?;
            operations::set_status(&tx, current.id, ScreenshotStatus::Pending)?;
        }
        operations::set_primary(&tx, id, true)?;

        let promoted = queries::get_screenshot(&tx, id)?;
        Self::after_save(
            &tx,
            &*self.store,
            &*self.allocator,
            &self.staging_dir,
            &promoted,
            SaveContext::primary_toggled(),
        )?;
        tx.commit()?;
        Ok(promoted)
    }

    /// Edit a screenshot's description. Never touches primary state or
    /// legacy fields.
    pub fn update_description(
        &mut self,
        id: i64,
        description: Option<&str>,
    ) -> Result<Screenshot, ScreenshotError> {
        let tx = self.conn.transaction()?;
        operations::update_description(&tx, id, description)?;
        let screenshot = queries::get_screenshot(&tx, id)?;
        Self::after_save(
            &tx,
            &*self.store,
            &*self.allocator,
            &self.staging_dir,
            &screenshot,
            SaveContext::unrelated(),
        )?;
        tx.commit()?;
        Ok(screenshot)
    }

    /// Record a moderation decision on a screenshot.
    pub fn review(
        &mut self,
        id: i64,
        status: ScreenshotStatus,
        reviewed_by_user_id: i64,
        reviewed_at: DateTime<Utc>,
    ) -> Result<Screenshot, ScreenshotError> {
        let tx = self.conn.transaction()?;
        operations::set_review(&tx, id, status, reviewed_by_user_id, reviewed_at)?;
        let screenshot = queries::get_screenshot(&tx, id)?;
        Self::after_save(
            &tx,
            &*self.store,
            &*self.allocator,
            &self.staging_dir,
            &screenshot,
            SaveContext::unrelated(),
        )?;
        tx.commit()?;
        Ok(screenshot)
    }

    /// Delete a screenshot.
    ///
    /// Deleting the primary promotes the first approved sibling by sort
    /// position, cascading through the same save hook; with no sibling
    /// left, the game's legacy field falls back to the placeholder.
    pub fn delete(&mut self, id: i64) -> Result<(), ScreenshotError> {
        let tx = self.conn.transaction()?;
        let screenshot = queries::get_screenshot(&tx, id)?;
        operations::delete_screenshot(&tx, id)?;

        if screenshot.is_primary {
            let siblings = queries::approved_siblings(&tx, screenshot.game_id, screenshot.kind)?;
            match siblings.first() {
                Some(next) => {
                    operations::set_primary(&tx, next.id, true)?;
                    let promoted = queries::get_screenshot(&tx, next.id)?;
                    // The cascade owns the resync; do not duplicate it here.
                    Self::after_save(
                        &tx,
                        &*self.store,
                        &*self.allocator,
                        &self.staging_dir,
                        &promoted,
                        SaveContext::primary_toggled(),
                    )?;
                }
                None => {
                    Self::sync_legacy_field(&tx, screenshot.game_id, screenshot.kind)?;
                }
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Recompute one legacy display field from current primary state.
    ///
    /// The mutation methods call this themselves; it is public for
    /// backfills and repair jobs.
    pub fn resync_legacy_field(
        &self,
        game_id: i64,
        kind: ScreenshotKind,
    ) -> Result<(), ScreenshotError> {
        Self::sync_legacy_field(&self.conn, game_id, kind)
    }

    /// Stage the raw upload locally and push it to the object store.
    fn publish_original(
        &self,
        bytes: &[u8],
        digest: &str,
        object_path: &str,
    ) -> Result<(), ScreenshotError> {
        std::fs::create_dir_all(&self.staging_dir).map_err(MediaError::from)?;
        let local = self.staging_dir.join(format!("upload-{}.png", digest));
        std::fs::write(&local, bytes).map_err(MediaError::from)?;
        let result = self.store.put(&local, object_path);
        let _ = std::fs::remove_file(&local);
        result?;
        Ok(())
    }

    /// Post-save hook.
    ///
    /// Only meaningful saves of a primary screenshot do work: first the
    /// best-effort lazy materialization of the legacy render (a screenshot
    /// promoted later in life has none yet), then the legacy-field resync.
    /// Materialization failures are logged and swallowed; resync failures
    /// propagate, since they would leave displayed data stale.
    fn after_save(
        conn: &Connection,
        store: &dyn ObjectStore,
        allocator: &dyn LegacyIdAllocator,
        staging_dir: &Path,
        screenshot: &Screenshot,
        ctx: SaveContext,
    ) -> Result<(), ScreenshotError> {
        if !screenshot.is_primary || !ctx.is_primary_relevant() {
            return Ok(());
        }

        let mut media = queries::get_media(conn, screenshot.media_id)?;
        if media.legacy_path().is_none() {
            match store.get(&media.path) {
                Ok(bytes) => {
                    if let Some(path) =
                        materialize_legacy_render(&bytes, allocator, staging_dir, store)
                    {
                        media.set_custom_property(PROP_LEGACY_PATH, path);
                        operations::update_media_properties(conn, media.id, &media.custom_properties)?;
                    }
                }
                Err(e) => {
                    log::warn!(
                        "original for screenshot {} unavailable, skipping legacy render: {}",
                        screenshot.id,
                        e
                    );
                }
            }
        }

        Self::sync_legacy_field(conn, screenshot.game_id, screenshot.kind)
    }

    /// Point the game's legacy field at the current primary's asset, or at
    /// the placeholder when the kind has no primary.
    fn sync_legacy_field(
        conn: &Connection,
        game_id: i64,
        kind: ScreenshotKind,
    ) -> Result<(), ScreenshotError> {
        let value = match queries::primary_screenshot(conn, game_id, kind)? {
            Some(primary) => {
                let media = queries::get_media(conn, primary.media_id)?;
                match media.legacy_path() {
                    Some(path) => path.to_string(),
                    None => media.path.clone(),
                }
            }
            None => PLACEHOLDER_LEGACY_PATH.to_string(),
        };
        operations::set_game_legacy_field(conn, game_id, kind, &value)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lifecycle_tests.rs"]
mod tests;

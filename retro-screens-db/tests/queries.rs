use std::collections::BTreeMap;

use retro_screens_core::{ScreenshotKind, ScreenshotStatus, PROP_SHA1};
use retro_screens_db::*;

fn seed_screenshot(
    conn: &rusqlite::Connection,
    game_id: i64,
    kind: ScreenshotKind,
    status: ScreenshotStatus,
    is_primary: bool,
    order: i64,
    sha1: &str,
) -> i64 {
    let mut props = BTreeMap::new();
    props.insert(
        PROP_SHA1.to_string(),
        serde_json::Value::String(sha1.to_string()),
    );
    let media_id = insert_media(conn, &format!("screenshots/{}/{}.png", game_id, sha1), &props)
        .unwrap();
    insert_screenshot(
        conn,
        &NewScreenshot {
            game_id,
            media_id,
            kind,
            is_primary,
            status,
            description: None,
            captured_by_user_id: None,
            order_column: order,
        },
    )
    .unwrap()
}

#[test]
fn approved_siblings_filters_and_orders() {
    let conn = open_memory().unwrap();
    let game_id = insert_game(&conn, "EarthBound").unwrap();

    let s3 = seed_screenshot(
        &conn,
        game_id,
        ScreenshotKind::Ingame,
        ScreenshotStatus::Approved,
        false,
        3,
        "c3",
    );
    seed_screenshot(
        &conn,
        game_id,
        ScreenshotKind::Ingame,
        ScreenshotStatus::Pending,
        false,
        1,
        "c1",
    );
    let s2 = seed_screenshot(
        &conn,
        game_id,
        ScreenshotKind::Ingame,
        ScreenshotStatus::Approved,
        false,
        2,
        "c2",
    );
    seed_screenshot(
        &conn,
        game_id,
        ScreenshotKind::Title,
        ScreenshotStatus::Approved,
        false,
        1,
        "t1",
    );

    let siblings = approved_siblings(&conn, game_id, ScreenshotKind::Ingame).unwrap();
    let ids: Vec<_> = siblings.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![s2, s3]);
}

#[test]
fn primary_screenshot_lookup() {
    let conn = open_memory().unwrap();
    let game_id = insert_game(&conn, "Super Mario World").unwrap();

    assert!(primary_screenshot(&conn, game_id, ScreenshotKind::Ingame)
        .unwrap()
        .is_none());

    let id = seed_screenshot(
        &conn,
        game_id,
        ScreenshotKind::Ingame,
        ScreenshotStatus::Approved,
        true,
        1,
        "p1",
    );
    let found = primary_screenshot(&conn, game_id, ScreenshotKind::Ingame)
        .unwrap()
        .unwrap();
    assert_eq!(found.id, id);
}

#[test]
fn counts_and_order_columns_scope_to_game_and_kind() {
    let conn = open_memory().unwrap();
    let game_a = insert_game(&conn, "Gradius").unwrap();
    let game_b = insert_game(&conn, "Contra").unwrap();

    seed_screenshot(
        &conn,
        game_a,
        ScreenshotKind::Ingame,
        ScreenshotStatus::Approved,
        false,
        1,
        "a1",
    );
    seed_screenshot(
        &conn,
        game_a,
        ScreenshotKind::Ingame,
        ScreenshotStatus::Pending,
        false,
        2,
        "a2",
    );
    seed_screenshot(
        &conn,
        game_b,
        ScreenshotKind::Ingame,
        ScreenshotStatus::Approved,
        false,
        7,
        "b1",
    );

    assert_eq!(
        screenshot_count(&conn, game_a, ScreenshotKind::Ingame).unwrap(),
        2
    );
    assert_eq!(
        screenshot_count(&conn, game_a, ScreenshotKind::Title).unwrap(),
        0
    );
    assert_eq!(
        next_order_column(&conn, game_a, ScreenshotKind::Ingame).unwrap(),
        3
    );
    assert_eq!(
        next_order_column(&conn, game_b, ScreenshotKind::Ingame).unwrap(),
        8
    );
    assert_eq!(
        next_order_column(&conn, game_b, ScreenshotKind::Title).unwrap(),
        1
    );
}

#[test]
fn find_media_by_sha1_scopes_to_the_game() {
    let conn = open_memory().unwrap();
    let game_a = insert_game(&conn, "Punch-Out!!").unwrap();
    let game_b = insert_game(&conn, "Ice Climber").unwrap();

    seed_screenshot(
        &conn,
        game_a,
        ScreenshotKind::Ingame,
        ScreenshotStatus::Approved,
        false,
        1,
        "deadbeef",
    );

    assert!(find_media_by_sha1(&conn, game_a, "deadbeef")
        .unwrap()
        .is_some());
    assert!(find_media_by_sha1(&conn, game_a, "00000000")
        .unwrap()
        .is_none());
    // Same digest on a different game is not a duplicate.
    assert!(find_media_by_sha1(&conn, game_b, "deadbeef")
        .unwrap()
        .is_none());
}

#[test]
fn screenshots_for_game_returns_all_statuses_in_order() {
    let conn = open_memory().unwrap();
    let game_id = insert_game(&conn, "Castlevania").unwrap();

    seed_screenshot(
        &conn,
        game_id,
        ScreenshotKind::Ingame,
        ScreenshotStatus::Rejected,
        false,
        2,
        "r1",
    );
    seed_screenshot(
        &conn,
        game_id,
        ScreenshotKind::Ingame,
        ScreenshotStatus::Approved,
        true,
        1,
        "a1",
    );

    let all = screenshots_for_game(&conn, game_id, ScreenshotKind::Ingame).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].order_column, 1);
    assert!(all[0].is_primary);
    assert_eq!(all[1].status, ScreenshotStatus::Rejected);
}

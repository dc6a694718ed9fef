#![allow(clippy::float_cmp)]

use super::*;
use crate::token::TokenKind;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn make_board() -> Board {
    let mut board = Board::new();
    board.set_viewport(800.0, 600.0);
    board
}

fn make_token(id: &str, x: f64, y: f64) -> Token {
    Token { id: id.to_owned(), kind: TokenKind::Pc, x, y }
}

// =============================================================
// Replicated inputs
// =============================================================

#[test]
fn apply_add_inserts_token() {
    let mut board = make_board();
    assert!(board.apply_add(make_token("a", 0.0, 0.0)));
    assert!(board.token("a").is_some());
}

#[test]
fn apply_add_existing_id_is_ignored() {
    let mut board = make_board();
    board.apply_add(make_token("a", 0.0, 0.0));
    assert!(!board.apply_add(make_token("a", 50.0, 50.0)));
    assert_eq!(board.token("a").unwrap().x, 0.0);
}

#[test]
fn apply_move_repositions() {
    let mut board = make_board();
    board.apply_add(make_token("a", 0.0, 0.0));
    assert!(board.apply_move("a", 5.0, 6.0));
    assert_eq!(board.token("a").unwrap().y, 6.0);
}

#[test]
fn apply_move_missing_id_is_noop() {
    let mut board = make_board();
    assert!(!board.apply_move("ghost", 5.0, 6.0));
    assert!(board.tokens.is_empty());
}

// =============================================================
// Spawn placement
// =============================================================

#[test]
fn spawn_point_centers_token_in_viewport() {
    let board = make_board();
    let spawn = board.spawn_point();
    // Center (400, 300) at identity view, minus half a token.
    assert!(approx_eq(spawn.x, 380.0));
    assert!(approx_eq(spawn.y, 280.0));
}

#[test]
fn spawn_point_follows_view_transform() {
    let mut board = make_board();
    board.view.pan_x = 100.0;
    board.view.pan_y = 50.0;
    board.view.scale = 2.0;

    let spawn = board.spawn_point();
    // ((400 - 100) / 2 - 20, (300 - 50) / 2 - 20)
    assert!(approx_eq(spawn.x, 130.0));
    assert!(approx_eq(spawn.y, 105.0));
}

// =============================================================
// Panning gesture
// =============================================================

#[test]
fn pointer_down_on_empty_space_starts_panning() {
    let mut board = make_board();
    board.pointer_down(Point::new(10.0, 10.0));
    assert!(matches!(board.drag, DragState::Panning { .. }));
}

#[test]
fn panning_moves_view_by_screen_delta() {
    let mut board = make_board();
    board.pointer_down(Point::new(10.0, 10.0));
    board.pointer_move(Point::new(30.0, 25.0));
    assert!(approx_eq(board.view.pan_x, 20.0));
    assert!(approx_eq(board.view.pan_y, 15.0));

    // Anchored at the gesture start, not the previous move.
    board.pointer_move(Point::new(50.0, 50.0));
    assert!(approx_eq(board.view.pan_x, 40.0));
    assert!(approx_eq(board.view.pan_y, 40.0));
}

#[test]
fn pan_release_reports_nothing() {
    let mut board = make_board();
    board.pointer_down(Point::new(10.0, 10.0));
    board.pointer_move(Point::new(20.0, 20.0));
    assert!(board.pointer_up().is_none());
    assert_eq!(board.drag, DragState::Idle);
}

// =============================================================
// Token drag gesture
// =============================================================

#[test]
fn pointer_down_on_token_starts_drag() {
    let mut board = make_board();
    board.apply_add(make_token("a", 100.0, 100.0));
    board.pointer_down(Point::new(120.0, 120.0));
    assert!(matches!(board.drag, DragState::DraggingToken { .. }));
}

#[test]
fn pointer_down_hit_test_respects_view_transform() {
    let mut board = make_board();
    board.view.pan_x = 50.0;
    board.apply_add(make_token("a", 100.0, 100.0));

    // Screen (170, 120) -> world (120, 120), inside the token box.
    board.pointer_down(Point::new(170.0, 120.0));
    assert!(matches!(board.drag, DragState::DraggingToken { .. }));
}

#[test]
fn dragging_moves_token_in_world_units() {
    let mut board = make_board();
    board.view.scale = 2.0;
    board.apply_add(make_token("a", 100.0, 100.0));

    // World (105, 105) -> screen (210, 210) at scale 2.
    board.pointer_down(Point::new(210.0, 210.0));
    board.pointer_move(Point::new(230.0, 220.0));

    // Screen delta (20, 10) is world delta (10, 5).
    let token = board.token("a").unwrap();
    assert!(approx_eq(token.x, 110.0));
    assert!(approx_eq(token.y, 105.0));
}

#[test]
fn drag_release_reports_final_position() {
    let mut board = make_board();
    board.apply_add(make_token("a", 100.0, 100.0));

    board.pointer_down(Point::new(110.0, 110.0));
    board.pointer_move(Point::new(150.0, 130.0));
    let released = board.pointer_up().unwrap();

    assert_eq!(released.id, "a");
    assert!(approx_eq(released.x, 140.0));
    assert!(approx_eq(released.y, 120.0));
    assert_eq!(board.drag, DragState::Idle);
}

#[test]
fn intermediate_moves_do_not_report() {
    let mut board = make_board();
    board.apply_add(make_token("a", 100.0, 100.0));

    board.pointer_down(Point::new(110.0, 110.0));
    board.pointer_move(Point::new(120.0, 110.0));
    board.pointer_move(Point::new(130.0, 110.0));
    // Only the release produces a replication action.
    let released = board.pointer_up().unwrap();
    assert!(approx_eq(released.x, 120.0));
}

#[test]
fn release_reports_store_position_after_remote_move() {
    let mut board = make_board();
    board.apply_add(make_token("a", 100.0, 100.0));

    board.pointer_down(Point::new(110.0, 110.0));
    board.pointer_move(Point::new(120.0, 120.0));
    // A replicated move lands mid-drag; the release reports where the
    // token actually is, not where the gesture put it.
    board.apply_move("a", 500.0, 500.0);

    let released = board.pointer_up().unwrap();
    assert!(approx_eq(released.x, 500.0));
    assert!(approx_eq(released.y, 500.0));
}

#[test]
fn pointer_up_without_gesture_reports_nothing() {
    let mut board = make_board();
    assert!(board.pointer_up().is_none());
}

// =============================================================
// View controls and map
// =============================================================

#[test]
fn zoom_controls_scale_the_view() {
    let mut board = make_board();
    board.zoom_in();
    assert!(approx_eq(board.view.scale, 1.2));
    board.zoom_out();
    assert!(approx_eq(board.view.scale, 1.0));
}

#[test]
fn reset_view_restores_identity() {
    let mut board = make_board();
    board.view.pan_x = 40.0;
    board.view.scale = 3.0;
    board.reset_view();
    assert_eq!(board.view.pan_x, 0.0);
    assert_eq!(board.view.scale, 1.0);
}

#[test]
fn set_map_resets_the_view() {
    let mut board = make_board();
    board.view.pan_x = 40.0;
    board.view.scale = 3.0;

    let image = MapImage::from_bytes("dungeon.png", b"fake png bytes").unwrap();
    board.set_map(image);

    assert!(board.map.is_some());
    assert_eq!(board.view.pan_x, 0.0);
    assert_eq!(board.view.scale, 1.0);
}

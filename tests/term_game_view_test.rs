use std::collections::BTreeSet;

use tile_blast::core::{BoardController, GameConfig};
use tile_blast::term::{color_rgb, tier_glyph, GameView, StatusView, Viewport};
use tile_blast::types::Coord;

fn game_snapshot() -> tile_blast::core::BoardSnapshot {
    let mut game = BoardController::new(1);
    game.new_game(GameConfig::default()).unwrap()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = game_snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 10*1 => 20x10
    // plus border => 22x12
    let vp = Viewport::new(22, 12);
    let fb = view.render(&snap, &StatusView::default(), vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 11).unwrap().ch, '└');
    assert_eq!(fb.get(21, 11).unwrap().ch, '┘');
}

#[test]
fn term_view_hit_test_agrees_with_drawing() {
    let snap = game_snapshot();
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let fb = view.render(&snap, &StatusView::default(), vp);

    let mut hits = BTreeSet::new();
    for y in 0..vp.height {
        for x in 0..vp.width {
            let Some(coord) = view.hit_test(&snap, vp, x, y) else {
                continue;
            };
            let cell = snap.get(coord).unwrap();
            let glyph = fb.get(x, y).unwrap();
            assert_eq!(glyph.style.bg, color_rgb(cell.color));
            assert_eq!(glyph.ch, tier_glyph(cell.tier));
            hits.insert(coord);
        }
    }
    assert_eq!(hits.len(), snap.cells.len());
}

#[test]
fn term_view_row_zero_is_at_the_bottom() {
    let snap = game_snapshot();
    let view = GameView::default();
    let vp = Viewport::new(22, 12);

    assert_eq!(view.hit_test(&snap, vp, 1, 10), Some(Coord::new(0, 0)));
    assert_eq!(view.hit_test(&snap, vp, 1, 1), Some(Coord::new(0, 9)));
    assert_eq!(view.hit_test(&snap, vp, 0, 10), None);
}

#[test]
fn term_view_shows_status_and_message() {
    let snap = game_snapshot();
    let view = GameView::default();
    let vp = Viewport::new(60, 14);
    let status = StatusView {
        moves: 12,
        message: Some("hello"),
        ..StatusView::default()
    };
    let fb = view.render(&snap, &status, vp);

    let text: String = (0..vp.height)
        .flat_map(|y| fb.row(y).unwrap().iter().map(|g| g.ch).chain(['\n']))
        .collect();
    assert!(text.contains("MOVES"));
    assert!(text.contains("12"));
    assert!(text.contains("hello"));
}

#[test]
fn term_view_without_game_shows_hint() {
    let game = BoardController::new(1);
    let snap = game.current_state();
    let view = GameView::default();
    let vp = Viewport::new(40, 10);
    let fb = view.render(&snap, &StatusView::default(), vp);

    let row: String = fb.row(5).unwrap().iter().map(|g| g.ch).collect();
    assert!(row.contains("NO GAME"));
    assert_eq!(view.hit_test(&snap, vp, 20, 5), None);
}

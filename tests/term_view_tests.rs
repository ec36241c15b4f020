use blockfall::core::{GameState, ScriptedPieces};
use blockfall::engine::RenderSink;
use blockfall::term::{AnchorY, GameView, TerminalRenderer, Viewport};
use blockfall::types::{Cell, Command, PieceKind};
use blockfall::TerminalSink;

fn all_text(fb: &blockfall::term::FrameBuffer) -> String {
    fb.text_rows().join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // stage glyphs = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameState::new(1).snapshot();
    snap.grid.set(0, 19, Cell::locked(PieceKind::I.id()));

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece_and_side_panel() {
    let mut game = GameState::with_pieces(ScriptedPieces::repeat(PieceKind::O));
    game.start();
    let mut snap = game.snapshot();
    snap.score = 1234;
    snap.lines_cleared = 12;

    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, Viewport::new(60, 22));

    // Frame starts at (60 - 22) / 2 = 19; O at column 4 => glyphs 28..32.
    for x in 28..32 {
        let glyph = fb.get(x, 1).unwrap();
        assert_eq!(glyph.ch, '█');
        assert!(glyph.style.bold);
    }

    let text = all_text(&fb);
    assert!(text.contains("SCORE"));
    assert!(text.contains("1234"));
    assert!(text.contains("LINES"));
    assert!(text.contains("SPEED"));
    assert!(text.contains("1200"));
    assert!(!text.contains("GAME OVER"));
    assert!(!text.contains("PRESS ENTER"));
}

#[test]
fn term_view_shows_game_over_overlay() {
    let mut game = GameState::with_pieces(ScriptedPieces::repeat(PieceKind::O));
    game.start();
    while game.handle_command(Command::HardDrop) {}

    let fb = GameView::default().render(&game.snapshot(), Viewport::new(60, 24));
    let text = all_text(&fb);
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("ENTER TO RETRY"));
}

#[test]
fn term_view_clips_to_tiny_viewport() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(5, 3));
    assert_eq!((fb.width(), fb.height()), (5, 3));
}

#[test]
fn terminal_sink_writes_changed_glyphs_only() {
    let renderer = TerminalRenderer::with_writer(Vec::new());
    let mut sink = TerminalSink::with_viewport(renderer, Viewport::new(40, 22));

    let mut game = GameState::with_pieces(ScriptedPieces::repeat(PieceKind::T));
    game.start();
    sink.render(&game.snapshot()).unwrap();
    let full = sink.renderer().writer().len();

    sink.render(&game.snapshot()).unwrap();
    let unchanged = sink.renderer().writer().len() - full;

    game.tick();
    sink.render(&game.snapshot()).unwrap();
    let moved = sink.renderer().writer().len() - full - unchanged;

    assert_eq!(sink.renderer().frames_drawn(), 3);
    assert!(unchanged < moved);
    assert!(moved < full);
}

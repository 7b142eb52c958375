//! Full frame cycles through the public API.
//!
//! Each test alternates `build_frame` and `dispatch` the way a host loop
//! does: one build, then one pointer sample, so state changes made by a
//! record show up in the following build.
//!
//! Run with: cargo test --test frame_cycle

use lion_viewer::pipeline::widgets::{
    COPY_BUTTON, DOCUMENT_TEXT, FILE_BUTTON, FILE_MENU, SIDEBAR, SWAP_BUTTON, sidebar_item,
};
use lion_viewer::{
    BoundingBox, CellMetrics, ClipboardSink, DocumentCollection, FixedAdvance, FrameBuffer,
    MemoryClipboard, PointerInput, PointerPhase, RenderCommand, Viewer, ViewerConfig,
    ViewerError, Viewport,
};

const VIEWPORT: Viewport = Viewport::new(1280.0, 720.0);

// =============================================================================
// HELPERS
// =============================================================================

fn viewer(config: ViewerConfig) -> Viewer {
    Viewer::new(DocumentCollection::sample(), config, Box::new(FixedAdvance::default())).unwrap()
}

fn center(bounds: BoundingBox) -> (f32, f32) {
    (bounds.x + bounds.width / 2.0, bounds.y + bounds.height / 2.0)
}

/// One build followed by one pointer sample.
fn frame(viewer: &mut Viewer, clipboard: &mut dyn ClipboardSink, x: f32, y: f32, down: bool) -> PointerPhase {
    viewer.build_frame(VIEWPORT).unwrap();
    viewer.dispatch(PointerInput::new(x, y, down), clipboard).phase
}

fn click_element(viewer: &mut Viewer, clipboard: &mut dyn ClipboardSink, bounds: BoundingBox) {
    let (x, y) = center(bounds);
    frame(viewer, clipboard, x, y, true);
    frame(viewer, clipboard, x, y, false);
}

/// Press, move and release along the first line of `text`.
fn drag(viewer: &mut Viewer, clipboard: &mut dyn ClipboardSink, text: BoundingBox, from: f32, to: f32) {
    let y = text.y + 5.0;
    frame(viewer, clipboard, text.x + from, y, true);
    frame(viewer, clipboard, text.x + to, y, true);
    frame(viewer, clipboard, text.x + to, y, false);
}

fn bounds(viewer: &mut Viewer, id: lion_viewer::ElementId) -> BoundingBox {
    viewer.build_frame(VIEWPORT).unwrap();
    viewer.registry().bounds_of(id).unwrap()
}

fn texts(commands: &[RenderCommand]) -> Vec<&str> {
    commands.iter().filter_map(RenderCommand::text).collect()
}

// =============================================================================
// SELECTION AND COPY
// =============================================================================

#[test]
fn test_backward_drag_selects_same_range() {
    let mut v = viewer(ViewerConfig::default());
    let mut clipboard = MemoryClipboard::new();

    let text = bounds(&mut v, DOCUMENT_TEXT);
    let y = text.y + 5.0;

    assert_eq!(frame(&mut v, &mut clipboard, text.x + 105.0, y, true), PointerPhase::PressedThisFrame);
    assert_eq!(frame(&mut v, &mut clipboard, text.x + 45.0, y, true), PointerPhase::Pressed);
    assert_eq!(frame(&mut v, &mut clipboard, text.x + 45.0, y, false), PointerPhase::ReleasedThisFrame);

    assert_eq!(v.selection().normalized(), 4..10);

    let copy = bounds(&mut v, COPY_BUTTON);
    click_element(&mut v, &mut clipboard, copy);
    assert_eq!(clipboard.paste(), Some("Secret"));
    assert_eq!(clipboard.copy_count(), 1);
}

#[test]
fn test_drag_keeps_capture_outside_text() {
    let mut v = viewer(ViewerConfig::default());
    let mut clipboard = MemoryClipboard::new();

    let text = bounds(&mut v, DOCUMENT_TEXT);
    frame(&mut v, &mut clipboard, text.x + 1.0, text.y + 5.0, true);
    assert_eq!(v.registry().captured(), Some(DOCUMENT_TEXT));

    // Far past the right edge, over nothing registered
    frame(&mut v, &mut clipboard, 1.0e6, text.y + 5.0, true);
    frame(&mut v, &mut clipboard, 1.0e6, text.y + 5.0, false);

    let len = v.documents().get(0).unwrap().char_len();
    assert_eq!(v.selection().normalized(), 0..len);
    assert_eq!(v.registry().captured(), None);
}

#[test]
fn test_copy_without_selection_leaves_clipboard_empty() {
    let mut v = viewer(ViewerConfig::default());
    let mut clipboard = MemoryClipboard::new();

    let copy = bounds(&mut v, COPY_BUTTON);
    click_element(&mut v, &mut clipboard, copy);

    assert!(!clipboard.has_content());
}

#[test]
fn test_selection_highlight_splits_text() {
    let mut v = viewer(ViewerConfig::default());
    let mut clipboard = MemoryClipboard::new();

    let text = bounds(&mut v, DOCUMENT_TEXT);
    drag(&mut v, &mut clipboard, text, 45.0, 105.0);

    let commands = v.build_frame(VIEWPORT).unwrap();
    let texts = texts(&commands);
    assert!(texts.contains(&"The "));
    assert!(texts.contains(&"Secret"));
    assert!(texts.iter().any(|t| t.starts_with(" Life of Squirrels")));
}

// =============================================================================
// NAVIGATION
// =============================================================================

#[test]
fn test_sidebar_switch_hides_copy_button() {
    let mut v = viewer(ViewerConfig::default());
    let mut clipboard = MemoryClipboard::new();

    let item = bounds(&mut v, sidebar_item(1));
    click_element(&mut v, &mut clipboard, item);
    assert_eq!(v.state().selected_document, 1);

    let commands = v.build_frame(VIEWPORT).unwrap();
    assert!(commands.iter().all(|c| c.id != Some(COPY_BUTTON)));
    assert!(v.registry().bounds_of(DOCUMENT_TEXT).is_none());
    assert!(texts(&commands).iter().any(|t| t.starts_with("Lorem ipsum dolor")));
}

#[test]
fn test_keep_selection_on_switch() {
    let config = ViewerConfig::default().with_reset_selection_on_switch(false);
    let mut v = viewer(config);
    let mut clipboard = MemoryClipboard::new();

    let text = bounds(&mut v, DOCUMENT_TEXT);
    drag(&mut v, &mut clipboard, text, 45.0, 105.0);

    let item = bounds(&mut v, sidebar_item(2));
    click_element(&mut v, &mut clipboard, item);

    assert_eq!(v.state().selected_document, 2);
    assert_eq!(v.selection().normalized(), 4..10);
}

#[test]
fn test_swap_twice_restores_sidebar() {
    let mut v = viewer(ViewerConfig::default());
    let mut clipboard = MemoryClipboard::new();

    let swap = bounds(&mut v, SWAP_BUTTON);
    click_element(&mut v, &mut clipboard, swap);
    assert!(!v.state().sidebar_visible);
    v.build_frame(VIEWPORT).unwrap();
    assert!(v.registry().bounds_of(SIDEBAR).is_none());

    let swap = bounds(&mut v, SWAP_BUTTON);
    click_element(&mut v, &mut clipboard, swap);
    assert!(v.state().sidebar_visible);
    assert!(bounds(&mut v, SIDEBAR).width > 0.0);
}

#[test]
fn test_file_menu_follows_hover() {
    let mut v = viewer(ViewerConfig::default());
    let mut clipboard = MemoryClipboard::new();

    let commands = v.build_frame(VIEWPORT).unwrap();
    assert!(!texts(&commands).contains(&"Open"));

    let (x, y) = center(v.registry().bounds_of(FILE_BUTTON).unwrap());
    v.dispatch(PointerInput::new(x, y, false), &mut clipboard);

    let commands = v.build_frame(VIEWPORT).unwrap();
    assert!(texts(&commands).contains(&"Open"));
    assert!(v.registry().bounds_of(FILE_MENU).is_some());

    v.dispatch(PointerInput::new(1200.0, 700.0, false), &mut clipboard);
    let commands = v.build_frame(VIEWPORT).unwrap();
    assert!(!texts(&commands).contains(&"Open"));
}

#[test]
fn test_press_inside_file_menu_does_not_reach_sidebar() {
    let mut v = viewer(ViewerConfig::default());
    let mut clipboard = MemoryClipboard::new();

    let (x, y) = center(bounds(&mut v, FILE_BUTTON));
    v.dispatch(PointerInput::new(x, y, false), &mut clipboard);

    let menu = bounds(&mut v, FILE_MENU);
    let item = v.registry().bounds_of(sidebar_item(1)).unwrap();
    let overlap = menu.intersect(&item).expect("menu opens over the sidebar");
    let (x, y) = center(overlap);

    v.dispatch(PointerInput::new(x, y, true), &mut clipboard);
    assert!(v.registry().pointer_over(FILE_MENU));
    assert!(!v.registry().pointer_over(sidebar_item(1)));

    frame(&mut v, &mut clipboard, x, y, false);
    assert_eq!(v.state().selected_document, 0);

    // Menu stays open while hovered
    let commands = v.build_frame(VIEWPORT).unwrap();
    assert!(texts(&commands).contains(&"Open"));
}

// =============================================================================
// FRAME SHAPE
// =============================================================================

#[test]
fn test_builds_are_deterministic() {
    let mut v = viewer(ViewerConfig::default());
    let first = v.build_frame(VIEWPORT).unwrap();
    let used = v.arena_used();
    let second = v.build_frame(VIEWPORT).unwrap();

    assert_eq!(first, second);
    assert_eq!(v.arena_used(), used);
}

#[test]
fn test_small_arena_fails_every_frame() {
    let mut v = viewer(ViewerConfig::default().with_arena_capacity(4));
    for _ in 0..3 {
        assert!(matches!(v.build_frame(VIEWPORT), Err(ViewerError::ArenaExhausted { .. })));
    }
}

#[test]
fn test_pan_moves_hit_testing_with_content() {
    let mut v = viewer(ViewerConfig::default());
    let mut clipboard = MemoryClipboard::new();

    let before = bounds(&mut v, sidebar_item(2));
    v.pan(-20.0);
    let after = bounds(&mut v, sidebar_item(2));
    assert_eq!(after.y, before.y - 20.0);

    click_element(&mut v, &mut clipboard, after);
    assert_eq!(v.state().selected_document, 2);
}

// =============================================================================
// TERMINAL RASTER
// =============================================================================

#[test]
fn test_rasterized_frame_shows_labels() {
    let cell = CellMetrics::new(8.0, 16.0);
    let (cols, rows) = (160u16, 45u16);
    let mut v = Viewer::new(DocumentCollection::sample(), ViewerConfig::default(), Box::new(cell)).unwrap();

    let viewport = Viewport::new(cols as f32 * cell.cell_width, rows as f32 * cell.cell_height);
    let commands = v.build_frame(viewport).unwrap();

    let mut buffer = FrameBuffer::new(cols, rows);
    buffer.rasterize(&commands, &cell);

    let screen: Vec<String> = (0..rows).map(|y| buffer.row_text(y)).collect();
    for label in ["File", "Swap", "Squirrels", "Copy"] {
        assert!(screen.iter().any(|row| row.contains(label)), "missing {label}");
    }
}

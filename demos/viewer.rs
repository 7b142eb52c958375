//! Viewer Example - The document viewer in a terminal
//!
//! Header with a hover File menu and a Swap button that hides the sidebar,
//! a sidebar to switch documents, and a selectable first document with a
//! Copy button. Drag across the first line of "Squirrels" to select.
//!
//! Keys: q / Esc quit, PageUp / PageDown or the mouse wheel pan.
//!
//! Run with: cargo run --example viewer -- --log-file viewer.log

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::event::KeyCode;
use lion_viewer::state::input::poll_event;
use lion_viewer::{
    CellMetrics, DocumentCollection, FrameBuffer, InputEvent, MemoryClipboard, PointerMapper,
    TerminalRenderer, Viewer, ViewerConfig, Viewport, DEFAULT_ARENA_CAPACITY,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "viewer", about = "Interactive document viewer demo")]
struct Args {
    /// Bytes available to interaction records each frame
    #[arg(long, default_value_t = DEFAULT_ARENA_CAPACITY)]
    arena_capacity: usize,

    /// Initial vertical pan, in layout units
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    y_offset: f32,

    /// Keep the text selection when switching documents
    #[arg(long)]
    keep_selection: bool,

    /// Write logs here (the terminal is in raw mode)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(args: &Args) -> io::Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();
    Ok(())
}

fn run(
    viewer: &mut Viewer,
    renderer: &mut TerminalRenderer<io::Stdout>,
    clipboard: &mut MemoryClipboard,
    cell: CellMetrics,
) -> Result<(), Box<dyn std::error::Error>> {
    let (mut cols, mut rows) = crossterm::terminal::size()?;
    let mut mapper = PointerMapper::new(cell);

    loop {
        let viewport = Viewport::new(cols as f32 * cell.cell_width, rows as f32 * cell.cell_height);
        let commands = viewer.build_frame(viewport)?;

        let mut buffer = FrameBuffer::new(cols, rows);
        buffer.rasterize(&commands, &cell);
        renderer.render(&buffer)?;

        let page = viewport.height / 2.0;
        let mut pointer = mapper.current();
        match poll_event(Duration::from_millis(16), &mut mapper)? {
            Some(InputEvent::Pointer(sample)) => pointer = sample,
            Some(InputEvent::Key(KeyCode::Char('q') | KeyCode::Esc)) => break,
            Some(InputEvent::Key(KeyCode::PageUp)) => viewer.pan(page),
            Some(InputEvent::Key(KeyCode::PageDown)) => viewer.pan(-page),
            Some(InputEvent::Scroll(dy)) => viewer.pan(dy),
            Some(InputEvent::Resize(w, h)) => {
                cols = w;
                rows = h;
                renderer.invalidate();
            }
            _ => {}
        }

        viewer.dispatch(pointer, clipboard);
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = ViewerConfig::default()
        .with_arena_capacity(args.arena_capacity)
        .with_y_offset(args.y_offset)
        .with_reset_selection_on_switch(!args.keep_selection);

    let cell = CellMetrics::default();
    let mut viewer = Viewer::new(DocumentCollection::sample(), config, Box::new(cell))?;
    let mut clipboard = MemoryClipboard::new();
    let mut renderer = TerminalRenderer::new(io::stdout());

    info!(arena_capacity = args.arena_capacity, "viewer starting");
    renderer.enter()?;
    let result = run(&mut viewer, &mut renderer, &mut clipboard, cell);
    renderer.leave()?;
    result?;

    if let Some(text) = clipboard.paste() {
        println!("Copied {} characters:\n{text}", text.chars().count());
    }
    Ok(())
}

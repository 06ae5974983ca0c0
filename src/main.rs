use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::Terminal;
use scoom::app::{ActionOutcome, Editor};
use scoom::config::Config;
use scoom::input::keybindings::KeybindingResolver;
use scoom::model::filesystem::StdFileSystem;
use scoom::services::clipboard::SystemClipboard;
use scoom::services::clock::SystemClock;
use scoom::services::tracing_setup;
use scoom::view;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

/// A small terminal text editor
#[derive(Parser, Debug)]
#[command(name = "scoom")]
#[command(about = "A small terminal text editor with syntax highlighting", long_about = None)]
#[command(version)]
struct Args {
    /// File to open; created on first save if it does not exist
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for editor diagnostics (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
}

fn load_config(args: &Args) -> AnyhowResult<Config> {
    match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(Config::load_or_default()),
    }
}

fn run_event_loop(
    editor: &mut Editor,
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>,
    keybindings: &KeybindingResolver,
) -> AnyhowResult<()> {
    // Size the text area before the first frame
    editor.notify_resize_pending();

    loop {
        if editor.take_resize_pending() {
            terminal.autoresize()?;
            let size = terminal.size()?;
            editor.set_terminal_size(size.height as usize, size.width as usize);
        }

        editor.scroll();
        terminal.draw(|frame| view::render(frame, editor))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                let Some(action) = keybindings.resolve(&key) else {
                    continue;
                };
                if editor.handle_action(action)? == ActionOutcome::Quit {
                    return Ok(());
                }
            }
            CrosstermEvent::Resize(_, _) => editor.notify_resize_pending(),
            _ => {}
        }
    }
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(tracing_setup::default_log_path);
    tracing_setup::init_global(&log_file);
    tracing::info!("Editor starting");

    let config = load_config(&args)?;

    let mut editor = Editor::new(
        config,
        Box::new(StdFileSystem),
        Box::new(SystemClipboard::new()),
        Box::new(SystemClock),
    );
    if let Some(path) = &args.file {
        editor
            .open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
    }
    editor.set_status_message("HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find".to_string());

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        restore_terminal();
        original_hook(panic);
    }));

    enable_raw_mode().context("failed to enable raw mode")?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout());
    let result = Terminal::new(backend)
        .map_err(anyhow::Error::from)
        .and_then(|mut terminal| {
            run_event_loop(&mut editor, &mut terminal, &KeybindingResolver::new())
        });

    restore_terminal();
    if let Err(e) = &result {
        tracing::error!("editor exited with error: {:#}", e);
    }
    tracing::info!("Editor exiting");
    result
}

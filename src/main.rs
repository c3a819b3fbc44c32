use anyhow::{Context, Result};
use clap::Parser;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{
    self, DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
    EnableFocusChange, EnableMouseCapture,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::SetTitle;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

use pasteimg::app::{App, AppOptions};
use pasteimg::clipboard::create_backend;
use pasteimg::image::ImageProtocol;
use pasteimg::logging::init_logger;
use pasteimg::models::Session;
use pasteimg::storage::{default_config_path, ensure_session_dir, load_config};
use pasteimg::ui::Theme;

/// Upper bound on one wait for input when no timer is pending
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "pasteimg")]
#[command(about = "Paste clipboard images into temporary PNG files", long_about = None)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/pasteimg/pasteimg.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.or_else(default_config_path))?;
    let general = &config.general;

    let console = init_logger(&general.log_level, general.log_file.as_deref())?;

    let theme = Theme::from_config(&config.colors)?;
    let dir = ensure_session_dir(&general.dir_name)?;
    let session = Session::new(dir).context("Failed to resolve save directory")?;

    log::info!("Pasteimg started");
    log::info!("Images are saved to: {}", session.dir().display());
    log::info!("Press Ctrl+V in the window to paste an image, click a path to copy it");

    let clipboard = create_backend()?;
    let options = AppOptions::from(general);

    let shutdown = Arc::new(AtomicBool::new(false));
    register_shutdown_signals(&shutdown);

    let mut terminal = ratatui::init();
    console.suspend();
    if let Err(e) = execute!(
        io::stdout(),
        EnableMouseCapture,
        EnableBracketedPaste,
        EnableFocusChange,
        SetTitle("Pasteimg")
    ) {
        log::warn!("Failed to enable mouse capture: {}", e);
    }

    let images = ImageProtocol::from_terminal();
    let mut app = App::new(session, clipboard, images, theme, options);

    let result = run(&mut terminal, &mut app, &shutdown);

    // Saved files go away however the loop ended
    app.close();

    let _ = execute!(
        io::stdout(),
        DisableFocusChange,
        DisableBracketedPaste,
        DisableMouseCapture
    );
    ratatui::restore();
    console.resume();

    if let Err(e) = &result {
        log::error!("{:#}", e);
    }
    log::info!("Pasteimg closed");
    result
}

/// Closing the hosting terminal or a kill request raises `flag` for the event loop
#[cfg(unix)]
fn register_shutdown_signals(flag: &Arc<AtomicBool>) {
    use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};

    for signal in [SIGHUP, SIGTERM, SIGINT] {
        if let Err(e) = signal_hook::flag::register(signal, Arc::clone(flag)) {
            log::warn!("Failed to register handler for signal {}: {}", signal, e);
        }
    }
}

#[cfg(not(unix))]
fn register_shutdown_signals(_flag: &Arc<AtomicBool>) {}

/// Draw, wait for input or the next timer, dispatch, repeat
fn run(terminal: &mut DefaultTerminal, app: &mut App, shutdown: &AtomicBool) -> Result<()> {
    loop {
        app.check_shutdown(shutdown);
        if app.should_quit {
            break;
        }

        terminal
            .draw(|frame| app.draw(frame))
            .context("Failed to draw frame")?;

        let timeout = app
            .timer_timeout(Instant::now())
            .map_or(IDLE_POLL, |t| t.min(IDLE_POLL));

        if event::poll(timeout).context("Failed to poll terminal events")? {
            let event = event::read().context("Failed to read terminal event")?;
            app.handle_event(event);
        }

        app.run_due_timers(Instant::now());
    }
    Ok(())
}

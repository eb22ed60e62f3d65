// ABOUTME: Main entry point for the Toastbox TUI demo

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    Terminal,
};
use std::{
    io,
    path::PathBuf,
    time::{Duration, Instant},
};

use toastbox::app::{App, EventHandler};
use toastbox::components::LayoutComponent;
use toastbox::config::{self, Config};

#[derive(Debug, Parser)]
#[command(name = "toastbox", version, about = "Toast notifications in the terminal")]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override auto-dismiss delay in milliseconds (0 disables it)
    #[arg(long)]
    auto_dismiss_ms: Option<u64>,

    /// Override the action focus shortcut, e.g. "ctrl+t"
    #[arg(long)]
    shortcut: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();
    setup_panic_handler();

    let config = load_config(&cli)?;
    let mut app = App::with_config(&config);
    let mut layout = LayoutComponent::new(config.icon_table());

    run_tui(&mut app, &mut layout, config.tick_rate()).await?;

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => config::load().context("Failed to load config")?,
    };
    if let Some(ms) = cli.auto_dismiss_ms {
        config.auto_dismiss_ms = ms;
    }
    if let Some(shortcut) = &cli.shortcut {
        config.focus_shortcut.clone_from(shortcut);
        config.shortcut()?;
    }
    Ok(config)
}

async fn run_tui(app: &mut App, layout: &mut LayoutComponent, tick_rate: Duration) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &app.state, Instant::now());
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            let event = event::read()?;
            // Every mounted toast listens on the shared bus first.
            app.state.toasts.dispatch_event(&event);

            match event {
                Event::Key(key_event) => {
                    if let Some(app_event) = EventHandler::handle_key_event(key_event, &app.state) {
                        EventHandler::process_event(app_event, &mut app.state, Instant::now());
                    }
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    if let Some((id, control)) = layout.hit_test(mouse.column, mouse.row) {
                        app.state.toasts.click(&id, control, Instant::now());
                    }
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick(Instant::now());
            last_tick = Instant::now();
            tokio::task::yield_now().await;
        }

        if app.state.should_quit {
            break;
        }
    }

    app.state.toasts.clear();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use std::fs::OpenOptions;

    let log_dir = dirs::home_dir()
        .map(|home| home.join(".toastbox").join("logs"))
        .unwrap_or_else(|| PathBuf::from(".toastbox/logs"));

    let _ = std::fs::create_dir_all(&log_dir);

    let log_file = log_dir.join(format!("toastbox-{}.log",
        chrono::Local::now().format("%Y%m%d-%H%M%S")));

    // Logging is best effort; the UI owns the terminal so there is nowhere else to write.
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
    else {
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(file)
                .with_ansi(false)
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toastbox=info".into())
        )
        .init();
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        let _ = disable_raw_mode();
        let _ = execute!(
            std::io::stderr(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}

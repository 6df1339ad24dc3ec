use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chatdeck_core::ChatdeckConfig;
use chatdeck_tui::{app::App, theme::ThemeLoader};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "chatdeck")]
#[command(author, version, about = "Pick an agent and chat from the terminal", long_about = None)]
struct Cli {
    /// Extra configuration file, applied after the standard locations
    #[arg(short, long, env = "CHATDECK_CONFIG")]
    config: Option<PathBuf>,

    /// Theme to start with (overrides the saved choice)
    #[arg(short, long)]
    theme: Option<String>,

    /// Delay before each simulated reply, in milliseconds
    #[arg(long)]
    reply_delay_ms: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    setup_logging(&config)?;
    tracing::info!(
        reply_delay_ms = config.simulator.reply_delay_ms,
        "Starting chatdeck"
    );

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &config);
    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        tracing::error!("Application error: {:#}", e);
        eprintln!("Application error: {e}");
        return Err(e);
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<ChatdeckConfig> {
    let mut config =
        ChatdeckConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(delay) = cli.reply_delay_ms {
        config.simulator.reply_delay_ms = delay;
    }
    if let Some(theme) = &cli.theme {
        config.tui.theme = Some(theme.clone());
    }
    config.validate().context("Invalid command line override")?;

    Ok(config)
}

/// Logs go to a file; the terminal belongs to the screen.
fn setup_logging(config: &ChatdeckConfig) -> Result<()> {
    let path = config.log_file_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match config.log_level() {
        level if level.contains('=') || level.contains(',') => EnvFilter::new(level),
        level => EnvFilter::new(format!(
            "chatdeck={level},chatdeck_core={level},chatdeck_tui={level}"
        )),
    });

    let writer = Mutex::new(file);
    if config.logging.json {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer),
            )
            .with(filter)
            .init();
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &ChatdeckConfig,
) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut app = App::new(config, ThemeLoader::new());
        app.run(terminal).await
    })
}

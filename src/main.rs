use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use co2_chart::app::export_chart;
use co2_chart::{
    events, ui, App, ChartPoller, ChartState, FileSource, HistorySource, HttpSource, Settings,
    Theme,
};

#[derive(Parser, Debug)]
#[command(name = "co2-chart")]
#[command(about = "Live terminal chart of a CO2 sensor's history")]
struct Args {
    /// URL of the history endpoint (JSON array of ppm values, newest first)
    #[arg(short, long, conflicts_with = "file")]
    url: Option<String>,

    /// Read the history from a JSON file instead of over HTTP
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Refresh interval in seconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// Request timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (the TUI owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Fetch once, export the chart data to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(url) = args.url {
        settings.url = url;
    }
    if let Some(interval) = args.interval {
        settings.interval_secs = interval;
    }
    if let Some(timeout) = args.timeout {
        settings.timeout_secs = timeout;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = Some(log_file);
    }
    settings.validate()?;

    init_logging(settings.log_file.as_deref(), args.export.is_some())?;

    let source: Arc<dyn HistorySource> = match args.file {
        Some(path) => Arc::new(FileSource::new(path)),
        None => Arc::new(HttpSource::new(settings.url.clone(), settings.timeout())?),
    };
    let poller = ChartPoller::new(source, settings.interval());

    let rt = tokio::runtime::Runtime::new()?;

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return rt.block_on(export_once(&poller, &export_path));
    }

    let _guard = rt.enter();
    run_tui(poller)
}

/// Install the tracing subscriber.
///
/// The TUI draws on stdout, so logs only go to a file, or to stderr in export
/// mode. Without either they are dropped.
fn init_logging(log_file: Option<&Path>, to_stderr: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if to_stderr {
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
    }

    Ok(())
}

/// Refresh once and write the resulting chart to `path`
async fn export_once(poller: &ChartPoller, path: &Path) -> Result<()> {
    let series = poller
        .refresh()
        .await
        .with_context(|| format!("Failed to fetch history ({})", poller.source().description()))?;

    let mut chart = ChartState::new();
    chart.refresh(series);
    export_chart(&chart, path)?;

    println!(
        "Exported {} readings ({}) to: {}",
        chart.series().len(),
        chart.axis_title(),
        path.display()
    );
    Ok(())
}

/// Run the TUI, polling in the background
fn run_tui(poller: ChartPoller) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(poller.source().description(), Theme::auto_detect());
    let (handle, updates) = poller.start();
    app.attach(handle, updates);

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Resize needs no handling: the next iteration redraws
        if let Some(Event::Key(key)) = events::poll_event(Duration::from_millis(250))? {
            events::handle_key_event(app, key);
        }

        app.poll_updates();
    }

    Ok(())
}

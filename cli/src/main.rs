use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dailyquote_core::{
    corpus::default_corpus,
    remote::{QuoteProvider, ZenQuotesClient},
    selection::pick_random,
    share::share_message,
    storage::{FavoritesStore, SqliteStore},
};
use dailyquote_tui::{
    config::{load_config, QuoteSource},
    App, Event, EventHandler,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

#[derive(Parser)]
#[command(name = "dailyquote", version, about = "Browse quotes and keep your favorites")]
struct Cli {
    /// Directory holding favorites and the log file
    #[arg(long, env = "DAILYQUOTE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Config file path
    #[arg(long, env = "DAILYQUOTE_CONFIG")]
    config: Option<PathBuf>,

    /// Fetch quotes from the remote provider instead of the built-in list
    #[arg(long)]
    remote: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print favorites, newest first
    Favorites,
    /// Print a random quote ready to share
    Random,
    /// Remove all favorites
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = match cli.data_dir.clone() {
        Some(dir) => dir,
        None => dirs::data_dir()
            .context("Could not find data directory")?
            .join("dailyquote"),
    };
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    init_logging(&data_dir, cli.verbose)?;

    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => dirs::config_dir()
            .context("Could not find config directory")?
            .join("dailyquote")
            .join("config.toml"),
    };
    let mut config = load_config(&config_path)?;
    if cli.remote {
        config.quotes.source = QuoteSource::Remote;
    }

    match cli.command {
        Some(Command::Favorites) => print_favorites(&data_dir),
        Some(Command::Random) => {
            let quote = match config.quotes.source {
                QuoteSource::Remote => {
                    ZenQuotesClient::new(config.quotes.base_url.clone(), config.remote_timeout())
                        .fetch_random()?
                }
                QuoteSource::Local => pick_random(&default_corpus(), &mut rand::thread_rng())?.clone(),
            };
            println!("{}", share_message(&quote));
            Ok(())
        }
        Some(Command::Clear) => {
            open_store(&data_dir)?.clear()?;
            println!("All favorites cleared");
            Ok(())
        }
        None => run_tui(App::new(config, &data_dir)?),
    }
}

/// Log to a file: the TUI owns the terminal
fn init_logging(data_dir: &Path, verbose: bool) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let log_path = data_dir.join("dailyquote.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn open_store(data_dir: &Path) -> Result<FavoritesStore> {
    Ok(FavoritesStore::new(SqliteStore::open(data_dir.join("favorites.db"))?))
}

fn print_favorites(data_dir: &Path) -> Result<()> {
    let store = open_store(data_dir)?;
    let favorites = store.list_recent();
    if favorites.is_empty() {
        println!("No favorites yet");
        return Ok(());
    }
    for record in favorites {
        println!(
            "[{}] {}",
            record.favorited_at_datetime().format("%Y-%m-%d %H:%M"),
            share_message(&record.quote)
        );
    }
    Ok(())
}

fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.next_quote();
    info!("dailyquote started");

    let event_handler = EventHandler::new(250); // 250ms tick rate
    let result = run_app(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
    }
    info!("dailyquote stopped");

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|f| dailyquote_tui::ui::render(f, app))?;

        match event_handler.next()? {
            Event::Key(key) => dailyquote_tui::event::handle_key_event(key, app),
            Event::FocusGained => app.focus_gained(),
            Event::Tick => app.tick(),
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use bannerpick::application::{GalleryCell, GalleryController, SelectionOutcome};
use bannerpick::infrastructure::{
    AppSettings, FrontmatterStore, HttpImageFetcher, ImageSource, StorageManager,
};

/// Browse the banner catalog one page at a time and write a selection into a
/// markdown document's frontmatter.
#[derive(Debug, Parser)]
#[command(name = bannerpick::NAME, version = bannerpick::VERSION, about)]
struct Cli {
    /// Settings file path.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file path; logs go to stderr when omitted.
    #[arg(long)]
    log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, env = "BANNERPICK_LOG", default_value = "info")]
    log_level: String,

    /// Page to show (defaults to the first page).
    #[arg(long)]
    page: Option<usize>,

    /// Images per page, overriding the settings file.
    #[arg(long)]
    page_size: Option<usize>,

    /// Metadata key to write, overriding the settings file.
    #[arg(long)]
    metadata_key: Option<String>,

    /// Markdown document to treat as the active document.
    #[arg(long)]
    document: Option<PathBuf>,

    /// Select the nth cell of the shown page (1-based) and write it back.
    #[arg(long)]
    select: Option<usize>,
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.clone()));

    if let Some(log_path) = &cli.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer().with_writer(std::io::stderr);
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_settings(cli: &Cli) -> Result<AppSettings> {
    let storage = StorageManager::new()?;
    let mut settings = storage.load_settings(cli.config.as_deref())?;
    if let Some(page_size) = cli.page_size {
        settings.page_size = page_size;
    }
    if let Some(key) = &cli.metadata_key {
        settings.metadata_key.clone_from(key);
    }
    Ok(settings.sanitized())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(&cli)?;

    let settings = load_settings(&cli)?;
    info!(version = bannerpick::VERSION, "starting bannerpick");

    let fetcher = Arc::new(HttpImageFetcher::new()?);
    let store = Arc::new(FrontmatterStore::new());
    if let Some(document) = &cli.document {
        store.set_active(document);
    }

    let source = ImageSource::new(fetcher);
    let gallery = GalleryController::new(&settings, source, store);

    let view = match cli.page {
        Some(page) => gallery.jump_to_page(page).await,
        None => gallery.open().await,
    };
    let Some(view) = view else {
        warn!("requested page is out of range");
        return Ok(());
    };

    println!("{}", view.indicator());
    if view.degraded {
        println!("(preload failed; cells will load on demand)");
    }
    for (index, cell) in view.cells.iter().enumerate() {
        match cell {
            GalleryCell::Ready { locator, image } => {
                println!("{:>4}  {}  {}x{}", index + 1, locator, image.width(), image.height());
            }
            GalleryCell::Lazy(lazy) => {
                println!("{:>4}  {}  (lazy)", index + 1, lazy.locator());
            }
        }
    }

    if let Some(n) = cli.select {
        match n.checked_sub(1).and_then(|i| view.cells.get(i)) {
            Some(cell) => match gallery.select(cell.locator()).await? {
                SelectionOutcome::Selected => {
                    println!("wrote {} = {}", settings.metadata_key, cell.locator());
                }
                SelectionOutcome::NoActiveDocument => {
                    println!("no active document; pass --document to select");
                }
            },
            None => warn!(cell = n, "selection index outside the shown page"),
        }
    }

    Ok(())
}

/// framekit terminal demo - colliding bounding boxes
///
/// Two boxes swing through each other; their bounding boxes turn red while
/// they overlap.
/// Controls:
///   - WASD / Arrow Keys: Orbit the camera
///   - Space: Pause
///   - Q/ESC: Quit
use clap::Parser;
use framekit_core::ConfigTree;
use framekit_terminal::{AppError, Settings, TerminalApp};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "framekit-terminal", version, about = "ASCII bounding-box demo")]
struct Args {
    /// TOML file with `[camera]` and `[render]` settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs here; the terminal itself is taken by the renderer
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<(), AppError> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,framekit_core=debug,framekit_terminal=debug"));

    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let settings = match &args.config {
        Some(path) => Settings::from_config(&ConfigTree::load(path)?)?,
        None => Settings::default(),
    };
    tracing::debug!(?args, "parsed arguments");

    let mut app = TerminalApp::new(settings)?;
    app.run()?;

    println!("Thank you for using framekit!");
    Ok(())
}

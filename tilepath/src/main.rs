//! Terminal entry point for the tilepath demo.

use std::fs::File;
use std::path::Path;

use clap::Parser;
use tilepath::{
    AppError, Cli, Config, PathfindingModel,
    ui::{MIN_SCREEN_HEIGHT, MIN_SCREEN_WIDTH},
};
use tilepath_core::app::{App, AppConfig};
use tilepath_crossterm::CrosstermDriver;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("{e}");
        eprintln!("tilepath: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    init_logging(cli.log_file.as_deref(), cli.verbose)?;
    let config = Config::from_cli(cli);

    let (width, height) = match (config.width, config.height) {
        (Some(w), Some(h)) => (w, h),
        (w, h) => {
            let (tw, th) = CrosstermDriver::terminal_size().map_err(AppError::TerminalSize)?;
            (w.unwrap_or(tw), h.unwrap_or(th))
        }
    };
    if width < MIN_SCREEN_WIDTH || height < MIN_SCREEN_HEIGHT {
        return Err(AppError::ScreenTooSmall {
            width,
            height,
            min_width: MIN_SCREEN_WIDTH,
            min_height: MIN_SCREEN_HEIGHT,
        });
    }

    let model = PathfindingModel::new(&config, width, height);
    let mut app = App::new(AppConfig {
        model,
        driver: CrosstermDriver::new()
            .with_mouse(config.mouse)
            .with_frame_interval(config.frame_interval),
        width,
        height,
    });
    app.run().map_err(|e| AppError::Driver(e.to_string()))?;
    log::info!("bye");
    Ok(())
}

/// Log to `path` when given. Without a file nothing is installed, since
/// stderr shares the terminal with the alternate screen.
fn init_logging(path: Option<&Path>, verbose: bool) -> Result<(), AppError> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    log::info!("tilepath {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    Ok(())
}

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("cannot open log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot query terminal size: {0}")]
    TerminalSize(#[source] io::Error),

    #[error("screen is {width}x{height}, need at least {min_width}x{min_height}")]
    ScreenTooSmall {
        width: i32,
        height: i32,
        min_width: i32,
        min_height: i32,
    },

    #[error("terminal driver failed: {0}")]
    Driver(String),
}

/// Why a search could not be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartError {
    #[error("Start and Goal must be placed to run pathfinding")]
    MissingEndpoints,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            StartError::MissingEndpoints.to_string(),
            "Start and Goal must be placed to run pathfinding"
        );
        let e = AppError::ScreenTooSmall {
            width: 10,
            height: 5,
            min_width: 50,
            min_height: 24,
        };
        assert_eq!(e.to_string(), "screen is 10x5, need at least 50x24");
    }
}

use std::path::PathBuf;

use thiserror::Error;

/// Failures from the collaborators around the simulation.  The simulation
/// itself has no failure modes.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed")]
    Terminal(#[from] std::io::Error),

    #[error("cannot open log file {}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

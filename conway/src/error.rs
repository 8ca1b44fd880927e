// error.rs - Crate-wide error type

use thiserror::Error;

/// Everything that can stop a run from starting or completing.
#[derive(Error, Debug)]
pub enum GolError {
    /// I/O errors (world file missing, terminal write failures)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed world file
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Invalid run configuration (worker count vs. axis size, zero dimensions)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Synchronization primitives could not be set up
    #[error("Resource error: {message}")]
    Resource { message: String },

    /// The OS refused to start a worker thread
    #[error("Failed to spawn worker {id}: {source}")]
    Spawn {
        id: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Worker {id} panicked")]
    WorkerPanicked { id: usize },

    /// Another participant gave up on the round barrier
    #[error("Round barrier was abandoned by another worker")]
    BarrierAbandoned,
}

pub type Result<T> = std::result::Result<T, GolError>;

impl GolError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn resource(message: impl Into<String>) -> Self {
        Self::Resource {
            message: message.into(),
        }
    }

    /// Secondary failures caused by some other worker stopping first.
    pub fn is_knock_on(&self) -> bool {
        matches!(self, Self::BarrierAbandoned)
    }
}

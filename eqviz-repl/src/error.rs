use eqviz_analysis::MeshError;
use rustyline::error::ReadlineError;
use std::io;
use thiserror::Error;

/// Utility enum to package errors that can occur while reading input and writing results.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading from stdin or writing to stdout / stderr failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The line editor failed.
    #[error("{0}")]
    Readline(#[from] ReadlineError),

    /// The results could not be serialized.
    #[error("could not write JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The mesh could not be sampled with the given options.
    #[error("could not sample the mesh: {0}")]
    Mesh(#[from] MeshError),
}

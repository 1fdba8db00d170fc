//! Manual page generation errors.

use crate::preprocess::PreprocessError;
use std::{fmt, path::PathBuf};
use thiserror::Error;

/// Failure while producing one manual page.
#[derive(Debug, Error)]
pub enum ManpageError {
    #[error("page `{page}` is listed in the inputs of `{}` but was never rendered", .output.display())]
    MissingPage { page: String, output: PathBuf },

    #[error("no pages match the inputs of `{}`", .output.display())]
    NoInputs { output: PathBuf },

    #[error("preprocessing `{}` failed", .output.display())]
    Preprocess {
        output: PathBuf,
        #[source]
        source: PreprocessError,
    },

    #[error("converting `{}` failed: {message}", .output.display())]
    Convert { output: PathBuf, message: String },

    #[error("IO error on `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManpageError {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// One or more manual pages failed; every target was still attempted.
#[derive(Debug, Error)]
pub struct BuildError {
    pub failures: Vec<ManpageError>,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.failures.len();
        write!(
            f,
            "{count} manual page{} failed",
            if count == 1 { "" } else { "s" }
        )?;
        for failure in &self.failures {
            write!(f, "\n  - {failure}")?;
            let mut source = std::error::Error::source(failure);
            while let Some(cause) = source {
                write!(f, ": {cause}")?;
                source = cause.source();
            }
        }
        Ok(())
    }
}

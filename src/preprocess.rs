//! User-defined HTML preprocessing.
//!
//! A preprocessor receives the filtered document of one manual page and the
//! page's output path, and edits the document in place before conversion.
//!
//! # Script contract
//!
//! The configured `preprocess` file is run as an executable:
//!
//! ```text
//! <script> <output path>   < document HTML   > processed HTML
//! ```
//!
//! It must exit with status 0 and print the processed HTML on stdout.
//! Anything printed on stderr is logged in verbose mode.

use crate::{html::Document, utils::exec};
use std::{
    ffi::OsString,
    fmt, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Prefix of the synthetic names given to loaded scripts.
const NAME_PREFIX: &str = "manpage.preprocess";

/// Preprocessing errors.
#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("could not load `{}`: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    #[error("`{name}` could not pre-process HTML: {reason}")]
    Execute { name: String, reason: String },

    #[error("`{}` cannot be started: {hint}", .path.display())]
    MissingRuntime { path: PathBuf, hint: String },
}

/// An in-place transform of a manual page document.
pub trait Preprocess {
    /// Stable name used in logs and error messages.
    fn name(&self) -> &str;

    /// Edit `document`, which will be written to `output`.
    fn preprocess(&self, document: &mut Document, output: &Path) -> Result<(), PreprocessError>;
}

impl fmt::Debug for dyn Preprocess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Preprocess").field(&self.name()).finish()
    }
}

// ============================================================================
// Script Preprocessor
// ============================================================================

/// Preprocessor backed by an executable file.
#[derive(Debug, Clone)]
pub struct ScriptPreprocessor {
    name: String,
    path: PathBuf,
}

impl ScriptPreprocessor {
    /// Load the script at `path`.
    ///
    /// # Errors
    /// [`PreprocessError::Load`] when the path is missing, is not a file, or
    /// (on unix) is not executable.
    pub fn load(path: &Path) -> Result<Self, PreprocessError> {
        let load_error = |reason: String| PreprocessError::Load {
            path: path.to_path_buf(),
            reason,
        };

        let metadata = path.metadata().map_err(|err| load_error(err.to_string()))?;
        if !metadata.is_file() {
            return Err(load_error("not a file".into()));
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if metadata.permissions().mode() & 0o111 == 0 {
                return Err(load_error(format!(
                    "not executable, run `chmod +x {}`",
                    path.display()
                )));
            }
        }

        Ok(Self {
            name: synthetic_name(path),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn execute_error(&self, reason: impl Into<String>) -> PreprocessError {
        PreprocessError::Execute {
            name: self.name.clone(),
            reason: reason.into(),
        }
    }
}

impl Preprocess for ScriptPreprocessor {
    fn name(&self) -> &str {
        &self.name
    }

    fn preprocess(&self, document: &mut Document, output: &Path) -> Result<(), PreprocessError> {
        let html = document
            .to_html()
            .map_err(|err| self.execute_error(format!("could not serialize document: {err}")))?;

        let cmd = [self.path.clone().into_os_string()];
        let args = [OsString::from(output)];
        let result = exec::exec_with_input(&cmd, &args, html.as_bytes())
            .map_err(|err| self.spawn_error(err))?;

        exec::log_lines(&self.name, &String::from_utf8_lossy(&result.stderr));

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let mut reason = format!("exited with {}", result.status);
            if !stderr.trim().is_empty() {
                reason.push('\n');
                reason.push_str(stderr.trim());
            }
            return Err(self.execute_error(reason));
        }

        let processed = String::from_utf8(result.stdout)
            .map_err(|_| self.execute_error("printed invalid UTF-8"))?;
        if processed.trim().is_empty() {
            return Err(self.execute_error("printed no HTML"));
        }

        document.replace(&processed);
        Ok(())
    }
}

impl ScriptPreprocessor {
    /// Classify a failure to start the script.
    fn spawn_error(&self, err: io::Error) -> PreprocessError {
        match err.kind() {
            // The file was there at load time, so a missing program here is
            // the interpreter named on its `#!` line.
            io::ErrorKind::NotFound => PreprocessError::MissingRuntime {
                path: self.path.clone(),
                hint: "its interpreter was not found; install it or fix the `#!` line of the script"
                    .into(),
            },
            io::ErrorKind::PermissionDenied => PreprocessError::Load {
                path: self.path.clone(),
                reason: err.to_string(),
            },
            _ => self.execute_error(err.to_string()),
        }
    }
}

/// Name a script after its file stem (`scripts/strip.sh` -> `manpage.preprocess.strip`).
pub fn synthetic_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    format!("{NAME_PREFIX}.{stem}")
}

// ============================================================================
// Function Preprocessor
// ============================================================================

/// Preprocessor backed by a Rust closure, for library users.
pub struct FnPreprocessor<F> {
    name: String,
    func: F,
}

impl<F> FnPreprocessor<F>
where
    F: Fn(&mut Document, &Path) -> Result<(), String>,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Preprocess for FnPreprocessor<F>
where
    F: Fn(&mut Document, &Path) -> Result<(), String>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn preprocess(&self, document: &mut Document, output: &Path) -> Result<(), PreprocessError> {
        (self.func)(document, output).map_err(|reason| PreprocessError::Execute {
            name: self.name.clone(),
            reason,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Pandoc invocation.
//!
//! ```text
//! pandoc --verbose --standalone --wrap=none \
//!     -Vtitle:<title> -Vsection:<n> -Vdate:<YYYY-MM-DD> \
//!     -Vfooter:<tool vX.Y.Z> -Vheader:<header> \
//!     --to man <input.html> -o <output>
//! ```

use super::section::Section;
use crate::{
    debug,
    utils::exec::{self, filter_args, to_cmd_vec},
};
use anyhow::Result;
use std::{
    ffi::{OsStr, OsString},
    path::Path,
};

/// Options passed before the metadata variables.
const PANDOC_OPTIONS: [&str; 3] = ["--verbose", "--standalone", "--wrap=none"];

/// Footer naming the tool that produced the page.
pub const FOOTER: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

/// Metadata variables of one manual page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManpageMeta {
    pub title: String,
    pub section: Section,
    pub date: String,
    pub footer: String,
    pub header: String,
}

impl ManpageMeta {
    /// `key:value` pairs in the order they are passed to pandoc.
    pub fn variables(&self) -> [String; 5] {
        [
            format!("title:{}", self.title),
            format!("section:{}", self.section),
            format!("date:{}", self.date),
            format!("footer:{}", self.footer),
            format!("header:{}", self.header),
        ]
    }
}

/// The external HTML to man converter.
#[derive(Debug, Clone)]
pub struct Converter {
    command: Vec<OsString>,
}

impl Converter {
    /// Resolve the converter command. Empty elements are dropped.
    ///
    /// The program is looked up on `PATH`; when that fails the bare name is
    /// kept and left to the operating system, so a failed probe never stops
    /// the build by itself.
    pub fn discover(command: &[String]) -> Self {
        let mut command = filter_args(&to_cmd_vec(command));
        if let Some(program) = command.first_mut() {
            match which::which(&*program) {
                Ok(path) => *program = path.into_os_string(),
                Err(_) => {
                    debug!("pandoc"; "could not find {}, calling it directly", program.to_string_lossy());
                }
            }
        }
        Self { command }
    }

    /// Program that will be executed.
    pub fn program(&self) -> Option<&OsStr> {
        self.command.first().map(OsString::as_os_str)
    }

    /// Arguments after the command, for one conversion.
    pub fn args(&self, meta: &ManpageMeta, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = PANDOC_OPTIONS.iter().map(OsString::from).collect();
        args.extend(meta.variables().iter().map(|var| OsString::from(format!("-V{var}"))));
        args.extend([
            OsString::from("--to"),
            OsString::from("man"),
            input.as_os_str().to_owned(),
            OsString::from("-o"),
            output.as_os_str().to_owned(),
        ]);
        args
    }

    /// Convert the HTML file `input` into the man page `output`.
    ///
    /// The converter's output is logged line by line in verbose mode.
    ///
    /// # Errors
    /// Returns error if the converter cannot be started or exits non-zero.
    pub fn convert(&self, meta: &ManpageMeta, input: &Path, output: &Path) -> Result<()> {
        exec::exec(&self.command, &self.args(meta, input, output))?;
        Ok(())
    }
}

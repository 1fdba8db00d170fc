//! External command execution utilities.
//!
//! Runs the converter and the preprocessing script with proper output
//! handling and error reporting.

use crate::debug;
use anyhow::{Context, Result};
use std::{
    ffi::OsString,
    io::{self, Read, Write},
    path::Path,
    process::{Command, ExitStatus, Output, Stdio},
    thread,
};

// ============================================================================
// Argument Conversion
// ============================================================================

/// Trait for converting to command vector.
pub trait ToCmd {
    fn to_cmd(self) -> Vec<OsString>;
}

#[cfg(test)]
impl<const N: usize> ToCmd for [&str; N] {
    #[inline]
    fn to_cmd(self) -> Vec<OsString> {
        self.into_iter().map(OsString::from).collect()
    }
}

impl ToCmd for &[String] {
    #[inline]
    fn to_cmd(self) -> Vec<OsString> {
        self.iter().map(OsString::from).collect()
    }
}

/// Convert command to Vec<OsString>.
#[inline]
pub fn to_cmd_vec<C: ToCmd>(cmd: C) -> Vec<OsString> {
    cmd.to_cmd()
}

/// Filter out empty args.
#[inline]
pub fn filter_args(args: &[OsString]) -> Vec<OsString> {
    args.iter().filter(|a| !a.is_empty()).cloned().collect()
}

// ============================================================================
// Command Execution
// ============================================================================

/// Execute a command and capture its combined output.
///
/// Stdout and stderr share one pipe, so lines keep the order the command
/// wrote them in. They are logged line by line under the command name
/// (debug level).
///
/// # Errors
/// Returns error if command fails to execute or returns non-zero exit code.
pub fn exec(cmd: &[OsString], args: &[OsString]) -> Result<String> {
    let (name, mut command) = prepare(cmd, args)?;

    let (mut reader, writer) = io::pipe().context("Failed to create output pipe")?;
    let stdout = writer.try_clone().context("Failed to create output pipe")?;
    command.stdin(Stdio::null()).stdout(stdout).stderr(writer);

    let mut child = command
        .spawn()
        .with_context(|| format!("Failed to execute `{name}`"))?;
    // The command still holds the write ends; the read below only ends once
    // every copy is closed.
    drop(command);

    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .with_context(|| format!("Failed to read output of `{name}`"))?;
    let status = child
        .wait()
        .with_context(|| format!("Failed to wait for `{name}`"))?;

    let output = String::from_utf8_lossy(&buf).into_owned();
    if !status.success() {
        anyhow::bail!(format_error(&name, status, &output));
    }
    log_lines(&name, &output);
    Ok(output)
}

/// Execute a command with `input` written to its stdin, capturing its output.
///
/// The exit status is left to the caller. Stdin is fed from a separate
/// thread so a child that writes before it finishes reading cannot block on
/// a full pipe.
pub fn exec_with_input(cmd: &[OsString], args: &[OsString], input: &[u8]) -> io::Result<Output> {
    let (_, mut command) = prepare(cmd, args)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;

    command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn()?;
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| io::Error::other("Failed to acquire stdin"))?;

    thread::scope(|scope| {
        let writer = scope.spawn(move || {
            // Dropping stdin at the end of the closure signals EOF.
            match stdin.write_all(input) {
                Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            }
        });
        let output = child.wait_with_output()?;
        writer
            .join()
            .map_err(|_| io::Error::other("stdin writer thread panicked"))??;
        Ok(output)
    })
}

/// Prepare a Command from components.
fn prepare(cmd: &[OsString], args: &[OsString]) -> Result<(String, Command)> {
    let name = cmd
        .first()
        .map(|s| display_name(s))
        .context("Empty command")?;

    let mut command = Command::new(&cmd[0]);
    command.args(&cmd[1..]).args(args);

    Ok((name, command))
}

/// Short program name for log prefixes (`/usr/bin/pandoc` -> `pandoc`).
fn display_name(program: &OsString) -> String {
    Path::new(program)
        .file_stem()
        .unwrap_or(program.as_os_str())
        .to_string_lossy()
        .into_owned()
}

// ============================================================================
// Output Filtering
// ============================================================================

/// Log every non-blank line of `output`.
pub fn log_lines(name: &str, output: &str) {
    for line in output.lines() {
        let line = line.trim();
        if !line.is_empty() {
            debug!(name; "{line}");
        }
    }
}

/// Format command error message.
fn format_error(name: &str, status: ExitStatus, output: &str) -> String {
    let mut msg = format!("Command `{name}` failed with {status}");
    let output = output.trim();
    if !output.is_empty() {
        msg.push('\n');
        msg.push_str(output);
    }
    msg
}

// ============================================================================
// Tests
// ============================================================================

//! Small helpers shared by the manual page pipeline.

pub mod date;
pub mod exec;
pub mod pattern;

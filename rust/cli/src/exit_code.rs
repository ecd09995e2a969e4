//! Process exit codes returned by [`crate::run`].

pub const SUCCESS: i32 = 0;

/// Any command failure: bad flags, bad configuration, engine or I/O errors.
pub const ERROR: i32 = 2;

/// Ctrl+C during a tournament or hand run.
pub const INTERRUPTED: i32 = 130;

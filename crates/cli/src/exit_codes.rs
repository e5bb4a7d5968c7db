//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! | Code | Domain    | Description                                           |
//! |------|-----------|-------------------------------------------------------|
//! | 0    | Universal | Success                                               |
//! | 1    | Universal | General error (internal, e.g. summary serialization)  |
//! | 2    | Universal | CLI usage error (bad args, empty key list)            |
//! | 3    | Config    | Missing key columns, unreadable or invalid settings   |
//! | 4    | IO        | Unreadable source, uncreatable or unwritable output   |
//!
//! clap exits with 2 on its own parse errors, matching `EXIT_USAGE`.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - internal failure outside the other domains.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Configuration error - key columns absent from a table, bad settings file.
pub const EXIT_CONFIG: u8 = 3;

/// I/O error - source unreadable, destination not creatable.
pub const EXIT_IO: u8 = 4;

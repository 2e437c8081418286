//! CLI exit code registry.
//!
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Range | Domain    | Description                              |
//! |-------|-----------|------------------------------------------|
//! | 0     | Universal | Success                                  |
//! | 1     | Universal | General error (unspecified)              |
//! | 2     | Universal | CLI usage error (bad args, missing file) |
//! | 10-19 | config    | Settings file codes                      |
//! | 30-39 | replay    | Occurrence replay codes                  |
//!
//! New codes go in the matching range and into the table above.

// Universal (0-2)

/// Command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Unspecified failure. Prefer a specific code.
pub const EXIT_ERROR: u8 = 1;

/// Bad arguments or missing required options.
pub const EXIT_USAGE: u8 = 2;

// Config (10-19)

/// The `--settings` file could not be read, parsed or validated.
pub const EXIT_CONFIG_INVALID: u8 = 10;

// Replay (30-39)

/// The script could not be read or is not a valid script document.
pub const EXIT_REPLAY_SCRIPT: u8 = 30;

/// The facade host could not be built or a subscription was refused
/// (for example an unknown event name).
pub const EXIT_REPLAY_SETUP: u8 = 31;

/// A step referenced a sheet or cell that does not exist.
pub const EXIT_REPLAY_STEP: u8 = 32;

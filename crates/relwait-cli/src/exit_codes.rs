//! Standard exit codes for CLI operations
//!
//! A release that was not found or never settled is not a failure here:
//! those runs exit with `SUCCESS` and print the sentinel record.

/// Success - a record was printed
pub const SUCCESS: i32 = 0;

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Inspection error - helm could not be run or printed something unreadable
pub const INSPECT_ERROR: i32 = 3;

/// Usage error - invalid arguments or options (following sysexits.h convention)
pub const USAGE_ERROR: i32 = 64;

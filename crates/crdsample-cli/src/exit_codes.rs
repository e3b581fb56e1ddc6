//! Exit codes for CLI operations
//!
//! Follows sysexits.h conventions where one applies.

/// General error
pub const ERROR: i32 = 1;

/// The input could not be read as a CustomResourceDefinition
pub const INPUT_ERROR: i32 = 2;

/// A schema could not be walked (for example it nests too deeply)
pub const GENERATE_ERROR: i32 = 3;

/// The options file is missing or malformed
pub const CONFIG_ERROR: i32 = 4;

/// IO error - file not found, permission denied, broken pipe
pub const IO_ERROR: i32 = 5;

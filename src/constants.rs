// src/constants.rs

/// Exit status a front-end should report when a resolution pass succeeds.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit status a front-end should report when a resolution pass returns a
/// `ValidationError`. These are user-input errors, not internal faults.
pub const EXIT_VALIDATION_FAILURE: i32 = 2;

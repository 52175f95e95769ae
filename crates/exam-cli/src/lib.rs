//! Library components shared between the `exam` binary and its tests.

pub mod blueprint_file;
pub mod logging;

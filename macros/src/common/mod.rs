// Common utilities shared between user-facing macros
//
// This module contains:
// - parse_utils: Parsing and generated-path helpers

mod parse_utils;

pub use parse_utils::*;

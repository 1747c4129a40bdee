pub mod cache;
pub mod cli;
pub mod engine;
pub mod error;
pub mod linter;
pub mod options;
pub mod output;
pub mod report;
pub mod scanner;

pub use error::{ParlintError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_PROBLEMS: i32 = 1;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

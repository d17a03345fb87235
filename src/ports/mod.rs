//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the batch loop and the code that
//! actually encodes and writes bytes. Implementations live in `src/adapters/`.

pub mod file_generator;

pub use file_generator::{FileGenerator, FileTarget, GenerateFuture};

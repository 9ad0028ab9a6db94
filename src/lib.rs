//! Tetrino (workspace facade crate).
//!
//! Re-exports the member crates under `tetrino::{core, input, term, types}` so the
//! binary, the integration tests and the benchmarks share one import path.

pub use tetrino_core as core;
pub use tetrino_input as input;
pub use tetrino_term as term;
pub use tetrino_types as types;

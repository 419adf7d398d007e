//! Grover search on a dense statevector simulator.
//!
//! The binary in `main.rs` is a thin driver over [`crate::core::quantum`]; the
//! same modules are exported here for tests and embedding.
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;

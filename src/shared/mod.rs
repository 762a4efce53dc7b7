//! Cross-cutting concerns shared by adapters and wiring.

pub mod atomic_file;
pub mod config;

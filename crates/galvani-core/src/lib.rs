//! Galvani Core
//!
//! Shared plumbing for the Galvani chart engine: logging setup, profiling
//! scopes, hash collections and the slot arena that backs plot handles.

pub mod alloc;
pub mod logging;
pub mod math;
pub mod profiling;

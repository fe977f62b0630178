//! Collection types for Galvani.
//!
//! - Re-exports of hash collections using AHash
//! - [`SlotArena`], a generational arena handing out stable handles

pub mod arena;

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
pub use arena::{SlotArena, SlotHandle};

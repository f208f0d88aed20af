//! Trait definitions for the kernel plug-in boundary and shared utility types.
pub mod kernel;
pub mod types;

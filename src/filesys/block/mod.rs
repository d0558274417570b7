//! Block devices that need no hardware, plus device diagnostics.

pub mod memory;
pub mod selftest;

pub use memory::MemoryBlockDevice;

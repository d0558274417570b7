//! Device drivers.
//!
//! - Port I/O seam shared by register-level drivers
//! - Polled ATA PIO disk driver
//! - Serial port for kernel log output

pub mod ata;
pub mod port_io;
#[cfg(target_arch = "x86_64")]
pub mod serial;

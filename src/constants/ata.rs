//! ATA PIO command set and polling configuration.

pub const ATA_CMD_READ_PIO: u8 = 0x20;
pub const ATA_CMD_WRITE_PIO: u8 = 0x30;
pub const ATA_CMD_CACHE_FLUSH: u8 = 0xE7;

/// Drive/head selector for the master drive in LBA mode. Bits 0-3 carry
/// bits 24-27 of the LBA.
pub const ATA_DRIVE_MASTER_LBA: u8 = 0xE0;

/// Number of status reads a single wait may spend before giving up.
pub const ATA_POLL_ITERATIONS: usize = 100_000;

/// 16-bit transfers per sector.
pub const ATA_WORDS_PER_SECTOR: usize = 256;

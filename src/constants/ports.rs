//! I/O port definitions.

/// Base I/O port address for the first serial port (COM1).
pub const SERIAL_PORT: u16 = 0x3F8;

/// Primary ATA channel data register (16-bit).
pub const ATA_PRIMARY_DATA: u16 = 0x1F0;
/// Primary ATA channel error register (read side of the features port).
pub const ATA_PRIMARY_ERROR: u16 = 0x1F1;
pub const ATA_PRIMARY_SECCOUNT: u16 = 0x1F2;
pub const ATA_PRIMARY_LBA_LO: u16 = 0x1F3;
pub const ATA_PRIMARY_LBA_MID: u16 = 0x1F4;
pub const ATA_PRIMARY_LBA_HI: u16 = 0x1F5;
pub const ATA_PRIMARY_DRIVE_HEAD: u16 = 0x1F6;
/// Status on read, command on write.
pub const ATA_PRIMARY_STATUS: u16 = 0x1F7;
pub const ATA_PRIMARY_COMMAND: u16 = 0x1F7;

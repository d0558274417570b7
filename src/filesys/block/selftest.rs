//! Disk self-test: write a known pattern, read it back, compare.

use alloc::string::String;
use core::fmt::Write;

use log::{info, warn};

use crate::constants::storage::SECTOR_SIZE;
use crate::filesys::{BlockDevice, IoError, Sector};

/// Outcome of a write/read-back cycle on one sector
pub struct VerifyReport {
    pub lba: u32,
    /// Bytes that differ between the written pattern and the read-back
    pub mismatches: usize,
    pub readback: Sector,
}

impl VerifyReport {
    pub fn passed(&self) -> bool {
        self.mismatches == 0
    }
}

/// 0x00..=0xFF repeating
pub fn test_pattern() -> Sector {
    let mut pattern = [0u8; SECTOR_SIZE];
    for (i, byte) in pattern.iter_mut().enumerate() {
        *byte = (i & 0xFF) as u8;
    }
    pattern
}

/// Overwrites `lba` with the test pattern and reads it back.
///
/// Destroys whatever the sector held; point it at a scratch sector such as
/// `SELFTEST_SECTOR`.
pub fn write_verify<D: BlockDevice + ?Sized>(
    device: &mut D,
    lba: u32,
) -> Result<VerifyReport, IoError> {
    let pattern = test_pattern();
    device.write_sector(lba, &pattern)?;

    let mut readback = [0u8; SECTOR_SIZE];
    device.read_sector(lba, &mut readback)?;

    let mismatches = pattern
        .iter()
        .zip(readback.iter())
        .filter(|(written, read)| written != read)
        .count();

    if mismatches == 0 {
        info!("Disk self-test passed on LBA {lba}");
    } else {
        warn!("Disk self-test on LBA {lba}: {mismatches} mismatched bytes");
    }

    Ok(VerifyReport {
        lba,
        mismatches,
        readback,
    })
}

/// Formats up to `limit` bytes as uppercase hex, 16 per line.
pub fn hex_dump(bytes: &[u8], limit: usize) -> String {
    let mut out = String::new();
    for (i, byte) in bytes.iter().take(limit).enumerate() {
        if i > 0 {
            out.push(if i % 16 == 0 { '\n' } else { ' ' });
        }
        let _ = write!(out, "{byte:02X}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::storage::SELFTEST_SECTOR;
    use crate::filesys::block::MemoryBlockDevice;

    #[test]
    fn test_verify_passes_on_healthy_device() {
        let mut dev = MemoryBlockDevice::new(128);
        let report = write_verify(&mut dev, SELFTEST_SECTOR).unwrap();

        assert!(report.passed());
        assert_eq!(report.lba, SELFTEST_SECTOR);
        assert_eq!(report.readback[255], 0xFF);
        assert_eq!(report.readback[256], 0x00);
        assert_eq!(dev.sector(SELFTEST_SECTOR), Some(&test_pattern()));
    }

    #[test]
    fn test_verify_propagates_write_failure() {
        let mut dev = MemoryBlockDevice::new(128);
        dev.fail_writes_after(0);
        assert!(matches!(
            write_verify(&mut dev, SELFTEST_SECTOR),
            Err(IoError::DataFault)
        ));
    }

    #[test]
    fn test_verify_counts_mismatches() {
        /// Device that flips the low bit of the first byte on every read
        struct Flaky(MemoryBlockDevice);

        impl BlockDevice for Flaky {
            fn read_sector(&mut self, lba: u32, buf: &mut Sector) -> Result<(), IoError> {
                self.0.read_sector(lba, buf)?;
                buf[0] ^= 1;
                Ok(())
            }

            fn write_sector(&mut self, lba: u32, buf: &Sector) -> Result<(), IoError> {
                self.0.write_sector(lba, buf)
            }
        }

        let mut dev = Flaky(MemoryBlockDevice::new(128));
        let report = write_verify(&mut dev, 10).unwrap();
        assert!(!report.passed());
        assert_eq!(report.mismatches, 1);
    }

    #[test]
    fn test_hex_dump_layout() {
        let pattern = test_pattern();
        let dump = hex_dump(&pattern, 32);
        let lines: alloc::vec::Vec<&str> = dump.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F");
        assert!(lines[1].starts_with("10 11"));
        assert_eq!(hex_dump(&[0xAB], 64), "AB");
        assert_eq!(hex_dump(&[], 64), "");
    }
}

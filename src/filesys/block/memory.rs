//! In-memory block device implementation

use crate::constants::storage::SECTOR_SIZE;
use crate::filesys::{BlockDevice, IoError, Sector};
use alloc::vec;
use alloc::vec::Vec;
use core::result::Result;

/// RAM disk; also the backing device for file store tests
pub struct MemoryBlockDevice {
    sectors: Vec<Sector>,

    /// Successful writes left before every write fails
    writes_before_failure: Option<usize>,

    /// Fail every read while set
    fail_reads: bool,
}

impl MemoryBlockDevice {
    /// Creates a zero-filled device with `total_sectors` sectors
    pub fn new(total_sectors: u32) -> Self {
        Self {
            sectors: vec![[0; SECTOR_SIZE]; total_sectors as usize],
            writes_before_failure: None,
            fail_reads: false,
        }
    }

    /// Lets `count` more writes succeed, then fails all later writes with
    /// `IoError::DataFault`
    pub fn fail_writes_after(&mut self, count: usize) {
        self.writes_before_failure = Some(count);
    }

    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Clears all injected faults
    pub fn heal(&mut self) {
        self.writes_before_failure = None;
        self.fail_reads = false;
    }

    /// Direct view of a sector, bypassing fault injection
    pub fn sector(&self, lba: u32) -> Option<&Sector> {
        self.sectors.get(lba as usize)
    }

    pub fn sector_mut(&mut self, lba: u32) -> Option<&mut Sector> {
        self.sectors.get_mut(lba as usize)
    }

    pub fn total_sectors(&self) -> u32 {
        self.sectors.len() as u32
    }

    /// Validates sector number is within bounds
    fn validate_sector(&self, lba: u32) -> Result<usize, IoError> {
        let index = lba as usize;
        if index >= self.sectors.len() {
            return Err(IoError::OutOfRange);
        }
        Ok(index)
    }
}

impl BlockDevice for MemoryBlockDevice {
    fn read_sector(&mut self, lba: u32, buf: &mut Sector) -> Result<(), IoError> {
        let index = self.validate_sector(lba)?;
        if self.fail_reads {
            return Err(IoError::DataFault);
        }
        buf.copy_from_slice(&self.sectors[index]);
        Ok(())
    }

    fn write_sector(&mut self, lba: u32, buf: &Sector) -> Result<(), IoError> {
        let index = self.validate_sector(lba)?;
        if let Some(remaining) = self.writes_before_failure.as_mut() {
            if *remaining == 0 {
                return Err(IoError::DataFault);
            }
            *remaining -= 1;
        }
        self.sectors[index].copy_from_slice(buf);
        Ok(())
    }
}

//! Polled ATA PIO driver for the master drive on the primary channel.
//!
//! Every call moves exactly one sector and busy-waits on the status register
//! with a fixed iteration bound. Nothing is retried here; callers decide
//! whether a failed transfer is worth repeating.

use bitflags::bitflags;
use log::{debug, warn};

use crate::{
    constants::{ata::*, ports::*},
    devices::port_io::PortIo,
    filesys::{BlockDevice, IoError, Sector},
};

#[cfg(test)]
pub mod fake;

bitflags! {
    /// Bits of the primary status register.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct AtaStatus: u8 {
        const BUSY = 1 << 7;
        const DRIVE_READY = 1 << 6;
        const DRIVE_FAULT = 1 << 5;
        const DATA_REQUEST = 1 << 3;
        const ERROR = 1;
        const _ = !0;
    }
}

impl AtaStatus {
    fn is_ready(self) -> bool {
        !self.contains(AtaStatus::BUSY) && self.contains(AtaStatus::DRIVE_READY)
    }
}

/// ATA disk reached through some `PortIo` implementation.
pub struct AtaDisk<P: PortIo> {
    ports: P,
    poll_iterations: usize,
}

#[cfg(target_arch = "x86_64")]
impl AtaDisk<crate::devices::port_io::HardwarePorts> {
    /// The master drive on the legacy primary channel.
    ///
    /// # Safety
    /// Same contract as `HardwarePorts::new`: ring 0 and exclusive use of
    /// ports 0x1F0-0x1F7.
    pub const unsafe fn primary() -> Self {
        Self::new(crate::devices::port_io::HardwarePorts::new())
    }
}

impl<P: PortIo> AtaDisk<P> {
    pub const fn new(ports: P) -> Self {
        Self {
            ports,
            poll_iterations: ATA_POLL_ITERATIONS,
        }
    }

    /// Overrides how many status reads a wait may take.
    pub fn with_poll_iterations(mut self, poll_iterations: usize) -> Self {
        self.poll_iterations = poll_iterations;
        self
    }

    pub fn ports(&self) -> &P {
        &self.ports
    }

    pub fn ports_mut(&mut self) -> &mut P {
        &mut self.ports
    }

    fn status(&mut self) -> AtaStatus {
        AtaStatus::from_bits_retain(self.ports.read_u8(ATA_PRIMARY_STATUS))
    }

    /// Waits for BSY clear and DRDY set, mapping exhaustion to `on_timeout`.
    fn wait_ready(&mut self, on_timeout: IoError) -> Result<(), IoError> {
        for _ in 0..self.poll_iterations {
            if self.status().is_ready() {
                return Ok(());
            }
            core::hint::spin_loop();
        }
        warn!("ATA wait for ready exhausted: {}", on_timeout);
        Err(on_timeout)
    }

    /// Waits for DRQ after a read command.
    fn wait_data(&mut self) -> Result<(), IoError> {
        for _ in 0..self.poll_iterations {
            let status = self.status();
            if status.contains(AtaStatus::DATA_REQUEST) {
                return Ok(());
            }
            if status.contains(AtaStatus::ERROR) {
                let error = self.ports.read_u8(ATA_PRIMARY_ERROR);
                warn!("ATA read fault, error register 0x{error:02X}");
                return Err(IoError::DataFault);
            }
            core::hint::spin_loop();
        }
        warn!("ATA wait for data request exhausted");
        Err(IoError::Timeout)
    }

    /// Programs drive select, sector count and LBA, then issues `command`.
    fn issue(&mut self, lba: u32, command: u8) {
        self.ports.write_u8(
            ATA_PRIMARY_DRIVE_HEAD,
            ATA_DRIVE_MASTER_LBA | ((lba >> 24) & 0x0F) as u8,
        );
        self.ports.write_u8(ATA_PRIMARY_SECCOUNT, 1);
        self.ports.write_u8(ATA_PRIMARY_LBA_LO, lba as u8);
        self.ports.write_u8(ATA_PRIMARY_LBA_MID, (lba >> 8) as u8);
        self.ports.write_u8(ATA_PRIMARY_LBA_HI, (lba >> 16) as u8);
        self.ports.write_u8(ATA_PRIMARY_COMMAND, command);
    }
}

impl<P: PortIo + Send> BlockDevice for AtaDisk<P> {
    fn read_sector(&mut self, lba: u32, buf: &mut Sector) -> Result<(), IoError> {
        self.wait_ready(IoError::NotReady)?;
        self.issue(lba, ATA_CMD_READ_PIO);
        self.wait_data()?;

        for word in buf.chunks_exact_mut(2) {
            word.copy_from_slice(&self.ports.read_u16(ATA_PRIMARY_DATA).to_le_bytes());
        }

        debug!("ATA read LBA {lba}");
        Ok(())
    }

    fn write_sector(&mut self, lba: u32, buf: &Sector) -> Result<(), IoError> {
        self.wait_ready(IoError::NotReady)?;
        self.issue(lba, ATA_CMD_WRITE_PIO);
        self.wait_ready(IoError::Timeout)?;

        for word in buf.chunks_exact(2) {
            self.ports
                .write_u16(ATA_PRIMARY_DATA, u16::from_le_bytes([word[0], word[1]]));
        }

        self.ports.write_u8(ATA_PRIMARY_COMMAND, ATA_CMD_CACHE_FLUSH);
        self.wait_ready(IoError::Timeout)?;

        debug!("ATA wrote LBA {lba}");
        Ok(())
    }
}

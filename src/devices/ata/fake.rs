//! Scripted primary-channel register bank for driver tests.

use alloc::vec;
use alloc::vec::Vec;

use super::AtaStatus;
use crate::{
    constants::{ata::*, ports::*, storage::SECTOR_SIZE},
    devices::port_io::PortIo,
    filesys::Sector,
};

/// Misbehaviour the fake drive can be told to exhibit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fault {
    /// BSY never clears
    NeverReady,
    /// ERR is raised as soon as a read command lands
    ErrorOnCommand,
    /// A read command is accepted but DRQ never rises
    NoDataRequest,
    /// BSY latches after a write command
    StuckAfterCommand,
}

enum Transfer {
    Read,
    Write(usize),
}

pub struct FakeAtaBus {
    pub sectors: Vec<Sector>,
    pub drive_head: u8,
    pub sector_count: u8,
    /// LBA low, mid and high registers
    pub lba_bytes: [u8; 3],
    /// Every command opcode written, in order
    pub commands: Vec<u8>,
    pub fault: Option<Fault>,
    /// Status reads reporting BSY after each command
    pub busy_after_command: usize,
    busy_reads: usize,
    status: AtaStatus,
    transfer: Option<Transfer>,
    buffer: Sector,
    word_index: usize,
}

impl FakeAtaBus {
    pub fn new(total_sectors: usize) -> Self {
        Self {
            sectors: vec![[0; SECTOR_SIZE]; total_sectors],
            drive_head: 0,
            sector_count: 0,
            lba_bytes: [0; 3],
            commands: Vec::new(),
            fault: None,
            busy_after_command: 0,
            busy_reads: 0,
            status: AtaStatus::DRIVE_READY,
            transfer: None,
            buffer: [0; SECTOR_SIZE],
            word_index: 0,
        }
    }

    fn latched_lba(&self) -> usize {
        (((self.drive_head & 0x0F) as usize) << 24)
            | ((self.lba_bytes[2] as usize) << 16)
            | ((self.lba_bytes[1] as usize) << 8)
            | self.lba_bytes[0] as usize
    }

    fn command(&mut self, command: u8) {
        self.commands.push(command);
        self.busy_reads = self.busy_after_command;
        let lba = self.latched_lba();

        match command {
            ATA_CMD_READ_PIO => match self.fault {
                Some(Fault::ErrorOnCommand) => {
                    self.status = AtaStatus::DRIVE_READY | AtaStatus::ERROR;
                }
                Some(Fault::NoDataRequest) => self.status = AtaStatus::DRIVE_READY,
                _ if lba >= self.sectors.len() => {
                    self.status = AtaStatus::DRIVE_READY | AtaStatus::ERROR;
                }
                _ => {
                    self.buffer = self.sectors[lba];
                    self.word_index = 0;
                    self.transfer = Some(Transfer::Read);
                    self.status = AtaStatus::DRIVE_READY | AtaStatus::DATA_REQUEST;
                }
            },
            ATA_CMD_WRITE_PIO => match self.fault {
                Some(Fault::StuckAfterCommand) => self.status = AtaStatus::BUSY,
                _ => {
                    self.word_index = 0;
                    self.transfer = Some(Transfer::Write(lba));
                    self.status = AtaStatus::DRIVE_READY | AtaStatus::DATA_REQUEST;
                }
            },
            ATA_CMD_CACHE_FLUSH => self.status = AtaStatus::DRIVE_READY,
            _ => self.status = AtaStatus::DRIVE_READY | AtaStatus::ERROR,
        }
    }

    fn finish_transfer(&mut self) {
        if let Some(Transfer::Write(lba)) = self.transfer.take() {
            if let Some(sector) = self.sectors.get_mut(lba) {
                *sector = self.buffer;
            }
        }
        self.status = AtaStatus::DRIVE_READY;
    }
}

impl PortIo for FakeAtaBus {
    fn read_u8(&mut self, port: u16) -> u8 {
        match port {
            ATA_PRIMARY_STATUS => {
                if self.fault == Some(Fault::NeverReady) {
                    return AtaStatus::BUSY.bits();
                }
                if self.busy_reads > 0 {
                    self.busy_reads -= 1;
                    return AtaStatus::BUSY.bits();
                }
                self.status.bits()
            }
            // ABRT
            ATA_PRIMARY_ERROR => 0x04,
            _ => 0,
        }
    }

    fn write_u8(&mut self, port: u16, value: u8) {
        match port {
            ATA_PRIMARY_DRIVE_HEAD => self.drive_head = value,
            ATA_PRIMARY_SECCOUNT => self.sector_count = value,
            ATA_PRIMARY_LBA_LO => self.lba_bytes[0] = value,
            ATA_PRIMARY_LBA_MID => self.lba_bytes[1] = value,
            ATA_PRIMARY_LBA_HI => self.lba_bytes[2] = value,
            ATA_PRIMARY_COMMAND => self.command(value),
            _ => {}
        }
    }

    fn read_u16(&mut self, port: u16) -> u16 {
        if port != ATA_PRIMARY_DATA || !matches!(self.transfer, Some(Transfer::Read)) {
            return 0;
        }
        let offset = self.word_index * 2;
        let word = u16::from_le_bytes([self.buffer[offset], self.buffer[offset + 1]]);
        self.word_index += 1;
        if self.word_index == ATA_WORDS_PER_SECTOR {
            self.finish_transfer();
        }
        word
    }

    fn write_u16(&mut self, port: u16, value: u16) {
        if port != ATA_PRIMARY_DATA || !matches!(self.transfer, Some(Transfer::Write(_))) {
            return;
        }
        let offset = self.word_index * 2;
        self.buffer[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
        self.word_index += 1;
        if self.word_index == ATA_WORDS_PER_SECTOR {
            self.finish_transfer();
        }
    }
}

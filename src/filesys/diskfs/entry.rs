//! File table entry and file name types

use arrayvec::ArrayString;

use crate::constants::storage::{ENTRY_SIZE, FILENAME_LEN, MAX_NAME_LEN};
use crate::filesys::FsError;

const NAME_OFFSET: usize = 0;
const START_OFFSET: usize = NAME_OFFSET + FILENAME_LEN;
const SIZE_OFFSET: usize = START_OFFSET + 2;
const USED_OFFSET: usize = SIZE_OFFSET + 2;
const RESERVED_OFFSET: usize = USED_OFFSET + 1;
const RESERVED_LEN: usize = ENTRY_SIZE - RESERVED_OFFSET;

/// A validated file name: 1 to 15 bytes, no NUL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileName(ArrayString<MAX_NAME_LEN>);

impl FileName {
    pub fn new(name: &str) -> Result<Self, FsError> {
        if name.is_empty() || name.contains('\0') {
            return Err(FsError::InvalidName);
        }
        ArrayString::from(name)
            .map(FileName)
            .map_err(|_| FsError::InvalidName)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl core::fmt::Display for FileName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One 32-byte slot of the on-disk file table.
///
/// Fields mirror the disk layout exactly, reserved bytes included, so a
/// table read from disk is written back unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileEntry {
    /// NUL-padded name
    pub name: [u8; FILENAME_LEN],

    /// First data sector
    pub start_sector: u16,

    /// File size in bytes
    pub size: u16,

    /// Nonzero when the slot holds a file
    pub used: u8,

    pub reserved: [u8; RESERVED_LEN],
}

impl FileEntry {
    pub const EMPTY: FileEntry = FileEntry {
        name: [0; FILENAME_LEN],
        start_sector: 0,
        size: 0,
        used: 0,
        reserved: [0; RESERVED_LEN],
    };

    pub fn from_bytes(bytes: &[u8; ENTRY_SIZE]) -> Self {
        let mut name = [0; FILENAME_LEN];
        name.copy_from_slice(&bytes[NAME_OFFSET..START_OFFSET]);
        let mut reserved = [0; RESERVED_LEN];
        reserved.copy_from_slice(&bytes[RESERVED_OFFSET..]);

        Self {
            name,
            start_sector: u16::from_le_bytes([bytes[START_OFFSET], bytes[START_OFFSET + 1]]),
            size: u16::from_le_bytes([bytes[SIZE_OFFSET], bytes[SIZE_OFFSET + 1]]),
            used: bytes[USED_OFFSET],
            reserved,
        }
    }

    pub fn to_bytes(&self) -> [u8; ENTRY_SIZE] {
        let mut bytes = [0; ENTRY_SIZE];
        bytes[NAME_OFFSET..START_OFFSET].copy_from_slice(&self.name);
        bytes[START_OFFSET..SIZE_OFFSET].copy_from_slice(&self.start_sector.to_le_bytes());
        bytes[SIZE_OFFSET..USED_OFFSET].copy_from_slice(&self.size.to_le_bytes());
        bytes[USED_OFFSET] = self.used;
        bytes[RESERVED_OFFSET..].copy_from_slice(&self.reserved);
        bytes
    }

    pub fn is_used(&self) -> bool {
        self.used != 0
    }

    /// Name bytes up to the first NUL
    pub fn name_bytes(&self) -> &[u8] {
        let end = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(FILENAME_LEN);
        &self.name[..end]
    }

    /// The name as text; a name that is not valid UTF-8 is cut at the first
    /// bad byte.
    pub fn name(&self) -> &str {
        let bytes = self.name_bytes();
        match core::str::from_utf8(bytes) {
            Ok(name) => name,
            Err(err) => core::str::from_utf8(&bytes[..err.valid_up_to()]).unwrap_or(""),
        }
    }

    pub fn matches(&self, name: &FileName) -> bool {
        self.is_used() && self.name_bytes() == name.as_str().as_bytes()
    }

    /// Marks the slot used by `name`. Reserved bytes are left alone.
    pub fn occupy(&mut self, name: &FileName, start_sector: u16, size: u16) {
        self.name = [0; FILENAME_LEN];
        let bytes = name.as_str().as_bytes();
        self.name[..bytes.len()].copy_from_slice(bytes);
        self.start_sector = start_sector;
        self.size = size;
        self.used = 1;
    }

    pub fn release(&mut self) {
        self.used = 0;
    }
}

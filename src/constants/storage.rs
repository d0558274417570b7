//! On-disk layout of the file store.

/// Size of a disk sector in bytes
pub const SECTOR_SIZE: usize = 512;

/// Sector holding the serialized file table
pub const FILE_TABLE_SECTOR: u32 = 50;

/// First sector of the data region, directly after the table
pub const DATA_START_SECTOR: u32 = FILE_TABLE_SECTOR + 1;

/// Number of slots in the file table
pub const MAX_FILES: usize = 16;

/// Bytes reserved for a name on disk, terminator included
pub const FILENAME_LEN: usize = 16;

/// Longest name a file may carry
pub const MAX_NAME_LEN: usize = FILENAME_LEN - 1;

/// Sectors owned by each slot
pub const SECTORS_PER_FILE: usize = 2;

/// Largest payload a file may hold
pub const MAX_FILE_SIZE: usize = SECTORS_PER_FILE * SECTOR_SIZE;

/// Serialized size of one table entry
pub const ENTRY_SIZE: usize = 32;

/// Scratch sector used by the disk self-test, clear of the table and data region
pub const SELFTEST_SECTOR: u32 = 100;

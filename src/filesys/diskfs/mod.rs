//! Fixed-slot disk file store
//!
//! Sixteen named files, each owning two consecutive sectors whose address is
//! fixed by the slot index. The table lives in one reserved sector, is read
//! once and cached, and is written back after every change. Nothing is
//! rolled back: if a device write fails part way through `save` or `delete`,
//! the in-memory table keeps the change while the disk may not.

use arrayvec::{ArrayString, ArrayVec};
use core::cmp::min;
use log::{debug, warn};

use super::{BlockDevice, FsError};
use crate::constants::storage::*;

mod entry;
mod table;

pub use entry::{FileEntry, FileName};
pub use table::FileTable;

/// Name and size of one stored file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileInfo {
    pub name: ArrayString<FILENAME_LEN>,
    pub size: usize,
}

impl FileInfo {
    fn from_entry(entry: &FileEntry) -> Self {
        Self {
            name: ArrayString::from(entry.name()).unwrap_or_default(),
            size: entry.size as usize,
        }
    }
}

pub struct DiskFs<D: BlockDevice> {
    device: D,
    table: FileTable,
    loaded: bool,
}

impl<D: BlockDevice> DiskFs<D> {
    /// Wraps `device`; the table is read on first use or by `init`.
    pub const fn new(device: D) -> Self {
        Self {
            device,
            table: FileTable::empty(),
            loaded: false,
        }
    }

    /// Reads the file table from disk.
    ///
    /// On failure the store carries on with an empty table, as on a freshly
    /// formatted disk, and the read error is returned.
    pub fn init(&mut self) -> Result<(), FsError> {
        let result = self.read_table();
        if result.is_err() {
            self.table.clear();
        }
        self.loaded = true;
        result
    }

    /// Replaces the on-disk table with an empty one.
    pub fn format(&mut self) -> Result<(), FsError> {
        self.table.clear();
        self.loaded = true;
        debug!("Formatting file table");
        self.flush_table()
    }

    /// Stores `data` under `name`, replacing any file of that name.
    ///
    /// Both sectors of the slot are written, zero-padded past the end of
    /// `data`, so a shorter file leaves nothing of its predecessor on disk.
    pub fn save(&mut self, name: &str, data: &[u8]) -> Result<(), FsError> {
        if data.len() > MAX_FILE_SIZE {
            return Err(FsError::SizeExceeded);
        }
        let name = FileName::new(name)?;
        self.ensure_loaded()?;

        let slot = self
            .table
            .find(&name)
            .or_else(|| self.table.first_free())
            .ok_or(FsError::TableFull)?;
        let start = FileTable::slot_lba(slot);

        if let Some(entry) = self.table.entry_mut(slot) {
            entry.occupy(&name, start as u16, data.len() as u16);
        }

        let mut sector = [0u8; SECTOR_SIZE];
        for i in 0..SECTORS_PER_FILE {
            sector.fill(0);
            let offset = min(i * SECTOR_SIZE, data.len());
            let end = min(offset + SECTOR_SIZE, data.len());
            sector[..end - offset].copy_from_slice(&data[offset..end]);
            self.device.write_sector(start + i as u32, &sector)?;
        }

        self.flush_table()?;
        debug!("Saved {} ({} bytes) in slot {}", name, data.len(), slot);
        Ok(())
    }

    /// Copies the contents of `name` into `buf`, up to `buf.len()` bytes.
    ///
    /// Returns the number of bytes copied.
    pub fn load(&mut self, name: &str, buf: &mut [u8]) -> Result<usize, FsError> {
        let name = FileName::new(name).map_err(|_| FsError::NotFound)?;
        self.ensure_loaded()?;

        let slot = self.table.find(&name).ok_or(FsError::NotFound)?;
        let size = self.table.entry(slot).map_or(0, |entry| entry.size as usize);
        let copy_size = min(min(size, MAX_FILE_SIZE), buf.len());
        let start = FileTable::slot_lba(slot);

        let mut sector = [0u8; SECTOR_SIZE];
        let mut copied = 0;
        let mut lba = start;
        while copied < copy_size {
            self.device.read_sector(lba, &mut sector)?;
            let chunk = min(SECTOR_SIZE, copy_size - copied);
            buf[copied..copied + chunk].copy_from_slice(&sector[..chunk]);
            copied += chunk;
            lba += 1;
        }

        Ok(copied)
    }

    /// Frees the slot of `name`. Its data sectors are left as they are.
    pub fn delete(&mut self, name: &str) -> Result<(), FsError> {
        let name = FileName::new(name).map_err(|_| FsError::NotFound)?;
        self.ensure_loaded()?;

        let slot = self.table.find(&name).ok_or(FsError::NotFound)?;
        if let Some(entry) = self.table.entry_mut(slot) {
            entry.release();
        }

        self.flush_table()?;
        debug!("Deleted {} from slot {}", name, slot);
        Ok(())
    }

    /// Every stored file in slot order
    pub fn list(&mut self) -> Result<ArrayVec<FileInfo, MAX_FILES>, FsError> {
        self.ensure_loaded()?;
        Ok(self
            .table
            .used()
            .map(|(_, entry)| FileInfo::from_entry(entry))
            .collect())
    }

    pub fn count(&mut self) -> Result<usize, FsError> {
        self.ensure_loaded()?;
        Ok(self.table.used().count())
    }

    /// The `index`-th stored file, counting in slot order
    pub fn get_info(&mut self, index: usize) -> Result<FileInfo, FsError> {
        self.ensure_loaded()?;
        self.table
            .used()
            .nth(index)
            .map(|(_, entry)| FileInfo::from_entry(entry))
            .ok_or(FsError::NotFound)
    }

    pub fn free_slots(&mut self) -> Result<usize, FsError> {
        self.ensure_loaded()?;
        Ok(MAX_FILES - self.table.used().count())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The cached table, which may be ahead of the disk after a failed write
    pub fn table(&self) -> &FileTable {
        &self.table
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn into_device(self) -> D {
        self.device
    }

    /// Loads the table if this is the first access. A failed load is
    /// reported and retried on the next call.
    fn ensure_loaded(&mut self) -> Result<(), FsError> {
        if !self.loaded {
            self.read_table()?;
            self.loaded = true;
        }
        Ok(())
    }

    fn read_table(&mut self) -> Result<(), FsError> {
        let mut sector = [0u8; SECTOR_SIZE];
        if let Err(err) = self.device.read_sector(FILE_TABLE_SECTOR, &mut sector) {
            warn!("Reading file table failed: {}", err);
            return Err(err.into());
        }
        self.table = FileTable::from_sector(&sector);
        debug!("Loaded file table, {} files", self.table.used().count());
        Ok(())
    }

    fn flush_table(&mut self) -> Result<(), FsError> {
        let sector = self.table.to_sector();
        self.device.write_sector(FILE_TABLE_SECTOR, &sector)?;
        Ok(())
    }
}

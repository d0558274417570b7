//! In-memory copy of the one-sector file table

use crate::constants::storage::{
    DATA_START_SECTOR, ENTRY_SIZE, MAX_FILES, SECTORS_PER_FILE, SECTOR_SIZE,
};
use crate::filesys::Sector;

use super::entry::{FileEntry, FileName};

const _: () = assert!(MAX_FILES * ENTRY_SIZE == SECTOR_SIZE);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileTable {
    entries: [FileEntry; MAX_FILES],
}

impl Default for FileTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl FileTable {
    pub const fn empty() -> Self {
        Self {
            entries: [FileEntry::EMPTY; MAX_FILES],
        }
    }

    /// First data sector of `slot`. Fixed for the life of the disk.
    pub const fn slot_lba(slot: usize) -> u32 {
        DATA_START_SECTOR + (slot * SECTORS_PER_FILE) as u32
    }

    pub fn from_sector(sector: &Sector) -> Self {
        let mut table = Self::empty();
        for (entry, bytes) in table
            .entries
            .iter_mut()
            .zip(sector.chunks_exact(ENTRY_SIZE))
        {
            let mut raw = [0u8; ENTRY_SIZE];
            raw.copy_from_slice(bytes);
            *entry = FileEntry::from_bytes(&raw);
        }
        table
    }

    pub fn to_sector(&self) -> Sector {
        let mut sector = [0u8; SECTOR_SIZE];
        for (entry, bytes) in self.entries.iter().zip(sector.chunks_exact_mut(ENTRY_SIZE)) {
            bytes.copy_from_slice(&entry.to_bytes());
        }
        sector
    }

    pub fn entry(&self, slot: usize) -> Option<&FileEntry> {
        self.entries.get(slot)
    }

    pub fn entry_mut(&mut self, slot: usize) -> Option<&mut FileEntry> {
        self.entries.get_mut(slot)
    }

    /// Slot of the used entry called `name`
    pub fn find(&self, name: &FileName) -> Option<usize> {
        self.entries.iter().position(|entry| entry.matches(name))
    }

    pub fn first_free(&self) -> Option<usize> {
        self.entries.iter().position(|entry| !entry.is_used())
    }

    /// Used entries with their slot, in slot order
    pub fn used(&self) -> impl Iterator<Item = (usize, &FileEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_used())
    }

    pub fn clear(&mut self) {
        self.entries = [FileEntry::EMPTY; MAX_FILES];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> FileName {
        FileName::new(s).unwrap()
    }

    #[test]
    fn test_slot_addresses() {
        assert_eq!(FileTable::slot_lba(0), 51);
        assert_eq!(FileTable::slot_lba(1), 53);
        assert_eq!(FileTable::slot_lba(15), 81);
    }

    #[test]
    fn test_sector_round_trip_is_byte_exact() {
        let mut sector = [0u8; SECTOR_SIZE];
        for (i, byte) in sector.iter_mut().enumerate() {
            *byte = (i as u8) ^ 0xA5;
        }
        let table = FileTable::from_sector(&sector);
        assert_eq!(table.to_sector(), sector);
        assert_eq!(FileTable::from_sector(&table.to_sector()), table);
    }

    #[test]
    fn test_empty_table_serializes_to_zeroes() {
        assert_eq!(FileTable::empty().to_sector(), [0u8; SECTOR_SIZE]);
        assert_eq!(FileTable::from_sector(&[0u8; SECTOR_SIZE]).used().count(), 0);
    }

    #[test]
    fn test_find_and_first_free() {
        let mut table = FileTable::empty();
        table.entry_mut(0).unwrap().occupy(&name("a"), 51, 1);
        table.entry_mut(2).unwrap().occupy(&name("c"), 55, 3);

        assert_eq!(table.find(&name("c")), Some(2));
        assert_eq!(table.find(&name("b")), None);
        assert_eq!(table.first_free(), Some(1));

        let used: alloc::vec::Vec<usize> = table.used().map(|(slot, _)| slot).collect();
        assert_eq!(used, [0, 2]);
    }

    #[test]
    fn test_entry_placement_in_sector() {
        let mut table = FileTable::empty();
        table.entry_mut(3).unwrap().occupy(&name("slot3"), 57, 7);
        let sector = table.to_sector();

        assert_eq!(&sector[96..101], b"slot3");
        assert_eq!(sector[96 + 20], 1);
        assert!(sector[..96].iter().all(|&b| b == 0));
    }
}

use crate::constants::storage::SECTOR_SIZE;

pub mod block;
pub mod diskfs;
mod error;

pub use error::{FsError, IoError};

/// One sector worth of bytes
pub type Sector = [u8; SECTOR_SIZE];

/// A device that transfers whole sectors by LBA
pub trait BlockDevice: Send {
    fn read_sector(&mut self, lba: u32, buf: &mut Sector) -> Result<(), IoError>;
    fn write_sector(&mut self, lba: u32, buf: &Sector) -> Result<(), IoError>;
}

#[cfg(target_arch = "x86_64")]
pub use kernel_store::{init, DISK_FS};

#[cfg(target_arch = "x86_64")]
mod kernel_store {
    use lazy_static::lazy_static;
    use log::{info, warn};
    use spin::Mutex;

    use super::{diskfs::DiskFs, FsError};
    use crate::devices::{ata::AtaDisk, port_io::HardwarePorts};

    lazy_static! {
        /// The file store on the primary ATA disk, shared by the shell,
        /// editor and game. The lock also serializes every sector transfer
        /// on the channel.
        pub static ref DISK_FS: Mutex<DiskFs<AtaDisk<HardwarePorts>>> =
            Mutex::new(DiskFs::new(unsafe { AtaDisk::primary() }));
    }

    /// Loads the file table during boot.
    ///
    /// An unreadable table leaves the store empty and usable; the error is
    /// still returned so the boot console can say so.
    pub fn init() -> Result<(), FsError> {
        let mut fs = DISK_FS.lock();
        match fs.init() {
            Ok(()) => {
                info!("Disk filesystem ready, {} files", fs.count()?);
                Ok(())
            }
            Err(err) => {
                warn!("Filesystem not found ({}), starting with an empty table", err);
                Err(err)
            }
        }
    }
}

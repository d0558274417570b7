#![cfg_attr(not(test), no_std)]
#![cfg_attr(feature = "strict", deny(warnings))]
extern crate alloc;

pub mod constants;
pub mod devices;
pub mod filesys;

#[cfg(target_arch = "x86_64")]
pub mod logging;

#[cfg(target_arch = "x86_64")]
pub use devices::serial;

#[cfg(target_arch = "x86_64")]
pub mod prelude {
    pub use crate::serial_print;
    pub use crate::serial_println;
}

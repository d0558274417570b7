//! Narrow port I/O seam for register-level drivers.

/// Access to 8- and 16-bit I/O ports.
///
/// Drivers are written against this trait so the register protocol can be
/// exercised against a scripted register bank instead of real hardware.
pub trait PortIo {
    fn read_u8(&mut self, port: u16) -> u8;
    fn write_u8(&mut self, port: u16, value: u8);
    fn read_u16(&mut self, port: u16) -> u16;
    fn write_u16(&mut self, port: u16, value: u16);
}

/// Port I/O through the `in`/`out` instructions.
#[cfg(target_arch = "x86_64")]
pub struct HardwarePorts {
    _private: (),
}

#[cfg(target_arch = "x86_64")]
impl HardwarePorts {
    /// # Safety
    /// The caller must run at a privilege level allowed to perform port I/O
    /// and must be the only user of the ports driven through this handle.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

#[cfg(target_arch = "x86_64")]
impl PortIo for HardwarePorts {
    fn read_u8(&mut self, port: u16) -> u8 {
        unsafe { x86_64::instructions::port::Port::<u8>::new(port).read() }
    }

    fn write_u8(&mut self, port: u16, value: u8) {
        unsafe { x86_64::instructions::port::Port::<u8>::new(port).write(value) }
    }

    fn read_u16(&mut self, port: u16) -> u16 {
        unsafe { x86_64::instructions::port::Port::<u16>::new(port).read() }
    }

    fn write_u16(&mut self, port: u16, value: u16) {
        unsafe { x86_64::instructions::port::Port::<u16>::new(port).write(value) }
    }
}

//! Host system information

use crate::finalize::SystemInfo;
use std::ffi::CStr;
use std::io;

/// Reads the machine architecture with `uname(2)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Uname;

impl SystemInfo for Uname {
    fn architecture(&self) -> io::Result<String> {
        let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
        let ret = unsafe { libc::uname(&mut uts) };
        if ret != 0 {
            return Err(io::Error::last_os_error());
        }
        let machine = unsafe { CStr::from_ptr(uts.machine.as_ptr()) };
        Ok(machine.to_string_lossy().into_owned())
    }
}

/// A fixed architecture, for callers that already know it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedArch(pub String);

impl SystemInfo for FixedArch {
    fn architecture(&self) -> io::Result<String> {
        Ok(self.0.clone())
    }
}

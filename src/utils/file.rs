//! File reading utilities

use crate::error::{HostfactsError, Result};
use std::fs;
use std::path::Path;

/// Read a file to string, converting the error
pub fn read_file_safe<P: AsRef<Path>>(path: P) -> Result<String> {
    fs::read_to_string(path).map_err(HostfactsError::from)
}

/// Read first line of a file, trimmed
/// Meant for single-value sysfs attributes like cpufreq limits and MAC addresses
pub fn read_first_line<P: AsRef<Path>>(path: P) -> Result<String> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let path_cstr = CString::new(path.as_ref().as_os_str().as_bytes())
        .map_err(|_| HostfactsError::Parse("Invalid path".to_string()))?;

    unsafe {
        let fd = libc::open(path_cstr.as_ptr(), libc::O_RDONLY);
        if fd < 0 {
            return Err(HostfactsError::from(std::io::Error::last_os_error()));
        }

        let mut buffer = [0u8; 256];
        let bytes_read = libc::read(fd, buffer.as_mut_ptr() as *mut libc::c_void, buffer.len());
        libc::close(fd);

        if bytes_read < 0 {
            return Err(HostfactsError::from(std::io::Error::last_os_error()));
        }

        let content = std::str::from_utf8(&buffer[..bytes_read as usize])
            .map_err(|_| HostfactsError::Parse("Invalid UTF-8".to_string()))?;
        Ok(content.lines().next().unwrap_or("").trim().to_string())
    }
}

/// Read a single-line numeric attribute, `None` if missing or malformed
pub fn read_u64<P: AsRef<Path>>(path: P) -> Option<u64> {
    read_first_line(path).ok().and_then(|s| s.parse().ok())
}

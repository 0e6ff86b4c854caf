//! Small helpers for kernel attribute files (`brightness`, `max_brightness`, ...).

use std::io;
use std::path::Path;

/// Read an attribute holding a single unsigned integer.
pub(crate) fn read_u32(path: &Path) -> io::Result<u32> {
    let raw = std::fs::read_to_string(path)?;
    raw.trim().parse::<u32>().map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{}: {e}", path.display()),
        )
    })
}

/// Write a value to an attribute. Attribute files are never created.
pub(crate) fn write_u32(path: &Path, value: u32) -> io::Result<()> {
    use std::io::Write;
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)?;
    file.write_all(value.to_string().as_bytes())
}

pub mod elf;
pub mod macho;
pub mod pe;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

pub trait Header: std::fmt::Debug {
    /// Returns the virtual address of the entry point, or 0 when there is none.
    fn entry_point(&self) -> u64;

    /// Returns the machine architecture identifier.
    fn machine(&self) -> u32;

    /// Returns true if this is a 64-bit binary.
    fn is_64(&self) -> bool;

    /// Returns a short human-readable name, e.g. "ELF" or "PE".
    fn format_name(&self) -> &'static str;

    /// Returns true if the binary represents an executable (vs object/lib).
    fn is_executable(&self) -> bool;

    fn identity(&self) -> Identity {
        Identity {
            format: self.format_name(),
            machine: self.machine(),
            is_64: self.is_64(),
            is_executable: self.is_executable(),
            entry_point: self.entry_point(),
        }
    }
}

/// Owned summary of an accepted header, detached from the file buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub format: &'static str,
    pub machine: u32,
    pub is_64: bool,
    pub is_executable: bool,
    pub entry_point: u64,
}

/// Reads the whole file through a handle that lives only for this call.
pub(crate) fn read_image(path: &Path) -> Result<Vec<u8>> {
    let mut file = std::fs::File::open(path)
        .with_context(|| format!("cannot open {}", path.display()))?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)
        .with_context(|| format!("cannot read {}", path.display()))?;
    Ok(buf)
}

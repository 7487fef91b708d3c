use crate::header::{read_image, Header, Identity};
use anyhow::{Context, Result};
use goblin::elf::header::{ET_DYN, ET_EXEC};
use goblin::elf::Elf;
use std::path::Path;

/// Accepts an ELF (Executable and Linkable Format) image.
///
/// goblin validates the identification bytes (`0x7F 'E' 'L' 'F'`, class and
/// data encoding) and then walks the program and section header tables. The
/// image is accepted only if that whole walk succeeds, so a file with a valid
/// magic but a section table pointing outside the file is rejected.
///
/// Reference: [ELF Specification v1.2](https://refspecs.linuxfoundation.org/elf/elf.pdf)
pub fn identify(bytes: &[u8]) -> Result<Identity> {
    let elf = Elf::parse(bytes).context("not an ELF image")?;
    Ok(elf.identity())
}

pub fn attempt(path: &Path) -> Result<Identity> {
    let bytes = read_image(path)?;
    identify(&bytes)
}

impl Header for Elf<'_> {
    fn entry_point(&self) -> u64 {
        self.entry
    }

    fn machine(&self) -> u32 {
        self.header.e_machine as u32
    }

    fn is_64(&self) -> bool {
        self.is_64
    }

    fn format_name(&self) -> &'static str {
        "ELF"
    }

    /// `ET_EXEC`, or a position-independent executable (`ET_DYN` with an
    /// interpreter).
    fn is_executable(&self) -> bool {
        self.header.e_type == ET_EXEC
            || (self.header.e_type == ET_DYN && self.interpreter.is_some())
    }
}

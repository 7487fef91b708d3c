use crate::header::{read_image, Header, Identity};
use anyhow::{Context, Result};
use goblin::pe::characteristic::{IMAGE_FILE_DLL, IMAGE_FILE_EXECUTABLE_IMAGE};
use goblin::pe::header::{Header as PeHeader, SIZEOF_COFF_HEADER, SIZEOF_PE_MAGIC};
use goblin::pe::optional_header::MAGIC_64;
use goblin::pe::section_table::SectionTable;
use std::path::Path;

/// The headers of a PE image. Data directories (imports, exports,
/// resources, ...) are not resolved, so a broken directory does not make the
/// file any less a PE.
#[derive(Debug)]
pub struct PeImage {
    header: PeHeader,
    pub sections: Vec<SectionTable>,
}

/// Accepts a Portable Executable image: `MZ` DOS header, `PE\0\0` signature
/// at `e_lfanew`, COFF header, optional header when declared, and a section
/// table that fits in the file.
pub fn identify(bytes: &[u8]) -> Result<Identity> {
    Ok(parse(bytes).context("not a PE image")?.identity())
}

pub fn attempt(path: &Path) -> Result<Identity> {
    let bytes = read_image(path)?;
    identify(&bytes)
}

fn parse(bytes: &[u8]) -> Result<PeImage> {
    let header = PeHeader::parse(bytes)?;
    let mut offset = header.dos_header.pe_pointer as usize
        + SIZEOF_PE_MAGIC
        + SIZEOF_COFF_HEADER
        + header.coff_header.size_of_optional_header as usize;
    let sections = header
        .coff_header
        .sections(bytes, &mut offset)
        .context("malformed section table")?;
    Ok(PeImage { header, sections })
}

impl Header for PeImage {
    fn entry_point(&self) -> u64 {
        self.header
            .optional_header
            .as_ref()
            .map(|oh| oh.standard_fields.address_of_entry_point as u64)
            .unwrap_or(0)
    }

    fn machine(&self) -> u32 {
        self.header.coff_header.machine as u32
    }

    fn is_64(&self) -> bool {
        self.header
            .optional_header
            .as_ref()
            .is_some_and(|oh| oh.standard_fields.magic == MAGIC_64)
    }

    fn format_name(&self) -> &'static str {
        "PE"
    }

    fn is_executable(&self) -> bool {
        let characteristics = self.header.coff_header.characteristics;
        characteristics & IMAGE_FILE_DLL == 0
            && characteristics & IMAGE_FILE_EXECUTABLE_IMAGE != 0
    }
}

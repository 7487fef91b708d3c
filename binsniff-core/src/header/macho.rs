use crate::header::{read_image, Header, Identity};
use anyhow::{bail, Context, Result};
use goblin::mach::cputype::CPU_ARCH_ABI64;
use goblin::mach::fat::FatArch;
use goblin::mach::header::{MH_CIGAM, MH_EXECUTE, MH_MAGIC, SIZEOF_HEADER_32, SIZEOF_HEADER_64};
use goblin::mach::{Mach, MachO};
use std::borrow::Cow;
use std::path::Path;

/// `ar` archives are legal fat slices (static libraries).
const ARCHIVE_MAGIC: &[u8; 8] = b"!<arch>\n";

/// Summary of a universal ("fat") image. Slices are validated, not exposed.
#[derive(Debug)]
pub struct Universal {
    pub arches: Vec<FatArch>,
    executable: bool,
}

/// Accepts a Mach-O image.
///
/// Thin images (32 or 64-bit, either byte order) must parse through their
/// load-command table. Universal images must carry a readable fat_arch
/// record for every declared slice, each slice must lie inside the file and
/// must itself be a thin Mach-O or an archive.
pub fn identify(bytes: &[u8]) -> Result<Identity> {
    let bytes = pad_thin32(bytes);
    let bytes = &bytes[..];
    match Mach::parse(bytes).context("not a Mach-O image")? {
        Mach::Binary(macho) => Ok(macho.identity()),
        Mach::Fat(multi) => {
            let arches = multi
                .iter_arches()
                .collect::<Result<Vec<_>, _>>()
                .context("malformed fat_arch table")?;
            Ok(universal(bytes, arches)?.identity())
        }
    }
}

/// goblin wants at least `SIZEOF_HEADER_64` bytes whatever the magic, so a
/// complete 28-byte `mach_header` with no load commands is zero-padded to
/// that size. Anything shorter than a 32-bit header is left as is.
fn pad_thin32(bytes: &[u8]) -> Cow<'_, [u8]> {
    let magic = bytes
        .get(..4)
        .map(|m| u32::from_be_bytes([m[0], m[1], m[2], m[3]]));
    match magic {
        Some(MH_MAGIC | MH_CIGAM)
            if (SIZEOF_HEADER_32..SIZEOF_HEADER_64).contains(&bytes.len()) =>
        {
            let mut padded = bytes.to_vec();
            padded.resize(SIZEOF_HEADER_64, 0);
            Cow::Owned(padded)
        }
        _ => Cow::Borrowed(bytes),
    }
}

pub fn attempt(path: &Path) -> Result<Identity> {
    let bytes = read_image(path)?;
    identify(&bytes)
}

fn universal(bytes: &[u8], arches: Vec<FatArch>) -> Result<Universal> {
    if arches.is_empty() {
        bail!("universal image declares no architectures");
    }

    let mut executable = true;
    for (i, arch) in arches.iter().enumerate() {
        let start = arch.offset as usize;
        let end = start
            .checked_add(arch.size as usize)
            .context("fat_arch size overflows")?;
        let Some(slice) = bytes.get(start..end) else {
            bail!("slice {i} ({start:#x}..{end:#x}) lies outside the file");
        };

        if slice.starts_with(ARCHIVE_MAGIC) {
            executable = false;
            continue;
        }
        let slice = pad_thin32(slice);
        let thin = MachO::parse(&slice, 0).with_context(|| format!("slice {i} is not Mach-O"))?;
        executable &= thin.is_executable();
    }

    Ok(Universal { arches, executable })
}

impl Header for MachO<'_> {
    fn entry_point(&self) -> u64 {
        self.entry
    }

    fn machine(&self) -> u32 {
        self.header.cputype
    }

    fn is_64(&self) -> bool {
        self.is_64
    }

    fn format_name(&self) -> &'static str {
        "Mach-O"
    }

    fn is_executable(&self) -> bool {
        self.header.filetype == MH_EXECUTE
    }
}

impl Header for Universal {
    fn entry_point(&self) -> u64 {
        0
    }

    /// CPU type of the first slice.
    fn machine(&self) -> u32 {
        self.arches.first().map(|a| a.cputype).unwrap_or(0)
    }

    fn is_64(&self) -> bool {
        self.arches.iter().any(|a| a.cputype & CPU_ARCH_ABI64 != 0)
    }

    fn format_name(&self) -> &'static str {
        "Mach-O universal"
    }

    fn is_executable(&self) -> bool {
        self.executable
    }
}

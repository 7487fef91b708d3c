//! Hand-assembled minimal executable images for tests.

use std::io::Write;
use tempfile::NamedTempFile;

pub const PE_POINTER: usize = 0x80;
pub const PE_COFF: usize = PE_POINTER + 4;
pub const PE_OPT: usize = PE_COFF + 20;
/// Start of the sixteen data directory entries (export, import, ...).
pub const PE_DATA_DIRS: usize = PE_OPT + 24 + 88;
pub const PE_ENTRY: u32 = 0x1000;
pub const ELF_ENTRY: u64 = 0x401000;

pub fn write_temp(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

fn put_u16(buf: &mut [u8], off: usize, v: u16, le: bool) {
    let b = if le { v.to_le_bytes() } else { v.to_be_bytes() };
    buf[off..off + 2].copy_from_slice(&b);
}

fn put_u32(buf: &mut [u8], off: usize, v: u32, le: bool) {
    let b = if le { v.to_le_bytes() } else { v.to_be_bytes() };
    buf[off..off + 4].copy_from_slice(&b);
}

fn put_u64(buf: &mut [u8], off: usize, v: u64, le: bool) {
    let b = if le { v.to_le_bytes() } else { v.to_be_bytes() };
    buf[off..off + 8].copy_from_slice(&b);
}

/// PE32+ image for x86-64: DOS header, `PE\0\0`, COFF header and an optional
/// header with sixteen empty data directories. No sections.
pub fn pe64() -> Vec<u8> {
    const OPT_SIZE: usize = 24 + 88 + 16 * 8;

    let mut buf = vec![0u8; 0x200];
    buf[0..2].copy_from_slice(b"MZ");
    put_u32(&mut buf, 0x3c, PE_POINTER as u32, true);
    buf[PE_POINTER..PE_POINTER + 4].copy_from_slice(b"PE\0\0");

    put_u16(&mut buf, PE_COFF, 0x8664, true); // machine
    put_u16(&mut buf, PE_COFF + 2, 0, true); // number_of_sections
    put_u32(&mut buf, PE_COFF + 4, 0x5f00_0000, true); // time_date_stamp
    put_u16(&mut buf, PE_COFF + 16, OPT_SIZE as u16, true);
    put_u16(&mut buf, PE_COFF + 18, 0x0022, true); // EXECUTABLE_IMAGE | LARGE_ADDRESS_AWARE

    // standard fields
    put_u16(&mut buf, PE_OPT, 0x20b, true);
    put_u32(&mut buf, PE_OPT + 16, PE_ENTRY, true);
    put_u32(&mut buf, PE_OPT + 20, 0x1000, true); // base_of_code
    // windows fields
    put_u64(&mut buf, PE_OPT + 24, 0x1_4000_0000, true); // image_base
    put_u32(&mut buf, PE_OPT + 32, 0x1000, true); // section_alignment
    put_u32(&mut buf, PE_OPT + 36, 0x200, true); // file_alignment
    put_u16(&mut buf, PE_OPT + 40, 6, true); // major_operating_system_version
    put_u16(&mut buf, PE_OPT + 48, 6, true); // major_subsystem_version
    put_u32(&mut buf, PE_OPT + 56, 0x2000, true); // size_of_image
    put_u32(&mut buf, PE_OPT + 60, 0x200, true); // size_of_headers
    put_u16(&mut buf, PE_OPT + 68, 3, true); // subsystem: console
    put_u32(&mut buf, PE_OPT + 108, 16, true); // number_of_rva_and_sizes
    buf
}

/// ELF64 executable header with no program or section headers.
pub fn elf64(le: bool) -> Vec<u8> {
    let mut buf = vec![0u8; 64];
    buf[0..4].copy_from_slice(b"\x7fELF");
    buf[4] = 2; // ELFCLASS64
    buf[5] = if le { 1 } else { 2 };
    buf[6] = 1; // EV_CURRENT
    put_u16(&mut buf, 16, 2, le); // ET_EXEC
    put_u16(&mut buf, 18, if le { 0x3e } else { 0x15 }, le);
    put_u32(&mut buf, 20, 1, le);
    put_u64(&mut buf, 24, ELF_ENTRY, le);
    put_u16(&mut buf, 52, 64, le); // e_ehsize
    put_u16(&mut buf, 54, 56, le); // e_phentsize
    put_u16(&mut buf, 58, 64, le); // e_shentsize
    buf
}

/// ELF32 little-endian i386 relocatable object header.
pub fn elf32() -> Vec<u8> {
    let mut buf = vec![0u8; 52];
    buf[0..4].copy_from_slice(b"\x7fELF");
    buf[4] = 1; // ELFCLASS32
    buf[5] = 1;
    buf[6] = 1;
    put_u16(&mut buf, 16, 1, true); // ET_REL
    put_u16(&mut buf, 18, 3, true); // EM_386
    put_u32(&mut buf, 20, 1, true);
    put_u16(&mut buf, 40, 52, true);
    put_u16(&mut buf, 42, 32, true);
    put_u16(&mut buf, 46, 40, true);
    buf
}

/// 64-bit little-endian x86-64 executable with a single LC_UUID command.
pub fn macho64() -> Vec<u8> {
    let mut buf = vec![0u8; 32 + 24];
    put_u32(&mut buf, 0, 0xfeed_facf, true);
    put_u32(&mut buf, 4, 0x0100_0007, true); // CPU_TYPE_X86_64
    put_u32(&mut buf, 8, 3, true);
    put_u32(&mut buf, 12, 2, true); // MH_EXECUTE
    put_u32(&mut buf, 16, 1, true); // ncmds
    put_u32(&mut buf, 20, 24, true); // sizeofcmds
    put_u32(&mut buf, 32, 0x1b, true); // LC_UUID
    put_u32(&mut buf, 36, 24, true);
    buf[40..56].copy_from_slice(&[0xab; 16]);
    buf
}

/// 32-bit big-endian PowerPC executable with an empty load-command table.
pub fn macho32_be() -> Vec<u8> {
    let mut buf = vec![0u8; 28];
    put_u32(&mut buf, 0, 0xfeed_face, false);
    put_u32(&mut buf, 4, 18, false); // CPU_TYPE_POWERPC
    put_u32(&mut buf, 12, 2, false);
    buf
}

/// Universal image holding one x86-64 slice at offset 0x1000.
pub fn macho_fat() -> Vec<u8> {
    let thin = macho64();
    let offset = 0x1000usize;
    let mut buf = vec![0u8; offset + thin.len()];
    put_u32(&mut buf, 0, 0xcafe_babe, false);
    put_u32(&mut buf, 4, 1, false);
    put_u32(&mut buf, 8, 0x0100_0007, false);
    put_u32(&mut buf, 12, 3, false);
    put_u32(&mut buf, 16, offset as u32, false);
    put_u32(&mut buf, 20, thin.len() as u32, false);
    put_u32(&mut buf, 24, 12, false); // align 2^12
    buf[offset..].copy_from_slice(&thin);
    buf
}

use crate::header::read_image;
use std::path::Path;

/// Returns true if `data` contains at least one NUL byte.
pub fn contains_nul(data: &[u8]) -> bool {
    memchr::memchr(0, data).is_some()
}

/// Classifies the file at `path` as binary when any byte of it is NUL.
///
/// The whole file is read, not a prefix. Failing to open or read the file is
/// logged and reported as "not binary".
pub fn is_binary<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    match read_image(path) {
        Ok(buf) => contains_nul(&buf),
        Err(err) => {
            log::warn!("Error while checking if file is binary: {err:#}");
            false
        }
    }
}

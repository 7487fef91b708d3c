use crate::header::{elf, macho, pe, Identity};
use crate::FormatKind;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// A single format acceptance test. It opens and reads the file itself.
pub type Attempt = fn(&Path) -> anyhow::Result<Identity>;

/// Outcome of one [`Attempt`].
#[derive(Debug)]
pub enum Verdict {
    Accepted(Identity),
    /// The parser cleanly refused the file.
    Rejected(anyhow::Error),
    /// The parser faulted while reading the file.
    Malformed(String),
}

/// Ordered chain of format attempts. The first accepting attempt wins.
#[derive(Debug, Clone)]
pub struct Detector {
    attempts: Vec<(FormatKind, Attempt)>,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(vec![
            (FormatKind::Windows, pe::attempt as Attempt),
            (FormatKind::UnixLinux, elf::attempt as Attempt),
            (FormatKind::MacOS, macho::attempt as Attempt),
        ])
    }
}

impl Detector {
    pub fn new(attempts: Vec<(FormatKind, Attempt)>) -> Self {
        Self { attempts }
    }

    /// Formats in the order they are tried.
    pub fn order(&self) -> impl Iterator<Item = FormatKind> + '_ {
        self.attempts.iter().map(|(kind, _)| *kind)
    }

    pub fn detect<P: AsRef<Path>>(&self, path: P) -> FormatKind {
        self.identify(path)
            .map(|(kind, _)| kind)
            .unwrap_or(FormatKind::Unknown)
    }

    /// Runs the chain and returns the first accepted format with its header
    /// summary, or `None` when every attempt declines.
    pub fn identify<P: AsRef<Path>>(&self, path: P) -> Option<(FormatKind, Identity)> {
        let path = path.as_ref();
        for &(kind, attempt) in &self.attempts {
            match Self::attempt(attempt, path) {
                Verdict::Accepted(identity) => {
                    log::debug!("{} accepted as {kind}: {identity:?}", path.display());
                    return Some((kind, identity));
                }
                Verdict::Rejected(err) => {
                    log::info!("{kind} attempt rejected {}: {err:#}", path.display());
                }
                Verdict::Malformed(fault) => {
                    log::warn!("{kind} attempt faulted on {}: {fault}", path.display());
                }
            }
        }
        log::debug!("no format accepted {}", path.display());
        None
    }

    /// Runs one attempt in isolation. A panic inside the parser becomes
    /// [`Verdict::Malformed`] instead of unwinding into the caller.
    pub fn attempt(attempt: Attempt, path: &Path) -> Verdict {
        match panic::catch_unwind(AssertUnwindSafe(|| attempt(path))) {
            Ok(Ok(identity)) => Verdict::Accepted(identity),
            Ok(Err(err)) => Verdict::Rejected(err),
            Err(payload) => Verdict::Malformed(panic_message(payload.as_ref())),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "parser panicked".to_string()
    }
}

/// Tries PE, then ELF, then Mach-O, and reports the first format that parses.
pub fn detect_format<P: AsRef<Path>>(path: P) -> FormatKind {
    Detector::default().detect(path)
}

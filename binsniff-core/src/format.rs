use std::fmt;

/// Operating system family an executable container is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    /// Portable Executable.
    Windows,
    /// ELF.
    UnixLinux,
    /// Mach-O, thin or universal.
    MacOS,
    Unknown,
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatKind::Windows => "Windows",
            FormatKind::UnixLinux => "Unix/Linux",
            FormatKind::MacOS => "MacOS",
            FormatKind::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

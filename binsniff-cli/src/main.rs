use anyhow::Result;
use binsniff_core::{FormatKind, detect_format, is_binary};
use clap::Parser;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

/// Tell binaries from text and guess which OS a binary targets
#[derive(Parser)]
#[command(
    name = "binsniff",
    about = "Detect whether a file is binary and which OS it is built for (PE, ELF, Mach-O)",
    version,
    author
)]
struct Cli {
    /// Path to the file to check
    #[arg(required = true)]
    file: PathBuf,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Show why each format parser declined the file
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize, PartialEq)]
struct Report {
    path: String,
    binary: bool,
    os: Option<String>,
}

impl Report {
    fn new(path: String, binary: bool, os: Option<FormatKind>) -> Self {
        Self {
            path,
            binary,
            os: os.map(|k| k.to_string()),
        }
    }

    fn render_text(&self) -> String {
        match &self.os {
            Some(os) if self.binary => format!(
                "{}\nIntended OS: {}",
                "This is a binary file.".green(),
                os.as_str().bold()
            ),
            _ => format!("{}", "This is not a binary file.".yellow()),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let binary = is_binary(&cli.file);
    let os = binary.then(|| detect_format(&cli.file));
    let report = Report::new(cli.file.display().to_string(), binary, os);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.render_text());
    }

    Ok(())
}

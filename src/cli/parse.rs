//! CLI parse: clap types for Coffer. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// Coffer CLI - Inspect and synthesize compound container files
#[derive(Parser)]
#[command(name = "coffer")]
#[command(about = "Inspect and synthesize compound container files")]
pub struct Cli {
    /// Path to the compound container file
    pub path: Option<PathBuf>,

    /// Operation code (1 = list top level, 2 = aggregate whole tree,
    /// 3 = generate)
    pub opcode: Option<u32>,

    /// Number of parts to generate (opcode 3 only)
    pub part_count: Option<u64>,

    /// Output format for list/aggregate results (text, json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// One resolved operation on one archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    List { path: PathBuf },
    Aggregate { path: PathBuf },
    Generate { path: PathBuf, part_count: u64 },
}

impl Cli {
    /// Map the positional opcode contract onto an operation.
    ///
    /// Returns `None` when the path or opcode is missing or the opcode is
    /// unrecognized; the caller prints usage and exits 0.
    pub fn operation(&self) -> Option<Operation> {
        let path = self.path.clone()?;
        match self.opcode? {
            1 => Some(Operation::List { path }),
            2 => Some(Operation::Aggregate { path }),
            3 => Some(Operation::Generate {
                path,
                part_count: self.part_count.unwrap_or(0),
            }),
            _ => None,
        }
    }
}

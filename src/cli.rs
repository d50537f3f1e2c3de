use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "sema-extract",
    version,
    about = "Extract actionlint's built-in expression types and function signatures as JSON"
)]
pub struct Args {
    /// Directory that relative paths are resolved against
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Path to configuration file [default: .sema-extract.yml if present]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Go source declaring the built-in tables
    #[arg(long, value_name = "FILE")]
    pub source: Option<PathBuf>,

    /// Where to write the global variable types
    #[arg(long, value_name = "FILE")]
    pub globals_out: Option<PathBuf>,

    /// Where to write the function signatures
    #[arg(long, value_name = "FILE")]
    pub functions_out: Option<PathBuf>,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

pub mod cli;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod extract;
pub mod logging;
pub mod output;
pub mod parse;

#[cfg(test)]
pub mod testutil;

use anyhow::{Context, Result};
use tracing::{debug, info};

use cli::Args;
use config::load_config;
use extract::extract;
use output::{commit, stage_table};
use parse::SourceFile;

pub use descriptor::{FunctionSignature, FunctionTable, GlobalVariableTable, TypeDescriptor};
pub use error::ExtractError;
pub use extract::{Bindings, Extraction};

/// Extract both tables and write them out. Returns the exit code.
///
/// Nothing is written unless both tables were built.
pub fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args.root, args.config.as_deref())?;
    config.apply_args(&args);
    match &config.config_file {
        Some(path) => debug!(path = %path.display(), "config loaded"),
        None => debug!("no config file found"),
    }

    let source_path = config.source_path();
    let source = SourceFile::from_path(&source_path)?;
    let extraction = extract(&source, &config.bindings)
        .with_context(|| format!("failed to extract tables from {}", source_path.display()))?;

    let globals_out = config.globals_out_path();
    let functions_out = config.functions_out_path();
    let staged = vec![
        stage_table(&globals_out, &extraction.globals)?,
        stage_table(&functions_out, &extraction.functions)?,
    ];
    commit(staged)?;

    info!(
        path = %globals_out.display(),
        entries = extraction.globals.len(),
        "wrote global variable types"
    );
    info!(
        path = %functions_out.display(),
        entries = extraction.functions.len(),
        overloads = extraction.functions.values().map(Vec::len).sum::<usize>(),
        "wrote function signatures"
    );

    Ok(0)
}

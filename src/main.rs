use std::process;

use clap::Parser;

use sema_extract::cli::Args;
use sema_extract::logging::init_tracing;

fn main() {
    let args = Args::parse();
    init_tracing(args.debug);
    match sema_extract::run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}

//! # Dexplore CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, and this file only runs
//! it on a single-threaded runtime and handles process termination.
//!
//! - `cli/setup.rs`: clap argument definitions
//! - `cli/commands.rs`: context wiring, logging, dispatch to `DexApi`, the shell
//! - `cli/render.rs`: turns `CmdResult`s into terminal text

mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! `notekeeper` command-line host.
//!
//! Note commands go through the same request path as any other host:
//! route resolution, access guard, then the note service.

mod args;
mod commands;

use anyhow::Result;
use args::Args;
use clap::Parser;

fn main() -> Result<()> {
    let args = Args::parse();
    commands::run(args)
}

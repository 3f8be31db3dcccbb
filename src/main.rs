use anyhow::{Context, Result};
use clap::Parser;
use ext_icon_gen::icon_gen;
use std::path::PathBuf;

/// Render the fixed browser-extension icon set (icon16/icon48/icon128)
/// next to the executable. Takes no arguments.
#[derive(Debug, Parser)]
#[clap(
    name = "ext-icon-gen",
    about = "Generate the browser-extension PNG icon set",
    version
)]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();

    icon_gen::generate_icons(&program_dir()?)
}

/// Icons land in the same directory as the program itself.
fn program_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let dir = exe
        .parent()
        .context("Executable path has no parent directory")?;
    Ok(dir.to_path_buf())
}

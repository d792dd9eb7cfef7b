//! The `cleave extract` workflow.

use std::fs;

use anyhow::{Context, Result};

use cleave_extract::{isolate_main_source, GuestLanguage};

/// Print a program's isolated main source to stdout.
pub fn run(source_path: &str, language: &str) -> Result<()> {
    let language = GuestLanguage::parse(language).map_err(|e| anyhow::anyhow!("{e}"))?;
    let source =
        fs::read_to_string(source_path).with_context(|| format!("reading {source_path}"))?;

    println!("{}", isolate_main_source(language, &source));
    Ok(())
}

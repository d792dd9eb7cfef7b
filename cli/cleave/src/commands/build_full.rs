//! The `cleave build-full` workflow.

use anyhow::{Context, Result};

use cleave_codegen::{full_image, DirectorySink};

/// Generate the unpartitioned baseline unit for a program.
pub fn run(manifest_path: &str, out: &str) -> Result<()> {
    let (manifest, source, language) = super::load_program(manifest_path)?;

    let mut sink = DirectorySink::create(out).with_context(|| format!("creating {out}"))?;
    let report = full_image(&source, language, &mut sink)
        .with_context(|| format!("building full image for {}", manifest.program.source))?;

    println!(
        "Built full image for '{}' → {}",
        manifest.program.source,
        sink.root().display()
    );
    for name in &report.artifacts {
        println!("  {name}");
    }

    Ok(())
}

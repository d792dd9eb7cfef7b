//! The `cleave partition` workflow.

use anyhow::{Context, Result};
use tracing::info;

use cleave_codegen::{partition, DirectorySink};

/// Run the full partitioning pipeline and write artifacts under `out`.
pub fn run(manifest_path: &str, out: &str) -> Result<()> {
    let (manifest, source, language) = super::load_program(manifest_path)?;

    let registry = manifest.into_registry().map_err(|e| anyhow::anyhow!("{e}"))?;
    info!(
        functions = registry.seen().len(),
        language = %language,
        "loaded classification"
    );
    let mut sink = DirectorySink::create(out).with_context(|| format!("creating {out}"))?;

    let report = partition(&registry, &source, language, &mut sink)
        .with_context(|| format!("partitioning {}", manifest.program.source))?;

    println!(
        "Partitioned '{}' ({} ecalls, {} ocalls) → {}",
        manifest.program.source,
        report.ecalls,
        report.ocalls,
        sink.root().display()
    );
    for name in &report.artifacts {
        println!("  {name}");
    }

    Ok(())
}

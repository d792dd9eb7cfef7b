//! CLI command implementations.

pub mod build_full;
pub mod extract;
pub mod partition;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cleave_core::ClassificationManifest;
use cleave_extract::GuestLanguage;

/// Load a manifest and the guest source it points at. The source path is
/// resolved relative to the manifest's own directory.
pub fn load_program(manifest_path: &str) -> Result<(ClassificationManifest, String, GuestLanguage)> {
    let manifest_path = Path::new(manifest_path);
    let manifest = ClassificationManifest::load(manifest_path)
        .with_context(|| format!("loading {}", manifest_path.display()))?;

    let base = manifest_path.parent().unwrap_or(Path::new("."));
    let source_path: PathBuf = base.join(&manifest.program.source);
    let source = fs::read_to_string(&source_path)
        .with_context(|| format!("reading {}", source_path.display()))?;

    let language = GuestLanguage::parse(&manifest.program.language)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok((manifest, source, language))
}

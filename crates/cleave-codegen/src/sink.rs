//! Artifact output.
//!
//! Generation produces named text artifacts; where they land is the
//! sink's concern. The pipeline writes through [`ArtifactSink`] so tests
//! can capture output in memory while the command line writes a directory.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{CodegenError, Result};

/// One generated file: a name relative to the output root and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub contents: String,
}

impl Artifact {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// Destination for generated artifacts.
pub trait ArtifactSink {
    fn write(&mut self, artifact: &Artifact) -> Result<()>;
}

/// Sink that persists each artifact into a directory.
///
/// Writes go through a temporary file in the same directory and are moved
/// into place, so a failed generation never leaves a truncated artifact
/// behind.
#[derive(Debug)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn create(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactSink for DirectorySink {
    fn write(&mut self, artifact: &Artifact) -> Result<()> {
        let write_err = |source| CodegenError::ArtifactWrite {
            name: artifact.name.clone(),
            source,
        };
        let mut file = NamedTempFile::new_in(&self.root).map_err(write_err)?;
        file.write_all(artifact.contents.as_bytes())
            .map_err(write_err)?;
        file.persist(self.root.join(&artifact.name))
            .map_err(|err| write_err(err.error))?;
        Ok(())
    }
}

/// Sink that keeps artifacts in memory, in write order.
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Vec<Artifact>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn get(&self, name: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.name == name)
    }
}

impl ArtifactSink for MemorySink {
    fn write(&mut self, artifact: &Artifact) -> Result<()> {
        self.artifacts.push(artifact.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_sink_persists_contents() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::create(dir.path().join("out")).unwrap();

        sink.write(&Artifact::new("a.txt", "hello")).unwrap();
        sink.write(&Artifact::new("a.txt", "replaced")).unwrap();

        let text = fs::read_to_string(dir.path().join("out/a.txt")).unwrap();
        assert_eq!(text, "replaced");
    }

    #[test]
    fn memory_sink_preserves_write_order() {
        let mut sink = MemorySink::new();
        sink.write(&Artifact::new("b", "2")).unwrap();
        sink.write(&Artifact::new("a", "1")).unwrap();

        let names: Vec<_> = sink.artifacts().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(sink.get("a").unwrap().contents, "1");
        assert!(sink.get("missing").is_none());
    }
}

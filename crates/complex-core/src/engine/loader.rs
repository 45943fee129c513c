use super::error::EngineError;
use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::MolecularFile;
use crate::core::models::system::MolecularSystem;
use std::path::Path;
use tracing::debug;

/// Source of fragment structures for the assembler.
pub trait FragmentLoader {
    /// Loads the fragment stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::FragmentLoad`] if the fragment cannot be read.
    fn load(&self, path: &Path) -> Result<MolecularSystem, EngineError>;
}

impl<F> FragmentLoader for F
where
    F: Fn(&Path) -> Result<MolecularSystem, EngineError>,
{
    fn load(&self, path: &Path) -> Result<MolecularSystem, EngineError> {
        self(path)
    }
}

/// Reads fragments from PDB files, keeping only the first model.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdbLoader;

impl FragmentLoader for PdbLoader {
    fn load(&self, path: &Path) -> Result<MolecularSystem, EngineError> {
        debug!(path = %path.display(), "Reading fragment.");
        PdbFile::read_from_path(path)
            .map(|(system, _)| system)
            .map_err(|e| EngineError::FragmentLoad {
                path: path.to_path_buf(),
                source: Box::new(e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FRAGMENT: &str = "\
ATOM      1  CA  ALA A   1       1.000   2.000   3.000  1.00  0.00           C
ATOM      2  CA  GLY B   1       4.000   5.000   6.000  1.00  0.00           C
END
";

    #[test]
    fn pdb_loader_reads_fragment_files() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(FRAGMENT.as_bytes()).unwrap();

        let system = PdbLoader.load(file.path()).unwrap();

        assert_eq!(system.chain_labels(), vec!["A".to_string(), "B".to_string()]);
        assert_eq!(system.atom_count(), 2);
    }

    #[test]
    fn pdb_loader_reports_the_failing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.pdb");

        match PdbLoader.load(&missing) {
            Err(EngineError::FragmentLoad { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected a load error, got {other:?}"),
        }
    }

    #[test]
    fn closures_act_as_loaders() {
        let loader = |_: &Path| Ok::<_, EngineError>(MolecularSystem::new());
        let system = loader.load(Path::new("anything.pdb")).unwrap();
        assert_eq!(system.chain_count(), 0);
    }
}

use crate::error::{CliError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Lists the fragment files in `dir` whose extension matches one of `extensions`,
/// ignoring case. The result is sorted by file name.
pub fn discover_fragments(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CliError::Argument(format!(
            "Input path '{}' is not a directory.",
            dir.display()
        )));
    }

    let mut fragments = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));
        if matches {
            fragments.push(path);
        } else {
            debug!("Ignoring non-fragment file {:?}", path);
        }
    }

    fragments.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    info!("Discovered {} fragment file(s) in {:?}", fragments.len(), dir);
    Ok(fragments)
}

/// Picks the seed fragment and returns it with the remaining worklist.
///
/// An explicit seed is removed from the worklist if it is one of the discovered fragments.
/// Without one, the first fragment becomes the seed.
pub fn select_seed(
    mut fragments: Vec<PathBuf>,
    explicit: Option<&Path>,
) -> Result<(PathBuf, Vec<PathBuf>)> {
    match explicit {
        Some(seed) => {
            if !seed.is_file() {
                return Err(CliError::Argument(format!(
                    "Seed file '{}' does not exist.",
                    seed.display()
                )));
            }
            let seed_key = canonical(seed);
            fragments.retain(|path| canonical(path) != seed_key);
            Ok((seed.to_path_buf(), fragments))
        }
        None => {
            if fragments.is_empty() {
                return Err(CliError::Argument(
                    "No fragment files found; at least one is needed to seed the assembly."
                        .to_string(),
                ));
            }
            let seed = fragments.remove(0);
            Ok((seed, fragments))
        }
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

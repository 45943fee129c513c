use crate::cli::InspectArgs;
use crate::error::{CliError, Result};
use crate::utils::fragments::discover_fragments;
use complexbuilder::{
    core::io::{pdb::PdbFile, traits::MolecularFile},
    engine::key_atoms::{ChainProfile, profile_chains},
};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn run(args: InspectArgs) -> Result<()> {
    let files = if args.input.is_dir() {
        discover_fragments(&args.input, &args.extensions)?
    } else if args.input.is_file() {
        vec![args.input.clone()]
    } else {
        return Err(CliError::Argument(format!(
            "Input path '{}' does not exist.",
            args.input.display()
        )));
    };

    info!("Inspecting {} file(s).", files.len());
    let mut unreadable = 0usize;
    for path in &files {
        match inspect_file(path) {
            Ok(listing) => print!("{}", listing),
            Err(e) => {
                unreadable += 1;
                warn!("Could not read {:?}: {}", path, e);
                println!("{}\n  unreadable: {}\n", path.display(), e);
            }
        }
    }

    if unreadable > 0 {
        println!("{} of {} file(s) could not be read.", unreadable, files.len());
    }
    Ok(())
}

fn inspect_file(path: &Path) -> Result<String> {
    let (system, _) = PdbFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: PathBuf::from(path),
        source: e.into(),
    })?;
    let profiles = profile_chains(&system);
    Ok(render(path, &profiles))
}

fn render(path: &Path, profiles: &[ChainProfile]) -> String {
    let mut out = String::new();
    let note = if profiles.len() == 2 {
        ""
    } else {
        "  (not a pairwise fragment)"
    };
    let _ = writeln!(out, "{}{}", path.display(), note);
    for profile in profiles {
        let kind = profile
            .kind
            .map(|k| k.to_string())
            .unwrap_or_else(|| "UNKNOWN".to_string());
        let _ = writeln!(
            out,
            "  chain {:<2} {:<8} {:>6} residue(s) {:>6} key atom(s)",
            profile.label, kind, profile.residues, profile.key_atoms
        );
    }
    out.push('\n');
    out
}

use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::Atom;
use crate::core::models::residue::Residue;
use crate::core::models::system::MolecularSystem;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

const DEFAULT_CHAIN_ID: &str = "A";
const MIN_COORDINATE_RECORD_LENGTH: usize = 54;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbMetadata {
    pub header_lines: Vec<String>,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

fn parse_float(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

fn element_from_name(atom_name: &str) -> String {
    atom_name
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
        .unwrap_or_default()
}

pub struct PdbFile;

impl MolecularFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error> {
        let mut system = MolecularSystem::new();
        let mut metadata = PdbMetadata::default();
        let mut atom_count = 0usize;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let record_type = slice_and_trim(&line, 0, 6);
            match record_type {
                "ATOM" | "HETATM" => {
                    if line.len() < MIN_COORDINATE_RECORD_LENGTH {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::LineTooShort,
                        });
                    }

                    let name_str = slice_and_trim(&line, 12, 16);
                    let res_name_str = slice_and_trim(&line, 17, 20);
                    let chain_id_str = slice_and_trim(&line, 20, 22);
                    let res_seq_str = slice_and_trim(&line, 22, 26);
                    let insertion_code = line.get(26..27).and_then(|s| s.chars().next());

                    if name_str.is_empty() {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::MissingRequiredField {
                                columns: "13-16".into(),
                            },
                        });
                    }
                    let res_seq: isize = res_seq_str.parse().map_err(|_| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::InvalidInt {
                            columns: "23-26".into(),
                            value: res_seq_str.into(),
                        },
                    })?;
                    let x = parse_float(&line, line_num, 30, 38)?;
                    let y = parse_float(&line, line_num, 38, 46)?;
                    let z = parse_float(&line, line_num, 46, 54)?;

                    atom_count += 1;
                    let serial = slice_and_trim(&line, 6, 11)
                        .parse()
                        .unwrap_or(atom_count);
                    let occupancy = slice_and_trim(&line, 54, 60).parse().unwrap_or(1.0);
                    let b_factor = slice_and_trim(&line, 60, 66).parse().unwrap_or(0.0);
                    let element = match slice_and_trim(&line, 76, 78) {
                        "" => element_from_name(name_str),
                        symbol => symbol.to_string(),
                    };

                    let chain_label = if chain_id_str.is_empty() {
                        DEFAULT_CHAIN_ID
                    } else {
                        chain_id_str
                    };
                    let chain_id = system.add_chain(chain_label);
                    let residue_id = system
                        .add_residue(
                            chain_id,
                            res_seq,
                            insertion_code.filter(|c| !c.is_whitespace()),
                            res_name_str,
                            record_type == "HETATM",
                        )
                        .ok_or_else(|| {
                            PdbError::MissingRecord(format!("chain '{}'", chain_label))
                        })?;

                    let mut atom = Atom::new(name_str, residue_id, Point3::new(x, y, z));
                    atom.serial = serial;
                    atom.occupancy = occupancy;
                    atom.b_factor = b_factor;
                    atom.element = element;
                    system.add_atom_to_residue(residue_id, atom);
                }
                "ENDMDL" | "END" => break,
                "MODEL" | "TER" | "ANISOU" | "SIGATM" | "SIGUIJ" | "CONECT" | "MASTER" | "" => {}
                _ => {
                    if atom_count == 0 {
                        metadata.header_lines.push(line.clone());
                    }
                }
            }
        }

        if atom_count == 0 {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }
        Ok((system, metadata))
    }

    fn write_to(
        system: &MolecularSystem,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        for line in &metadata.header_lines {
            writeln!(writer, "{}", line)?;
        }

        let mut serial = 1usize;
        for (_, chain) in system.chains_iter() {
            let mut last_polymer: Option<&Residue> = None;
            for &res_id in chain.residues() {
                let Some(residue) = system.residue(res_id) else {
                    continue;
                };
                if !residue.is_hetero {
                    last_polymer = Some(residue);
                }
                for &atom_id in residue.atoms() {
                    let Some(atom) = system.atom(atom_id) else {
                        continue;
                    };
                    write_atom_record(writer, serial, atom, residue, &chain.id)?;
                    serial += 1;
                }
            }
            if let Some(residue) = last_polymer {
                writeln!(
                    writer,
                    "TER   {:>5}      {:>3}{:>2}{:>4}{:1}",
                    serial % 100_000,
                    residue_name_field(residue),
                    chain.id,
                    residue.number % 10_000,
                    residue.insertion_code.unwrap_or(' ')
                )?;
                serial += 1;
            }
        }

        writeln!(writer, "END")?;
        Ok(())
    }

    fn write_system_to(
        system: &MolecularSystem,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let default_metadata = PdbMetadata {
            header_lines: vec!["REMARK   1 GENERATED BY COMPLEXBUILDER".to_string()],
        };
        Self::write_to(system, &default_metadata, writer)
    }
}

fn residue_name_field(residue: &Residue) -> &str {
    residue.short_name()
}

fn write_atom_record(
    writer: &mut impl Write,
    serial: usize,
    atom: &Atom,
    residue: &Residue,
    chain_id: &str,
) -> Result<(), PdbError> {
    let record_type = if residue.is_hetero { "HETATM" } else { "ATOM" };
    let atom_name = if atom.name.len() >= 4 {
        atom.name.chars().take(4).collect::<String>()
    } else {
        format!(" {:<3}", atom.name)
    };
    let element = if atom.element.is_empty() {
        element_from_name(&atom.name)
    } else {
        atom.element.to_uppercase()
    };

    writeln!(
        writer,
        "{:<6}{:>5} {:<4} {:>3}{:>2}{:>4}{:1}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
        record_type,
        serial % 100_000,
        atom_name,
        residue_name_field(residue),
        chain_id,
        residue.number % 10_000,
        residue.insertion_code.unwrap_or(' '),
        atom.position.x,
        atom.position.y,
        atom.position.z,
        atom.occupancy,
        atom.b_factor,
        element
    )?;
    Ok(())
}

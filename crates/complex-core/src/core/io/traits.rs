use crate::core::models::system::MolecularSystem;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// A structure file format that fragments are read from and complexes are written to.
///
/// Only `read_from` and the two writers are format specific; the path-based helpers open
/// and buffer the file and then delegate to them.
pub trait MolecularFile {
    /// Records of the file that carry no coordinates but should survive a round trip.
    type Metadata;

    type Error: Error + From<io::Error>;

    /// Parses the first model of the stream into a system.
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate record is malformed, the stream holds no atoms, or
    /// reading fails.
    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error>;

    /// Serializes `system`, preceded by the records kept in `metadata`.
    fn write_to(
        system: &MolecularSystem,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Serializes `system` with the format's default header.
    fn write_system_to(
        system: &MolecularSystem,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    fn read_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader)
    }

    /// Creates (or truncates) the file at `path` and writes `system` into it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or any write fails, including the
    /// final flush.
    fn write_system_to_path<P: AsRef<Path>>(
        system: &MolecularSystem,
        path: P,
    ) -> Result<(), Self::Error> {
        let mut writer = BufWriter::new(File::create(path)?);
        Self::write_system_to(system, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

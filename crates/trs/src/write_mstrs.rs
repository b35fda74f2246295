#![forbid(unsafe_code)]

use std::fmt;
use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use log::debug;
use log::warn;

use crate::Trs;
use crate::TrsError;

/// Formats a [Trs] in the MSTRS format:
///
/// ```text
/// (SIG
///   (f -> a)
///   (g a -> a)
/// )
/// (RULES
///   f -> g(f)
/// )
/// ```
///
/// Signature entries and rules keep their order in the TRS. There is no
/// newline after the final parenthesis.
pub struct MstrsFormatter<'a> {
    trs: &'a Trs,
}

impl MstrsFormatter<'_> {
    pub fn new(trs: &Trs) -> MstrsFormatter<'_> {
        MstrsFormatter { trs }
    }
}

impl fmt::Display for MstrsFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "(SIG")?;
        for symbol in self.trs.signature().iter() {
            writeln!(f, "  ({symbol})")?;
        }
        writeln!(f, ")")?;

        writeln!(f, "(RULES")?;
        for rule in self.trs.rules() {
            writeln!(f, "  {rule}")?;
        }
        write!(f, ")")
    }
}

/// Returns the MSTRS text of the given TRS.
pub fn render_mstrs(trs: &Trs) -> String {
    MstrsFormatter::new(trs).to_string()
}

/// Writes the MSTRS text of the given TRS to the writer, see [MstrsFormatter].
pub fn write_mstrs(writer: impl Write, trs: &Trs) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    write!(writer, "{}", MstrsFormatter::new(trs))?;
    writer.flush()
}

/// Writes the MSTRS text of the given TRS to a new file at `path`.
///
/// Fails with [TrsError::OutputAlreadyExists] when `path` already exists, in
/// which case that file is left untouched. The file is opened with
/// `create_new`, so the existence check and the creation cannot be
/// interleaved with another process creating the same file. When writing
/// fails halfway the incomplete file is removed again.
pub fn write_mstrs_file(path: &Path, trs: &Trs) -> Result<(), TrsError> {
    write_new_file(path, |file| write_mstrs(file, trs))?;

    debug!("Wrote TRS in .mstrs format to {}", path.display());
    Ok(())
}

/// Creates the file at `path`, which must not exist yet, and fills it using `write`.
fn write_new_file(path: &Path, write: impl FnOnce(&mut File) -> io::Result<()>) -> Result<(), TrsError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => TrsError::OutputAlreadyExists(path.to_path_buf()),
            _ => TrsError::io(path, e),
        })?;

    if let Err(error) = write(&mut file) {
        drop(file);
        if let Err(remove_error) = fs::remove_file(path) {
            warn!("Failed to remove incomplete file {}: {remove_error}", path.display());
        }
        return Err(TrsError::io(path, error));
    }

    Ok(())
}

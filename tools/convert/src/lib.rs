//! Converts single files or whole directories of term rewriting systems in
//! the XML format into the MSTRS format.
//!
//! In directory mode every entry is converted independently: a failure is
//! recorded in the [BatchReport] and the remaining entries are still
//! converted.

#![forbid(unsafe_code)]

use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use clap::ValueEnum;
use log::debug;
use log::info;
use log::warn;
use rayon::prelude::*;

use trsconv_trs::ReaderOptions;
use trsconv_trs::TrsError;
use trsconv_trs::read_trs;
use trsconv_trs::write_mstrs_file;

/// The extension of the input files that are converted in directory mode.
pub const XML_EXTENSION: &str = "xml";

/// The extension of the files written in directory mode.
pub const MSTRS_EXTENSION: &str = "mstrs";

/// Selects whether the input and output are single files or directories.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConvertMode {
    /// Convert every .xml file directly inside the input directory.
    Dir,
    /// Convert a single file.
    File,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ConvertOptions {
    pub reader: ReaderOptions,

    /// Convert the entries of a directory on the rayon thread pool.
    pub parallel: bool,
}

/// An input file that could not be converted.
#[derive(Debug)]
pub struct BatchFailure {
    pub input: PathBuf,
    pub error: TrsError,
}

impl fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.input.display(), self.error)
    }
}

/// The outcome of a conversion. In parallel mode the order of both lists is
/// unspecified, otherwise it is the order of the directory listing.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// The written output files.
    pub converted: Vec<PathBuf>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Converts `input` into `output` according to the given mode.
///
/// In file mode any failure is returned. In directory mode only failures to
/// list `input` or to create `output` are returned; failures of individual
/// entries are collected in the report instead.
pub fn convert(input: &Path, output: &Path, mode: ConvertMode, options: &ConvertOptions) -> Result<BatchReport, TrsError> {
    match mode {
        ConvertMode::File => {
            convert_file(input, output, options.reader)?;
            Ok(BatchReport {
                converted: vec![output.to_path_buf()],
                failures: Vec::new(),
            })
        }
        ConvertMode::Dir => convert_directory(input, output, options),
    }
}

/// Reads the XML file `input` and writes it in the MSTRS format to the new file `output`.
pub fn convert_file(input: &Path, output: &Path, options: ReaderOptions) -> Result<(), TrsError> {
    let trs = read_trs(input, options)?;
    write_mstrs_file(output, &trs)?;

    info!("Converted {} to {}", input.display(), output.display());
    Ok(())
}

/// Converts every `.xml` file directly inside `input` to a `.mstrs` file with
/// the same stem in `output`, which is created when it does not exist.
/// Subdirectories are not visited.
pub fn convert_directory(input: &Path, output: &Path, options: &ConvertOptions) -> Result<BatchReport, TrsError> {
    if !output.is_dir() {
        fs::create_dir(output).map_err(|e| TrsError::io(output, e))?;
        debug!("Created output directory {}", output.display());
    }

    let mut report = BatchReport::default();

    let entries = fs::read_dir(input)
        .map_err(|e| TrsError::io(input, e))?
        .map(|entry| entry.map(|entry| entry.path()));
    let jobs = collect_jobs(input, output, entries, &mut report.failures);
    info!("Converting {} files from {}", jobs.len(), input.display());

    let convert_job = |(input, output): (PathBuf, PathBuf)| {
        let result = convert_file(&input, &output, options.reader);
        (input, output, result)
    };

    let results: Vec<_> = if options.parallel {
        jobs.into_par_iter().map(convert_job).collect()
    } else {
        jobs.into_iter().map(convert_job).collect()
    };

    for (input, output, result) in results {
        match result {
            Ok(()) => report.converted.push(output),
            Err(error) => {
                warn!("Failed to convert {}: {error}", input.display());
                report.failures.push(BatchFailure { input, error });
            }
        }
    }

    info!(
        "Converted {} files, {} failed",
        report.converted.len(),
        report.failures.len()
    );
    Ok(report)
}

/// Returns the pairs of input and output files for the given entries of the
/// directory `input`, in the order of the directory listing. Entries that
/// cannot be read are recorded as failures.
fn collect_jobs(
    input: &Path,
    output: &Path,
    entries: impl IntoIterator<Item = io::Result<PathBuf>>,
    failures: &mut Vec<BatchFailure>,
) -> Vec<(PathBuf, PathBuf)> {
    let mut jobs = Vec::new();

    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(error) => {
                warn!("Failed to read an entry of {}: {error}", input.display());
                failures.push(BatchFailure {
                    input: input.to_path_buf(),
                    error: TrsError::io(input, error),
                });
                continue;
            }
        };

        let Some(destination) = path.file_name().and_then(destination_name) else {
            debug!("Skipping {}", path.display());
            continue;
        };

        if path.is_dir() {
            debug!("Skipping directory {}", path.display());
            continue;
        }

        jobs.push((path, output.join(destination)));
    }

    jobs
}

/// Returns the name of the output file for an input file name ending in
/// `.xml`, in which that suffix is replaced by `.mstrs`. A file named `.xml`
/// itself becomes `.xml.mstrs`.
fn destination_name(file_name: &OsStr) -> Option<String> {
    let name = file_name.to_str()?;
    let stem = name.strip_suffix(&format!(".{XML_EXTENSION}"))?;

    let stem = if stem.is_empty() { name } else { stem };
    Some(format!("{stem}.{MSTRS_EXTENSION}"))
}

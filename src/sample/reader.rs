use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use super::arff;
use super::instance::*;
use super::instance_set::InstanceSet;
use super::source_pool::SourcePool;
use crate::error::{Result, TransferError};


/// A struct that returns [`InstanceSet`].
/// Using this struct, one can read a CSV/ARFF format file to
/// [`InstanceSet`]. The format is chosen by the file extension.
/// # Example
/// The following code is a simple example to read a CSV file.
/// ```no_run
/// use twostage_transfer::SampleReader;
/// let filename = "/path/to/csv/file.csv";
/// let sample = SampleReader::new()
///     .file(filename)
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct SampleReader {
    file: Option<PathBuf>,
    has_header: bool,
    target: Option<String>,
    weight: Option<String>,
}


impl SampleReader {
    /// Construct a new instance of `SampleReader`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }


    /// Set the file name.
    pub fn file<P: AsRef<Path>>(mut self, file: P) -> Self {
        self.file = Some(file.as_ref().to_path_buf());
        self
    }


    /// Set the flag whether the CSV file has the header row or not.
    /// Default is `false.` ARFF files always carry their header.
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }


    /// Set the column name that is used for target label.
    /// If not set, the last column is the label.
    pub fn target_feature<S: Into<String>>(mut self, column: S) -> Self {
        self.target = Some(column.into());
        self
    }


    /// Set the column name that holds the instance weights.
    /// If not set, every instance has weight `1.0`.
    pub fn weight_feature<S: Into<String>>(mut self, column: S) -> Self {
        self.weight = Some(column.into());
        self
    }


    /// Reads the file based on the arguments.
    /// If the extension is `.arff`, the file is read as ARFF,
    /// otherwise as CSV.
    pub fn read(&self) -> Result<InstanceSet> {
        let file = self.file.as_ref()
            .ok_or_else(|| TransferError::InvalidConfiguration(
                "the file name for csv/arff is not set".into()
            ))?;
        let reader = BufReader::new(File::open(file)?);

        let is_arff = file.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("arff"));
        if is_arff {
            let table = arff::read_table(reader)?;
            self.assemble(table)
        } else {
            self.read_from(reader)
        }
    }


    /// Read a CSV table from [`BufReader`].
    pub fn read_from<R: Read>(&self, reader: BufReader<R>)
        -> Result<InstanceSet>
    {
        let table = read_csv_table(reader, self.has_header)?;
        self.assemble(table)
    }


    fn assemble(&self, table: Table) -> Result<InstanceSet> {
        let Table { names, rows } = table;
        let n_column = names.len();

        let label_col = match &self.target {
            Some(target) => column_index(&names, target)?,
            None => n_column.checked_sub(1)
                .ok_or_else(|| TransferError::EmptyInput(
                    "the table has no column".into()
                ))?,
        };
        let weight_col = self.weight.as_ref()
            .map(|name| column_index(&names, name))
            .transpose()?;

        let instances = rows.into_iter()
            .map(|(line, row)| {
                let label = to_label(row[label_col], line)?;
                let weight = weight_col.map(|c| row[c]).unwrap_or(1f64);
                let x = row.iter()
                    .enumerate()
                    .filter(|&(c, _)| c != label_col && Some(c) != weight_col)
                    .map(|(_, &x)| x)
                    .collect::<Vec<f64>>();
                Instance::weighted(x, label, weight)
                    .map_err(|e| TransferError::Parse {
                        line,
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        InstanceSet::new(instances)
    }
}


/// Read every CSV/ARFF file in `dir` as one source.
/// The source id is the file stem and the sources are
/// ordered by file name, so the pool order does not depend on
/// the order in which the file system lists the directory.
pub fn read_pool<P: AsRef<Path>>(dir: P, reader: &SampleReader)
    -> Result<SourcePool>
{
    let mut files = fs::read_dir(dir.as_ref())?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    files.retain(|path| {
        path.is_file() && path.extension().is_some_and(|ext| {
            ext.eq_ignore_ascii_case("csv") || ext.eq_ignore_ascii_case("arff")
        })
    });
    files.sort();

    let mut pool = SourcePool::new();
    for path in files {
        let id = path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let sample = reader.clone().file(&path).read()
            .map_err(|e| e.in_source(id.as_str()))?;
        pool.push(id, sample)?;
    }
    Ok(pool)
}


/// A parsed table: column names and `(line number, row)` pairs.
pub(super) struct Table {
    pub(super) names: Vec<String>,
    pub(super) rows: Vec<(usize, Vec<f64>)>,
}


fn read_csv_table<R: Read>(reader: BufReader<R>, has_header: bool)
    -> Result<Table>
{
    let mut names: Vec<String> = Vec::new();
    let mut rows = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        if line.trim().is_empty() { continue; }

        if has_header && names.is_empty() {
            names = line.split(',')
                .map(|name| name.trim().to_string())
                .collect();
            continue;
        }

        let row = line.split(',')
            .map(|x| parse_value(x, line_no))
            .collect::<Result<Vec<f64>>>()?;

        // If the header does not exist,
        // construct a dummy header.
        if names.is_empty() {
            names = (1..=row.len())
                .map(|k| format!("Feat. [{k}]"))
                .collect();
        }
        if row.len() != names.len() {
            return Err(TransferError::Parse {
                line: line_no,
                reason: format!(
                    "expected {} columns, got {}", names.len(), row.len()
                ),
            });
        }
        rows.push((line_no, row));
    }

    Ok(Table { names, rows })
}


fn column_index(names: &[String], name: &str) -> Result<usize> {
    names.iter()
        .position(|n| n == name)
        .ok_or_else(|| TransferError::InvalidInput(
            format!("the column \"{name}\" does not exist")
        ))
}


pub(super) fn parse_value(word: &str, line: usize) -> Result<f64> {
    let word = word.trim();
    word.parse::<f64>()
        .map_err(|_| TransferError::Parse {
            line,
            reason: format!("non-numerical value `{word}`"),
        })
}


fn to_label(y: f64, line: usize) -> Result<Label> {
    if !y.is_finite() || y.trunc() != y {
        return Err(TransferError::Parse {
            line,
            reason: format!("label `{y}` is not an integer"),
        });
    }
    // `i64::MAX as f64` rounds up to 2^63, which does not fit.
    if y < Label::MIN as f64 || y >= Label::MAX as f64 {
        return Err(TransferError::Parse {
            line,
            reason: format!("label `{y}` is out of range"),
        });
    }
    Ok(y as Label)
}

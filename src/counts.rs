// Sparse triplet count files -> dense, validated count tables.
//
// Both `.ndt` and `.nwt` share one layout: two dimension lines, a
// descriptive line that is always thrown away, then `i j count` triplets.
// The triplets are assigned into a zeroed dense matrix, so a repeated cell
// keeps the last value seen. Repeats are counted and logged but never summed.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use ndarray::Array2;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{HcaError, Result};
use crate::paths::{DataFiles, FitFiles};
use crate::table::{range_labels, CountTable, Label, Table};
use crate::vocab::{read_doc_ids, read_vocabulary, DocIdSource};

/// How the two indices of a triplet map onto the stored matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripletLayout {
    /// `row col count`, stored as-is.
    RowMajor,
    /// `col row count`, stored transposed (`.nwt` lists word then topic,
    /// the table is topic by word).
    Transposed,
}

/// Dimensions declared by a count file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountHeader {
    /// First header line (documents for `.ndt`, words for `.nwt`).
    pub outer: usize,
    /// Second header line (topics in both files).
    pub inner: usize,
}

/// A dense count matrix scattered from one triplet file.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseCounts {
    pub header: CountHeader,
    pub values: Array2<u64>,
    /// Triplets that overwrote an earlier triplet for the same cell.
    pub duplicates: usize,
}

/// Line-oriented reader over one count file. The file handle is released
/// when the reader is dropped, on success or on the first error.
struct CountFileReader {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

impl CountFileReader {
    fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| HcaError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        match self.lines.next() {
            None => Ok(None),
            Some(Ok(line)) => {
                self.line_no += 1;
                Ok(Some(line))
            }
            Some(Err(e)) => Err(HcaError::io(&self.path, e)),
        }
    }

    fn dimension(&mut self, field: &'static str) -> Result<usize> {
        let line = self.next_line()?.ok_or_else(|| HcaError::MissingHeader {
            path: self.path.clone(),
            field,
        })?;
        line.trim().parse().map_err(|_| HcaError::InvalidHeader {
            path: self.path.clone(),
            field,
            value: line,
        })
    }

    /// Read the two dimension lines and discard the descriptive third line.
    fn header(&mut self, outer: &'static str, inner: &'static str) -> Result<CountHeader> {
        let outer = self.dimension(outer)?;
        let inner = self.dimension(inner)?;
        // The third line may be absent when the body is empty.
        self.next_line()?;
        Ok(CountHeader { outer, inner })
    }

    /// Scatter the remaining triplets into a zeroed matrix, then reject
    /// any cell left negative.
    fn scatter(mut self, header: CountHeader, layout: TripletLayout) -> Result<DenseCounts> {
        let shape = match layout {
            TripletLayout::RowMajor => (header.outer, header.inner),
            TripletLayout::Transposed => (header.inner, header.outer),
        };
        if allocatable_cells::<i64>(shape).is_none() {
            return Err(HcaError::ShapeTooLarge {
                path: self.path,
                rows: shape.0,
                cols: shape.1,
            });
        }
        let mut cells = Array2::<i64>::zeros(shape);
        let mut seen = HashSet::new();
        let mut duplicates = 0usize;

        while let Some(line) = self.next_line()? {
            let (a, b, count) = self.parse_triplet(&line)?;
            let (row, col) = match layout {
                TripletLayout::RowMajor => (a, b),
                TripletLayout::Transposed => (b, a),
            };
            let cell = cells.get_mut((row, col)).ok_or_else(|| HcaError::IndexOutOfRange {
                path: self.path.clone(),
                line: self.line_no,
                row,
                col,
                rows: shape.0,
                cols: shape.1,
            })?;
            *cell = count;
            if !seen.insert((row, col)) {
                duplicates += 1;
            }
        }

        if duplicates > 0 {
            warn!(
                path = %self.path.display(),
                duplicates,
                "Repeated triplets for the same cell, keeping the last value"
            );
        }

        if let Some(((row, col), &count)) = cells.indexed_iter().find(|&(_, &c)| c < 0) {
            return Err(HcaError::NegativeCount {
                path: self.path,
                row,
                col,
                count,
            });
        }

        debug!(
            path = %self.path.display(),
            rows = shape.0,
            cols = shape.1,
            nonzero_cells = seen.len(),
            "Read count file"
        );

        Ok(DenseCounts {
            header,
            values: cells.mapv(|c| c as u64),
            duplicates,
        })
    }

    fn parse_triplet(&self, line: &str) -> Result<(usize, usize, i64)> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(HcaError::malformed(
                &self.path,
                self.line_no,
                format!("expected 3 fields, found {}", fields.len()),
            ));
        }
        let index = |s: &str| -> Result<usize> {
            s.parse().map_err(|_| {
                HcaError::malformed(&self.path, self.line_no, format!("invalid index {s:?}"))
            })
        };
        let count = fields[2].parse().map_err(|_| {
            HcaError::malformed(
                &self.path,
                self.line_no,
                format!("invalid count {:?}", fields[2]),
            )
        })?;
        Ok((index(fields[0])?, index(fields[1])?, count))
    }
}

/// Number of cells in a `rows x cols` matrix of `T`, or `None` when ndarray
/// would refuse the shape: the product of non-zero axes, and its size in
/// bytes, must both fit in `isize`.
fn allocatable_cells<T>(shape: (usize, usize)) -> Option<usize> {
    let (rows, cols) = shape;
    let cells = [rows, cols]
        .into_iter()
        .filter(|&n| n != 0)
        .try_fold(1usize, |acc, n| acc.checked_mul(n))?;
    let bytes = cells.checked_mul(std::mem::size_of::<T>())?;
    if bytes > isize::MAX as usize {
        return None;
    }
    Some(rows * cols)
}

/// Read a `.ndt` file: header `D`, `T`; body `doc topic count`.
pub fn read_doc_topic(path: &Path) -> Result<DenseCounts> {
    let mut reader = CountFileReader::open(path)?;
    let header = reader.header("document count", "topic count")?;
    reader.scatter(header, TripletLayout::RowMajor)
}

/// Read a `.nwt` file: header `W`, `T`; body `word topic count`, stored
/// topic by word. `W` is checked against `vocab_size` before the body is read.
pub fn read_word_topic(path: &Path, vocab_size: usize) -> Result<DenseCounts> {
    let mut reader = CountFileReader::open(path)?;
    let header = reader.header("vocabulary size", "topic count")?;
    if header.outer != vocab_size {
        return Err(HcaError::DimensionMismatch {
            path: path.to_path_buf(),
            what: "vocabulary size",
            declared: header.outer,
            observed: vocab_size,
        });
    }
    reader.scatter(header, TripletLayout::Transposed)
}

/// What a count load observed beyond the tables themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountsReport {
    pub doc_id_source: DocIdSource,
    pub doc_topic_duplicates: usize,
    pub word_topic_duplicates: usize,
}

/// Doc-topic and topic-word count tables for one fit.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCounts {
    /// `D x T`, rows labeled by document id, columns by topic index.
    pub doc_topic: CountTable,
    /// `T x W`, rows labeled by topic index, columns by vocabulary token.
    pub topic_word: CountTable,
    pub report: CountsReport,
}

/// Load and validate both count tables for `fitstem` against the corpus at
/// `datastem`. Returns `(doc_topic_counts, topic_word_counts)`.
pub fn load_counts(
    datastem: impl AsRef<Path>,
    fitstem: impl AsRef<Path>,
) -> Result<(CountTable, CountTable)> {
    let loaded = load_counts_with_report(datastem, fitstem)?;
    Ok((loaded.doc_topic, loaded.topic_word))
}

/// Like [`load_counts`], also reporting where document ids came from and
/// how many triplets were repeated.
pub fn load_counts_with_report(
    datastem: impl AsRef<Path>,
    fitstem: impl AsRef<Path>,
) -> Result<LoadedCounts> {
    let data = DataFiles::from_stem(datastem);
    let fit = FitFiles::from_stem(fitstem);

    let vocab = read_vocabulary(&data.tokens)?;

    let ndt = read_doc_topic(&fit.doc_topic)?;
    let (doc_labels, doc_id_source) =
        read_doc_ids(&data.documents)?.resolve(ndt.header.outer, &fit.doc_topic)?;

    let nwt = read_word_topic(&fit.word_topic, vocab.len())?;
    if nwt.header.inner != ndt.header.inner {
        return Err(HcaError::DimensionMismatch {
            path: fit.word_topic,
            what: "topic count",
            declared: nwt.header.inner,
            observed: ndt.header.inner,
        });
    }

    let num_topics = ndt.header.inner;
    info!(
        documents = ndt.header.outer,
        topics = num_topics,
        words = vocab.len(),
        "Loaded topic assignment counts"
    );

    let report = CountsReport {
        doc_id_source,
        doc_topic_duplicates: ndt.duplicates,
        word_topic_duplicates: nwt.duplicates,
    };
    let doc_topic = Table::new(doc_labels, range_labels(num_topics), ndt.values);
    let topic_word = Table::new(
        range_labels(num_topics),
        vocab.into_iter().map(Label::Name).collect(),
        nwt.values,
    );

    Ok(LoadedCounts {
        doc_topic,
        topic_word,
        report,
    })
}

// Labeled dense tables, the in-memory shape of every loader output.
//
// A table is an `ndarray::Array2` plus one label per row and per column.
// Labels are either positional integers (topics, or documents when no
// document list exists) or names (vocabulary tokens, document identifiers).

use std::fmt;

use ndarray::{Array2, ArrayView1, Axis};

/// A row or column label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Index(usize),
    Name(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Index(i) => write!(f, "{i}"),
            Label::Name(name) => f.write_str(name),
        }
    }
}

impl From<usize> for Label {
    fn from(i: usize) -> Self {
        Label::Index(i)
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Label::Name(name.to_string())
    }
}

impl From<String> for Label {
    fn from(name: String) -> Self {
        Label::Name(name)
    }
}

/// Positional labels `0..n`.
pub fn range_labels(n: usize) -> Vec<Label> {
    (0..n).map(Label::Index).collect()
}

/// A dense matrix with row and column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    index: Vec<Label>,
    columns: Vec<Label>,
    values: Array2<T>,
}

/// Assignment counts (`ndt`, `ntw`).
pub type CountTable = Table<u64>;

/// Posterior probabilities (`theta`, `phi`).
pub type ProbabilityTable = Table<f64>;

impl<T> Table<T> {
    /// Build a table. Label counts must match the matrix shape.
    ///
    /// # Panics
    ///
    /// Panics if `index.len()` differs from the number of rows or
    /// `columns.len()` from the number of columns.
    pub fn new(index: Vec<Label>, columns: Vec<Label>, values: Array2<T>) -> Self {
        assert_eq!(index.len(), values.nrows(), "row label count must match rows");
        assert_eq!(columns.len(), values.ncols(), "column label count must match columns");
        Self {
            index,
            columns,
            values,
        }
    }

    /// Like [`Table::new`], but `None` when the label counts do not match the
    /// matrix shape.
    pub fn try_new(index: Vec<Label>, columns: Vec<Label>, values: Array2<T>) -> Option<Self> {
        (index.len() == values.nrows() && columns.len() == values.ncols()).then(|| Self {
            index,
            columns,
            values,
        })
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn index(&self) -> &[Label] {
        &self.index
    }

    pub fn columns(&self) -> &[Label] {
        &self.columns
    }

    pub fn values(&self) -> &Array2<T> {
        &self.values
    }

    /// Position of the row carrying `label`, if any.
    pub fn row_position(&self, label: &Label) -> Option<usize> {
        self.index.iter().position(|l| l == label)
    }

    /// Position of the column carrying `label`, if any.
    pub fn column_position(&self, label: &Label) -> Option<usize> {
        self.columns.iter().position(|l| l == label)
    }

    /// The row labeled `label`.
    pub fn row(&self, label: &Label) -> Option<ArrayView1<'_, T>> {
        self.row_position(label)
            .map(|i| self.values.index_axis(Axis(0), i))
    }

    /// The cell at (`row`, `column`) by label.
    pub fn get(&self, row: &Label, column: &Label) -> Option<&T> {
        let i = self.row_position(row)?;
        let j = self.column_position(column)?;
        self.values.get((i, j))
    }

    /// Same labels, new values of the same shape.
    pub fn map<U, F>(&self, f: F) -> Table<U>
    where
        F: FnMut(&T) -> U,
    {
        Table {
            index: self.index.clone(),
            columns: self.columns.clone(),
            values: self.values.map(f),
        }
    }
}

impl CountTable {
    /// Total number of assignments in the table.
    pub fn total(&self) -> u64 {
        self.values.sum()
    }
}

impl ProbabilityTable {
    /// Sum of each row.
    pub fn row_sums(&self) -> Vec<f64> {
        self.values.sum_axis(Axis(1)).to_vec()
    }

    /// Largest absolute distance of any row sum from 1. Zero for an empty table.
    pub fn max_row_sum_deviation(&self) -> f64 {
        self.row_sums()
            .into_iter()
            .map(|s| (s - 1.0).abs())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> CountTable {
        Table::new(
            vec!["a".into(), "b".into()],
            range_labels(3),
            array![[1, 0, 2], [0, 5, 0]],
        )
    }

    #[test]
    fn lookup_by_label() {
        let t = sample();
        assert_eq!(t.shape(), (2, 3));
        assert_eq!(t.get(&"b".into(), &Label::Index(1)), Some(&5));
        assert_eq!(t.get(&"c".into(), &Label::Index(1)), None);
        assert_eq!(t.row(&"a".into()).unwrap().to_vec(), vec![1, 0, 2]);
    }

    #[test]
    fn row_sums_and_deviation() {
        let t = sample().map(|&c| c as f64 / 3.0);
        let sums = t.row_sums();
        assert!((sums[0] - 1.0).abs() < 1e-12);
        assert!((sums[1] - 5.0 / 3.0).abs() < 1e-12);
        assert!((t.max_row_sum_deviation() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn label_display() {
        assert_eq!(Label::Index(4).to_string(), "4");
        assert_eq!(Label::from("doc17").to_string(), "doc17");
    }

    #[test]
    fn try_new_checks_label_counts() {
        let values = array![[1u64, 2, 3], [4, 5, 6]];
        assert!(Table::try_new(range_labels(1), range_labels(3), values.clone()).is_none());
        assert!(Table::try_new(range_labels(2), range_labels(2), values.clone()).is_none());
        let t = Table::try_new(range_labels(2), range_labels(3), values).unwrap();
        assert_eq!(t.shape(), (2, 3));
    }

    #[test]
    #[should_panic(expected = "row label count")]
    fn mismatched_labels_panic() {
        let _ = Table::new(range_labels(1), range_labels(3), array![[1u64, 2, 3], [4, 5, 6]]);
    }
}

use ndarray::{Array2, ArrayView2, Zip};

/// A weight matrix where some slots may be absent.
///
/// Rows are source nodes and columns are destination nodes. Absent slots are kept at zero in
/// `values` so the matrix can be used as a dense operand, but they are never written.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    values: Array2<f32>,
    present: Array2<bool>,
}

impl SparseMatrix {
    /// Creates a new `SparseMatrix` with every slot absent.
    ///
    /// # Arguments
    /// * `rows` - The amount of source nodes.
    /// * `cols` - The amount of destination nodes.
    ///
    /// # Returns
    /// A new `SparseMatrix` instance.
    pub fn absent(rows: usize, cols: usize) -> Self {
        Self {
            values: Array2::zeros((rows, cols)),
            present: Array2::from_elem((rows, cols), false),
        }
    }

    /// Returns a matrix with the same present slots as `self`, all of them set to zero.
    pub fn zeros_like(&self) -> Self {
        Self {
            values: Array2::zeros(self.values.dim()),
            present: self.present.clone(),
        }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn cols(&self) -> usize {
        self.values.ncols()
    }

    pub fn is_present(&self, j: usize, k: usize) -> bool {
        self.present.get((j, k)).copied().unwrap_or(false)
    }

    /// Returns the value at `(j, k)`, `None` if the slot is absent or out of bounds.
    pub fn get(&self, j: usize, k: usize) -> Option<f32> {
        match self.present.get((j, k)) {
            Some(&true) => Some(self.values[(j, k)]),
            _ => None,
        }
    }

    /// Overwrites a present slot.
    ///
    /// # Returns
    /// `false` if the slot is absent, in which case nothing is written.
    pub fn set(&mut self, j: usize, k: usize, value: f32) -> bool {
        if !self.is_present(j, k) {
            return false;
        }

        self.values[(j, k)] = value;
        true
    }

    /// The amount of present slots.
    pub fn count(&self) -> usize {
        self.present.iter().filter(|&&p| p).count()
    }

    /// A dense view of the matrix where absent slots read as zero.
    pub fn dense(&self) -> ArrayView2<'_, f32> {
        self.values.view()
    }

    /// Iterates the present slots in row major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), f32)> + '_ {
        self.values
            .indexed_iter()
            .zip(self.present.iter())
            .filter_map(|((idx, &value), &present)| present.then_some((idx, value)))
    }

    pub(crate) fn insert(&mut self, j: usize, k: usize, value: f32) {
        self.values[(j, k)] = value;
        self.present[(j, k)] = true;
    }

    /// Adds `rhs / divisor` to every present slot of `self`. Both matrices must have the same
    /// dimensions.
    pub(crate) fn accumulate(&mut self, rhs: &SparseMatrix, divisor: f32) {
        Zip::from(&mut self.values)
            .and(&rhs.values)
            .and(&self.present)
            .for_each(|value, &delta, &present| {
                if present {
                    *value += delta / divisor;
                }
            });
    }
}

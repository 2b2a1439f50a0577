//! Gauss-Jordan elimination over exact elements.
//!
//! [`Reducer::to_ref`] is the forward pass (row echelon form),
//! [`Reducer::ref_to_rref`] the backward pass (reduced row echelon form), and
//! [`Reducer::invert`] runs both on `[A | I]`. The same operations are
//! available as methods on [`MatrixGen`] using the default configuration.

use crate::error::{Error, Result};
use crate::matrix::matrix_gen::{GenElement, MatrixGen};
use crate::matrix::reduce_config::ReduceConfig;
use itertools::iproduct;
use log::{debug, trace};
use rayon::prelude::*;

#[derive(Debug, Clone, Default)]
pub struct Reducer {
    config: ReduceConfig,
}

impl Reducer {
    pub fn new(config: ReduceConfig) -> Self {
        Reducer { config }
    }

    pub fn config(&self) -> &ReduceConfig {
        &self.config
    }

    /// Checks row echelon form, or reduced row echelon form if `reduced`.
    ///
    /// Walks the columns with a frontier row: the cell on the frontier must be
    /// `0` or `1`, everything below it must be `0`, and a `1` becomes a pivot
    /// (with everything above it `0` when `reduced`) and advances the frontier.
    pub fn is_ref<T: GenElement>(&self, matrix: &MatrixGen<T>, reduced: bool) -> bool {
        let mut frontier = 0;

        for column in 0..matrix.cols {
            if frontier >= matrix.rows {
                break;
            }

            let cell = &matrix[(column, frontier)];
            let is_pivot = cell.is_one();
            if !is_pivot && !cell.is_zero() {
                return false;
            }

            if (frontier + 1..matrix.rows).any(|r| !matrix[(column, r)].is_zero()) {
                return false;
            }

            if is_pivot {
                if reduced && (0..frontier).any(|r| !matrix[(column, r)].is_zero()) {
                    return false;
                }
                frontier += 1;
            }
        }

        true
    }

    pub fn is_rref<T: GenElement>(&self, matrix: &MatrixGen<T>) -> bool {
        self.is_ref(matrix, true)
    }

    /// Forward elimination to row echelon form. Defined for every shape.
    ///
    /// The pivot of a column is the first row at or below the frontier whose
    /// entry is nonzero once that row has been reduced against the pivots found
    /// so far. Columns without such a row are skipped.
    pub fn to_ref<T: GenElement>(&self, matrix: &mut MatrixGen<T>) {
        let (cols, rows) = (matrix.cols, matrix.rows);

        // column -> row holding its pivot
        let mut pivots: Vec<Option<usize>> = vec![None; cols];
        let mut column = 0;
        let mut skipped = 0;

        while column - skipped < rows && column < cols {
            let frontier = column - skipped;

            let mut found = None;
            for row in frontier..rows {
                eliminate_left(matrix, &pivots[..column], row);
                if !matrix[(column, row)].is_zero() {
                    found = Some(row);
                    break;
                }
            }

            let Some(pivot_row) = found else {
                debug!("column {} has no pivot", column);
                column += 1;
                skipped += 1;
                continue;
            };

            if pivot_row != frontier {
                trace!("swap rows {} and {}", pivot_row, frontier);
                matrix.swap_rows_unchecked(pivot_row, frontier);
            }

            let pivot = matrix[(column, frontier)].clone();
            if !pivot.is_one() {
                matrix.divide_row_unchecked(frontier, &pivot);
            }

            debug!("pivot of column {} at row {}", column, frontier);
            pivots[column] = Some(frontier);
            column += 1;
        }

        // Rows under the last pivot were only partly reduced if the columns ran out first
        for row in (column - skipped)..rows {
            eliminate_left(matrix, &pivots, row);
        }
    }

    /// Backward elimination from row echelon form to reduced row echelon form.
    ///
    /// Fails with [`Error::MalformedInput`] and leaves `matrix` untouched if it
    /// is not in row echelon form.
    pub fn ref_to_rref<T: GenElement>(&self, matrix: &mut MatrixGen<T>) -> Result<()> {
        if !self.is_ref(matrix, false) {
            debug!("refusing back-substitution on a matrix not in REF");
            return Err(Error::MalformedInput);
        }

        let mut pivot_row = 0;
        for column in 0..matrix.cols {
            if pivot_row >= matrix.rows {
                break;
            }

            let cell = &matrix[(column, pivot_row)];
            if cell.is_zero() {
                continue;
            }
            if !cell.is_one() {
                return Err(Error::MalformedInput);
            }

            self.clear_above(matrix, column, pivot_row);
            pivot_row += 1;
        }

        Ok(())
    }

    /// Reduces to reduced row echelon form, doing nothing if already there.
    pub fn to_rref<T: GenElement>(&self, matrix: &mut MatrixGen<T>) -> Result<()> {
        if self.is_rref(matrix) {
            return Ok(());
        }
        self.to_ref(matrix);
        self.ref_to_rref(matrix)
    }

    /// Replaces a square `matrix` with its inverse by reducing `[matrix | I]`.
    ///
    /// A singular matrix gives [`Error::Singular`] and a non-square one
    /// [`Error::Shape`]; in both cases `matrix` is left unchanged.
    pub fn invert<T: GenElement>(&self, matrix: &mut MatrixGen<T>) -> Result<()> {
        if matrix.cols != matrix.rows {
            return Err(Error::Shape {
                operation: "invert",
                reason: format!("{}x{} matrix is not square", matrix.cols, matrix.rows),
            });
        }

        let n = matrix.cols;
        let mut augmented = MatrixGen::new(2 * n, n);
        for (row, column) in iproduct!(0..n, 0..n) {
            augmented[(column, row)] = matrix[(column, row)].clone();
        }
        for i in 0..n {
            augmented[(n + i, i)] = T::one();
        }

        self.to_rref(&mut augmented)?;

        let left_is_identity = iproduct!(0..n, 0..n).all(|(row, column)| {
            let cell = &augmented[(column, row)];
            if row == column {
                cell.is_one()
            } else {
                cell.is_zero()
            }
        });
        if !left_is_identity {
            debug!("{}x{} matrix is singular", n, n);
            return Err(Error::Singular);
        }

        for (row, column) in iproduct!(0..n, 0..n) {
            matrix[(column, row)] = std::mem::replace(&mut augmented[(n + column, row)], T::zero());
        }
        Ok(())
    }

    // Zeroes `column` in every row above `pivot_row`. Each row is written by one task only.
    fn clear_above<T: GenElement>(&self, matrix: &mut MatrixGen<T>, column: usize, pivot_row: usize) {
        let cols = matrix.cols;
        let (above, rest) = matrix.cells.split_at_mut(pivot_row * cols);
        let pivot = &rest[..cols];

        if above.len() >= self.config.parallel_threshold {
            above
                .par_chunks_mut(cols)
                .for_each(|row| clear_entry(row, column, pivot));
        } else {
            above
                .chunks_mut(cols)
                .for_each(|row| clear_entry(row, column, pivot));
        }
    }
}

// Subtracts from `row` the multiples of earlier pivot rows that cancel its
// entries in their pivot columns. `pivots` is indexed by column.
fn eliminate_left<T: GenElement>(matrix: &mut MatrixGen<T>, pivots: &[Option<usize>], row: usize) {
    for (column, pivot_row) in pivots.iter().enumerate() {
        let Some(pivot_row) = *pivot_row else {
            continue;
        };
        let factor = matrix[(column, row)].clone();
        if !factor.is_zero() {
            trace!("row {} -= {:?} * row {}", row, factor, pivot_row);
            matrix.subtract_row_unchecked(row, &factor, pivot_row);
        }
    }
}

fn clear_entry<T: GenElement>(row: &mut [T], column: usize, pivot: &[T]) {
    let factor = row[column].clone();
    if factor.is_zero() {
        return;
    }
    for (cell, p) in row.iter_mut().zip(pivot) {
        if !p.is_zero() {
            *cell = std::mem::replace(cell, T::zero()) - factor.clone() * p.clone();
        }
    }
}

impl<T: GenElement> MatrixGen<T> {
    pub fn is_ref(&self) -> bool {
        Reducer::default().is_ref(self, false)
    }

    pub fn is_rref(&self) -> bool {
        Reducer::default().is_rref(self)
    }

    pub fn to_ref(&mut self) {
        Reducer::default().to_ref(self)
    }

    pub fn ref_to_rref(&mut self) -> Result<()> {
        Reducer::default().ref_to_rref(self)
    }

    pub fn to_rref(&mut self) -> Result<()> {
        Reducer::default().to_rref(self)
    }

    pub fn invert(&mut self) -> Result<()> {
        Reducer::default().invert(self)
    }

    /// Like [`MatrixGen::invert`], on a copy.
    pub fn inverse(&self) -> Result<MatrixGen<T>> {
        let mut inverse = self.clone();
        inverse.invert()?;
        Ok(inverse)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

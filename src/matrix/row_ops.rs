use crate::error::{Error, Result};
use crate::matrix::matrix_gen::{GenElement, MatrixGen};

// Elementary row operations, applied in place.
//
// The public forms validate their row indices; the `_unchecked` forms are used
// by the reductions, which only ever pass rows they have already bounded.

impl<T: GenElement> MatrixGen<T> {
    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows {
            return Err(Error::OutOfBounds {
                column: 0,
                row,
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok(())
    }

    /// `row *= factor`
    pub fn scale_row(&mut self, row: usize, factor: &T) -> Result<()> {
        self.check_row(row)?;
        self.scale_row_unchecked(row, factor);
        Ok(())
    }

    /// `row /= divisor`, refusing a zero divisor.
    pub fn divide_row(&mut self, row: usize, divisor: &T) -> Result<()> {
        self.check_row(row)?;
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }
        self.divide_row_unchecked(row, divisor);
        Ok(())
    }

    /// `target -= factor * source`
    pub fn subtract_row(&mut self, target: usize, factor: &T, source: usize) -> Result<()> {
        self.check_row(target)?;
        self.check_row(source)?;
        self.subtract_row_unchecked(target, factor, source);
        Ok(())
    }

    /// `target -= source`
    pub fn subtract_row_once(&mut self, target: usize, source: usize) -> Result<()> {
        self.subtract_row(target, &T::one(), source)
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_row(a)?;
        self.check_row(b)?;
        self.swap_rows_unchecked(a, b);
        Ok(())
    }

    pub(crate) fn scale_row_unchecked(&mut self, row: usize, factor: &T) {
        for cell in &mut self.cells[row * self.cols..(row + 1) * self.cols] {
            *cell = std::mem::replace(cell, T::zero()) * factor.clone();
        }
    }

    // `divisor` must be non-zero
    pub(crate) fn divide_row_unchecked(&mut self, row: usize, divisor: &T) {
        for cell in &mut self.cells[row * self.cols..(row + 1) * self.cols] {
            *cell = std::mem::replace(cell, T::zero()) / divisor.clone();
        }
    }

    pub(crate) fn subtract_row_unchecked(&mut self, target: usize, factor: &T, source: usize) {
        let cols = self.cols;
        for c in 0..cols {
            let source_cell = &self.cells[source * cols + c];
            if source_cell.is_zero() {
                continue;
            }
            let delta = factor.clone() * source_cell.clone();
            let cell = &mut self.cells[target * cols + c];
            *cell = std::mem::replace(cell, T::zero()) - delta;
        }
    }

    pub(crate) fn swap_rows_unchecked(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for k in 0..self.cols {
            self.cells.swap(a * self.cols + k, b * self.cols + k);
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rings::fraction::Fraction;
    use num_traits::Zero;

    fn mat(lines: &[&[i64]]) -> MatrixGen<Fraction> {
        MatrixGen::from_list(
            lines
                .iter()
                .map(|l| l.iter().map(|&x| Fraction::from(x)).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_subtract_row() {
        let mut m = mat(&[&[4, 5, 6, 7], &[1, 2, 3, 4], &[2, 4, 6, 8]]);

        m.subtract_row_once(0, 1).unwrap();
        assert_eq!(m.row(0).unwrap(), mat(&[&[3, 3, 3, 3]]).row(0).unwrap());

        m.subtract_row(2, &Fraction::from(2), 1).unwrap();
        assert!(m.row(2).unwrap().iter().all(|x| x.is_zero()));

        // a row minus a multiple of itself
        m.subtract_row(1, &"1/2".parse().unwrap(), 1).unwrap();
        assert_eq!(
            m.row(1).unwrap(),
            &["1/2", "1", "3/2", "2"].map(|s| s.parse::<Fraction>().unwrap())
        );

        assert!(m.subtract_row(3, &Fraction::from(1), 0).is_err());
        assert!(m.subtract_row(0, &Fraction::from(1), 3).is_err());
    }

    #[test]
    fn test_scale_and_divide_row() {
        let mut m = mat(&[&[1, 2, 3, 4], &[1, 3, 5, 7], &[10, 20, 30, 40]]);

        m.scale_row(0, &Fraction::from(2)).unwrap();
        assert_eq!(m, mat(&[&[2, 4, 6, 8], &[1, 3, 5, 7], &[10, 20, 30, 40]]));

        m.divide_row(2, &Fraction::from(10)).unwrap();
        assert_eq!(m, mat(&[&[2, 4, 6, 8], &[1, 3, 5, 7], &[1, 2, 3, 4]]));

        m.scale_row(1, &Fraction::from(-1)).unwrap();
        assert_eq!(m.row(1).unwrap(), mat(&[&[-1, -3, -5, -7]]).row(0).unwrap());

        let before = m.clone();
        assert_eq!(m.divide_row(0, &Fraction::zero()), Err(Error::DivisionByZero));
        assert_eq!(m, before);
        assert!(m.scale_row(3, &Fraction::from(2)).is_err());
        assert!(m.divide_row(3, &Fraction::from(2)).is_err());
    }

    #[test]
    fn test_swap_rows() {
        let mut m = mat(&[&[1, 3, 5, 7], &[1, 2, 3, 4], &[2, 4, 6, 8]]);

        m.swap_rows(0, 2).unwrap();
        assert_eq!(m, mat(&[&[2, 4, 6, 8], &[1, 2, 3, 4], &[1, 3, 5, 7]]));

        m.swap_rows(1, 0).unwrap();
        assert_eq!(m, mat(&[&[1, 2, 3, 4], &[2, 4, 6, 8], &[1, 3, 5, 7]]));

        m.swap_rows(1, 1).unwrap();
        assert_eq!(m, mat(&[&[1, 2, 3, 4], &[2, 4, 6, 8], &[1, 3, 5, 7]]));

        assert_eq!(
            m.swap_rows(0, 5),
            Err(Error::OutOfBounds {
                column: 0,
                row: 5,
                cols: 4,
                rows: 3
            })
        );
    }
}

use crate::error::{Error, Result};
use itertools::iproduct;
use num_traits::{One, Zero};
use rayon::prelude::*;
use std::fmt;
use std::ops;
use std::ops::{Add, Div, Mul, Sub};

/// What a matrix cell must support for the row operations and reductions:
/// field arithmetic plus comparison against `0` and `1`.
pub trait GenElement:  // Avoid repeating all the traits
    Clone
    + Zero
    + One
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + fmt::Debug
    + Send
    + Sync
{
}

impl<T> GenElement for T where
    T: Clone
        + Zero
        + One
        + PartialEq
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
        + fmt::Debug
        + Send
        + Sync
{
}

/// Dense row-major matrix, `cells[row * cols + column]`.
///
/// Cells are addressed as `(column, row)` throughout. `cells.len()` is always
/// `cols * rows`. Cloning duplicates the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixGen<T> {
    pub(crate) cols: usize,
    pub(crate) rows: usize,
    pub(crate) cells: Vec<T>,
}

impl<T> Default for MatrixGen<T> {
    fn default() -> Self {
        MatrixGen {
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        }
    }
}

impl<T: GenElement> MatrixGen<T> {
    pub fn new(cols: usize, rows: usize) -> MatrixGen<T> {
        MatrixGen::filled(cols, rows, T::zero())
    }

    pub fn filled(cols: usize, rows: usize, value: T) -> MatrixGen<T> {
        MatrixGen {
            cols,
            rows,
            cells: vec![value; cols * rows],
        }
    }

    /// Builds a matrix from a list of rows, which must all have the same length.
    pub fn from_list(lines: Vec<Vec<T>>) -> Result<Self> {
        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.len());

        if let Some((idx, line)) = lines.iter().enumerate().find(|(_, l)| l.len() != cols) {
            return Err(Error::Shape {
                operation: "from_list",
                reason: format!(
                    "row {} has {} elements, expected {}",
                    idx,
                    line.len(),
                    cols
                ),
            });
        }

        Ok(MatrixGen {
            cols,
            rows,
            cells: lines.into_iter().flatten().collect(),
        })
    }

    pub fn to_list(&self) -> Vec<Vec<T>> {
        (0..self.rows)
            .map(|r| self.cells[r * self.cols..(r + 1) * self.cols].to_vec())
            .collect()
    }

    pub fn identity(n: usize) -> MatrixGen<T> {
        MatrixGen {
            rows: n,
            cols: n,
            cells: iproduct!(0..n, 0..n)
                .map(|(i, j)| if i == j { T::one() } else { T::zero() })
                .collect(),
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn index_of(&self, column: usize, row: usize) -> Result<usize> {
        if column >= self.cols || row >= self.rows {
            return Err(Error::OutOfBounds {
                column,
                row,
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok(row * self.cols + column)
    }

    pub fn at(&self, column: usize, row: usize) -> Result<&T> {
        let idx = self.index_of(column, row)?;
        Ok(&self.cells[idx])
    }

    pub fn at_mut(&mut self, column: usize, row: usize) -> Result<&mut T> {
        let idx = self.index_of(column, row)?;
        Ok(&mut self.cells[idx])
    }

    pub fn row(&self, row: usize) -> Result<&[T]> {
        if row >= self.rows {
            return Err(Error::OutOfBounds {
                column: 0,
                row,
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok(&self.cells[row * self.cols..(row + 1) * self.cols])
    }

    /// Reallocates to `cols x rows`, keeping the overlapping top-left block and
    /// filling new cells with zero.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        let mut cells = vec![T::zero(); cols * rows];
        for (r, c) in iproduct!(0..self.rows.min(rows), 0..self.cols.min(cols)) {
            cells[r * cols + c] = std::mem::replace(&mut self.cells[r * self.cols + c], T::zero());
        }

        self.cols = cols;
        self.rows = rows;
        self.cells = cells;
    }

    /// Renders one `| a\tb\t|` line per row using the given cell formatter.
    pub fn print(&self, to_string: impl Fn(&T) -> String) -> String {
        let mut result = String::new();
        for r in 0..self.rows {
            result += "| ";
            for cell in &self.cells[r * self.cols..(r + 1) * self.cols] {
                result += &to_string(cell);
                result += "\t";
            }
            result += "|\n";
        }
        result
    }
}

/// Panicking `(column, row)` access.
impl<T> ops::Index<(usize, usize)> for MatrixGen<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, (column, row): (usize, usize)) -> &T {
        assert!(
            column < self.cols && row < self.rows,
            "index ({}, {}) out of bounds for a {}x{} matrix",
            column,
            row,
            self.cols,
            self.rows
        );
        &self.cells[row * self.cols + column]
    }
}

impl<T> ops::IndexMut<(usize, usize)> for MatrixGen<T> {
    #[inline(always)]
    fn index_mut(&mut self, (column, row): (usize, usize)) -> &mut T {
        assert!(
            column < self.cols && row < self.rows,
            "index ({}, {}) out of bounds for a {}x{} matrix",
            column,
            row,
            self.cols,
            self.rows
        );
        &mut self.cells[row * self.cols + column]
    }
}

impl<T: GenElement + fmt::Display> fmt::Display for MatrixGen<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.print(|x| x.to_string()))
    }
}

impl<T: GenElement> MatrixGen<T> {
    fn same_shape(&self, rhs: &MatrixGen<T>, operation: &'static str) -> Result<()> {
        if self.cols != rhs.cols || self.rows != rhs.rows {
            return Err(Error::Shape {
                operation,
                reason: format!(
                    "{}x{} and {}x{} matrices",
                    self.cols, self.rows, rhs.cols, rhs.rows
                ),
            });
        }
        Ok(())
    }
}

impl<T: GenElement> ops::Add<&MatrixGen<T>> for &MatrixGen<T> {
    type Output = Result<MatrixGen<T>>;

    fn add(self, rhs: &MatrixGen<T>) -> Result<MatrixGen<T>> {
        self.same_shape(rhs, "add")?;

        Ok(MatrixGen {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .zip(rhs.cells.iter())
                .map(|(a, b)| a.to_owned() + b.to_owned())
                .collect(),
        })
    }
}

impl<T: GenElement> ops::Sub<&MatrixGen<T>> for &MatrixGen<T> {
    type Output = Result<MatrixGen<T>>;

    fn sub(self, rhs: &MatrixGen<T>) -> Result<MatrixGen<T>> {
        self.same_shape(rhs, "sub")?;

        Ok(MatrixGen {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .zip(rhs.cells.iter())
                .map(|(a, b)| a.to_owned() - b.to_owned())
                .collect(),
        })
    }
}

impl<T: GenElement> ops::Mul<&MatrixGen<T>> for &MatrixGen<T> {
    type Output = Result<MatrixGen<T>>;

    fn mul(self, rhs: &MatrixGen<T>) -> Result<MatrixGen<T>> {
        if self.cols != rhs.rows {
            return Err(Error::Shape {
                operation: "mul",
                reason: format!(
                    "{}x{} times {}x{}: columns of the left must match rows of the right",
                    self.cols, self.rows, rhs.cols, rhs.rows
                ),
            });
        }

        let mut result = MatrixGen::new(rhs.cols, self.rows);
        if rhs.cols == 0 {
            return Ok(result);
        }

        result
            .cells
            .par_chunks_mut(rhs.cols)
            .enumerate()
            .for_each(|(r, row)| {
                for (c, cell) in row.iter_mut().enumerate() {
                    *cell = (0..self.cols).fold(T::zero(), |acc, k| {
                        acc + self.cells[r * self.cols + k].clone()
                            * rhs.cells[k * rhs.cols + c].clone()
                    });
                }
            });

        Ok(result)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rings::fraction::Fraction;

    fn fr(s: &str) -> Fraction {
        s.parse().unwrap()
    }

    fn mat(lines: &[&[&str]]) -> MatrixGen<Fraction> {
        MatrixGen::from_list(
            lines
                .iter()
                .map(|l| l.iter().map(|s| fr(s)).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_constructors() {
        let m = MatrixGen::<Fraction>::new(4, 3);
        assert_eq!((m.cols(), m.rows()), (4, 3));
        assert!(m.cells.iter().all(|x| x.is_zero()));

        let m = MatrixGen::filled(4, 2, fr("-1/2"));
        assert_eq!((m.cols(), m.rows()), (4, 2));
        assert_eq!(m[(3, 1)], fr("-1/2"));

        let m = mat(&[&["1.2", "3.4", "7.6", "0.8"], &["1/2", "-3/4", "8/9", "4/3"]]);
        assert_eq!((m.cols(), m.rows()), (4, 2));
        assert_eq!(m[(0, 0)], fr("6/5"));
        assert_eq!(m[(1, 1)], fr("-3/4"));

        let m = MatrixGen::<Fraction>::default();
        assert_eq!((m.cols(), m.rows()), (0, 0));
        assert!(m.cells.is_empty());

        let m = MatrixGen::<Fraction>::from_list(vec![]).unwrap();
        assert_eq!(m, MatrixGen::default());
    }

    #[test]
    fn test_from_list_not_rectangular() {
        let result = MatrixGen::from_list(vec![
            vec![fr("1"), fr("2"), fr("3"), fr("4")],
            vec![fr("1"), fr("2"), fr("3")],
        ]);
        assert!(matches!(
            result,
            Err(Error::Shape {
                operation: "from_list",
                ..
            })
        ));
    }

    #[test]
    fn test_access() {
        let mut m = mat(&[&["1", "2", "3", "4"], &["5", "6", "7", "8"], &["9", "10", "11", "12"]]);

        assert_eq!(m.at(0, 1), Ok(&fr("5")));
        assert_eq!(m.at(3, 2), Ok(&fr("12")));
        assert_eq!(m.row(1).unwrap(), &[fr("5"), fr("6"), fr("7"), fr("8")]);

        for (column, row) in [(0, 3), (4, 0), (4, 3)] {
            assert_eq!(
                m.at(column, row),
                Err(Error::OutOfBounds {
                    column,
                    row,
                    cols: 4,
                    rows: 3
                })
            );
        }
        assert!(m.row(3).is_err());

        *m.at_mut(2, 0).unwrap() = fr("-7/3");
        assert_eq!(m[(2, 0)], fr("-7/3"));
        assert!(m.at_mut(4, 0).is_err());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_checks_column() {
        // (4, 0) would land on (0, 1) if only the flat index were checked
        let m = MatrixGen::<Fraction>::new(4, 3);
        let _ = &m[(4, 0)];
    }

    #[test]
    fn test_resize() {
        let mut m = mat(&[&["4.2", "8.9", "1.1"], &["3.4", "6.2", "7.7"]]);
        let original = m.clone();

        m.resize(3, 2);
        assert_eq!(m, original);

        m.resize(5, 3);
        assert_eq!((m.cols(), m.rows()), (5, 3));
        assert_eq!(m[(0, 0)], fr("4.2"));
        assert_eq!(m[(2, 1)], fr("7.7"));
        assert!((0..5).all(|c| m[(c, 2)].is_zero()));
        assert!(m[(4, 0)].is_zero() && m[(3, 1)].is_zero());

        m.resize(3, 2);
        assert_eq!(m, original);

        m.resize(2, 3);
        assert_eq!((m.cols(), m.rows()), (2, 3));
        assert_eq!(m[(1, 1)], fr("6.2"));
        assert!(m[(1, 2)].is_zero());

        m.resize(0, 0);
        assert_eq!(m, MatrixGen::default());
    }

    #[test]
    fn test_clone_is_deep() {
        let mut m1 = mat(&[&["1", "2"], &["3", "9.4"]]);
        let m2 = m1.clone();
        m1[(1, 1)] = fr("4.2");
        assert_eq!(m1[(1, 1)], fr("4.2"));
        assert_eq!(m2[(1, 1)], fr("9.4"));
    }

    #[test]
    fn test_equality() {
        let m1 = mat(&[&["1", "2", "3"], &["4", "5", "6"]]);
        let m2 = mat(&[&["1", "2", "3"], &["4", "5", "6"]]);
        let m3 = mat(&[&["1", "2"], &["3", "4"], &["5", "6"]]);
        let m4 = mat(&[&["8", "9"], &["10", "11"]]);

        assert!(m1 == m2 && m2 == m1);
        assert!(m1 != m3 && m3 != m1);
        assert!(m1 != m4 && m3 != m4);
    }

    #[test]
    fn test_print() {
        let m = mat(&[&["1", "-5/8"], &["2.5", "0"]]);
        assert_eq!(m.print(|x| x.to_string()), "| 1\t-5/8\t|\n| 5/2\t0\t|\n");
        assert_eq!(m.to_string(), m.print(|x| x.to_string()));
        assert_eq!(MatrixGen::<Fraction>::default().print(|x| x.to_string()), "");
    }

    #[test]
    fn test_arithmetic() {
        let a = MatrixGen::<Fraction>::identity(2);
        let b = mat(&[&["2", "3"], &["4", "1/2"]]);

        assert_eq!((&a + &b).unwrap(), mat(&[&["3", "3"], &["4", "3/2"]]));
        assert_eq!((&b - &a).unwrap(), mat(&[&["1", "3"], &["4", "-1/2"]]));
        assert_eq!((&a * &b).unwrap(), b);

        let c = mat(&[&["1", "2", "3"], &["4", "5", "6"]]);
        assert_eq!(
            (&b * &c).unwrap(),
            mat(&[&["14", "19", "24"], &["6", "21/2", "15"]])
        );

        assert!(matches!(&a + &c, Err(Error::Shape { .. })));
        assert!(matches!(&a - &c, Err(Error::Shape { .. })));
        assert!(matches!(&c * &b, Err(Error::Shape { .. })));

        let empty = MatrixGen::<Fraction>::new(0, 2);
        let product = (&MatrixGen::<Fraction>::new(3, 2) * &MatrixGen::new(0, 3)).unwrap();
        assert_eq!(product, empty);
    }
}

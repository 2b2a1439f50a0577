use crate::error::Error;
use crate::matrix::matrix_gen::MatrixGen;
use crate::rings::fraction::Fraction;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyType;

impl From<Error> for PyErr {
    fn from(error: Error) -> PyErr {
        PyValueError::new_err(error.to_string())
    }
}

/// Python view of a `MatrixGen<Fraction>`. Cells cross the boundary as
/// fraction literals (`"-3/4"`, `"2"`, `"0.5"`).
#[derive(Debug, Clone)]
#[pyclass(frozen)]
pub struct MatrixFraction {
    matrix: MatrixGen<Fraction>,
}

impl From<MatrixGen<Fraction>> for MatrixFraction {
    fn from(matrix: MatrixGen<Fraction>) -> Self {
        MatrixFraction { matrix }
    }
}

#[pymethods]
impl MatrixFraction {
    #[classmethod]
    pub fn from_list(_cls: &Bound<PyType>, lines: Vec<Vec<String>>) -> PyResult<Self> {
        let lines = lines
            .iter()
            .map(|l| l.iter().map(|s| s.parse::<Fraction>()).collect())
            .collect::<Result<Vec<Vec<_>>, Error>>()?;
        Ok(MatrixGen::from_list(lines)?.into())
    }

    #[classmethod]
    pub fn identity(_cls: &Bound<PyType>, n: usize) -> Self {
        MatrixGen::<Fraction>::identity(n).into()
    }

    pub fn to_list(&self) -> Vec<Vec<String>> {
        self.matrix
            .to_list()
            .iter()
            .map(|l| l.iter().map(|x| x.to_string()).collect())
            .collect()
    }

    #[getter]
    pub fn rows(&self) -> usize {
        self.matrix.rows()
    }

    #[getter]
    pub fn cols(&self) -> usize {
        self.matrix.cols()
    }

    pub fn is_ref(&self) -> bool {
        self.matrix.is_ref()
    }

    pub fn is_rref(&self) -> bool {
        self.matrix.is_rref()
    }

    pub fn to_ref(&self) -> MatrixFraction {
        let mut matrix = self.matrix.clone();
        matrix.to_ref();
        matrix.into()
    }

    pub fn to_rref(&self) -> PyResult<MatrixFraction> {
        let mut matrix = self.matrix.clone();
        matrix.to_rref()?;
        Ok(matrix.into())
    }

    pub fn inverse(&self) -> PyResult<MatrixFraction> {
        Ok(self.matrix.inverse()?.into())
    }

    pub fn __add__(&self, rhs: &MatrixFraction) -> PyResult<MatrixFraction> {
        Ok((&self.matrix + &rhs.matrix)?.into())
    }

    pub fn __sub__(&self, rhs: &MatrixFraction) -> PyResult<MatrixFraction> {
        Ok((&self.matrix - &rhs.matrix)?.into())
    }

    pub fn __mul__(&self, rhs: &MatrixFraction) -> PyResult<MatrixFraction> {
        Ok((&self.matrix * &rhs.matrix)?.into())
    }

    pub fn __eq__(&self, rhs: &MatrixFraction) -> bool {
        self.matrix == rhs.matrix
    }

    pub fn __str__(&self) -> String {
        self.matrix.to_string()
    }
}

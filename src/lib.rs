#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod error;
pub mod matrix {
    #[cfg(feature = "python")]
    pub mod matrix_fraction;
    pub mod matrix_gen;
    pub mod reduce;
    pub mod reduce_config;
    pub mod row_ops;
}
pub mod rings {
    pub mod fraction;
}

pub use error::{Error, Result};
pub use matrix::matrix_gen::{GenElement, MatrixGen};
pub use matrix::reduce::Reducer;
pub use matrix::reduce_config::ReduceConfig;
pub use rings::fraction::Fraction;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn rational_gauss(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    m.add_class::<matrix::matrix_fraction::MatrixFraction>()?;
    Ok(())
}

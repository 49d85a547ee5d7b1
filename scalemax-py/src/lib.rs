//! Python bindings for the scalemax scale-space maxima filter.
//!
//! Arrays follow the numpy conventions of blob detectors: the response cube
//! is a C-contiguous `(rows, cols, levels)` float64 array and candidates are
//! an `(n, 3)` int64 array of `(y, x, scale_level)` rows.

use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2, PyReadonlyArray3, PyUntypedArrayMethods};
use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;

use scalemax::{filter_scale_maxima, CubeCoord, ScaleMaxError, Strategy, VolumeView};

/// Convert a ScaleMaxError to a Python exception.
fn to_py_err(err: ScaleMaxError) -> PyErr {
    match &err {
        ScaleMaxError::CandidateOutOfBounds { .. } => PyIndexError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

fn parse_candidates(cube_coordinates: &PyReadonlyArray2<'_, i64>) -> PyResult<Vec<CubeCoord>> {
    let shape = cube_coordinates.shape();
    if shape[1] != 3 {
        return Err(PyValueError::new_err(format!(
            "cube_coordinates must have shape (n, 3), got ({}, {})",
            shape[0], shape[1]
        )));
    }

    let coords = cube_coordinates.as_array();
    coords
        .outer_iter()
        .enumerate()
        .map(|(index, row)| {
            let component = |v: i64| {
                usize::try_from(v).map_err(|_| {
                    PyIndexError::new_err(format!(
                        "candidate {index} has negative coordinate ({}, {}, {})",
                        row[0], row[1], row[2]
                    ))
                })
            };
            Ok(CubeCoord::new(
                component(row[0])?,
                component(row[1])?,
                component(row[2])?,
            ))
        })
        .collect()
}

/// Check cube coordinates for scale-space local maxima.
///
/// A point is a local maximum when its response is strictly greater than the
/// responses on the previous and the next scale level. Points on the first or
/// last level only need to beat the one neighbor that exists.
///
/// Args:
///     cube_coordinates: (n, 3) int64 numpy array of (y, x, scale_level)
///     laplacian_cube: (rows, cols, levels) float64 numpy array
///     strategy: "scalar", "bulk", "bulk_simd" or "parallel" (default: "scalar")
///
/// Returns:
///     (m, 3) int64 numpy array with the accepted rows in input order
///
/// Raises:
///     IndexError: a coordinate lies outside the cube
///     ValueError: bad shapes or an unknown strategy
#[pyfunction]
#[pyo3(signature = (cube_coordinates, laplacian_cube, strategy = "scalar"))]
fn scale_local_maxima<'py>(
    py: Python<'py>,
    cube_coordinates: PyReadonlyArray2<'py, i64>,
    laplacian_cube: PyReadonlyArray3<'py, f64>,
    strategy: &str,
) -> PyResult<Bound<'py, PyArray2<i64>>> {
    let strategy: Strategy = strategy.parse().map_err(to_py_err)?;

    let shape = laplacian_cube.shape();
    let (rows, cols, levels) = (shape[0], shape[1], shape[2]);
    let data = laplacian_cube.as_slice()?;
    let volume = VolumeView::new(data, rows, cols, levels).map_err(to_py_err)?;

    let candidates = parse_candidates(&cube_coordinates)?;
    let accepted = filter_scale_maxima(volume, &candidates, strategy).map_err(to_py_err)?;

    let flat: Vec<i64> = accepted
        .iter()
        .flat_map(|coord| [coord.row, coord.col, coord.level])
        .map(|v| v as i64)
        .collect();
    let out = Array2::from_shape_vec((accepted.len(), 3), flat)
        .map_err(|err| PyValueError::new_err(err.to_string()))?;
    Ok(out.into_pyarray(py))
}

/// Format a duration in seconds with an automatically chosen unit.
///
/// Args:
///     seconds: elapsed time in seconds
///
/// Returns:
///     String such as "12.3 ms"
#[pyfunction]
fn format_duration(seconds: f64) -> String {
    scalemax::format_duration(seconds)
}

/// Python module for the scalemax filter.
#[pymodule]
fn _scalemax(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(scale_local_maxima, m)?)?;
    m.add_function(wrap_pyfunction!(format_duration, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}

use num_complex::Complex;
use numpy::{IntoPyArray, PyArray1, PyReadonlyArrayDyn};
use pyo3::{create_exception, exceptions::PyValueError, prelude::*, types::PyFloat};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    bits::{Bit, as_1d, check_pair_rank, random_bits},
    channel::{awgn_symbols, noise_variance},
    error::{BerError, Result},
    metrics::{SnrDef, ber, ber_theory_bpsk_awgn, ber_theory_qpsk_awgn, qfunc, ser},
    modulation::{Modulation, Symbols},
};

create_exception!(awgn_ber, InvalidInputError, PyValueError);
create_exception!(awgn_ber, ShapeMismatchError, PyValueError);
create_exception!(awgn_ber, EmptyInputError, PyValueError);
create_exception!(awgn_ber, InvalidBitValueError, PyValueError);
create_exception!(awgn_ber, UnsupportedSchemeError, PyValueError);
create_exception!(awgn_ber, InvalidSNRError, PyValueError);
create_exception!(awgn_ber, InvalidArgumentError, PyValueError);

impl From<BerError> for PyErr {
    fn from(err: BerError) -> PyErr {
        let msg = err.to_string();
        match err {
            BerError::InvalidInput(_) => InvalidInputError::new_err(msg),
            BerError::ShapeMismatch { .. } => ShapeMismatchError::new_err(msg),
            BerError::EmptyInput => EmptyInputError::new_err(msg),
            BerError::InvalidBitValue { .. } => InvalidBitValueError::new_err(msg),
            BerError::UnsupportedScheme(_) => UnsupportedSchemeError::new_err(msg),
            BerError::InvalidSnr(_) => InvalidSNRError::new_err(msg),
            BerError::InvalidArgument(_) => InvalidArgumentError::new_err(msg),
        }
    }
}

fn collect_1d<T: numpy::Element + Copy>(
    array: &PyReadonlyArrayDyn<'_, T>,
    name: &str,
) -> Result<Vec<T>> {
    Ok(as_1d(array.as_array(), name)?.iter().cloned().collect())
}

/// Anything numpy-ish that holds bits. Values are checked later, not here.
#[derive(FromPyObject)]
enum BitArray<'py> {
    Bool(PyReadonlyArrayDyn<'py, bool>),
    U8(PyReadonlyArrayDyn<'py, u8>),
    I64(PyReadonlyArrayDyn<'py, i64>),
    F64(PyReadonlyArrayDyn<'py, f64>),
    List(Vec<f64>),
}

impl BitArray<'_> {
    fn shape(&self) -> Vec<usize> {
        match self {
            BitArray::Bool(a) => a.as_array().shape().to_vec(),
            BitArray::U8(a) => a.as_array().shape().to_vec(),
            BitArray::I64(a) => a.as_array().shape().to_vec(),
            BitArray::F64(a) => a.as_array().shape().to_vec(),
            BitArray::List(v) => vec![v.len()],
        }
    }

    fn values(&self, name: &str) -> Result<Vec<f64>> {
        Ok(match self {
            BitArray::Bool(a) => collect_1d(a, name)?
                .into_iter()
                .map(|b| b as u8 as f64)
                .collect(),
            BitArray::U8(a) => collect_1d(a, name)?.into_iter().map(f64::from).collect(),
            BitArray::I64(a) => collect_1d(a, name)?.into_iter().map(|b| b as f64).collect(),
            BitArray::F64(a) => collect_1d(a, name)?,
            BitArray::List(v) => v.clone(),
        })
    }
}

/// Real or complex samples. Sequences that aren't float or complex arrays,
/// such as lists or integer arrays, fall through to the list variants.
#[derive(FromPyObject)]
enum SymbolArray<'py> {
    Complex(PyReadonlyArrayDyn<'py, Complex<f64>>),
    Real(PyReadonlyArrayDyn<'py, f64>),
    List(Vec<f64>),
    ComplexList(Vec<Complex<f64>>),
}

impl SymbolArray<'_> {
    fn shape(&self) -> Vec<usize> {
        match self {
            SymbolArray::Complex(a) => a.as_array().shape().to_vec(),
            SymbolArray::Real(a) => a.as_array().shape().to_vec(),
            SymbolArray::List(v) => vec![v.len()],
            SymbolArray::ComplexList(v) => vec![v.len()],
        }
    }

    fn symbols(&self, name: &str) -> Result<Symbols> {
        Ok(match self {
            SymbolArray::Complex(a) => Symbols::Complex(collect_1d(a, name)?),
            SymbolArray::Real(a) => Symbols::Real(collect_1d(a, name)?),
            SymbolArray::List(v) => Symbols::Real(v.clone()),
            SymbolArray::ComplexList(v) => Symbols::Complex(v.clone()),
        })
    }
}

#[derive(FromPyObject)]
enum Floats<'py> {
    Scalar(f64),
    Array(PyReadonlyArrayDyn<'py, f64>),
    List(Vec<f64>),
}

impl Floats<'_> {
    /// Apply `f` element-wise, returning a float for scalar input and an array otherwise.
    fn map<F: Fn(f64) -> f64>(&self, py: Python<'_>, f: F) -> PyObject {
        match self {
            Floats::Scalar(x) => PyFloat::new(py, f(*x)).into_any().unbind(),
            Floats::Array(a) => a.as_array().mapv(f).into_pyarray(py).into_any().unbind(),
            Floats::List(v) => v
                .iter()
                .map(|&x| f(x))
                .collect::<Vec<f64>>()
                .into_pyarray(py)
                .into_any()
                .unbind(),
        }
    }
}

fn symbols_to_py(py: Python<'_>, symbols: Symbols) -> PyObject {
    match symbols {
        Symbols::Real(s) => s.into_pyarray(py).into_any().unbind(),
        Symbols::Complex(s) => s.into_pyarray(py).into_any().unbind(),
    }
}

/// A seeded random source that can be shared across `awgn` calls.
#[pyclass(name = "Generator")]
struct Generator {
    rng: StdRng,
}

#[pymethods]
impl Generator {
    #[new]
    #[pyo3(signature = (seed=None))]
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self { rng }
    }

    fn random_bits<'py>(&mut self, py: Python<'py>, num_bits: usize) -> Bound<'py, PyArray1<Bit>> {
        random_bits(num_bits, &mut self.rng).into_pyarray(py)
    }
}

#[pyfunction]
#[pyo3(name = "modulate")]
fn modulate_py(py: Python<'_>, bits: BitArray<'_>, scheme: &str) -> PyResult<PyObject> {
    let scheme: Modulation = scheme.parse()?;
    let symbols = scheme.modulate(&bits.values("bits")?)?;
    Ok(symbols_to_py(py, symbols))
}

#[pyfunction]
#[pyo3(name = "demodulate")]
fn demodulate_py<'py>(
    py: Python<'py>,
    symbols: SymbolArray<'_>,
    scheme: &str,
) -> PyResult<Bound<'py, PyArray1<Bit>>> {
    let scheme: Modulation = scheme.parse()?;
    let bits = scheme.demodulate(&symbols.symbols("symbols")?);
    Ok(bits.into_pyarray(py))
}

#[pyfunction]
#[pyo3(name = "awgn", signature = (x, snr_db, rng=None))]
fn awgn_py(
    py: Python<'_>,
    x: SymbolArray<'_>,
    snr_db: f64,
    rng: Option<PyRefMut<'_, Generator>>,
) -> PyResult<PyObject> {
    let symbols = x.symbols("x")?;
    let noisy = match rng {
        Some(mut generator) => awgn_symbols(&symbols, snr_db, &mut generator.rng)?,
        None => awgn_symbols(&symbols, snr_db, &mut rand::rng())?,
    };
    Ok(symbols_to_py(py, noisy))
}

#[pyfunction]
#[pyo3(name = "noise_variance", signature = (snr_db, *, complex_noise))]
fn noise_variance_py(snr_db: f64, complex_noise: bool) -> PyResult<f64> {
    Ok(noise_variance(snr_db, complex_noise)?)
}

#[pyfunction]
#[pyo3(name = "ber")]
fn ber_py(bits_tx: BitArray<'_>, bits_rx: BitArray<'_>) -> PyResult<f64> {
    check_pair_rank(&bits_tx.shape(), &bits_rx.shape())?;
    let tx = bits_tx.values("bits_tx")?;
    let rx = bits_rx.values("bits_rx")?;
    Ok(ber(&tx, &rx)?)
}

#[pyfunction]
#[pyo3(name = "ser")]
fn ser_py(symbols_tx: SymbolArray<'_>, symbols_rx: SymbolArray<'_>) -> PyResult<f64> {
    check_pair_rank(&symbols_tx.shape(), &symbols_rx.shape())?;
    let as_complex = |symbols: Symbols| -> Vec<Complex<f64>> {
        match symbols {
            Symbols::Complex(s) => s,
            Symbols::Real(s) => s.into_iter().map(|s_i| Complex::new(s_i, 0f64)).collect(),
        }
    };
    let tx = as_complex(symbols_tx.symbols("symbols_tx")?);
    let rx = as_complex(symbols_rx.symbols("symbols_rx")?);
    Ok(ser(&tx, &rx)?)
}

#[pyfunction]
#[pyo3(name = "qfunc")]
fn qfunc_py(py: Python<'_>, x: Floats<'_>) -> PyObject {
    x.map(py, qfunc)
}

#[pyfunction]
#[pyo3(name = "ber_theory_bpsk_awgn", signature = (snr_db, snr_def="EsN0"))]
fn ber_theory_bpsk_awgn_py(py: Python<'_>, snr_db: Floats<'_>, snr_def: &str) -> PyResult<PyObject> {
    let snr_def: SnrDef = snr_def.parse()?;
    Ok(snr_db.map(py, |snr| ber_theory_bpsk_awgn(snr, snr_def)))
}

#[pyfunction]
#[pyo3(name = "ber_theory_qpsk_awgn", signature = (snr_db, snr_def="EsN0"))]
fn ber_theory_qpsk_awgn_py(py: Python<'_>, snr_db: Floats<'_>, snr_def: &str) -> PyResult<PyObject> {
    let snr_def: SnrDef = snr_def.parse()?;
    Ok(snr_db.map(py, |snr| ber_theory_qpsk_awgn(snr, snr_def)))
}

#[pymodule]
#[pyo3(name = "awgn_ber")]
fn module_with_functions(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    m.add("InvalidInputError", py.get_type::<InvalidInputError>())?;
    m.add("ShapeMismatchError", py.get_type::<ShapeMismatchError>())?;
    m.add("EmptyInputError", py.get_type::<EmptyInputError>())?;
    m.add("InvalidBitValueError", py.get_type::<InvalidBitValueError>())?;
    m.add("UnsupportedSchemeError", py.get_type::<UnsupportedSchemeError>())?;
    m.add("InvalidSNRError", py.get_type::<InvalidSNRError>())?;
    m.add("InvalidArgumentError", py.get_type::<InvalidArgumentError>())?;

    m.add_class::<Generator>()?;
    m.add_function(wrap_pyfunction!(modulate_py, m)?)?;
    m.add_function(wrap_pyfunction!(demodulate_py, m)?)?;
    m.add_function(wrap_pyfunction!(awgn_py, m)?)?;
    m.add_function(wrap_pyfunction!(noise_variance_py, m)?)?;
    m.add_function(wrap_pyfunction!(ber_py, m)?)?;
    m.add_function(wrap_pyfunction!(ser_py, m)?)?;
    m.add_function(wrap_pyfunction!(qfunc_py, m)?)?;
    m.add_function(wrap_pyfunction!(ber_theory_bpsk_awgn_py, m)?)?;
    m.add_function(wrap_pyfunction!(ber_theory_qpsk_awgn_py, m)?)?;
    Ok(())
}

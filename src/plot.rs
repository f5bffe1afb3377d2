//! Semilog BER curves through matplotlib.

use std::path::Path;

use pyo3::{prelude::*, types::PyDict};

use crate::{modulation::Modulation, sim::BerPoint};

/// Plot empirical and theoretical BER against SNR on a log axis and save it to `path`.
///
/// Uses the non-interactive `agg` backend, so no display is needed.
pub fn plot_ber_curve(points: &[BerPoint], scheme: Modulation, path: &Path) -> PyResult<()> {
    let snrs_db: Vec<f64> = points.iter().map(|p| p.snr_db).collect();
    let bers: Vec<f64> = points.iter().map(|p| p.ber).collect();
    let bers_theory: Vec<f64> = points.iter().map(|p| p.ber_theory).collect();

    Python::with_gil(|py| {
        let matplotlib = py.import("matplotlib")?;
        matplotlib.call_method1("use", ("agg",))?;
        let plt = py.import("matplotlib.pyplot")?;

        plt.call_method0("figure")?;

        let simulated = PyDict::new(py);
        simulated.set_item("marker", "*")?;
        simulated.set_item("label", "Simulated BER")?;
        plt.call_method("semilogy", (snrs_db.clone(), bers), Some(&simulated))?;

        let theory = PyDict::new(py);
        theory.set_item("linestyle", "--")?;
        theory.set_item("linewidth", 1.5)?;
        theory.set_item("label", "Theoretical BER")?;
        plt.call_method("semilogy", (snrs_db, bers_theory), Some(&theory))?;

        plt.call_method1("xlabel", ("SNR (dB)",))?;
        plt.call_method1("ylabel", ("BER",))?;
        plt.call_method1(
            "title",
            (format!(
                "BER vs SNR over AWGN ({})",
                scheme.to_string().to_uppercase()
            ),),
        )?;

        let grid = PyDict::new(py);
        grid.set_item("which", "both")?;
        plt.call_method("grid", (true,), Some(&grid))?;
        plt.call_method0("legend")?;

        let save = PyDict::new(py);
        save.set_item("dpi", 300)?;
        save.set_item("bbox_inches", "tight")?;
        plt.call_method(
            "savefig",
            (path.to_string_lossy().into_owned(),),
            Some(&save),
        )?;
        plt.call_method0("close")?;
        Ok(())
    })
}

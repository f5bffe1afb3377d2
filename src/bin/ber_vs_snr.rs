//! Run a BER-vs-SNR sweep for BPSK or QPSK over AWGN and save it as CSV and a
//! semilog PNG plot.
//!
//! ```text
//! ber_vs_snr --mod bpsk --n-bits 200000 --snr-db 0 2 4 6 8 10
//! ```

use std::fs::{self, File};
use std::path::PathBuf;

use awgn_ber::{
    Modulation,
    plot::plot_ber_curve,
    sim::{DEFAULT_NUM_BITS, SweepConfig, run_sweep},
};
use clap::Parser;
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(about = "BER vs SNR for BPSK/QPSK over AWGN")]
struct Args {
    /// Modulation scheme (bpsk or qpsk)
    #[arg(long = "mod", value_parser = parse_scheme)]
    scheme: Modulation,

    /// SNR points in dB, e.g. --snr-db 0 2 4 6 8 10
    #[arg(
        long,
        alias = "snr_db",
        num_args = 1..,
        required = true,
        allow_negative_numbers = true
    )]
    snr_db: Vec<f64>,

    /// Number of bits for the Monte Carlo estimate
    #[arg(long, alias = "n_bits", default_value_t = DEFAULT_NUM_BITS)]
    n_bits: usize,

    /// Random seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Directory for the CSV and plot output
    #[arg(long, alias = "results_dir", default_value = "results")]
    results_dir: PathBuf,
}

fn parse_scheme(s: &str) -> Result<Modulation, String> {
    s.parse().map_err(|e: awgn_ber::BerError| e.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = SweepConfig::new(args.scheme, args.snr_db)
        .num_bits(args.n_bits)
        .seed(args.seed);

    let points = run_sweep(&config)?;
    for point in &points {
        println!(
            "SNR = {:>6.2} dB | BER = {:e} | theory = {:e}",
            point.snr_db, point.ber, point.ber_theory
        );
    }

    fs::create_dir_all(&args.results_dir)?;
    let csv_path = args.results_dir.join(format!("ber_{}.csv", args.scheme));
    let mut w = csv::Writer::from_writer(File::create(&csv_path)?);
    for point in &points {
        w.serialize(point)?;
    }
    w.flush()?;
    info!("saved {}", csv_path.display());

    let fig_path = args.results_dir.join(format!("ber_{}.png", args.scheme));
    match plot_ber_curve(&points, args.scheme, &fig_path) {
        Ok(()) => info!("saved {}", fig_path.display()),
        Err(e) => warn!("could not plot {}: {e}", fig_path.display()),
    }

    Ok(())
}

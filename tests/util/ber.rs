/// Standard error of a binomial proportion `p` estimated from `n` trials.
pub fn binomial_std_err(p: f64, n: usize) -> f64 {
    (p * (1f64 - p) / n as f64).sqrt()
}

/// Whether `measured` lies within `sigmas` standard errors of `expected`.
pub fn within_sigmas(measured: f64, expected: f64, n: usize, sigmas: f64) -> bool {
    (measured - expected).abs() <= sigmas * binomial_std_err(expected, n)
}

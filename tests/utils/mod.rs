// Integration test utilities
//
// Deterministic random samples and CSV fixtures on disk

#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;

/// xorshift64 generator, reproducible across platforms
pub struct XorShift {
    state: u64,
}

impl XorShift {
    pub fn new(seed: u64) -> Self {
        assert!(seed != 0, "xorshift seed must be non-zero");
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform in (0, 1), never exactly 0
    pub fn next_f64(&mut self) -> f64 {
        ((self.next_u64() >> 11) as f64 + 0.5) / (1u64 << 53) as f64
    }

    /// Box-Muller normal draw
    pub fn normal(&mut self, mean: f64, sd: f64) -> f64 {
        let u1 = self.next_f64();
        let u2 = self.next_f64();
        mean + sd * (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    pub fn normal_vec(&mut self, n: usize, mean: f64, sd: f64) -> Vec<f64> {
        (0..n).map(|_| self.normal(mean, sd)).collect()
    }

    pub fn lognormal_vec(&mut self, n: usize, mu: f64, sigma: f64) -> Vec<f64> {
        (0..n).map(|_| self.normal(mu, sigma).exp()).collect()
    }
}

/// Write a CSV file with a localized header and the given rows
pub fn absence_csv(rows: &[(f64, u32, &str)]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp csv");
    writeln!(file, "\"Количество больничных дней\",\"Возраст\",\"Пол\"").expect("write header");
    for (days, age, sex) in rows {
        writeln!(file, "{},{},\"{}\"", days, age, sex).expect("write row");
    }
    file.flush().expect("flush csv");
    file
}

/// Men miss clearly more days than women, older clearly more than younger
pub fn separated_rows() -> Vec<(f64, u32, &'static str)> {
    let men = [9.0, 10.0, 11.0, 10.0, 12.0, 9.0, 11.0, 10.0];
    let women = [4.0, 5.0, 3.0, 4.0, 6.0, 5.0, 4.0, 3.0];

    let mut rows = Vec::new();
    for (i, days) in men.iter().enumerate() {
        rows.push((*days, 40 + i as u32, "М"));
    }
    for (i, days) in women.iter().enumerate() {
        rows.push((*days, 20 + i as u32, "Ж"));
    }
    // Below the default cutoff of 2 days
    rows.push((1.0, 60, "Ж"));
    rows.push((2.0, 30, "М"));
    rows
}

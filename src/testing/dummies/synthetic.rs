use crate::core::ScoreMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded binary problem whose scores carry a tunable amount of signal.
pub struct SyntheticBinary {
    pub x: Vec<Vec<f64>>,
    pub y: Vec<usize>,
    pub scores: Vec<f64>,
}

impl SyntheticBinary {
    /// `n` samples alternating between the two classes.
    ///
    /// `signal` in `[0, 1]` blends the true label into each score: `0` gives
    /// pure noise, `1` a perfect ranking.
    pub fn generate(n: usize, signal: f64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut x = Vec::with_capacity(n);
        let mut y = Vec::with_capacity(n);
        let mut scores = Vec::with_capacity(n);

        for i in 0..n {
            let label = i % 2;
            let noise: f64 = rng.random::<f64>();
            x.push(vec![label as f64 + rng.random_range(-0.5..0.5), noise]);
            y.push(label);
            scores.push(signal * label as f64 + (1.0 - signal) * noise);
        }

        Self { x, y, scores }
    }

    /// Hard predictions thresholded at 0.5.
    pub fn predictions(&self) -> Vec<usize> {
        self.scores.iter().map(|&s| usize::from(s >= 0.5)).collect()
    }

    /// Two-column probability matrix built from the scores.
    pub fn probabilities(&self) -> ScoreMatrix {
        let rows = self.scores.iter().map(|&s| vec![1.0 - s, s]).collect();
        ScoreMatrix::new(rows).unwrap_or_else(|e| panic!("synthetic scores are valid: {e}"))
    }
}

//! Results view data

use std::fmt;

/// How well a play-through went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Perfect,
    Great,
    Good,
    KeepPracticing,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Perfect => write!(f, "Perfect Score!"),
            Verdict::Great => write!(f, "Great Job!"),
            Verdict::Good => write!(f, "Good Effort!"),
            Verdict::KeepPracticing => write!(f, "Keep Practicing!"),
        }
    }
}

/// Final score of a completed session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultSummary {
    pub score: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent
    pub percentage: u32,
    pub verdict: Verdict,
}

impl ResultSummary {
    pub fn new(score: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            (score as f64 * 100.0 / total as f64).round() as u32
        };

        // Thresholds use exact ratios so 79.5% never rounds into "Great"
        let verdict = if total > 0 && score == total {
            Verdict::Perfect
        } else if score * 100 >= total * 80 && total > 0 {
            Verdict::Great
        } else if score * 100 >= total * 50 && total > 0 {
            Verdict::Good
        } else {
            Verdict::KeepPracticing
        };

        Self {
            score,
            total,
            percentage,
            verdict,
        }
    }
}

use std::time::Duration;

/// Whole minutes and seconds left, floor-divided from a whole-second total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemainingTime {
    pub minutes: u64,
    pub seconds: u64,
}

impl RemainingTime {
    pub fn from_secs(total_secs: u64) -> Self {
        Self {
            minutes: total_secs / 60,
            seconds: total_secs % 60,
        }
    }
}

impl std::fmt::Display for RemainingTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} min {} sec", self.minutes, self.seconds)
    }
}

/// Per-chunk progress event emitted after each chunk completes.
#[derive(Debug, Clone, Copy)]
pub struct ChunkProgress {
    /// Chunks finished so far (1-based after the first chunk).
    pub completed: usize,
    pub total: usize,
    pub remaining: RemainingTime,
}

/// Rolling remaining-time estimator over the full per-chunk timing history.
///
/// The estimate is the arithmetic mean of every completed chunk duration
/// multiplied by the remaining chunk count, floored to whole seconds. The
/// mean is deliberately unwindowed, so an unusually slow or fast first chunk
/// biases estimates for the rest of the job.
#[derive(Debug, Default)]
pub struct ProgressEstimator {
    elapsed: Vec<Duration>,
}

impl ProgressEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk_elapsed: Duration) {
        self.elapsed.push(chunk_elapsed);
    }

    pub fn completed(&self) -> usize {
        self.elapsed.len()
    }

    pub fn average(&self) -> Option<Duration> {
        if self.elapsed.is_empty() {
            return None;
        }
        let total: Duration = self.elapsed.iter().sum();
        Some(total / self.elapsed.len() as u32)
    }

    pub fn remaining(&self, total_chunks: usize) -> RemainingTime {
        let remaining_chunks = total_chunks.saturating_sub(self.elapsed.len());
        let avg_secs = match self.average() {
            Some(avg) => avg.as_secs_f64(),
            None => return RemainingTime::default(),
        };
        let remaining_secs = (avg_secs * remaining_chunks as f64) as u64;
        RemainingTime::from_secs(remaining_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_remaining_time_floor_division() {
        let t = RemainingTime::from_secs(125);
        assert_eq!(t.minutes, 2);
        assert_eq!(t.seconds, 5);
    }

    #[test]
    fn test_remaining_time_display() {
        assert_eq!(RemainingTime::from_secs(100).to_string(), "1 min 40 sec");
    }

    #[test]
    fn test_empty_estimator_reports_zero() {
        let est = ProgressEstimator::new();
        assert_eq!(est.remaining(10), RemainingTime::default());
        assert!(est.average().is_none());
    }

    #[test]
    fn test_average_is_mean_of_all_chunks() {
        let mut est = ProgressEstimator::new();
        est.push(Duration::from_secs(2));
        est.push(Duration::from_secs(3));
        assert_relative_eq!(est.average().unwrap().as_secs_f64(), 2.5, epsilon = 1e-9);
    }

    #[test]
    fn test_remaining_scales_by_remaining_chunks() {
        // mean 2.5s, 8 chunks left: 20s
        let mut est = ProgressEstimator::new();
        est.push(Duration::from_secs(2));
        est.push(Duration::from_secs(3));
        assert_eq!(est.remaining(10), RemainingTime::from_secs(20));
    }

    #[test]
    fn test_remaining_floors_fractional_seconds() {
        // mean 1.5s, 3 chunks left: 4.5s floors to 4s
        let mut est = ProgressEstimator::new();
        est.push(Duration::from_secs(1));
        est.push(Duration::from_secs(2));
        assert_eq!(est.remaining(5), RemainingTime::from_secs(4));
    }

    #[test]
    fn test_remaining_converts_to_minutes() {
        let mut est = ProgressEstimator::new();
        est.push(Duration::from_secs(100));
        let remaining = est.remaining(2);
        assert_eq!(remaining.minutes, 1);
        assert_eq!(remaining.seconds, 40);
    }

    #[test]
    fn test_remaining_zero_at_completion() {
        let mut est = ProgressEstimator::new();
        est.push(Duration::from_secs(5));
        est.push(Duration::from_secs(7));
        assert_eq!(est.remaining(2), RemainingTime::default());
    }

    #[test]
    fn test_early_outlier_biases_whole_history_mean() {
        // A slow first chunk keeps inflating the estimate: mean over all
        // chunks, not a recent window.
        let mut est = ProgressEstimator::new();
        est.push(Duration::from_secs(60));
        est.push(Duration::from_secs(1));
        est.push(Duration::from_secs(1));
        // mean is 62/3 = 20.67s; 1 chunk left floors to 20s
        assert_eq!(est.remaining(4), RemainingTime::from_secs(20));
    }
}

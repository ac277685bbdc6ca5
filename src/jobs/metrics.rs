use super::types::{JobStatus, Stats};

/// Derived dashboard rates, as whole percentages
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DashboardMetrics {
    /// Applications that got any response (reached Interview), percent of total
    pub response_rate: u32,

    /// Applications that reached Interview, percent of total
    pub interview_rate: u32,

    /// Applications that reached Offer, percent of total
    pub offer_rate: u32,

    /// Applications that reached Interview or Offer, percent of total
    pub success_rate: u32,
}

impl DashboardMetrics {
    /// Compute all rates from backend stats; every rate is 0 when there are
    /// no applications
    pub fn from_stats(stats: &Stats) -> Self {
        if stats.total == 0 {
            return Self::default();
        }

        let interviews = stats.count(JobStatus::Interview);
        let offers = stats.count(JobStatus::Offer);

        Self {
            response_rate: rate(interviews, stats.total),
            interview_rate: rate(interviews, stats.total),
            offer_rate: rate(offers, stats.total),
            success_rate: rate(interviews + offers, stats.total),
        }
    }
}

/// Rounded whole-percent ratio
fn rate(part: u32, total: u32) -> u32 {
    ((part as f64 / total as f64) * 100.0).round() as u32
}

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Pipeline stage of one application
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    /// Application sent, no response yet
    Applied,

    /// Interview scheduled or in progress
    Interview,

    /// Offer received
    Offer,

    /// Application rejected
    Rejected,
}

impl JobStatus {
    /// All statuses, in pipeline order
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Applied,
        JobStatus::Interview,
        JobStatus::Offer,
        JobStatus::Rejected,
    ];

    /// The status name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Applied => "Applied",
            JobStatus::Interview => "Interview",
            JobStatus::Offer => "Offer",
            JobStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Applied" => Ok(JobStatus::Applied),
            "Interview" => Ok(JobStatus::Interview),
            "Offer" => Ok(JobStatus::Offer),
            "Rejected" => Ok(JobStatus::Rejected),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

/// One tracked job application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Backend identifier
    pub id: i64,

    /// Company applied to
    pub company: String,

    /// Role applied for
    pub role: String,

    /// Current pipeline stage
    pub status: JobStatus,

    /// When the application was sent; either a plain date or an RFC 3339
    /// timestamp, depending on how the record was created
    pub date_applied: String,

    /// Subject line of the detected application email
    pub email_subject: String,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,
}

impl Job {
    /// Parse the applied date, accepting both the plain-date and the
    /// timestamp form the backend produces
    pub fn applied_date(&self) -> Option<NaiveDate> {
        if let Ok(date) = NaiveDate::parse_from_str(&self.date_applied, "%Y-%m-%d") {
            return Some(date);
        }

        DateTime::parse_from_rfc3339(&self.date_applied)
            .ok()
            .map(|dt| dt.date_naive())
    }
}

/// Aggregate counts reported by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Total number of applications
    pub total: u32,

    /// Count per status name
    #[serde(default)]
    pub status_counts: HashMap<String, u32>,
}

impl Stats {
    /// Count of applications in the given status
    pub fn count(&self, status: JobStatus) -> u32 {
        self.status_counts.get(status.as_str()).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_round_trips_through_strings() {
        for status in JobStatus::ALL {
            assert_eq!(status.as_str().parse::<JobStatus>().unwrap(), status);
        }
    }

    #[test]
    fn applied_date_parses_both_backend_forms() {
        let mut job = sample_job();

        job.date_applied = "2025-11-01".to_string();
        assert_eq!(
            job.applied_date(),
            NaiveDate::from_ymd_opt(2025, 11, 1)
        );

        job.date_applied = "2025-11-01T09:30:00+00:00".to_string();
        assert_eq!(
            job.applied_date(),
            NaiveDate::from_ymd_opt(2025, 11, 1)
        );

        job.date_applied = "not a date".to_string();
        assert_eq!(job.applied_date(), None);
    }

    #[test]
    fn stats_count_defaults_to_zero() {
        let stats = Stats::default();
        assert_eq!(stats.count(JobStatus::Interview), 0);
    }

    fn sample_job() -> Job {
        Job {
            id: 1,
            company: "Acme Inc".to_string(),
            role: "Frontend Engineer".to_string(),
            status: JobStatus::Applied,
            date_applied: "2025-11-01".to_string(),
            email_subject: "Application - Frontend Engineer".to_string(),
            notes: String::new(),
        }
    }
}

use log::warn;

use super::types::{Job, JobStatus};

/// Options for filtering and ordering the job list
#[derive(Debug, Clone, Default)]
pub struct JobQuery {
    /// Only include jobs in this status
    pub status: Option<JobStatus>,

    /// Case-insensitive substring match over company, role, notes and
    /// email subject
    pub search: Option<String>,

    /// Sort results by this field ("date", "company" or "status")
    pub sort_by: Option<String>,

    /// Sort in descending order
    pub descending: bool,

    /// Maximum number of results to return
    pub limit: Option<usize>,
}

impl JobQuery {
    /// Whether a job passes the status and search filters
    fn matches(&self, job: &Job) -> bool {
        if let Some(status) = self.status {
            if job.status != status {
                return false;
            }
        }

        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let haystacks = [
                &job.company,
                &job.role,
                &job.notes,
                &job.email_subject,
            ];
            if !haystacks
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
            {
                return false;
            }
        }

        true
    }
}

/// Filter, sort and truncate the job list according to the query
pub fn filter_jobs<'a>(jobs: &'a [Job], query: &JobQuery) -> Vec<&'a Job> {
    let mut results: Vec<&Job> = jobs.iter().filter(|job| query.matches(job)).collect();

    // Sort results if requested
    if let Some(sort_by) = &query.sort_by {
        match sort_by.as_str() {
            "date" => {
                results.sort_by(|a, b| {
                    // Unparseable dates sort before everything else
                    let key = |job: &Job| (job.applied_date(), job.date_applied.clone());
                    if query.descending {
                        key(b).cmp(&key(a))
                    } else {
                        key(a).cmp(&key(b))
                    }
                });
            }
            "company" => {
                results.sort_by(|a, b| {
                    if query.descending {
                        b.company.cmp(&a.company)
                    } else {
                        a.company.cmp(&b.company)
                    }
                });
            }
            "status" => {
                results.sort_by(|a, b| {
                    if query.descending {
                        b.status.cmp(&a.status)
                    } else {
                        a.status.cmp(&b.status)
                    }
                });
            }
            _ => {
                warn!("Unknown sort field: {}", sort_by);
            }
        }
    }

    // Apply limit if requested
    if let Some(limit) = query.limit {
        if limit < results.len() {
            results.truncate(limit);
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn job(id: i64, company: &str, role: &str, status: JobStatus, date: &str, notes: &str) -> Job {
        Job {
            id,
            company: company.to_string(),
            role: role.to_string(),
            status,
            date_applied: date.to_string(),
            email_subject: format!("Application - {}", role),
            notes: notes.to_string(),
        }
    }

    fn sample_jobs() -> Vec<Job> {
        vec![
            job(
                1,
                "Acme Inc",
                "Frontend Engineer",
                JobStatus::Applied,
                "2025-11-01",
                "Referred by Alice",
            ),
            job(
                2,
                "Nimbus",
                "Data Analyst",
                JobStatus::Interview,
                "2025-10-20",
                "",
            ),
            job(
                3,
                "Helix",
                "ML Engineer",
                JobStatus::Offer,
                "2025-09-15",
                "Negotiation in progress",
            ),
        ]
    }

    #[test]
    fn no_query_returns_everything() {
        let jobs = sample_jobs();
        let results = filter_jobs(&jobs, &JobQuery::default());
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn status_filter_is_exact() {
        let jobs = sample_jobs();
        let query = JobQuery {
            status: Some(JobStatus::Interview),
            ..JobQuery::default()
        };

        let results = filter_jobs(&jobs, &query);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].company, "Nimbus");
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let jobs = sample_jobs();

        // Matches company
        let query = JobQuery {
            search: Some("acme".to_string()),
            ..JobQuery::default()
        };
        assert_eq!(filter_jobs(&jobs, &query).len(), 1);

        // Matches role
        let query = JobQuery {
            search: Some("ENGINEER".to_string()),
            ..JobQuery::default()
        };
        assert_eq!(filter_jobs(&jobs, &query).len(), 2);

        // Matches notes
        let query = JobQuery {
            search: Some("negotiation".to_string()),
            ..JobQuery::default()
        };
        assert_eq!(filter_jobs(&jobs, &query).len(), 1);

        // Matches email subject
        let query = JobQuery {
            search: Some("application - data".to_string()),
            ..JobQuery::default()
        };
        assert_eq!(filter_jobs(&jobs, &query).len(), 1);
    }

    #[test]
    fn status_and_search_combine() {
        let jobs = sample_jobs();
        let query = JobQuery {
            status: Some(JobStatus::Applied),
            search: Some("engineer".to_string()),
            ..JobQuery::default()
        };

        let results = filter_jobs(&jobs, &query);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn sort_by_date_descending_puts_newest_first() {
        let jobs = sample_jobs();
        let query = JobQuery {
            sort_by: Some("date".to_string()),
            descending: true,
            ..JobQuery::default()
        };

        let companies: Vec<&str> = filter_jobs(&jobs, &query)
            .iter()
            .map(|job| job.company.as_str())
            .collect();
        assert_eq!(companies, vec!["Acme Inc", "Nimbus", "Helix"]);
    }

    #[test]
    fn sort_by_company_ascending() {
        let jobs = sample_jobs();
        let query = JobQuery {
            sort_by: Some("company".to_string()),
            ..JobQuery::default()
        };

        let companies: Vec<&str> = filter_jobs(&jobs, &query)
            .iter()
            .map(|job| job.company.as_str())
            .collect();
        assert_eq!(companies, vec!["Acme Inc", "Helix", "Nimbus"]);
    }

    #[test]
    fn unknown_sort_field_leaves_order_unchanged() {
        let jobs = sample_jobs();
        let query = JobQuery {
            sort_by: Some("salary".to_string()),
            ..JobQuery::default()
        };

        let ids: Vec<i64> = filter_jobs(&jobs, &query).iter().map(|job| job.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn limit_truncates_results() {
        let jobs = sample_jobs();
        let query = JobQuery {
            limit: Some(2),
            ..JobQuery::default()
        };

        assert_eq!(filter_jobs(&jobs, &query).len(), 2);
    }
}

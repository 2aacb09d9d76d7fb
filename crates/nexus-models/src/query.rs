//! Listing query filters, sort keys, and pagination math.
//!
//! Filter fields hold the raw query-string values and are compared against
//! the listing's wire representation, so an unknown category or type simply
//! matches nothing instead of erroring.

use std::cmp::Ordering;

use crate::job::Job;

/// AND-combined filters for the public listing query.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Case-insensitive substring match over title/company/description/skills.
    pub search: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
    /// Exact employment-type match.
    pub job_type: Option<String>,
    /// Case-insensitive substring match on location.
    pub location: Option<String>,
    /// Exact experience-bracket match.
    pub experience: Option<String>,
    /// Lower bound on `salary.min`.
    pub salary_min: Option<i64>,
    /// Upper bound on `salary.max`.
    pub salary_max: Option<i64>,
    /// Exact listing-status match. The public query path always sets `active`.
    pub status: Option<String>,
}

impl JobFilter {
    /// Filter for the public query path: active listings only.
    pub fn active() -> Self {
        Self {
            status: Some("active".to_string()),
            ..Self::default()
        }
    }

    /// Parse a salary range expressed as `"min-max"` or `"min"`.
    ///
    /// Unparsable segments are ignored, matching the permissive handling of
    /// the original query contract.
    pub fn parse_salary(raw: &str) -> (Option<i64>, Option<i64>) {
        let mut parts = raw.splitn(2, '-');
        let min = parts.next().and_then(|p| p.trim().parse::<i64>().ok());
        let max = parts.next().and_then(|p| p.trim().parse::<i64>().ok());
        (min, max)
    }

    /// Whether a listing satisfies every set filter.
    pub fn matches(&self, job: &Job) -> bool {
        if let Some(status) = &self.status {
            if job.status.as_str() != status {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if job.category.as_str() != category {
                return false;
            }
        }
        if let Some(job_type) = &self.job_type {
            if job.job_type.as_str() != job_type {
                return false;
            }
        }
        if let Some(experience) = &self.experience {
            if job.experience.as_str() != experience {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if !job.location.to_lowercase().contains(&location.to_lowercase()) {
                return false;
            }
        }
        if let Some(min) = self.salary_min {
            if job.salary.min < min {
                return false;
            }
        }
        if let Some(max) = self.salary_max {
            if job.salary.max > max {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = job.title.to_lowercase().contains(&needle)
                || job.company.to_lowercase().contains(&needle)
                || job.description.to_lowercase().contains(&needle)
                || job.skills.iter().any(|s| s.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Sort key for the listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobSort {
    /// Creation time descending (default).
    #[default]
    Newest,
    /// Creation time ascending.
    Oldest,
    /// `salary.max` descending.
    SalaryHighToLow,
    /// `salary.min` ascending.
    SalaryLowToHigh,
}

impl JobSort {
    /// Parse from the query-string value, falling back to newest on any
    /// unknown key.
    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "newest" => Self::Newest,
            "oldest" => Self::Oldest,
            "salary-high-to-low" => Self::SalaryHighToLow,
            "salary-low-to-high" => Self::SalaryLowToHigh,
            _ => Self::Newest,
        }
    }

    /// Ordering of two listings under this key.
    pub fn compare(&self, a: &Job, b: &Job) -> Ordering {
        match self {
            JobSort::Newest => b.created_at.cmp(&a.created_at),
            JobSort::Oldest => a.created_at.cmp(&b.created_at),
            JobSort::SalaryHighToLow => b.salary.max.cmp(&a.salary.max),
            JobSort::SalaryLowToHigh => a.salary.min.cmp(&b.salary.min),
        }
    }
}

/// One page of a listing query result.
#[derive(Debug, Clone)]
pub struct JobPage {
    pub jobs: Vec<Job>,
    /// Total listings matching the filter, across all pages.
    pub total: u64,
}

impl JobPage {
    /// `ceil(total / limit)` with a guard against a zero limit.
    pub fn total_pages(&self, limit: u32) -> u64 {
        total_pages(self.total, limit)
    }
}

/// Page count for a result set: `ceil(total / limit)`.
pub fn total_pages(total: u64, limit: u32) -> u64 {
    let limit = limit.max(1) as u64;
    total.div_ceil(limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::tests::test_job;
    use crate::job::JobStatus;

    #[test]
    fn test_salary_parse() {
        assert_eq!(JobFilter::parse_salary("40000-80000"), (Some(40000), Some(80000)));
        assert_eq!(JobFilter::parse_salary("40000"), (Some(40000), None));
        assert_eq!(JobFilter::parse_salary("abc"), (None, None));
        assert_eq!(JobFilter::parse_salary("40000-"), (Some(40000), None));
    }

    #[test]
    fn test_sort_fallback_to_newest() {
        assert_eq!(JobSort::from_str_or_default("oldest"), JobSort::Oldest);
        assert_eq!(JobSort::from_str_or_default("salary-high-to-low"), JobSort::SalaryHighToLow);
        assert_eq!(JobSort::from_str_or_default("bogus"), JobSort::Newest);
        assert_eq!(JobSort::from_str_or_default(""), JobSort::Newest);
    }

    #[test]
    fn test_filter_status_and_category() {
        let mut job = test_job();
        let filter = JobFilter::active();
        assert!(filter.matches(&job));

        job.status = JobStatus::Closed;
        assert!(!filter.matches(&job));

        let mut filter = JobFilter::active();
        filter.category = Some("Legal".to_string());
        job.status = JobStatus::Active;
        assert!(!filter.matches(&job));

        filter.category = Some("IT & Software".to_string());
        assert!(filter.matches(&job));
    }

    #[test]
    fn test_filter_search_covers_skills() {
        let job = test_job();
        let mut filter = JobFilter::default();

        filter.search = Some("RUST".to_string());
        assert!(filter.matches(&job));

        filter.search = Some("acme".to_string());
        assert!(filter.matches(&job));

        filter.search = Some("kubernetes".to_string());
        assert!(!filter.matches(&job));
    }

    #[test]
    fn test_filter_location_substring() {
        let mut job = test_job();
        job.location = "San Francisco, CA".to_string();

        let mut filter = JobFilter::default();
        filter.location = Some("francisco".to_string());
        assert!(filter.matches(&job));

        filter.location = Some("york".to_string());
        assert!(!filter.matches(&job));
    }

    #[test]
    fn test_filter_salary_bounds() {
        let job = test_job(); // 90k-140k
        let mut filter = JobFilter::default();

        filter.salary_min = Some(80_000);
        assert!(filter.matches(&job));

        filter.salary_min = Some(100_000);
        assert!(!filter.matches(&job));

        filter.salary_min = Some(80_000);
        filter.salary_max = Some(120_000);
        assert!(!filter.matches(&job));

        filter.salary_max = Some(150_000);
        assert!(filter.matches(&job));
    }

    #[test]
    fn test_sort_compare() {
        let mut a = test_job();
        let mut b = test_job();
        a.salary.max = 100;
        b.salary.max = 200;
        assert_eq!(JobSort::SalaryHighToLow.compare(&a, &b), Ordering::Greater);

        a.salary.min = 50;
        b.salary.min = 10;
        assert_eq!(JobSort::SalaryLowToHigh.compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_total_pages_math() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(5, 2), 3);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(7, 0), 7);
    }
}

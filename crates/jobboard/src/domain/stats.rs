use serde::{Deserialize, Serialize};

use super::job::JobId;

/// Per-posting application counts returned by the employer statistics endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobStats {
    #[serde(alias = "JobID")]
    pub job_id: Option<JobId>,
    #[serde(alias = "JobName")]
    pub job_name: String,
    #[serde(rename = "daNhan")]
    pub accepted: u32,
    #[serde(rename = "tuChoi")]
    pub rejected: u32,
    #[serde(rename = "choDuyet")]
    pub pending: u32,
}

impl JobStats {
    pub fn total(&self) -> u32 {
        self.accepted + self.rejected + self.pending
    }
}

/// Totals across every posting owned by the employer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSummary {
    pub jobs: usize,
    pub applications: u32,
    pub accepted: u32,
    pub rejected: u32,
    pub pending: u32,
}

impl StatsSummary {
    pub fn from_stats(stats: &[JobStats]) -> Self {
        stats.iter().fold(
            Self {
                jobs: stats.len(),
                ..Self::default()
            },
            |mut summary, entry| {
                summary.applications += entry.total();
                summary.accepted += entry.accepted;
                summary.rejected += entry.rejected;
                summary.pending += entry.pending;
                summary
            },
        )
    }

    /// Share of applications in a bucket, rounded to whole percent.
    pub fn percentage(&self, count: u32) -> u32 {
        if self.applications == 0 {
            return 0;
        }
        ((f64::from(count) / f64::from(self.applications)) * 100.0).round() as u32
    }
}

use crate::workflow::github_model::workflow_job::WorkflowJob;
use serde::Deserialize;
use std::slice::{Iter, IterMut};

#[derive(Deserialize, Debug)]
pub struct WorkflowJobs {
    pub total_count: u64,

    pub jobs: Vec<WorkflowJob>,
}

impl<'a> IntoIterator for &'a WorkflowJobs {
    type Item = &'a WorkflowJob;
    type IntoIter = Iter<'a, WorkflowJob>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}

impl<'a> IntoIterator for &'a mut WorkflowJobs {
    type Item = &'a mut WorkflowJob;
    type IntoIter = IterMut<'a, WorkflowJob>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::github_model::job_conclusion::JobConclusion;

    #[test]
    fn parse_json_to_workflow_jobs() {
        let content = r#"{
  "total_count": 3,
  "jobs": [
    {
      "id": 399444496,
      "run_id": 29679449,
      "name": "build",
      "status": "completed",
      "conclusion": "success",
      "html_url": "https://github.com/octo/hello/runs/399444496",
      "steps": [
        { "name": "Set up job", "status": "completed", "conclusion": "success", "number": 1 }
      ]
    },
    {
      "id": 399444497,
      "run_id": 29679449,
      "name": "test (ubuntu-latest)",
      "status": "completed",
      "conclusion": "failure",
      "html_url": "https://github.com/octo/hello/runs/399444497"
    },
    {
      "id": 399444498,
      "run_id": 29679449,
      "name": "deploy",
      "status": "in_progress",
      "conclusion": null
    }
  ]
}"#;

        let jobs: WorkflowJobs = serde_json::from_str(content).unwrap();

        assert_eq!(jobs.total_count, 3);
        assert_eq!(jobs.jobs.len(), 3);

        assert_eq!(jobs.jobs[0].conclusion, Some(JobConclusion::Success));
        assert!(!jobs.jobs[0].is_failed());

        assert_eq!(jobs.jobs[1].id, 399444497);
        assert_eq!(jobs.jobs[1].name, "test (ubuntu-latest)");
        assert!(jobs.jobs[1].is_failed());

        assert_eq!(jobs.jobs[2].conclusion, None);
        assert!(!jobs.jobs[2].is_failed());
        assert_eq!(jobs.jobs[2].html_url, None);

        let failed: Vec<&WorkflowJob> = (&jobs).into_iter().filter(|j| j.is_failed()).collect();
        assert_eq!(failed.len(), 1);
    }

    #[test]
    fn parse_unknown_conclusion_as_other() {
        let content = r#"{
  "total_count": 1,
  "jobs": [
    { "id": 1, "name": "lint", "conclusion": "cancelled" }
  ]
}"#;

        let jobs: WorkflowJobs = serde_json::from_str(content).unwrap();

        assert_eq!(jobs.jobs[0].conclusion, Some(JobConclusion::Other));
        assert!(!jobs.jobs[0].is_failed());
    }
}

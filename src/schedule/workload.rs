use std::collections::HashMap;

use super::types::{Judge, JudgeId, WorkloadEntry};

/// Running count of games per judge, kept in input order
pub struct WorkloadTracker {
    counts: Vec<usize>,
    index_of: HashMap<JudgeId, usize>,
}

impl WorkloadTracker {
    pub fn new(judges: &[Judge]) -> Self {
        WorkloadTracker {
            counts: vec![0; judges.len()],
            index_of: judges.iter().enumerate().map(|(idx, j)| (j.id, idx)).collect(),
        }
    }

    /// Games assigned so far; unknown ids count as 0
    pub fn count_of(&self, judge_id: JudgeId) -> usize {
        self.index_of
            .get(&judge_id)
            .and_then(|&idx| self.counts.get(idx))
            .copied()
            .unwrap_or(0)
    }

    pub fn bump(&mut self, judge_id: JudgeId) {
        if let Some(count) = self
            .index_of
            .get(&judge_id)
            .and_then(|&idx| self.counts.get_mut(idx))
        {
            *count += 1;
        }
    }

    /// Workload report: one entry per judge, busiest first, ties keep input order
    pub fn into_report(self, judges: &[Judge]) -> Vec<WorkloadEntry> {
        let mut report: Vec<WorkloadEntry> = judges
            .iter()
            .zip(self.counts)
            .map(|(judge, games_assigned)| WorkloadEntry {
                judge_id: judge.id,
                name: judge.name.clone(),
                team: judge.team.clone(),
                games_assigned,
            })
            .collect();

        // sort_by is stable
        report.sort_by(|a, b| b.games_assigned.cmp(&a.games_assigned));
        report
    }
}

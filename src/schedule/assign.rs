use std::collections::HashSet;

use log::{debug, info};

use super::error::{AssignmentError, InputKind};
use super::types::{Assignment, Game, Judge, JudgeId, Schedule};
use super::workload::WorkloadTracker;

/// Assigns judges to games in input order, least busy eligible judges first.
///
/// A judge is never put on a game of their own team and never twice on the same
/// game. Ties in workload go to the judge listed first, so identical input always
/// gives an identical schedule. The first game that cannot be filled aborts the
/// whole run.
pub fn schedule_judges(judges: &[Judge], games: &[Game]) -> Result<Schedule, AssignmentError> {
    check_preconditions(judges, games)?;

    let mut workload = WorkloadTracker::new(judges);
    let mut assignments = Vec::with_capacity(games.len());

    for (position, game) in games.iter().enumerate() {
        let mut assigned: Vec<JudgeId> = Vec::with_capacity(game.judges_needed);

        // (input index, judge) pairs that may judge this game
        let mut eligible: Vec<(usize, &Judge)> = judges
            .iter()
            .enumerate()
            .filter(|(_, judge)| !judge.conflicts_with(game) && !assigned.contains(&judge.id))
            .collect();

        if eligible.len() < game.judges_needed {
            return Err(AssignmentError::InsufficientEligibleJudges {
                game_id: game.id,
                position: position + 1,
                team: game.team.clone(),
                eligible: eligible.len(),
                needed: game.judges_needed,
            });
        }

        // Least busy first; input order breaks ties
        eligible.sort_by_key(|&(idx, judge)| (workload.count_of(judge.id), idx));

        for &(_, judge) in eligible.iter().take(game.judges_needed) {
            assigned.push(judge.id);
            workload.bump(judge.id);
        }

        debug!(
            "Game {} ({}): {} eligible, assigned {:?}",
            position + 1,
            game.team,
            eligible.len(),
            assigned
        );

        assignments.push(Assignment {
            game_id: game.id,
            team: game.team.clone(),
            judges_needed: game.judges_needed,
            assigned_judge_ids: assigned,
        });
    }

    let workload = workload.into_report(judges);
    info!(
        "Scheduled {} games across {} judges",
        assignments.len(),
        judges.len()
    );

    Ok(Schedule {
        assignments,
        workload,
    })
}

fn check_preconditions(judges: &[Judge], games: &[Game]) -> Result<(), AssignmentError> {
    if judges.is_empty() {
        return Err(AssignmentError::EmptyInput(InputKind::Judges));
    }
    if games.is_empty() {
        return Err(AssignmentError::EmptyInput(InputKind::Games));
    }

    let mut seen = HashSet::new();
    if let Some(judge) = judges.iter().find(|j| !seen.insert(j.id)) {
        return Err(AssignmentError::DuplicateId {
            kind: InputKind::Judges,
            id: judge.id,
        });
    }
    let mut seen = HashSet::new();
    if let Some(game) = games.iter().find(|g| !seen.insert(g.id)) {
        return Err(AssignmentError::DuplicateId {
            kind: InputKind::Games,
            id: game.id,
        });
    }

    let max_needed = games.iter().map(|g| g.judges_needed).max().unwrap_or(0);
    if judges.len() < max_needed {
        return Err(AssignmentError::InsufficientJudgePool {
            required: max_needed,
            available: judges.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(schedule: &Schedule, game: usize) -> Vec<JudgeId> {
        schedule.assignments[game].assigned_judge_ids.clone()
    }

    #[test]
    fn test_three_judges_three_games_round_robin() {
        let judges = vec![
            Judge::new(0, "A", None),
            Judge::new(1, "B", None),
            Judge::new(2, "C", None),
        ];
        let games = vec![
            Game::new(0, "X", 1),
            Game::new(1, "Y", 1),
            Game::new(2, "Z", 1),
        ];

        let schedule = schedule_judges(&judges, &games).unwrap();
        assert_eq!(ids(&schedule, 0), vec![0]);
        assert_eq!(ids(&schedule, 1), vec![1]);
        assert_eq!(ids(&schedule, 2), vec![2]);
        assert!(schedule.workload.iter().all(|w| w.games_assigned == 1));
    }

    #[test]
    fn test_own_team_judge_is_skipped() {
        let judges = vec![Judge::new(0, "A", Some("X")), Judge::new(1, "B", None)];
        let games = vec![Game::new(0, "X", 1)];

        let schedule = schedule_judges(&judges, &games).unwrap();
        assert_eq!(ids(&schedule, 0), vec![1]);

        let a = schedule.workload.iter().find(|w| w.judge_id == 0).unwrap();
        assert_eq!(a.games_assigned, 0);
        assert_eq!(schedule.workload[0].judge_id, 1);
    }

    #[test]
    fn test_pool_smaller_than_biggest_game() {
        let judges = vec![Judge::new(0, "A", None)];
        let games = vec![Game::new(0, "X", 2)];

        assert_eq!(
            schedule_judges(&judges, &games),
            Err(AssignmentError::InsufficientJudgePool { required: 2, available: 1 })
        );
    }

    #[test]
    fn test_all_judges_conflict() {
        let judges = vec![Judge::new(0, "A", Some("X")), Judge::new(1, "B", Some("X"))];
        let games = vec![Game::new(7, "X", 1)];

        match schedule_judges(&judges, &games) {
            Err(AssignmentError::InsufficientEligibleJudges {
                game_id,
                position,
                team,
                eligible,
                needed,
            }) => {
                assert_eq!(game_id, 7);
                assert_eq!(position, 1);
                assert_eq!(team, "X");
                assert_eq!(eligible, 0);
                assert_eq!(needed, 1);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_first_failing_game_aborts_run() {
        let judges = vec![
            Judge::new(0, "A", Some("X")),
            Judge::new(1, "B", Some("Y")),
            Judge::new(2, "C", Some("Y")),
        ];
        // second game needs two non-Y judges but only A qualifies
        let games = vec![
            Game::new(0, "X", 1),
            Game::new(1, "Y", 2),
            Game::new(2, "X", 5),
        ];

        let err = schedule_judges(&judges, &games).unwrap_err();
        assert!(matches!(
            err,
            AssignmentError::InsufficientJudgePool { required: 5, available: 3 }
        ));

        let games = &games[..2];
        let err = schedule_judges(&judges, games).unwrap_err();
        assert!(matches!(
            err,
            AssignmentError::InsufficientEligibleJudges { position: 2, .. }
        ));
    }

    #[test]
    fn test_empty_inputs() {
        let judges = vec![Judge::new(0, "A", None)];
        let games = vec![Game::new(0, "X", 1)];

        assert_eq!(
            schedule_judges(&[], &games),
            Err(AssignmentError::EmptyInput(InputKind::Judges))
        );
        assert_eq!(
            schedule_judges(&judges, &[]),
            Err(AssignmentError::EmptyInput(InputKind::Games))
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let judges = vec![Judge::new(3, "A", None), Judge::new(3, "B", None)];
        let games = vec![Game::new(0, "X", 1)];
        assert_eq!(
            schedule_judges(&judges, &games),
            Err(AssignmentError::DuplicateId { kind: InputKind::Judges, id: 3 })
        );

        let judges = vec![Judge::new(0, "A", None)];
        let games = vec![Game::new(1, "X", 1), Game::new(1, "Y", 1)];
        assert_eq!(
            schedule_judges(&judges, &games),
            Err(AssignmentError::DuplicateId { kind: InputKind::Games, id: 1 })
        );
    }

    #[test]
    fn test_zero_judges_needed_is_noop() {
        let judges = vec![Judge::new(0, "A", None)];
        let games = vec![Game::new(0, "X", 0), Game::new(1, "Y", 1)];

        let schedule = schedule_judges(&judges, &games).unwrap();
        assert!(ids(&schedule, 0).is_empty());
        assert_eq!(ids(&schedule, 1), vec![0]);
        assert_eq!(schedule.total_assigned(), 1);
    }

    #[test]
    fn test_ties_prefer_earlier_judge() {
        let judges = vec![
            Judge::new(5, "E", None),
            Judge::new(1, "A", None),
            Judge::new(3, "C", None),
        ];
        let games = vec![Game::new(0, "X", 2), Game::new(1, "Y", 2)];

        let schedule = schedule_judges(&judges, &games).unwrap();
        // input order, not id order
        assert_eq!(ids(&schedule, 0), vec![5, 1]);
        // 3 has the lowest load, then 5 wins the tie against 1
        assert_eq!(ids(&schedule, 1), vec![3, 5]);
    }

    #[test]
    fn test_teamless_judge_can_take_every_game() {
        let judges = vec![
            Judge::new(0, "Free", None),
            Judge::new(1, "X player", Some("X")),
        ];
        let games: Vec<Game> = (0..4).map(|i| Game::new(i, "X", 1)).collect();

        let schedule = schedule_judges(&judges, &games).unwrap();
        assert!(schedule.assignments.iter().all(|a| a.assigned_judge_ids == vec![0]));
        assert_eq!(schedule.workload[0].games_assigned, 4);
    }
}

use crate::export::{AssignmentRow, WorkloadRow};
use crate::schedule::{total_slots, Game, Judge};

/// Loaded-data summary shown before scheduling
pub fn format_summary(judges: &[Judge], games: &[Game]) -> String {
    format!(
        "{} judges, {} games, {} total assignments needed",
        judges.len(),
        games.len(),
        total_slots(games)
    )
}

pub fn print_summary(judges: &[Judge], games: &[Game]) {
    println!("\n=== Loaded Data ===");
    println!("{}", format_summary(judges, games));
}

/// Prints the assignments table, one game per line
pub fn print_assignments(rows: &[AssignmentRow]) {
    println!("\n=== Judge Assignments ===");
    let width = rows.iter().map(|r| r.team.chars().count()).max().unwrap_or(4).max(4);

    println!("  {:<width$}  Assigned Judges", "Team", width = width);
    for (idx, row) in rows.iter().enumerate() {
        println!(
            "  {:<width$}  {}   (game {})",
            row.team,
            row.judges,
            idx + 1,
            width = width
        );
    }
}

/// Prints the workload distribution, busiest judges first
pub fn print_workload(rows: &[WorkloadRow]) {
    println!("\n=== Judge Workload Distribution ===");
    let width = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(5).max(5);

    println!("  {:<width$}  {:<12}  Games Assigned", "Judge", "Team", width = width);
    for row in rows {
        println!(
            "  {:<width$}  {:<12}  {}",
            row.name,
            row.team,
            row.games_assigned,
            width = width
        );
    }
}

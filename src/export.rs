use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use clap::ValueEnum;
use csv::WriterBuilder;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schedule::{Judge, JudgeId, Schedule};

pub const ASSIGNMENTS_FILE: &str = "judge-assignments";
pub const WORKLOAD_FILE: &str = "judge-workload";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No {0} to export")]
    NothingToExport(&'static str),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

/// One line of the assignments report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRow {
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Assigned Judges")]
    pub judges: String,
}

/// One line of the workload report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadRow {
    #[serde(rename = "Judge")]
    pub name: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Games Assigned")]
    pub games_assigned: usize,
}

#[derive(Serialize)]
struct JsonReport<'a, T: Serialize> {
    generated_at: String,
    rows: &'a [T],
}

/// Team name for reports, "None" for judges who don't play
pub fn format_team(team: Option<&str>) -> String {
    team.unwrap_or("None").to_string()
}

/// Assignments with judge ids resolved to names, in game order
pub fn assignment_rows(schedule: &Schedule, judges: &[Judge]) -> Vec<AssignmentRow> {
    let names: HashMap<JudgeId, &str> = judges.iter().map(|j| (j.id, j.name.as_str())).collect();

    schedule
        .assignments
        .iter()
        .map(|a| AssignmentRow {
            team: a.team.clone(),
            judges: a
                .assigned_judge_ids
                .iter()
                .filter_map(|id| names.get(id).copied())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect()
}

/// Workload in the order produced by the scheduler (busiest first)
pub fn workload_rows(schedule: &Schedule) -> Vec<WorkloadRow> {
    schedule
        .workload
        .iter()
        .map(|w| WorkloadRow {
            name: w.name.clone(),
            team: format_team(w.team.as_deref()),
            games_assigned: w.games_assigned,
        })
        .collect()
}

/// Writes report rows as CSV, header row included
pub fn write_csv<T: Serialize, W: Write>(rows: &[T], writer: W) -> Result<(), ExportError> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(|source| ExportError::Io {
        path: "<writer>".to_string(),
        source,
    })?;
    Ok(())
}

pub fn to_csv_bytes<T: Serialize>(rows: &[T]) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf)?;
    Ok(buf)
}

/// Writes report rows as pretty JSON with a generation timestamp
pub fn write_json<T: Serialize, W: Write>(rows: &[T], writer: W) -> Result<(), ExportError> {
    let report = JsonReport {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        rows,
    };
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}

fn write_report<T: Serialize>(
    rows: &[T],
    what: &'static str,
    path: &Path,
    format: ReportFormat,
) -> Result<(), ExportError> {
    if rows.is_empty() {
        return Err(ExportError::NothingToExport(what));
    }

    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;

    match format {
        ReportFormat::Csv => write_csv(rows, file),
        ReportFormat::Json => write_json(rows, file),
    }
}

/// Writes both reports into `out_dir`, returning the paths written
pub fn export_reports(
    schedule: &Schedule,
    judges: &[Judge],
    out_dir: &Path,
    format: ReportFormat,
) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(out_dir).map_err(|source| ExportError::Io {
        path: out_dir.display().to_string(),
        source,
    })?;

    let assignments_path = out_dir.join(format!("{}.{}", ASSIGNMENTS_FILE, format.extension()));
    let workload_path = out_dir.join(format!("{}.{}", WORKLOAD_FILE, format.extension()));

    write_report(
        &assignment_rows(schedule, judges),
        "assignments",
        &assignments_path,
        format,
    )?;
    write_report(
        &workload_rows(schedule),
        "workload data",
        &workload_path,
        format,
    )?;

    info!(
        "Wrote {} and {}",
        assignments_path.display(),
        workload_path.display()
    );
    Ok(vec![assignments_path, workload_path])
}

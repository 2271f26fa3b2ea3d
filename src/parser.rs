use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::info;
use thiserror::Error;

use crate::schedule::{Game, Judge};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0} file is empty")]
    Empty(&'static str),

    #[error("{table} file has no '{column}' column")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("Game on line {line} has no team")]
    MissingTeam { line: u64 },
}

/// Finds a column by header name, ignoring case and surrounding whitespace
fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

/// Returns the trimmed cell, or None when missing or blank
fn cell(record: &StringRecord, col: Option<usize>) -> Option<&str> {
    col.and_then(|c| record.get(c))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|v| v.trim().is_empty())
}

/// Parses the judge count of a game. Reads the leading integer of the cell
/// ("3", "+3", "3.0", "3 judges"); anything else, zero or negative falls back to 1.
/// Counts too large for `usize` saturate so the pool check rejects them.
pub fn parse_judges_needed(value: &str) -> usize {
    let value = value.trim();
    let value = value.strip_prefix('+').unwrap_or(value);
    let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return 1;
    }
    match digits.parse::<usize>() {
        Ok(0) => 1,
        Ok(n) => n,
        Err(_) => usize::MAX, // only digits, so the parse can only overflow
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input)
}

/// Loads judges from a CSV file with `Name` and `Team` columns
pub fn load_judges<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Judge>, LoadError> {
    load_judges_from_reader(open(csv_path.as_ref())?)
}

/// Loads judges from any CSV source.
///
/// Ids are the 0-based position among non-blank rows. A missing name becomes
/// `Judge {n}`, a blank team means the judge plays for no team.
pub fn load_judges_from_reader<R: Read>(input: R) -> Result<Vec<Judge>, LoadError> {
    let mut reader = reader(input);
    let headers = reader.headers()?.clone();

    let name_col = column(&headers, "Name");
    let team_col = column(&headers, "Team");

    let mut judges = Vec::new();
    for result in reader.records() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }

        let id = judges.len();
        let name = cell(&record, name_col)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Judge {}", id + 1));
        let team = cell(&record, team_col).map(str::to_string);

        judges.push(Judge { id, name, team });
    }

    if judges.is_empty() {
        return Err(LoadError::Empty("Judges"));
    }

    info!("Loaded {} judges", judges.len());
    Ok(judges)
}

/// Loads games from a CSV file with `Team` and `Judges_Needed` columns
pub fn load_games<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Game>, LoadError> {
    load_games_from_reader(open(csv_path.as_ref())?)
}

/// Loads games from any CSV source. Every game needs a team; the judge count
/// defaults to 1.
pub fn load_games_from_reader<R: Read>(input: R) -> Result<Vec<Game>, LoadError> {
    let mut reader = reader(input);
    let headers = reader.headers()?.clone();
    if is_blank(&headers) {
        return Err(LoadError::Empty("Games"));
    }

    let team_col = column(&headers, "Team").ok_or(LoadError::MissingColumn {
        table: "Games",
        column: "Team",
    })?;
    let needed_col = column(&headers, "Judges_Needed");

    let mut games = Vec::new();
    for result in reader.records() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let team = cell(&record, Some(team_col))
            .ok_or(LoadError::MissingTeam { line })?
            .to_string();
        let judges_needed = cell(&record, needed_col)
            .map(parse_judges_needed)
            .unwrap_or(1);

        games.push(Game {
            id: games.len(),
            team,
            judges_needed,
        });
    }

    if games.is_empty() {
        return Err(LoadError::Empty("Games"));
    }

    info!("Loaded {} games", games.len());
    Ok(games)
}

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use log::info;

use crate::export::ExportError;
use crate::schedule::{Game, Judge};

pub const JUDGES_FILE: &str = "judges.csv";
pub const GAMES_FILE: &str = "games.csv";

/// (name, team) pairs; blank team = not a player
const EXAMPLE_JUDGES: [(&str, &str); 10] = [
    ("Marko Petrović", "Kozara"),
    ("Jovana Nikolić", ""),
    ("Stefan Jovanović", "Gradiška1"),
    ("Ana Stojanović", "Gradiška2"),
    ("Nikola Đorđević", ""),
    ("Milica Ilić", "Kozara"),
    ("Dimitrije Pavlović", "Gradiška1"),
    ("Jelena Marinković", ""),
    ("Dušan Stanković", "Gradiška2"),
    ("Teodora Radovanović", ""),
];

/// (team, judges needed)
const EXAMPLE_GAMES: [(&str, usize); 9] = [
    ("Kozara", 1),
    ("Kozara", 1),
    ("Gradiška1", 3),
    ("Kozara", 1),
    ("Gradiška2", 1),
    ("Gradiška1", 3),
    ("Kozara", 1),
    ("Gradiška2", 3),
    ("Kozara", 1),
];

pub fn example_judges() -> Vec<Judge> {
    EXAMPLE_JUDGES
        .iter()
        .enumerate()
        .map(|(id, (name, team))| Judge::new(id, *name, Some(*team).filter(|t| !t.is_empty())))
        .collect()
}

pub fn example_games() -> Vec<Game> {
    EXAMPLE_GAMES
        .iter()
        .enumerate()
        .map(|(id, (team, needed))| Game::new(id, *team, *needed))
        .collect()
}

/// Example judges in the loader's CSV layout
pub fn write_example_judges<W: Write>(writer: W) -> Result<(), ExportError> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(["Name", "Team"])?;
    for (name, team) in EXAMPLE_JUDGES {
        wtr.write_record([name, team])?;
    }
    wtr.flush().map_err(|source| ExportError::Io {
        path: JUDGES_FILE.to_string(),
        source,
    })
}

/// Example games in the loader's CSV layout
pub fn write_example_games<W: Write>(writer: W) -> Result<(), ExportError> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(["Team", "Judges_Needed"])?;
    for (team, needed) in EXAMPLE_GAMES {
        wtr.write_record([team, needed.to_string().as_str()])?;
    }
    wtr.flush().map_err(|source| ExportError::Io {
        path: GAMES_FILE.to_string(),
        source,
    })
}

fn create(path: &Path) -> Result<File, ExportError> {
    File::create(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Writes `judges.csv` and `games.csv` into `out_dir`
pub fn write_example_files(out_dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(out_dir).map_err(|source| ExportError::Io {
        path: out_dir.display().to_string(),
        source,
    })?;

    let judges_path = out_dir.join(JUDGES_FILE);
    let games_path = out_dir.join(GAMES_FILE);
    write_example_judges(create(&judges_path)?)?;
    write_example_games(create(&games_path)?)?;

    info!("Example data written to {}", out_dir.display());
    Ok(vec![judges_path, games_path])
}

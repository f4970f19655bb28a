use std::path::{Path, PathBuf};
use tracing::debug;

use super::types::{Rating, RatingTable, Scenario};
use super::Catalog;
use crate::error::{GameError, Result};

pub const RATINGS_FILE: &str = "ratings.toml";

const SCENARIO_SOURCES: [(&str, &str); 6] = [
    ("scenario_01.toml", include_str!("../../scenarios/scenario_01.toml")),
    ("scenario_02.toml", include_str!("../../scenarios/scenario_02.toml")),
    ("scenario_03.toml", include_str!("../../scenarios/scenario_03.toml")),
    ("scenario_04.toml", include_str!("../../scenarios/scenario_04.toml")),
    ("scenario_05.toml", include_str!("../../scenarios/scenario_05.toml")),
    ("scenario_06.toml", include_str!("../../scenarios/scenario_06.toml")),
];

const RATINGS_SOURCE: &str = include_str!("../../scenarios/ratings.toml");

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| GameError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_scenario(content: &str, origin: &Path) -> Result<Scenario> {
    toml::from_str(content).map_err(|source| GameError::Parse {
        path: origin.to_path_buf(),
        source,
    })
}

pub fn parse_ratings(content: &str, origin: &Path) -> Result<Vec<Rating>> {
    let table: RatingTable = toml::from_str(content).map_err(|source| GameError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    Ok(table.ratings)
}

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    parse_scenario(&read(path)?, path)
}

pub fn load_ratings(path: &Path) -> Result<Vec<Rating>> {
    parse_ratings(&read(path)?, path)
}

/// Loads every `scenario_*.toml` in `dir` plus its `ratings.toml`.
pub fn load_catalog(dir: &Path) -> Result<Catalog> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|source| GameError::Io {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.starts_with("scenario_") && name.ends_with(".toml")
        })
        .collect();

    // Sort by filename so scenario_01, scenario_02, ... are in order
    entries.sort_by_key(|e| e.file_name());

    let scenarios = entries
        .iter()
        .map(|entry| load_scenario(&entry.path()))
        .collect::<Result<Vec<_>>>()?;
    let ratings = load_ratings(&dir.join(RATINGS_FILE))?;

    debug!(
        dir = %dir.display(),
        scenarios = scenarios.len(),
        ratings = ratings.len(),
        "loaded catalog"
    );
    Catalog::new(scenarios, ratings)
}

/// The six scenarios compiled into the binary.
pub fn builtin_catalog() -> Result<Catalog> {
    let builtin = PathBuf::from("<builtin>");
    let scenarios = SCENARIO_SOURCES
        .iter()
        .map(|(name, source)| parse_scenario(source, &builtin.join(name)))
        .collect::<Result<Vec<_>>>()?;
    let ratings = parse_ratings(RATINGS_SOURCE, &builtin.join(RATINGS_FILE))?;
    Catalog::new(scenarios, ratings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SCENARIO: &str = r#"
id = 1
problem_text = "Two urinals, one taken."
correct_answers = [1]

[[layout]]
kind = "urinal"
occupied = true

[[layout]]
kind = "urinal"

[feedback.correct]
title = "Nice"
message = "Only one left."

[feedback.wrong]
title = "How?"
message = "That one was taken."
"#;

    const RATINGS: &str = r#"
[[rating]]
min_score = 0
emoji = "x"
title = "ZERO"
message = "None right."

[[rating]]
min_score = 1
emoji = "o"
title = "ONE"
message = "All right."
"#;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(catalog.scenario_count(), 6);
        assert_eq!(catalog.ratings().len(), 7);
    }

    #[test]
    fn occupied_defaults_to_false() {
        let scenario = parse_scenario(SCENARIO, Path::new("inline.toml")).unwrap();
        assert!(scenario.layout[0].occupied);
        assert!(!scenario.layout[1].occupied);
    }

    #[test]
    fn loads_catalog_from_directory_in_file_order() {
        let dir = TempDir::new().unwrap();
        let second = SCENARIO.replace("id = 1", "id = 2");
        std::fs::write(dir.path().join("scenario_02.toml"), second).unwrap();
        std::fs::write(dir.path().join("scenario_01.toml"), SCENARIO).unwrap();
        std::fs::write(dir.path().join("notes.toml"), "ignored = true").unwrap();
        std::fs::write(dir.path().join(RATINGS_FILE), RATINGS).unwrap();

        let catalog = load_catalog(dir.path()).unwrap();
        assert_eq!(catalog.scenario_count(), 2);
        assert_eq!(catalog.scenario_at(0).unwrap().id, 1);
        assert_eq!(catalog.scenario_at(1).unwrap().id, 2);
        // ratings come back sorted highest first
        assert_eq!(catalog.ratings()[0].title, "ONE");
    }

    #[test]
    fn missing_ratings_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("scenario_01.toml"), SCENARIO).unwrap();

        let err = load_catalog(dir.path()).unwrap_err();
        assert!(matches!(err, GameError::Io { .. }));
    }

    #[test]
    fn malformed_scenario_is_parse_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("scenario_01.toml"), "id = \"one\"").unwrap();
        std::fs::write(dir.path().join(RATINGS_FILE), RATINGS).unwrap();

        let err = load_catalog(dir.path()).unwrap_err();
        assert!(matches!(err, GameError::Parse { .. }));
        assert!(err.to_string().contains("scenario_01.toml"));
    }

    #[test]
    fn empty_directory_is_empty_catalog() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(RATINGS_FILE), RATINGS).unwrap();

        let err = load_catalog(dir.path()).unwrap_err();
        assert!(matches!(err, GameError::EmptyCatalog));
    }
}

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use walkdir::WalkDir;

use crate::categories::CategoryMap;
use crate::parser::parse_year_block;
use crate::types::ShipRecord;

// Year data files sit flat in the data directory:
//   2019_data.txt, 2020_data.txt, ...
// Anything else in the directory is ignored without comment.
static RE_DATA_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})_data\.txt$").unwrap());

/// The combined multi-year corpus plus everything worth telling the
/// operator about along the way.
#[derive(Debug, Default)]
pub struct CorpusOutcome {
    /// Globally ordered by (year, rank) ascending.
    pub records: Vec<ShipRecord>,
    pub warnings: Vec<String>,
}

/// A year data file discovered in the data directory.
#[derive(Debug)]
struct YearFile {
    year: u16,
    path: std::path::PathBuf,
}

fn discover_year_files(dir: &Path) -> Vec<YearFile> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let name = match entry.file_name().to_str() {
            Some(n) => n,
            None => continue,
        };
        if let Some(caps) = RE_DATA_FILE.captures(name) {
            // Both unwraps guarded: group 1 is four ASCII digits.
            let year: u16 = caps.get(1).unwrap().as_str().parse().unwrap();
            files.push(YearFile {
                year,
                path: entry.path().to_path_buf(),
            });
        }
    }

    files
}

/// Discover every `YYYY_data.txt` under `dir`, parse each year, and
/// merge into one corpus sorted by (year, rank).
///
/// A file that cannot be read is skipped with a warning; the remaining
/// years still parse. Zero matching files yields an empty corpus — the
/// caller decides whether that is fatal.
pub fn build_corpus(dir: &Path, categories: &CategoryMap) -> CorpusOutcome {
    let mut outcome = CorpusOutcome::default();

    for file in discover_year_files(dir) {
        eprintln!(
            "Processing data for year: {} from '{}'...",
            file.year,
            file.path.display()
        );

        let raw = match fs::read_to_string(&file.path) {
            Ok(r) => r,
            Err(e) => {
                outcome
                    .warnings
                    .push(format!("Error reading file {}: {e}", file.path.display()));
                continue;
            }
        };

        let parsed = parse_year_block(&raw, file.year, categories);
        outcome.warnings.extend(parsed.warnings);
        outcome.records.extend(parsed.records);
    }

    // Ties impossible: rank is unique within a year.
    outcome
        .records
        .sort_by_key(|r| (r.year, r.rank));

    outcome
}

use regex::Regex;
use std::sync::LazyLock;

use crate::categories::CategoryMap;
use crate::types::*;

// ── Delta marker pattern ───────────────────────────────────────────
//
// Real data examples (ship line, then info line):
//
//   Dean/Castiel −2
//   Dean Winchester, Castiel, Supernatural
//
//   Wolfstar +14
//   Sirius Black, Remus Lupin, Harry Potter
//
//   Buddie
//   Evan Buckley, Eddie Diaz, 9-1-1
//
// The marker is a single trailing "<sign><digits>" token. The source
// lists use U+2212 MINUS SIGN (−) in some years and ASCII "-" in
// others, so both must classify as Down. The matched text is kept
// verbatim in Post Change.
static RE_DELTA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s([+−-]\d+)$").unwrap());

/// Result of parsing one year's raw text block.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub records: Vec<ShipRecord>,
    pub warnings: Vec<String>,
}

// Lines alternate strictly: ship line, then its character/fandom line.
enum ParserState {
    ExpectShipLine,
    ExpectInfoLine { ship_line: String },
}

/// Parse one year's raw text into ranked ship records.
///
/// Lines pair up two at a time (blank lines dropped before pairing):
/// the first of each pair names the ship with an optional trailing
/// delta marker, the second holds "characters, fandom". Rank is the
/// 1-based pair position in source order. An odd trailing ship line
/// has no info line to pair with; it is skipped with a warning rather
/// than emitted as a partial record.
pub fn parse_year_block(raw: &str, year: u16, categories: &CategoryMap) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    let mut state = ParserState::ExpectShipLine;

    let lines = raw.lines().map(str::trim).filter(|l| !l.is_empty());

    for line in lines {
        state = match state {
            ParserState::ExpectShipLine => ParserState::ExpectInfoLine {
                ship_line: line.to_string(),
            },
            ParserState::ExpectInfoLine { ship_line } => {
                let rank = outcome.records.len() as u32 + 1;
                outcome
                    .records
                    .push(build_record(&ship_line, line, year, rank, categories));
                ParserState::ExpectShipLine
            }
        };
    }

    if let ParserState::ExpectInfoLine { ship_line } = state {
        outcome.warnings.push(format!(
            "Warning (Year {year}): Skipping last line '{ship_line}' - missing character/fandom line."
        ));
    }

    outcome
}

fn build_record(
    ship_line: &str,
    info_line: &str,
    year: u16,
    rank: u32,
    categories: &CategoryMap,
) -> ShipRecord {
    let (ship_name, post_change, change_direction) = split_delta(ship_line);
    let (characters, fandom) = split_info(info_line);
    let fandom_category = categories.category_for(&fandom).to_string();

    ShipRecord {
        year,
        rank,
        ship_name,
        characters,
        fandom,
        fandom_category,
        post_change,
        change_direction,
    }
}

/// Strip a single trailing delta marker from the ship line.
///
/// Only the terminal match is taken; "Ship 2 +5" keeps "Ship 2" intact.
/// No marker means a new entry or an unchanged rank.
fn split_delta(ship_line: &str) -> (String, String, ChangeDirection) {
    match RE_DELTA.captures(ship_line) {
        Some(caps) => {
            // Both unwraps guarded by the match: group 1 always
            // participates, and the full match starts inside the line.
            let m = caps.get(1).unwrap();
            let post_change = m.as_str().to_string();
            let name = ship_line[..caps.get(0).unwrap().start()].trim_end();
            let direction = classify_sign(&post_change);
            (name.to_string(), post_change, direction)
        }
        None => (
            ship_line.to_string(),
            NO_CHANGE.to_string(),
            ChangeDirection::NewOrNoChange,
        ),
    }
}

fn classify_sign(post_change: &str) -> ChangeDirection {
    if post_change.starts_with('+') {
        ChangeDirection::Up
    } else if post_change.starts_with('-') || post_change.starts_with('−') {
        ChangeDirection::Down
    } else {
        // Unreachable through RE_DELTA, which only admits the three
        // signs above; kept so a pattern change cannot misclassify.
        ChangeDirection::Unknown
    }
}

/// Split the info line into (characters, fandom).
///
/// Character names may themselves contain commas ("Alice, Bob"), so
/// only the last comma separates the fandom. A comma-free line is all
/// fandom with unknown characters.
fn split_info(info_line: &str) -> (String, String) {
    match info_line.rfind(',') {
        Some(idx) => {
            let characters = info_line[..idx].trim().to_string();
            let fandom = info_line[idx + 1..].trim().to_string();
            (characters, fandom)
        }
        None => (UNKNOWN_CHARACTERS.to_string(), info_line.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_categories() -> CategoryMap {
        CategoryMap::from_pairs([
            ("Fandom X", "TV"),
            ("Harry Potter", "Books/Movies"),
            ("Supernatural", "TV"),
        ])
    }

    // ── Delta extraction ─────────────────────────────────────────────

    #[test]
    fn test_delta_plus() {
        let out = parse_year_block("Alpha/Beta +5\na, b, Fandom X", 2021, &test_categories());
        assert_eq!(out.records.len(), 1);
        let r = &out.records[0];
        assert_eq!(r.ship_name, "Alpha/Beta");
        assert_eq!(r.post_change, "+5");
        assert_eq!(r.change_direction, ChangeDirection::Up);
    }

    #[test]
    fn test_delta_unicode_minus() {
        let out = parse_year_block("Gamma/Delta −3\na, b, Fandom X", 2021, &test_categories());
        let r = &out.records[0];
        assert_eq!(r.ship_name, "Gamma/Delta");
        // Preserved verbatim, unicode minus and all.
        assert_eq!(r.post_change, "−3");
        assert_eq!(r.change_direction, ChangeDirection::Down);
    }

    #[test]
    fn test_delta_ascii_minus() {
        let out = parse_year_block("Gamma/Delta -3\na, b, Fandom X", 2021, &test_categories());
        let r = &out.records[0];
        assert_eq!(r.post_change, "-3");
        assert_eq!(r.change_direction, ChangeDirection::Down);
    }

    #[test]
    fn test_no_delta_marker() {
        let out = parse_year_block("Epsilon/Zeta\na, b, Fandom X", 2021, &test_categories());
        let r = &out.records[0];
        assert_eq!(r.ship_name, "Epsilon/Zeta");
        assert_eq!(r.post_change, "0");
        assert_eq!(r.change_direction, ChangeDirection::NewOrNoChange);
    }

    #[test]
    fn test_only_terminal_marker_stripped() {
        // A numeric-looking token mid-name stays put.
        let out = parse_year_block("Ship -2 Crew +5\na, b, Fandom X", 2021, &test_categories());
        let r = &out.records[0];
        assert_eq!(r.ship_name, "Ship -2 Crew");
        assert_eq!(r.post_change, "+5");
        assert_eq!(r.change_direction, ChangeDirection::Up);
    }

    // ── Info line split ──────────────────────────────────────────────

    #[test]
    fn test_info_split_last_comma() {
        let out = parse_year_block("Some Ship\nAlice, Bob, Fandom X", 2021, &test_categories());
        let r = &out.records[0];
        assert_eq!(r.characters, "Alice, Bob");
        assert_eq!(r.fandom, "Fandom X");
        assert_eq!(r.fandom_category, "TV");
    }

    #[test]
    fn test_info_no_comma() {
        let out = parse_year_block("Some Ship\nStandaloneFandom", 2021, &test_categories());
        let r = &out.records[0];
        assert_eq!(r.characters, "Unknown");
        assert_eq!(r.fandom, "StandaloneFandom");
        assert_eq!(r.fandom_category, "Other");
    }

    // ── Pairing, rank, warnings ──────────────────────────────────────

    #[test]
    fn test_ranks_follow_source_order() {
        let raw = "First +1\na, Fandom X\n\nSecond\nb, Fandom X\n\nThird −4\nc, Fandom X\n";
        let out = parse_year_block(raw, 2022, &test_categories());
        let ranks: Vec<u32> = out.records.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(out.records[2].ship_name, "Third");
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_blank_lines_do_not_break_pairing() {
        let raw = "\n\nFirst\n\n\na, Fandom X\n\nSecond\nb, Fandom X\n\n";
        let out = parse_year_block(raw, 2022, &test_categories());
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[0].ship_name, "First");
        assert_eq!(out.records[1].rank, 2);
    }

    #[test]
    fn test_orphaned_trailing_line() {
        let raw = "First\na, Fandom X\nOrphan Ship +2";
        let out = parse_year_block(raw, 2023, &test_categories());
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("Orphan Ship +2"));
        assert!(out.warnings[0].contains("2023"));
    }

    #[test]
    fn test_empty_block() {
        let out = parse_year_block("\n  \n\t\n", 2021, &test_categories());
        assert!(out.records.is_empty());
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_year_carried_through() {
        let out = parse_year_block("Destiel −2\nDean, Cas, Supernatural", 2020, &test_categories());
        let r = &out.records[0];
        assert_eq!(r.year, 2020);
        assert_eq!(r.fandom_category, "TV");
    }
}

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::types::{ShipRecord, CATEGORY_SEPARATOR};

// Whole-table operations over the corpus. All of these take the record
// slice by reference and build fresh vectors/maps; rows are never
// mutated in place, which keeps expansion idempotent and the CSV
// round-trip exact.

/// Duplicate each row once per segment of a multi-valued category tag.
///
/// "Books/TV" becomes two rows, one with "Books" and one with "TV",
/// letting a ship count toward both media. Rows with a single-valued
/// tag pass through unchanged, so expanding an already-expanded table
/// is a no-op.
pub fn expand_categories(records: &[ShipRecord]) -> Vec<ShipRecord> {
    let mut expanded = Vec::with_capacity(records.len());

    for record in records {
        if record.fandom_category.contains(CATEGORY_SEPARATOR) {
            for segment in record.fandom_category.split(CATEGORY_SEPARATOR) {
                let mut row = record.clone();
                row.fandom_category = segment.trim().to_string();
                expanded.push(row);
            }
        } else {
            expanded.push(record.clone());
        }
    }

    expanded
}

/// Keep every row of any ship that reached rank <= max_rank at least
/// once — including that ship's rows from years where it ranked lower.
pub fn filter_top_ships(records: &[ShipRecord], max_rank: u32) -> Vec<ShipRecord> {
    let top_names: HashSet<&str> = records
        .iter()
        .filter(|r| r.rank <= max_rank)
        .map(|r| r.ship_name.as_str())
        .collect();

    records
        .iter()
        .filter(|r| top_names.contains(r.ship_name.as_str()))
        .cloned()
        .collect()
}

/// Distinct years each ship appears in.
pub fn recurrence(records: &[ShipRecord]) -> HashMap<String, usize> {
    let mut years_per_ship: HashMap<&str, HashSet<u16>> = HashMap::new();
    for r in records {
        years_per_ship.entry(&r.ship_name).or_default().insert(r.year);
    }
    years_per_ship
        .into_iter()
        .map(|(name, years)| (name.to_string(), years.len()))
        .collect()
}

/// Sum of ranks per ship across all years. Lower = more consistently
/// popular; only comparable between ships with similar recurrence.
pub fn overall_popularity(records: &[ShipRecord]) -> HashMap<String, u32> {
    let mut sums: HashMap<String, u32> = HashMap::new();
    for r in records {
        *sums.entry(r.ship_name.clone()).or_default() += r.rank;
    }
    sums
}

/// Sorted distinct years present in the corpus.
pub fn distinct_years(records: &[ShipRecord]) -> Vec<u16> {
    let years: HashSet<u16> = records.iter().map(|r| r.year).collect();
    let mut years: Vec<u16> = years.into_iter().collect();
    years.sort_unstable();
    years
}

/// Best (lowest) rank each ship ever achieved.
pub fn peak_ranks(records: &[ShipRecord]) -> HashMap<String, u32> {
    let mut peaks: HashMap<String, u32> = HashMap::new();
    for r in records {
        peaks
            .entry(r.ship_name.clone())
            .and_modify(|p| *p = (*p).min(r.rank))
            .or_insert(r.rank);
    }
    peaks
}

/// Pivot to ship → year → rank. A year a ship did not chart is simply
/// absent, which is what lets the plots break lines across gaps.
pub fn pivot_ranks(records: &[ShipRecord]) -> BTreeMap<String, BTreeMap<u16, u32>> {
    let mut pivot: BTreeMap<String, BTreeMap<u16, u32>> = BTreeMap::new();
    for r in records {
        pivot
            .entry(r.ship_name.clone())
            .or_default()
            .insert(r.year, r.rank);
    }
    pivot
}

/// Top `limit` ships by lowest rank sum among ships appearing in at
/// least `min_recurrence` distinct years.
pub fn top_ships_by_weighted_rank(
    records: &[ShipRecord],
    min_recurrence: usize,
    limit: usize,
) -> Vec<(String, u32)> {
    let recurrence = recurrence(records);
    let mut eligible: Vec<(String, u32)> = overall_popularity(records)
        .into_iter()
        .filter(|(name, _)| recurrence.get(name).copied().unwrap_or(0) >= min_recurrence)
        .collect();

    // Name as tiebreak keeps the ordering deterministic.
    eligible.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    eligible.truncate(limit);
    eligible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChangeDirection;

    fn record(year: u16, rank: u32, name: &str, category: &str) -> ShipRecord {
        ShipRecord {
            year,
            rank,
            ship_name: name.to_string(),
            characters: "a, b".to_string(),
            fandom: "F".to_string(),
            fandom_category: category.to_string(),
            post_change: "0".to_string(),
            change_direction: ChangeDirection::NewOrNoChange,
        }
    }

    // ── Expansion ────────────────────────────────────────────────────

    #[test]
    fn test_expand_multi_category() {
        let rows = vec![record(2021, 1, "A", "Books/TV"), record(2021, 2, "B", "Movies")];
        let expanded = expand_categories(&rows);
        assert_eq!(expanded.len(), 3);
        assert_eq!(expanded[0].fandom_category, "Books");
        assert_eq!(expanded[1].fandom_category, "TV");
        // Copies share everything but the tag.
        assert_eq!(expanded[0].ship_name, "A");
        assert_eq!(expanded[1].rank, 1);
        assert_eq!(expanded[2].fandom_category, "Movies");
    }

    #[test]
    fn test_expand_idempotent() {
        let rows = vec![record(2021, 1, "A", "Books/TV"), record(2021, 2, "B", "Movies")];
        let once = expand_categories(&rows);
        let twice = expand_categories(&once);
        assert_eq!(once, twice);
    }

    // ── Top-ship filter ──────────────────────────────────────────────

    #[test]
    fn test_filter_keeps_all_years_of_qualifying_ship() {
        let rows = vec![
            record(2021, 3, "A", "TV"),
            record(2021, 40, "B", "TV"),
            record(2022, 35, "A", "TV"), // A fell out of the top 10, still kept
            record(2022, 2, "C", "TV"),
        ];
        let filtered = filter_top_ships(&rows, 10);
        let names: Vec<&str> = filtered.iter().map(|r| r.ship_name.as_str()).collect();
        assert_eq!(names, vec!["A", "A", "C"]);
    }

    // ── Series helpers ───────────────────────────────────────────────

    #[test]
    fn test_recurrence_counts_distinct_years() {
        let rows = vec![
            record(2021, 1, "A", "TV"),
            record(2022, 5, "A", "TV"),
            record(2022, 2, "B", "TV"),
        ];
        let rec = recurrence(&rows);
        assert_eq!(rec["A"], 2);
        assert_eq!(rec["B"], 1);
    }

    #[test]
    fn test_overall_popularity_sums_ranks() {
        let rows = vec![
            record(2021, 1, "A", "TV"),
            record(2022, 5, "A", "TV"),
            record(2022, 2, "B", "TV"),
        ];
        let pop = overall_popularity(&rows);
        assert_eq!(pop["A"], 6);
        assert_eq!(pop["B"], 2);
    }

    #[test]
    fn test_distinct_years_sorted() {
        let rows = vec![
            record(2023, 1, "A", "TV"),
            record(2021, 1, "B", "TV"),
            record(2023, 2, "C", "TV"),
        ];
        assert_eq!(distinct_years(&rows), vec![2021, 2023]);
    }

    #[test]
    fn test_peak_ranks() {
        let rows = vec![
            record(2021, 7, "A", "TV"),
            record(2022, 3, "A", "TV"),
            record(2023, 12, "A", "TV"),
        ];
        assert_eq!(peak_ranks(&rows)["A"], 3);
    }

    #[test]
    fn test_pivot_gap_year_absent() {
        let rows = vec![record(2021, 4, "A", "TV"), record(2023, 9, "A", "TV")];
        let pivot = pivot_ranks(&rows);
        let series = &pivot["A"];
        assert_eq!(series.get(&2021), Some(&4));
        assert_eq!(series.get(&2022), None);
        assert_eq!(series.get(&2023), Some(&9));
    }

    #[test]
    fn test_weighted_rank_respects_recurrence_floor() {
        let rows = vec![
            record(2021, 1, "OneYear", "TV"),
            record(2021, 5, "TwoYears", "TV"),
            record(2022, 6, "TwoYears", "TV"),
        ];
        let top = top_ships_by_weighted_rank(&rows, 2, 10);
        assert_eq!(top, vec![("TwoYears".to_string(), 11)]);
    }
}

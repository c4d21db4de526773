use std::collections::{BTreeMap, HashMap};

use crate::table::{
    distinct_years, expand_categories, peak_ranks, recurrence, top_ships_by_weighted_rank,
};
use crate::types::ShipRecord;

// Descriptive report printed to stdout after the corpus CSV reloads.
// Each section mirrors one question asked of the dataset: what media
// dominate, which ships last, which ships sit at the top.

fn percent(count: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", count as f64 * 100.0 / total as f64)
}

/// Count occurrences of each category, sorted by count descending then
/// name, so output order is stable.
fn category_counts(records: &[ShipRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in records {
        *counts.entry(r.fandom_category.as_str()).or_default() += 1;
    }
    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

pub fn print_preview(records: &[ShipRecord]) {
    println!("\n### Data Preview (Head) ###");
    for r in records.iter().take(5) {
        println!(
            "{} | #{:<3} {} [{}] ({}, {})",
            r.year, r.rank, r.ship_name, r.fandom, r.fandom_category, r.change_direction.as_str()
        );
    }
    println!("(Num of rows: {})", records.len());
}

pub fn print_unique_ships_by_year(records: &[ShipRecord]) {
    println!("\n### Number of Unique Ships by Year ###");
    let mut per_year: BTreeMap<u16, std::collections::HashSet<&str>> = BTreeMap::new();
    for r in records {
        per_year.entry(r.year).or_default().insert(&r.ship_name);
    }
    for (year, ships) in &per_year {
        println!("{year}: {}", ships.len());
    }
}

/// Total popularity of each media type, with multi-category fandoms
/// ("Books/TV") counting toward every medium they span.
pub fn print_overall_media_popularity(records: &[ShipRecord]) {
    println!("\n### Overall Media Popularity (Multi-Category) ###");

    let expanded = expand_categories(records);
    let counts = category_counts(&expanded);
    let total: usize = counts.iter().map(|(_, c)| c).sum();

    for (category, count) in counts.iter().take(10) {
        println!("{category:<16} {count:>5}  {}", percent(*count, total));
    }
}

/// Per-year top-5 media types, multi-category aware.
pub fn print_yearly_media_popularity(records: &[ShipRecord]) {
    println!("\n### Yearly Media Popularity (Multi-Category) ###");

    let expanded = expand_categories(records);
    for year in distinct_years(records) {
        println!("\n--- Top 5 Media Types in {year} ---");
        let year_rows: Vec<ShipRecord> = expanded
            .iter()
            .filter(|r| r.year == year)
            .cloned()
            .collect();
        if year_rows.is_empty() {
            println!("No data found for {year}.");
            continue;
        }
        for (category, count) in category_counts(&year_rows).iter().take(5) {
            println!("{category:<16} {count:>5}");
        }
    }
}

/// Per-year top-5 individual fandoms by entry count.
pub fn print_yearly_fandom_popularity(records: &[ShipRecord]) {
    println!("\n### Yearly Fandom Popularity ###");

    for year in distinct_years(records) {
        println!("\n--- Top 5 Fandoms in {year} ---");
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for r in records.iter().filter(|r| r.year == year) {
            *counts.entry(r.fandom.as_str()).or_default() += 1;
        }
        let mut counts: Vec<(&str, usize)> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        for (fandom, count) in counts.iter().take(5) {
            println!("{fandom:<32} {count:>4}");
        }
    }
}

/// Distribution of each ship's best-ever rank, bucketed.
pub fn print_peak_amount(records: &[ShipRecord]) {
    println!("\n### Peak Rank Distribution ###");

    let peaks = peak_ranks(records);
    let total = peaks.len();
    let buckets: &[(&str, u32, u32)] = &[
        ("Peaked at #1", 1, 1),
        ("Peaked in top 5", 2, 5),
        ("Peaked in top 10", 6, 10),
        ("Peaked in top 20", 11, 20),
        ("Peaked below 20", 21, u32::MAX),
    ];
    for (label, lo, hi) in buckets {
        let count = peaks.values().filter(|&&p| p >= *lo && p <= *hi).count();
        println!("{label:<18} {count:>5}  {}", percent(count, total));
    }
}

/// Media distribution of ships at each recurrence level: of the ships
/// that charted in N+ distinct years, which media do they come from?
/// (ship, category) pairs are deduplicated so a ship counts once per
/// medium regardless of how many years it charted.
pub fn print_media_longevity(records: &[ShipRecord]) {
    println!("\n### Media Longevity Analysis by Recurrence Level (Multi-Category) ###");

    let expanded = expand_categories(records);
    let rec = recurrence(&expanded);
    let max_years = distinct_years(&expanded).len();

    for min_recurrence in 1..=max_years {
        let recurrent: std::collections::HashSet<&str> = rec
            .iter()
            .filter(|&(_, &n)| n >= min_recurrence)
            .map(|(name, _)| name.as_str())
            .collect();
        if recurrent.is_empty() {
            continue;
        }

        let mut pairs: std::collections::HashSet<(&str, &str)> = std::collections::HashSet::new();
        for r in expanded
            .iter()
            .filter(|r| recurrent.contains(r.ship_name.as_str()))
        {
            pairs.insert((r.ship_name.as_str(), r.fandom_category.as_str()));
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for (_, category) in &pairs {
            *counts.entry(category).or_default() += 1;
        }
        let mut counts: Vec<(&str, usize)> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        let total: usize = counts.iter().map(|(_, c)| c).sum();

        println!(
            "\n--- Media Distribution for Ships Appearing in {min_recurrence}+ Years (Total Ships: {}) ---",
            recurrent.len()
        );
        for (category, count) in &counts {
            println!("{category:<16} {count:>5}  {}", percent(*count, total));
        }
    }
}

pub fn print_top_ship_by_year(records: &[ShipRecord]) {
    println!("\n### Rank 1 Ship Name for Each Year ###");
    // Corpus order is (year, rank), so rank-1 rows come out year-sorted.
    for r in records.iter().filter(|r| r.rank == 1) {
        println!("{}: {}", r.year, r.ship_name);
    }
}

pub fn print_recurrence_report(records: &[ShipRecord]) {
    println!("\n### Ship Recurrence ###");

    let rec = recurrence(records);
    let mut recurrent: Vec<(&String, &usize)> = rec.iter().filter(|&(_, &n)| n >= 2).collect();

    println!("Total Unique Ships in Dataset: {}", rec.len());
    println!("Ships Appearing in 2+ Years (Recurrent): {}", recurrent.len());

    recurrent.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    println!("\nTop 20 Most Recurrent Ships:");
    for (name, years) in recurrent.iter().take(20) {
        println!("{name:<40} {years} years");
    }
}

/// Weighted-rank popularity at each recurrence tier: among ships that
/// charted in N+ years, the lowest rank sums are the most consistently
/// popular ships.
pub fn print_weighted_rank_popularity(records: &[ShipRecord]) {
    println!("\n### Most Popular Ships Overall (Weighted Rank) ###");

    let rec = recurrence(records);
    let max_years = distinct_years(records).len();

    for min_recurrence in 2..=max_years {
        let eligible = rec.values().filter(|&&n| n >= min_recurrence).count();
        println!("\nAnalyzing {eligible} ships that appeared in {min_recurrence}+ years.");

        let top = top_ships_by_weighted_rank(records, min_recurrence, 10);
        if top.is_empty() {
            println!("No ships meet this recurrence threshold.");
            continue;
        }
        println!("Top 10 Most Consistently Popular Ships:");
        for (name, rank_sum) in &top {
            println!("{name:<40} {rank_sum}");
        }
    }
}

/// The full report, in the order the sections read best.
pub fn print_report(records: &[ShipRecord]) {
    print_preview(records);
    print_unique_ships_by_year(records);
    print_overall_media_popularity(records);
    print_media_longevity(records);
    print_yearly_media_popularity(records);
    print_yearly_fandom_popularity(records);
    print_peak_amount(records);
    print_top_ship_by_year(records);
    print_recurrence_report(records);
    print_weighted_rank_popularity(records);
}

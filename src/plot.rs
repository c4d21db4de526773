use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::path::Path;

use crate::table::{distinct_years, pivot_ranks, top_ships_by_weighted_rank};
use crate::types::ShipRecord;

pub type PlotResult = Result<(), Box<dyn std::error::Error>>;

const CHART_SIZE: (u32, u32) = (1800, 1000);

// Rank-over-time line charts, one polyline per ship. The y-axis is
// inverted (rank 1 at the top) by giving plotters a reversed range,
// and clipped to a view window so the crowded lower ranks don't
// flatten the interesting top of the chart. A ship missing a year gets
// a broken line there, never an interpolated one.

/// Render one chart family member to `ship_trends_<suffix>.png`.
///
/// `max_visible_rank` is the y-axis cutoff; `threshold` places the
/// dashed reference line at threshold + 0.5.
fn plot_ship_series(
    records: &[ShipRecord],
    out_dir: &Path,
    title_suffix: &str,
    filename_suffix: &str,
    max_visible_rank: u32,
    threshold: u32,
) -> PlotResult {
    let pivot = pivot_ranks(records);
    let years = distinct_years(records);

    if pivot.is_empty() || years.is_empty() {
        println!("Warning: No data to plot for this series ({title_suffix}).");
        return Ok(());
    }

    let x_min = *years.first().unwrap() as f64 - 0.5;
    let x_max = *years.last().unwrap() as f64 + 0.5;

    let out_path = out_dir.join(format!("ship_trends_{filename_suffix}.png"));
    let root = BitMapBackend::new(&out_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Popularity Rank Over Time: {title_suffix} (View Limited to Ranks 1-{max_visible_rank})"
            ),
            ("sans-serif", 28),
        )
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        // Reversed y range puts rank 1 at the top.
        .build_cartesian_2d(x_min..x_max, (max_visible_rank as f64 + 0.5)..0.5)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Rank (Lower is More Popular)")
        .x_labels(years.len())
        .x_label_formatter(&|x| format!("{}", x.round() as i64))
        .y_label_formatter(&|y| format!("{}", y.round() as i64))
        .light_line_style(TRANSPARENT)
        .draw()?;

    for (i, (ship, series)) in pivot.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();

        // One sub-series per contiguous run of charted years, so gaps
        // break the line.
        for run in contiguous_runs(&years, series) {
            if run.len() > 1 {
                chart.draw_series(LineSeries::new(
                    run.iter().copied(),
                    color.mix(0.7).stroke_width(2),
                ))?;
            }
            chart.draw_series(
                run.iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
            )?;
        }

        // Label every visible point with the ship name, nudged right.
        let label_style = ("sans-serif", 12).into_font().color(&color.mix(0.8));
        for (&year, &rank) in series {
            if rank <= max_visible_rank {
                chart.draw_series(std::iter::once(Text::new(
                    ship.clone(),
                    (year as f64 + 0.05, rank as f64),
                    label_style.clone(),
                )))?;
            }
        }
    }

    // Reference line at the top-N boundary.
    let boundary = threshold as f64 + 0.5;
    if boundary < max_visible_rank as f64 + 0.5 {
        chart.draw_series(DashedLineSeries::new(
            [(x_min, boundary), (x_max, boundary)],
            8,
            5,
            BLACK.mix(0.8).stroke_width(1),
        ))?;
    }

    root.present()?;
    println!("Plot saved to '{}'", out_path.display());
    Ok(())
}

/// Split a ship's (year → rank) series into runs of years that are
/// consecutive in the corpus year list.
fn contiguous_runs(
    years: &[u16],
    series: &std::collections::BTreeMap<u16, u32>,
) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for &year in years {
        match series.get(&year) {
            Some(&rank) => current.push((year as f64, rank as f64)),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Every ship in the corpus, view clipped to ranks 1..=12 so ships
/// that dip below the window fall off the edge of the chart.
pub fn plot_ships_dip_to_edge(records: &[ShipRecord], out_dir: &Path, threshold: u32) -> PlotResult {
    plot_ship_series(records, out_dir, "All Ships", "all_dip_to_edge", 12, threshold)
}

/// One chart per recurrence tier: the 10 ships with the lowest rank
/// sums among those charting in N+ distinct years, for N from 2 up to
/// the corpus year count.
pub fn plot_top_long_term_ships(
    records: &[ShipRecord],
    out_dir: &Path,
    threshold: u32,
) -> PlotResult {
    println!("\n--- Generating Top 10 Consistently Popular Ships Plots ---");

    let max_years = distinct_years(records).len();

    for min_recurrence in 2..=max_years {
        let top = top_ships_by_weighted_rank(records, min_recurrence, 10);
        if top.is_empty() {
            continue;
        }

        let names: std::collections::HashSet<&str> =
            top.iter().map(|(name, _)| name.as_str()).collect();
        let subset: Vec<ShipRecord> = records
            .iter()
            .filter(|r| names.contains(r.ship_name.as_str()))
            .cloned()
            .collect();

        let data_max = subset.iter().map(|r| r.rank).max().unwrap_or(0);
        let max_visible = data_max.max(20) + 2;

        plot_ship_series(
            &subset,
            out_dir,
            &format!("Top 10 Ships ({min_recurrence}+ Years)"),
            &format!("top10_recurrence_{min_recurrence}plus_years"),
            max_visible,
            threshold,
        )?;
    }

    Ok(())
}

/// Render the whole chart family. A chart that fails to render is
/// reported and skipped; the rest still come out.
pub fn render_all(records: &[ShipRecord], out_dir: &Path, threshold: u32) {
    if let Err(e) = plot_ships_dip_to_edge(records, out_dir, threshold) {
        eprintln!("ERROR: dip-to-edge chart failed: {e}");
    }
    if let Err(e) = plot_top_long_term_ships(records, out_dir, threshold) {
        eprintln!("ERROR: long-term ship charts failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_contiguous_runs_break_on_gap() {
        let years = vec![2019, 2020, 2021, 2022];
        let mut series = BTreeMap::new();
        series.insert(2019, 3);
        series.insert(2020, 5);
        series.insert(2022, 1);

        let runs = contiguous_runs(&years, &series);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], vec![(2019.0, 3.0), (2020.0, 5.0)]);
        assert_eq!(runs[1], vec![(2022.0, 1.0)]);
    }

    #[test]
    fn test_contiguous_runs_full_series() {
        let years = vec![2021, 2022];
        let mut series = BTreeMap::new();
        series.insert(2021, 1);
        series.insert(2022, 2);

        let runs = contiguous_runs(&years, &series);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 2);
    }
}

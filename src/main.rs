mod categories;
mod export;
mod parser;
mod plot;
mod scanner;
mod stats;
mod table;
mod types;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use categories::CategoryMap;
use types::ShipRecord;

const OUTPUT_FILENAME: &str = "shipping_data.csv";
const TOP_SHIP_OUTPUT_FILENAME: &str = "top_10_ships_only.csv";

#[derive(Parser)]
#[command(
    name = "ship_trends",
    about = "Yearly fanwork ship-ranking trend analyzer"
)]
struct Cli {
    /// Directory holding the YYYY_data.txt year files
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Directory for CSV exports and rendered charts
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Rank threshold for the filtered export and the chart reference line
    #[arg(long, default_value_t = 10)]
    top_rank: u32,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Parse the raw year files and write the corpus CSVs
    Process,
    /// Print the descriptive report from the corpus CSV
    Stats,
    /// Render rank-over-time charts from the corpus CSV
    Plot,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Process) => run_process(&cli),
        Some(Command::Stats) => run_stats(&cli),
        Some(Command::Plot) => run_plot(&cli),
        // Default: full pipeline, process → stats → plots
        None => run_full(&cli),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  PROCESS: raw text → corpus → CSV exports
// ═══════════════════════════════════════════════════════════════════════

fn run_process(cli: &Cli) {
    println!("--- Starting Data Processing ---");

    let categories = CategoryMap::builtin();
    let corpus = scanner::build_corpus(&cli.dir, &categories);

    for warning in &corpus.warnings {
        eprintln!("{warning}");
    }

    if corpus.records.is_empty() {
        eprintln!(
            "ERROR: No data was successfully processed. Check your data file names \
             (e.g. 2022_data.txt) in '{}'.",
            cli.dir.display()
        );
        std::process::exit(1);
    }

    if let Err(e) = std::fs::create_dir_all(&cli.out_dir) {
        eprintln!("ERROR: Cannot create output dir {}: {e}", cli.out_dir.display());
        std::process::exit(1);
    }

    // Primary export. Failure is reported; the filtered export still
    // gets its chance.
    let primary = cli.out_dir.join(OUTPUT_FILENAME);
    match export::write_corpus(&primary, &corpus.records) {
        Ok(n) => println!("Successfully wrote {n} rows of combined data to '{}'", primary.display()),
        Err(e) => eprintln!("An error occurred while writing '{}': {e}", primary.display()),
    }

    // Filtered export: every year of any ship that hit the top N once.
    let filtered = table::filter_top_ships(&corpus.records, cli.top_rank);
    let top_path = cli.out_dir.join(TOP_SHIP_OUTPUT_FILENAME);
    match export::write_corpus(&top_path, &filtered) {
        Ok(n) => println!(
            "Filtered data exported: {n} rows for ships that achieved Rank {} or better, saved to '{}'",
            cli.top_rank,
            top_path.display()
        ),
        Err(e) => eprintln!("ERROR: Could not write filtered CSV '{}': {e}", top_path.display()),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  STATS / PLOT: read back the exported corpus
// ═══════════════════════════════════════════════════════════════════════

fn load_corpus_or_exit(cli: &Cli) -> Vec<ShipRecord> {
    let path = cli.out_dir.join(OUTPUT_FILENAME);
    match export::load_corpus(&path) {
        Ok(records) if !records.is_empty() => {
            println!("Data loaded successfully. (Num of rows: {})", records.len());
            records
        }
        Ok(_) => {
            eprintln!("ERROR: '{}' holds no rows.", path.display());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("ERROR: Could not load CSV file '{}': {e}", path.display());
            eprintln!("Run the process step first to generate it.");
            std::process::exit(1);
        }
    }
}

fn run_stats(cli: &Cli) {
    let records = load_corpus_or_exit(cli);
    stats::print_report(&records);
    println!("\n--- Analysis Finished. ---");
}

fn run_plot(cli: &Cli) {
    let records = load_corpus_or_exit(cli);
    println!("\n--- GRAPH SECTION STARTED ---");
    plot::render_all(&records, &cli.out_dir, cli.top_rank);
    println!("--- GRAPH SECTION FINISHED ---");
}

fn run_full(cli: &Cli) {
    run_process(cli);

    // Reload from the CSV rather than reusing the in-memory corpus, so
    // the analysis always reflects exactly what was exported.
    let records = load_corpus_or_exit(cli);
    stats::print_report(&records);
    println!("\n--- Analysis Finished. ---");

    println!("\n--- GRAPH SECTION STARTED ---");
    plot::render_all(&records, &cli.out_dir, cli.top_rank);
    println!("--- GRAPH SECTION FINISHED ---");

    println!("\n--- COMPLETED ---");
}

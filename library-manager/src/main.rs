use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use colored::Colorize;
use library_manager::{
    BorrowOutcome, FeePolicy, LibraryError, LibraryManager, LibrarySnapshot, LogNotifier,
    ReturnOutcome, Result, UserDirectory,
};

/// Bestseller and premium flags for each fee table column
const FEE_CATEGORIES: [(bool, bool); 4] = [(false, false), (true, false), (false, true), (true, true)];

/// Command-line arguments for the library manager demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose output with every inventory change logged
    #[arg(short, long)]
    verbose: bool,

    /// JSON file with late fee pricing rules
    #[arg(long, value_name = "PATH")]
    fee_policy: Option<PathBuf>,

    /// JSON snapshot to seed the inventory and loans with
    #[arg(long, value_name = "PATH")]
    seed: Option<PathBuf>,

    /// Overdue day counts to price in the late fee table
    #[arg(long, num_args = 1.., allow_negative_numbers = true, default_values_t = [0, 1, 10, 13, 30])]
    days: Vec<i64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    println!("{}", "Library Manager Demonstration".green().bold());
    println!("=====================================\n");

    let snapshot = match &args.seed {
        Some(path) => LibrarySnapshot::from_json_str(&read_file(path)?)?,
        None => demo_snapshot(),
    };
    let fee_policy = match &args.fee_policy {
        Some(path) => FeePolicy::from_json_str(&read_file(path)?)?,
        None => FeePolicy::default(),
    };

    let directory: UserDirectory = ["alice", "bob"].into_iter().collect();
    let mut library =
        LibraryManager::from_snapshot(snapshot, Box::new(directory), Box::new(LogNotifier))
            .with_fee_policy(fee_policy);

    println!("Initial inventory: {library}");
    circulation_demo(&mut library);
    println!("\nFinal inventory: {library}");
    print_inventory(&library);

    late_fee_table(&library, &args.days);

    println!("\n{}", "Demonstration complete!".green().bold());
    Ok(())
}

/// Read a configuration file into memory
fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| LibraryError::Config(format!("failed to read {}: {e}", path.display())))
}

/// Inventory used when no seed file is given
fn demo_snapshot() -> LibrarySnapshot {
    LibrarySnapshot::new()
        .with_copies("the-rust-book", 2)
        .with_copies("dune", 1)
        .with_copies("sicp", 0)
        .with_loan("sicp", "bob")
}

/// Walk through borrows and returns covering every outcome
fn circulation_demo(library: &mut LibraryManager) {
    println!("{}", "\nRunning circulation scenario...".yellow().bold());

    report_borrow("alice", "dune", library.checkout("dune", "alice"));
    report_borrow("carol", "the-rust-book", library.checkout("the-rust-book", "carol"));
    report_borrow("bob", "dune", library.checkout("dune", "bob"));
    report_return("alice", "sicp", library.check_in("sicp", "alice"));
    report_return("bob", "sicp", library.check_in("sicp", "bob"));
    report_return("bob", "dune", library.check_in("dune", "bob"));
    report_return("alice", "dune", library.check_in("dune", "alice"));

    library.add_book("the-rust-book", 3);
    report_borrow("bob", "the-rust-book", library.checkout("the-rust-book", "bob"));
}

/// Print the outcome of a borrow attempt
fn report_borrow(user: &str, book: &str, outcome: BorrowOutcome) {
    let line = format!("{user} -> borrow {book}: {}", outcome.get_description());
    if outcome.is_borrowed() {
        println!("  {}", line.green());
    } else {
        println!("  {}", line.red());
    }
}

/// Print the outcome of a return attempt
fn report_return(user: &str, book: &str, outcome: ReturnOutcome) {
    let line = format!("{user} -> return {book}: {}", outcome.get_description());
    if outcome.is_returned() {
        println!("  {}", line.green());
    } else {
        println!("  {}", line.red());
    }
}

/// Print shelf counts and loans
fn print_inventory(library: &LibraryManager) {
    println!("{}", "\nShelf:".yellow().bold());
    for (book, copies) in library.titles() {
        let holder = library.borrower_of(book).unwrap_or("-");
        println!("  {book:<16} {copies:>3} copies   held by {holder}");
    }
}

/// Price every requested overdue period for each title category
fn late_fee_table(library: &LibraryManager, days: &[i64]) {
    println!("{}", "\nLate fees:".yellow().bold());
    println!("  {:>6} {:>10} {:>10} {:>10} {:>10}", "days", "regular", "bestseller", "premium", "both");
    for &overdue_days in days {
        let row: Result<Vec<String>> = FEE_CATEGORIES
            .into_iter()
            .map(|(bestseller, premium)| {
                library
                    .calculate_dynamic_late_fee(overdue_days, bestseller, premium)
                    .map(|fee| format!("{fee:>10}"))
            })
            .collect();
        match row {
            Ok(cells) => println!("  {overdue_days:>6} {}", cells.join(" ")),
            Err(e) => println!("  {overdue_days:>6} {}", e.to_string().red()),
        }
    }
}

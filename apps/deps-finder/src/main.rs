use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use deps_finder_usage::{Config, OutputFormat};
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cfg = Config::parse();
    debug!("Parsed CLI arguments: {:?}", cfg);

    let start = Instant::now();
    let num_threads = rayon::current_num_threads();
    info!("Running dependency usage check (using {} threads)", num_threads);

    let result = deps_finder_usage::run_usage_check(&cfg)?;
    debug!("Found {} issues", result.analysis.total_issues);

    let elapsed_ms = start.elapsed().as_millis();
    let format = cfg.format();
    deps_finder_usage::print_report(&mut stdout, &result, format)?;

    // JSON output stays machine-readable
    if format == OutputFormat::Text {
        writeln!(
            stdout,
            "\n{} Finished in {}ms on {} files (using {} threads).",
            "●".bright_blue(),
            elapsed_ms.to_string().cyan(),
            result.files_analyzed.to_string().cyan(),
            num_threads.to_string().cyan()
        )?;
    }
    stdout.flush()?;

    if result.analysis.has_issues() {
        // Non-zero exit to fail CI
        std::process::exit(1);
    }

    Ok(())
}

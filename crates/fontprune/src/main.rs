mod logging;

use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use eyre::{Result, WrapErr, eyre};
use facet::Facet;
use facet_args as args;
use fontprune::{
    NONE_ROW, PruneOptions, PruneOutcome, ResolvedConfig, prune_document, render_log_entry,
    triplet_rows, workspace,
};
use owo_colors::OwoColorize;
use tracing::info;

/// Command-line arguments
#[derive(Facet, Debug)]
struct Args {
    /// Directory containing the HTML file (default: current directory)
    #[facet(args::positional, default)]
    dir: Option<String>,

    /// Append a <name>.fonts.log entry describing the run
    #[facet(args::named, args::short = 'l')]
    log: bool,

    /// Family used in the injected mso-font-alt property
    #[facet(args::named, default)]
    fallback: Option<String>,

    /// Print the report without writing any file
    #[facet(args::named, args::short = 'n')]
    dry_run: bool,

    /// Never pick an earlier *.processed.html output as input
    #[facet(args::named)]
    skip_processed: bool,
}

fn print_usage() {
    eprintln!(
        "{} - remove unused @font-face rules from an HTML e-mail\n",
        "fontprune".cyan().bold()
    );
    eprintln!("{}", "USAGE:".yellow());
    eprintln!("    fontprune [dir] [OPTIONS]\n");
    eprintln!("{}", "OPTIONS:".yellow());
    eprintln!("    [dir]              Directory to search for the first .html file (default: .)");
    eprintln!("    -l, --log          Append <name>.fonts.log");
    eprintln!("    --fallback <name>  Family for mso-font-alt (default: Arial)");
    eprintln!("    -n, --dry-run      Report only, write nothing");
    eprintln!("    --skip-processed   Ignore earlier *.processed.html outputs");
}

fn parse_args() -> Result<Args> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .build(),
        )
    }))
    .ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        std::process::exit(0);
    }

    let args_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    facet_args::from_slice(&args_refs).map_err(|e| {
        eprintln!("{:?}", miette::Report::new(e));
        eyre!("Failed to parse arguments")
    })
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            print_usage();
            eprintln!("{}: {}", "error".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    logging::init_standard_tracing();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e:#}", "error".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let dir = Utf8PathBuf::from(args.dir.unwrap_or_else(|| ".".to_string()));

    let config = ResolvedConfig::discover_from(&dir).wrap_err("Failed to load configuration")?;
    if let Some(source) = &config.source {
        info!(%source, "using configuration file");
    }
    let fallback_font = args.fallback.unwrap_or(config.fallback_font);
    let write_log = args.log || config.log;
    let skip_processed = args.skip_processed || config.skip_processed;

    let Some(input) = workspace::find_first_html(&dir, skip_processed)
        .wrap_err_with(|| format!("Failed to list {dir}"))?
    else {
        info!(%dir, "no .html file found");
        println!("No .html file found in {dir}");
        return Ok(());
    };

    let html = workspace::read_document(&input).wrap_err_with(|| format!("Failed to read {input}"))?;
    let outcome = prune_document(&html, &PruneOptions { fallback_font });
    let output = workspace::processed_path(&input);
    if !outcome.changed(&html) {
        info!(%input, "document already minimal, output is an unchanged copy");
    }

    if !args.dry_run {
        workspace::write_atomic(&output, &outcome.html)
            .wrap_err_with(|| format!("Failed to write {output}"))?;

        if write_log {
            let log = workspace::log_path(&input);
            let name = input.file_name().unwrap_or(input.as_str());
            let entry = render_log_entry(name, &outcome, chrono::Local::now());
            workspace::append_log(&log, &entry).wrap_err_with(|| format!("Failed to write {log}"))?;
            println!("{} {}", "Font log appended to:".dimmed(), log);
        }
    }

    print_report(&outcome, &output, args.dry_run);
    Ok(())
}

fn print_report(outcome: &PruneOutcome, output: &Utf8Path, dry_run: bool) {
    println!();
    println!("{}", "@font-face kept (family | weight | style):".green().bold());
    let kept = triplet_rows(&outcome.kept);
    if kept.is_empty() {
        println!("  {}", NONE_ROW.dimmed());
    }
    for row in &kept {
        println!("  - {row}");
    }

    if !outcome.removed.is_empty() {
        println!();
        println!("{}", "@font-face removed:".yellow().bold());
        for row in triplet_rows(&outcome.removed) {
            println!("  - {row}");
        }
    }

    println!();
    let name = output.file_name().unwrap_or(output.as_str());
    if dry_run {
        println!("{} {}", "Dry run, would write:".cyan(), name);
    } else {
        println!("{} {}", "Processed file saved as:".cyan(), name.bold());
    }
    println!();
}

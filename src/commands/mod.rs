pub mod explain;
pub mod format;

use anyhow::Result;
use crate::classify::DirectiveRule;
use crate::cli::{setup, Cli, OutputFormat};
use crate::config::{load_config, load_config_from};
use crate::formatting::{Formatter, FormattingConfig, Status};
use crate::io::collect_targets;
use self::format::{format_files, FileOutcome, FileReport, WriteMode};

pub const USAGE: &str = "Usage: regionsort <path-to-script.cs>";

/// Run the CLI; the returned value is the process exit code.
///
/// Per-file problems (missing paths, unreadable or unparsable files) are
/// reported and never abort the run.
pub fn run(cli: Cli) -> Result<i32> {
    if cli.paths.is_empty() {
        println!("{}", USAGE);
        return Ok(0);
    }

    let formatter = Formatter::new(if cli.plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    });

    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config(),
    };

    let mut options = config.rewrite_options();
    if cli.recurse_nested {
        options.recurse_nested = true;
    }
    if cli.strict_directives {
        options.directive_rule = DirectiveRule::Strict;
    }

    let mode = if cli.check {
        WriteMode::Check
    } else if cli.stdout {
        WriteMode::Stdout
    } else {
        WriteMode::InPlace
    };
    // Keep stdout clean when it carries source text or JSON.
    let status_to_stderr =
        mode == WriteMode::Stdout || (cli.explain && cli.format == OutputFormat::Json);
    let emit = |line: String| {
        if status_to_stderr {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    };

    let targets = collect_targets(&cli.paths, &config.files.ignore)?;
    for missing in &targets.missing {
        emit(formatter.status(Status::NotFound, &missing.display().to_string()));
    }

    setup::configure_thread_pool(cli.jobs);
    let results = format_files(&targets.files, &options, mode);

    let mut reports: Vec<&FileReport> = Vec::with_capacity(results.len());
    let mut would_reformat = false;
    for (path, result) in &results {
        let shown = path.display().to_string();
        match result {
            Ok(report) => {
                match &report.outcome {
                    FileOutcome::Formatted => emit(formatter.status(Status::Formatted, &shown)),
                    FileOutcome::Unchanged => emit(formatter.status(Status::Unchanged, &shown)),
                    FileOutcome::WouldReformat => {
                        would_reformat = true;
                        emit(formatter.status(Status::WouldReformat, &shown));
                    }
                    FileOutcome::Printed(text) => print!("{}", text),
                }
                reports.push(report);
            }
            Err(e) => {
                log::debug!("Failed to process {}: {:?}", shown, e);
                emit(formatter.status(Status::Failed, &format!("{:#}", e)));
            }
        }
    }

    if cli.explain {
        match cli.format {
            OutputFormat::Json => println!("{}", explain::render_json(&reports)?),
            OutputFormat::Terminal => print!("{}", explain::render_terminal(&reports, &formatter)),
        }
    }

    Ok(if cli.check && would_reformat { 1 } else { 0 })
}

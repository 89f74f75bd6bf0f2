//! Main execution logic for the formsift CLI.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use formsift_filter::{
    parse_filters, parse_responses, Filter, FilterClause, FormResponses, TracingSink,
};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::fmt;

use crate::args::{Cli, Command, FilterArgs, LogLevel};

/// Initialize logging.
pub fn init_logging(level: LogLevel) -> Result<()> {
    let level: Level = level.into();

    fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr) // stdout carries the filtered document
        .init();

    Ok(())
}

/// Execute the selected subcommand, writing its result to `out`.
pub fn execute(cli: Cli, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Command::Filter(args) => {
            let page = filter(&args)?;
            let rendered = render(&page, args.compact)?;
            writeln!(out, "{rendered}").context("failed to write output")?;

            if let (Some(dir), Some(form_id)) = (&args.save_dir, &args.form_id) {
                let path = save(dir, form_id, &rendered)?;
                info!(path = %path.display(), "saved filtered responses");
            }
            Ok(())
        }
        Command::CheckFilters { filters } => {
            let clauses = check_filters(&filters)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&clauses)?)
                .context("failed to write output")?;
            Ok(())
        }
    }
}

/// Loads the input document and keeps the submissions the filters select.
pub fn filter(args: &FilterArgs) -> Result<FormResponses> {
    // Filters are checked first so a bad clause list is reported even when
    // the input is also broken.
    let clauses = parse_filters(args.filters.as_deref().unwrap_or_default())?;
    let filter = Filter::from_clauses(clauses);

    let input = read_input(args)?;
    let page = parse_responses(&input)?;
    debug!(
        submissions = page.responses.len(),
        clauses = filter.clauses().len(),
        "evaluating filters"
    );

    let mut sink = TracingSink;
    let kept: Vec<_> = filter
        .apply_with(&page.responses, &mut sink)
        .into_iter()
        .cloned()
        .collect();
    info!(
        kept = kept.len(),
        total = page.responses.len(),
        "filtered submissions"
    );

    Ok(FormResponses::single_page(kept))
}

/// Parses a clause list, warning about each condition that will never
/// exclude anything.
pub fn check_filters(filters: &str) -> Result<Vec<FilterClause>> {
    let filter = Filter::from_clauses(parse_filters(filters)?);
    for clause in filter.unrecognized() {
        warn!(
            question_id = %clause.id,
            condition = %clause.condition,
            "unrecognized filter condition; clause will not filter anything out"
        );
    }
    Ok(filter.clauses().to_vec())
}

/// Serializes a page, pretty-printed unless `compact`.
pub fn render(page: &FormResponses, compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(page)?
    } else {
        serde_json::to_string_pretty(page)?
    };
    Ok(rendered)
}

/// Writes `rendered` to `<dir>/data-<form_id>.json`, creating `dir` if needed.
pub fn save(dir: &Path, form_id: &str, rendered: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))?;
    let path = dir.join(format!("data-{form_id}.json"));
    fs::write(&path, rendered)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

fn read_input(args: &FilterArgs) -> Result<String> {
    if args.reads_stdin() {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read submissions from stdin")?;
        return Ok(input);
    }
    fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))
}

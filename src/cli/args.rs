use crate::constants::verbosity;
use crate::error::{Error, Result};
use crate::store::Criteria;
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use serde_json::Value;
use std::path::PathBuf;

/// Preview partial views and selection pairs against a record fixture.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render every matching record as one sequence.
    Render(RenderArgs),
    /// Print key → rendered view pairs as JSON.
    Pairs(PairsArgs),
}

/// Where records and views come from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// JSON or YAML fixture mapping type names to records.
    #[arg(value_name = "FIXTURE")]
    pub fixture: PathBuf,

    /// Record type to query, e.g. `Course`.
    #[arg(value_name = "TYPE")]
    pub type_name: String,

    /// Filter as `field=value` or `field=v1,v2` (repeatable).
    #[arg(short = 'w', long = "where", value_name = "FIELD=VALUES")]
    pub filters: Vec<String>,

    /// Sub-view to render instead of the default.
    #[arg(long)]
    pub view: Option<String>,

    /// Directory holding `partials.json`, `partials.yaml` or `partials.yml`.
    #[arg(short, long, value_name = "DIR")]
    pub config: Option<PathBuf>,

    /// Overrides the configured partials root.
    #[arg(short, long, value_name = "ROOT")]
    pub partials: Option<String>,
}

impl SourceArgs {
    /// Parses `--where` filters into query criteria.
    pub fn criteria(&self) -> Result<Criteria> {
        let mut criteria = Criteria::new();
        for filter in &self.filters {
            let (field, values) = filter.split_once('=').ok_or_else(|| {
                Error::ArgumentError(format!("filter '{filter}' must look like field=value"))
            })?;
            let field = field.trim();
            if field.is_empty() {
                return Err(Error::ArgumentError(format!("filter '{filter}' names no field")));
            }
            let operand = if values.contains(',') {
                Value::Array(values.split(',').map(|v| Value::from(v.trim())).collect())
            } else {
                Value::from(values.trim())
            };
            criteria.insert(field.to_string(), operand);
        }
        Ok(criteria)
    }
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args, Debug, Clone)]
pub struct PairsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Record field used as the pair key.
    #[arg(short, long)]
    pub key: Option<String>,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_verbose_flags_to_log_filters() {
        assert_eq!(get_log_level_from_verbose(verbosity::OFF), LevelFilter::Error);
        assert_eq!(get_log_level_from_verbose(verbosity::INFO), LevelFilter::Info);
        assert_eq!(get_log_level_from_verbose(verbosity::DEBUG), LevelFilter::Debug);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE), LevelFilter::Trace);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE + 1), LevelFilter::Trace);
    }

    #[test]
    fn parses_pairs_command() {
        let cli = Cli::parse_from([
            "partials",
            "pairs",
            "courses.yaml",
            "Course",
            "--where",
            "status=OPEN,PENDING",
            "--view",
            "selector",
            "--key",
            "code",
            "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Pairs(args) = cli.command else {
            panic!("expected the pairs command");
        };
        assert_eq!(args.source.fixture, PathBuf::from("courses.yaml"));
        assert_eq!(args.source.type_name, "Course");
        assert_eq!(args.source.view.as_deref(), Some("selector"));
        assert_eq!(args.key.as_deref(), Some("code"));
        assert_eq!(
            Value::Object(args.source.criteria().unwrap()),
            json!({"status": ["OPEN", "PENDING"]})
        );
    }

    #[test]
    fn parses_render_command_with_scalar_filters() {
        let cli = Cli::parse_from(["partials", "render", "f.json", "Course", "-w", "id=5", "-w", "level=1"]);
        let Commands::Render(args) = cli.command else {
            panic!("expected the render command");
        };
        assert_eq!(Value::Object(args.source.criteria().unwrap()), json!({"id": "5", "level": "1"}));
    }

    #[test]
    fn rejects_malformed_filters() {
        let cli = Cli::parse_from(["partials", "render", "f.json", "Course", "-w", "status"]);
        let Commands::Render(args) = cli.command else {
            panic!("expected the render command");
        };
        assert!(matches!(args.source.criteria(), Err(Error::ArgumentError(_))));
    }
}

//! CLI argument definitions for the course activity loader.

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use cal_ingest::{DEFAULT_PAGE_SIZE, ORG_UNIT_MAPPING_TABLE};

/// Default API root.
pub const DEFAULT_API_URL: &str = "https://api-eu.hosted.exlibrisgroup.com";

#[derive(Parser)]
#[command(
    name = "cal",
    version,
    about = "Course Activity Loader - create teaching activities from course records",
    long_about = "Create research teaching activities from course records.\n\n\
                  Courses taught by members of a researcher set are matched against a\n\
                  mapping rule and submitted as activities, one call per instructor."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub service: ServiceArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include researcher identifiers in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

/// Service connection and settings location.
#[derive(Args, Clone)]
pub struct ServiceArgs {
    /// API root of the research and course services.
    #[arg(
        long = "api-url",
        env = "CAL_API_URL",
        default_value = DEFAULT_API_URL,
        global = true
    )]
    pub api_url: String,

    /// API key sent with every request.
    #[arg(long = "api-key", env = "CAL_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Settings file (default: the platform config directory).
    #[arg(long = "settings", value_name = "PATH", global = true)]
    pub settings: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Match courses against a rule and submit the activities.
    Run(RunArgs),

    /// Search researcher sets.
    Sets(SetsArgs),

    /// List, add or remove the mapping rules in the settings file.
    Rules(RulesArgs),
}

#[derive(Args)]
#[command(group(ArgGroup::new("selection").required(true).args(["set", "ids"])))]
#[command(group(ArgGroup::new("rule_source").required(true).args(["rule", "rule_json"])))]
pub struct RunArgs {
    /// Researcher set whose members are eligible.
    #[arg(long = "set", value_name = "SET_ID")]
    pub set: Option<String>,

    /// Eligible researcher identifiers, comma separated.
    #[arg(long = "ids", value_name = "IDS", value_delimiter = ',')]
    pub ids: Vec<String>,

    /// Name of a mapping rule from the settings file.
    #[arg(long = "rule", value_name = "NAME")]
    pub rule: Option<String>,

    /// Mapping rule given inline as JSON.
    #[arg(long = "rule-json", value_name = "JSON")]
    pub rule_json: Option<String>,

    /// Read courses from a JSON file instead of the course service.
    #[arg(long = "courses-json", value_name = "PATH")]
    pub courses_json: Option<PathBuf>,

    /// Records requested per page.
    #[arg(
        long = "page-size",
        value_name = "N",
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub page_size: usize,

    /// Mapping table translating processing units to organizational units.
    #[arg(long = "mapping-table", value_name = "NAME", default_value = ORG_UNIT_MAPPING_TABLE)]
    pub mapping_table: String,
}

#[derive(Args)]
pub struct SetsArgs {
    /// Only sets whose name contains this text.
    #[arg(long = "name", value_name = "TEXT")]
    pub name: Option<String>,
}

#[derive(Args)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub action: Option<RulesAction>,
}

#[derive(Subcommand)]
pub enum RulesAction {
    /// Add a rule, replacing any rule with the same name.
    Add {
        /// Mapping rule as JSON.
        #[arg(long = "json", value_name = "JSON")]
        json: String,
    },

    /// Remove a rule by name.
    Remove {
        #[arg(value_name = "NAME")]
        name: String,
    },
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("cal").chain(args.iter().copied()))
    }

    #[test]
    fn run_requires_a_selection() {
        assert!(parse(&["run", "--rule", "Teaching"]).is_err());
    }

    #[test]
    fn run_requires_a_rule() {
        assert!(parse(&["run", "--set", "SET1"]).is_err());
    }

    #[test]
    fn selections_are_exclusive() {
        assert!(parse(&["run", "--set", "SET1", "--ids", "R1", "--rule", "Teaching"]).is_err());
    }

    #[test]
    fn ids_split_on_commas() {
        let cli = parse(&["run", "--ids", "R1,R2", "--rule-json", "{}"]).expect("parse");
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.ids, vec!["R1".to_string(), "R2".to_string()]);
        assert_eq!(args.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(args.mapping_table, ORG_UNIT_MAPPING_TABLE);
    }

    #[test]
    fn rules_lists_without_an_action() {
        let cli = parse(&["rules"]).expect("parse");
        assert!(matches!(cli.command, Command::Rules(RulesArgs { action: None })));

        let cli = parse(&["rules", "remove", "Teaching"]).expect("parse");
        let Command::Rules(RulesArgs {
            action: Some(RulesAction::Remove { name }),
        }) = cli.command
        else {
            panic!("expected rules remove");
        };
        assert_eq!(name, "Teaching");
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(parse(&["run", "--set", "S", "--rule", "R", "--page-size", "0"]).is_err());
    }
}

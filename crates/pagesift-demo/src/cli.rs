//! Command-line interface of the `patrons` binary.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use pagesift::{PageRequest, PagerConfig, SearchCriteria, DEFAULT_PAGE_SIZE};

use crate::logging::init_logging;
use crate::seed::{self, DEFAULT_COUNT, DEFAULT_SEED};
use crate::service::PatronService;

/// Filter and page a seeded list of patron forms.
///
/// Criteria are a JSON object mapping field names to values, for example
/// '{"FirstName": ["j", "te"], "DateOfBirth": ["1980-01-01", null]}'.
#[derive(Debug, Parser)]
#[command(name = "patrons", version, about)]
pub struct Cli {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Records per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub size: u32,

    /// Largest accepted page size
    #[arg(long, value_name = "N")]
    pub max_size: Option<u32>,

    /// Search criteria as a JSON object
    #[arg(long, value_name = "JSON", conflicts_with = "criteria_file")]
    pub criteria: Option<String>,

    /// Read search criteria from a file ("-" for stdin)
    #[arg(long, value_name = "PATH")]
    pub criteria_file: Option<PathBuf>,

    /// Number of patrons to generate
    #[arg(long, default_value_t = DEFAULT_COUNT)]
    pub count: usize,

    /// Seed for the generated dataset
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Pretty-print the response
    #[arg(long)]
    pub pretty: bool,

    /// Log skipped criteria (-v) or everything (-vv) to stderr
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    fn criteria(&self) -> Result<SearchCriteria> {
        let text = match (&self.criteria, &self.criteria_file) {
            (Some(json), _) => json.clone(),
            (None, Some(path)) if path.as_os_str() == "-" => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read criteria from stdin")?;
                text
            }
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("failed to read criteria file {}", path.display()))?,
            (None, None) => return Ok(SearchCriteria::new()),
        };

        if text.trim().is_empty() {
            return Ok(SearchCriteria::new());
        }
        Ok(SearchCriteria::from_json_str(&text)?)
    }

    fn config(&self) -> PagerConfig {
        PagerConfig {
            max_page_size: self.max_size,
            ..PagerConfig::default()
        }
    }
}

/// Parses arguments, runs the search and prints the response.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let criteria = cli.criteria()?;
    let service = PatronService::with_config(seed::generate(cli.count, cli.seed), cli.config())?;
    let request = PageRequest::new(cli.page, cli.size);

    let response = service.filter(&criteria, request)?;

    let mut stdout = io::stdout().lock();
    if cli.pretty {
        serde_json::to_writer_pretty(&mut stdout, &response)?;
    } else {
        serde_json::to_writer(&mut stdout, &response)?;
    }
    writeln!(stdout)?;
    Ok(())
}

use crate::client::RedditClient;
use crate::models::{CommandOutput, Envelope, Sort, TimeRange};
use crate::operations::apps::{AppsOperation, AppsOptions};
use crate::operations::comments::{CommentsOperation, CommentsOptions};
use crate::operations::search::{SearchOperation, SearchOptions};
use crate::operations::search_all::{SearchAllOperation, SearchAllOptions};
use clap::error::ErrorKind;
use clap::{Args, Parser};
use log::error;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "reddit-researcher",
    version = "1.0",
    about = "Search Reddit's public JSON endpoints and print the results as JSON.",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Search a single subreddit.
    /// Requires --subreddit and --query.
    Search(Flags),

    /// Fetch a post and its comment tree.
    /// Requires --url.
    Comments(Flags),

    /// Search every Shopify research subreddit, one after another.
    /// Requires --query.
    SearchAll(Flags),

    /// Look for app recommendations in a category on r/shopify and r/ecommerce.
    /// Requires --category.
    Apps(Flags),
}

/// Flags shared by every command. Each command validates the ones it needs
/// so a missing value is reported in the JSON envelope.
#[derive(Args, Debug, Clone, Default)]
pub struct Flags {
    #[arg(long, help = "Subreddit name (search)")]
    pub subreddit: Option<String>,

    #[arg(long, help = "Search query (search, search-all)")]
    pub query: Option<String>,

    #[arg(long, help = "Reddit post URL (comments)")]
    pub url: Option<String>,

    #[arg(long, help = "App category (apps)")]
    pub category: Option<String>,

    #[arg(long, value_enum, help = "Sort order [default: relevance]")]
    pub sort: Option<Sort>,

    #[arg(long, value_enum, help = "Time window [default: year]")]
    pub time: Option<TimeRange>,

    #[arg(long, help = "Maximum results per request")]
    pub limit: Option<u32>,

    #[arg(long, help = "Also write the JSON result to this file")]
    pub output: Option<PathBuf>,
}

impl Commands {
    pub fn flags(&self) -> &Flags {
        match self {
            Commands::Search(flags)
            | Commands::Comments(flags)
            | Commands::SearchAll(flags)
            | Commands::Apps(flags) => flags,
        }
    }
}

/// How a command-line parse failure is reported.
#[derive(Debug)]
pub enum ParseFailure {
    /// Print clap's usage text to stderr and exit with this code
    Usage(i32),
    /// Print the envelope to stdout like any other failed command
    Envelope(Envelope),
}

/// Help, version and missing or unknown commands stay usage errors. A bad
/// or missing flag value is reported through the JSON envelope.
pub fn parse_failure(err: &clap::Error) -> ParseFailure {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ParseFailure::Usage(0),
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        | ErrorKind::MissingSubcommand
        | ErrorKind::InvalidSubcommand => ParseFailure::Usage(1),
        _ => ParseFailure::Envelope(Envelope::failure(err.to_string().trim_end())),
    }
}

/// Run a parsed command. Every outcome, including validation and network
/// failures, is folded into the envelope.
pub async fn execute(command: &Commands, client: &RedditClient) -> Envelope {
    let flags = command.flags().clone();
    let sort = flags.sort.unwrap_or_default();
    let time = flags.time.unwrap_or_default();

    let result = match command {
        Commands::Search(_) => {
            let options = SearchOptions {
                subreddit: flags.subreddit,
                query: flags.query,
                sort,
                time,
                limit: flags.limit,
            };
            SearchOperation::new(options, client.clone())
                .execute()
                .await
                .map(CommandOutput::Search)
        }
        Commands::Comments(_) => {
            let options = CommentsOptions {
                url: flags.url,
                limit: flags.limit,
            };
            CommentsOperation::new(options, client.clone())
                .execute()
                .await
                .map(CommandOutput::Comments)
        }
        Commands::SearchAll(_) => {
            let options = SearchAllOptions {
                query: flags.query,
                sort,
                time,
                limit: flags.limit,
            };
            SearchAllOperation::new(options, client.clone())
                .execute()
                .await
                .map(CommandOutput::SearchAll)
        }
        Commands::Apps(_) => {
            let options = AppsOptions {
                category: flags.category,
                sort,
                time,
                limit: flags.limit,
            };
            AppsOperation::new(options, client.clone())
                .execute()
                .await
                .map(CommandOutput::Apps)
        }
    };

    match result {
        Ok(data) => Envelope::success(data),
        Err(err) => {
            error!("{}", err);
            Envelope::failure(err.to_string())
        }
    }
}

/// Persist the rendered envelope alongside stdout.
pub fn write_output(path: &Path, json: &str) -> std::io::Result<()> {
    std::fs::write(path, format!("{}\n", json))
}

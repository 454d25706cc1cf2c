mod commands;

use album_catalog_core::SortOrder;
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{Shell, generate};
use commands::Session;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "album-catalog")]
#[command(version, about = "Catalog of shared photo albums", long_about = None)]
struct Cli {
    /// Data directory holding config.toml and the album store
    #[arg(long, global = true, env = "ALBUM_CATALOG_DATA")]
    data_dir: Option<PathBuf>,

    /// Album store file (overrides config.toml)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Import a scraped batch descriptor
    ///
    /// The descriptor is read from the argument, from --file, or from stdin
    /// when neither is given (or the argument is "-").
    Import {
        /// Batch descriptor JSON
        batch: Option<String>,

        /// Read the descriptor from a file
        #[arg(short, long, conflicts_with = "batch")]
        file: Option<PathBuf>,
    },

    /// Search albums by title keywords and y:YYYY[-YYYY] year filter
    Search {
        /// Query text
        query: Vec<String>,

        /// Restrict to a comma-separated list of album ids
        #[arg(long)]
        ids: Option<String>,

        /// Restrict to albums carrying this tag
        #[arg(long)]
        tag: Option<String>,

        /// Result order (defaults to config.toml, then store order)
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },

    /// List tags with album counts
    Tags {
        /// Case-insensitive substring filter
        filter: Option<String>,
    },

    /// Show tags to add to or remove from one album
    TagMenu {
        /// Album id
        id: String,

        /// Case-insensitive substring filter, or a new tag name
        filter: Option<String>,
    },

    /// Show completeness statistics
    Stats,

    /// Rename an album
    SetTitle { id: String, title: String },

    /// Add a tag to an album
    AddTag { id: String, tag: String },

    /// Remove a tag from an album
    RemoveTag { id: String, tag: String },

    /// Set the item count of an album
    SetCount { id: String, count: u64 },

    /// Set the date of an album (yyyy-mm-dd or yyyy-mm-dd--yyyy-mm-dd)
    SetDate { id: String, date: String },

    /// Delete an album from the catalog
    Delete { id: String },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Store,
    Date,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Store => SortOrder::Store,
            SortArg::Date => SortOrder::Date,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "album-catalog", &mut io::stdout());
        return Ok(());
    }

    let session = Session::open(cli.data_dir, cli.store, cli.json)?;

    match cli.command {
        Command::Import { batch, file } => commands::import::run(&session, batch, file),
        Command::Search {
            query,
            ids,
            tag,
            sort,
        } => commands::search::run(&session, &query.join(" "), ids, tag, sort.map(Into::into)),
        Command::Tags { filter } => commands::tags::list(&session, filter.as_deref()),
        Command::TagMenu { id, filter } => commands::tags::menu(&session, &id, filter.as_deref()),
        Command::Stats => commands::stats::run(&session),
        Command::SetTitle { id, title } => commands::edit::set_title(&session, &id, title),
        Command::AddTag { id, tag } => commands::edit::add_tag(&session, &id, tag),
        Command::RemoveTag { id, tag } => commands::edit::remove_tag(&session, &id, tag),
        Command::SetCount { id, count } => commands::edit::set_count(&session, &id, count),
        Command::SetDate { id, date } => commands::edit::set_date(&session, &id, date),
        Command::Delete { id } => commands::edit::delete(&session, &id),
        Command::Completions { .. } => Ok(()),
    }
}

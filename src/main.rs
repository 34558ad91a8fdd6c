use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use dex_navigator::commands::*;
use dex_navigator::core::{
    error::DexNavigatorError,
    model::ALL_TYPES,
    print_error,
    session::CatalogSession,
    state::{SortDirection, SortKey},
};
use env_logger::Env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dex-navigator")]
#[command(about = "Browse the Pokémon catalog from the terminal")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Use this config file instead of the per-user one
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List Pokémon by name or number
    List {
        /// Case-insensitive substring of the name, or part of the number
        #[arg(short, long)]
        search: Option<String>,
        /// Field to order by
        #[arg(long, value_enum, default_value = "key")]
        sort: SortKey,
        /// Sort direction
        #[arg(long, value_enum, default_value = "asc")]
        order: SortDirection,
        /// Number of pages to show before stopping
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
        /// Keep paging, searching and opening entries from a prompt
        #[arg(short, long)]
        interactive: bool,
        /// Include the artwork URL of each row
        #[arg(long)]
        artwork: bool,
    },
    /// Show Pokémon with their types, filtered by type
    Gallery {
        /// Only show Pokémon having this type (repeat to require several)
        #[arg(short = 't', long = "type", value_parser = PossibleValuesParser::new(ALL_TYPES))]
        types: Vec<String>,
        /// Number of pages to show before stopping
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
        /// Keep paging, toggling types and opening entries from a prompt
        #[arg(short, long)]
        interactive: bool,
    },
    /// Show the details of one Pokémon
    Detail {
        /// Pokédex number (e.g. "25" or "#25")
        key: String,
        /// Step to the previous/next entry from a prompt
        #[arg(short, long)]
        browse: bool,
    },
}

fn report_and_exit(e: DexNavigatorError) -> ! {
    if e.is_invalid_key() {
        print_error(&e.to_string());
    } else if e.is_load_failure() {
        log::error!("{e}");
        print_error("Failed to load Pokémon data.");
    } else {
        print_error(&e.to_string());
    }
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag, RUST_LOG still wins
    let level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let session = match CatalogSession::initialize(cli.config.as_deref()) {
        Ok(session) => session,
        Err(e) => report_and_exit(e),
    };

    let result = match cli.command {
        Commands::List {
            search,
            sort,
            order,
            pages,
            interactive,
            artwork,
        } => {
            execute_list(
                &session,
                ListArgs {
                    search,
                    sort,
                    order,
                    pages,
                    interactive,
                    artwork,
                },
            )
            .await
        }
        Commands::Gallery {
            types,
            pages,
            interactive,
        } => {
            execute_gallery(
                &session,
                GalleryArgs {
                    types,
                    pages,
                    interactive,
                },
            )
            .await
        }
        Commands::Detail { key, browse } => {
            execute_detail(&session, DetailArgs { key, browse }).await
        }
    };

    if let Err(e) = result {
        report_and_exit(e);
    }
}

use clap::{Parser, Subcommand};

mod export;
mod utils;
mod zotero;

use zotero::Database;

/// Simple program to export items and annotations from a local Zotero database
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export library items with their annotations as markdown notes
    Export {
        /// Database to connect to
        #[arg(value_enum)]
        database: Database,

        /// Path where to save the notes
        #[arg(short, long, default_value = "zotero-notes")]
        path: String,

        /// Number of child-item requests to run concurrently
        #[arg(short, long, default_value_t = 10)]
        concurrency: usize,
    },
    /// Check that the local connector endpoint is reachable
    Ping {
        /// Database to connect to
        #[arg(value_enum)]
        database: Database,
    },
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Export {
            database,
            path,
            concurrency,
        } => {
            println!("Database: {}", database);
            println!("Path: {}", path);

            let export_args = export::ExportArgs {
                database,
                path,
                concurrency,
            };

            if let Err(e) = export::export_notes(export_args).await {
                eprintln!("Error exporting notes: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Ping { database } => {
            let client = utils::http::build_client()?;
            let port = zotero::get_port(database);

            if zotero::api::ping(&client, database).await {
                println!("{} is running on port {}", database, port);
            } else {
                eprintln!("{} is not reachable on port {}", database, port);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

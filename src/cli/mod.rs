pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "larder")]
#[command(about = "Larder - Ingredient-based recipe finder", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the recipe finder server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Rebuild the vector collection from the recipe dataset, then exit
    Index {
        /// Dataset file to index instead of the configured one
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Ask a running server for the closest recipe
    Query {
        /// Comma-separated ingredients
        ingredients: String,
    },
}

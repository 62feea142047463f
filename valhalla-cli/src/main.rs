use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::EngineArgs;
use valhalla::Action;

/// Valhalla route and height requests from the command line
#[derive(Parser)]
#[command(name = "valhalla")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration path handed to the engine
    #[arg(short, long, env = "VALHALLA_CONFIG", global = true)]
    config: Option<String>,

    /// Engine to use: process, http or native
    #[arg(short, long, env = "VALHALLA_ENGINE", global = true)]
    engine: Option<String>,

    /// Engine executable for the process engine
    #[arg(long, env = "VALHALLA_SERVICE_BIN", global = true)]
    bin: Option<PathBuf>,

    /// Server base URL for the http engine
    #[arg(long, env = "VALHALLA_URL", global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a route request
    Route {
        /// Request JSON; read from stdin when omitted or "-"
        request: Option<String>,
    },

    /// Run a height request
    Height {
        /// Request JSON; read from stdin when omitted or "-"
        request: Option<String>,
    },

    /// Run one request per line of a file
    Batch {
        /// Input file with one request per line
        input: PathBuf,

        /// Action to run for every line
        #[arg(short, long, default_value = "route")]
        action: Action,

        /// Output file (JSON Lines, defaults to <input>_responses.jsonl)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the run summary as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let engine = EngineArgs {
        config: cli.config,
        engine: cli.engine,
        bin: cli.bin,
        url: cli.url,
    };

    match cli.command {
        Commands::Route { request } => commands::request::run(engine, Action::Route, request),
        Commands::Height { request } => commands::request::run(engine, Action::Height, request),
        Commands::Batch {
            input,
            action,
            output,
            json,
        } => commands::batch::run(engine, input, action, output, json),
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use commands::{print_openapi, serve};

#[derive(Parser)]
#[command(name = "httpdemo")]
#[command(about = "HTTP mechanics demo server with in-memory users and session authentication")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Configuration file (TOML, YAML or JSON)
        ///
        /// Without this flag `httpdemo.toml` (or .yaml/.json) in the working
        /// directory is read when it exists. Values can also be set with
        /// `HTTPDEMO__*` environment variables, e.g. `HTTPDEMO__SESSION_COOKIE__NAME`.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Bind address for the web server, overriding the configuration
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:8080, 127.0.0.1:3000)
        #[arg(short, long, env = "BIND_ADDRESS")]
        bind_address: Option<String>,
    },
    /// Print the OpenAPI document as JSON
    Openapi {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { config, bind_address } => {
                serve(config.as_deref(), bind_address).await?;
            }
            Commands::Openapi { output } => {
                print_openapi(output.as_deref())?;
            }
        }
        Ok(())
    }
}

mod serve;
mod show;

use crate::error::Result;
use clap::{Parser, Subcommand};

pub use serve::ServeArgs;
pub use show::ShowResource;

#[derive(Parser, Debug)]
#[command(name = "sheet-gateway")]
#[command(about = "Relay read-only Google Sheets requests using caller-supplied service accounts", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args).await,
            Commands::Show { resource } => resource.execute().await,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),
    Show {
        #[command(subcommand)]
        resource: ShowResource,
    },
}

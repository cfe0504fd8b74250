use clap::{Parser, Subcommand};

mod customer;
mod db;
mod gateway;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront administration", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Customer(customer::CustomerCommand),
    Gateway(gateway::GatewayCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Customer(command) => customer::run(command).await,
            Commands::Gateway(command) => gateway::run(command).await,
        }
    }
}

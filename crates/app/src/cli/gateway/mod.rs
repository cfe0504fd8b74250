use clap::{Args, Subcommand};

mod list;
mod set;

#[derive(Debug, Args)]
pub(crate) struct GatewayCommand {
    #[command(subcommand)]
    command: GatewaySubcommand,
}

#[derive(Debug, Subcommand)]
enum GatewaySubcommand {
    /// Create or replace a payment gateway
    Set(set::SetGatewayArgs),

    /// Show configured payment gateways
    List(list::ListGatewaysArgs),
}

pub(crate) async fn run(command: GatewayCommand) -> Result<(), String> {
    match command.command {
        GatewaySubcommand::Set(args) => set::run(args).await,
        GatewaySubcommand::List(args) => list::run(args).await,
    }
}

use clap::Args;
use storefront::money::StoreCurrency;
use storefront_app::{
    context::AppContext,
    database::{self, Db},
    domain::payments::PaymentSettings,
};

#[derive(Debug, Args)]
pub(crate) struct ListGatewaysArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ListGatewaysArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let context = AppContext::from_db(
        Db::new(pool),
        PaymentSettings {
            currency: StoreCurrency::default(),
            public_base_url: String::new(),
        },
    );

    let gateways = context
        .payments
        .list_gateways()
        .await
        .map_err(|error| format!("failed to list gateways: {error}"))?;

    if gateways.is_empty() {
        println!("no gateways configured");
    }

    for gateway in gateways {
        println!(
            "{}\t{}\tmode={}\tenabled={}\trequire_proof={}",
            gateway.slug, gateway.name, gateway.mode, gateway.enabled, gateway.require_proof
        );
    }

    Ok(())
}

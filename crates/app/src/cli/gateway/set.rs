use clap::Args;
use serde_json::Value;
use storefront::money::StoreCurrency;
use storefront_app::{
    context::AppContext,
    database::{self, Db},
    domain::payments::{PaymentSettings, data::GatewaySettings, records::GatewayMode},
};

#[derive(Debug, Args)]
pub(crate) struct SetGatewayArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Gateway slug, e.g. `paypal`, `cod` or `offline`
    #[arg(long)]
    slug: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// `sandbox`, `live` or `test`
    #[arg(long, default_value = "sandbox")]
    mode: GatewayMode,

    /// Credentials keyed by mode, as a JSON object
    #[arg(long, default_value = "{}", hide_default_value = true)]
    credentials: String,

    /// Offer the gateway at checkout
    #[arg(long)]
    enabled: bool,

    /// Require a proof reference before accepting an offline payment
    #[arg(long)]
    require_proof: bool,
}

pub(crate) async fn run(args: SetGatewayArgs) -> Result<(), String> {
    let credentials: Value = serde_json::from_str(&args.credentials)
        .map_err(|error| format!("invalid credentials JSON: {error}"))?;

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

    let gateway = context
        .payments
        .set_gateway(GatewaySettings {
            slug: args.slug,
            name: args.name,
            enabled: args.enabled,
            mode: args.mode,
            credentials,
            require_proof: args.require_proof,
        })
        .await
        .map_err(|error| format!("failed to save gateway: {error}"))?;

    println!("gateway_slug: {}", gateway.slug);
    println!("gateway_mode: {}", gateway.mode);
    println!("gateway_enabled: {}", gateway.enabled);
    println!("gateway_require_proof: {}", gateway.require_proof);

    Ok(())
}

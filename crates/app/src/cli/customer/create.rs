use clap::Args;
use storefront_app::{
    database::{self, Db},
    domain::customers::{
        CustomersService, PgCustomersService,
        data::NewCustomer,
        records::{CustomerRole, CustomerUuid},
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreateCustomerArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    name: String,

    /// Account password, at least 8 characters
    #[arg(long, env = "CUSTOMER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Grant access to catalog, coupon and order administration
    #[arg(long)]
    admin: bool,
}

pub(crate) async fn run(args: CreateCustomerArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgCustomersService::new(Db::new(pool));

    let role = if args.admin {
        CustomerRole::Admin
    } else {
        CustomerRole::Customer
    };

    let customer = service
        .create_customer(NewCustomer {
            uuid: CustomerUuid::new(),
            email: args.email,
            name: args.name,
            password: args.password,
            role,
        })
        .await
        .map_err(|error| format!("failed to create customer: {error}"))?;

    println!("customer_uuid: {}", customer.uuid);
    println!("customer_email: {}", customer.email);
    println!("customer_role: {}", customer.role);

    Ok(())
}

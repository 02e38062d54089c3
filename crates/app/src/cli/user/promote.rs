use bookshop_app::{
    database::{self, Db},
    domain::users::{PgUsersService, UsersService},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct PromoteUserArgs {
    #[arg(long)]
    username: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: PromoteUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let user = PgUsersService::new(Db::new(pool))
        .set_admin(&args.username, true)
        .await
        .map_err(|error| format!("failed to promote {}: {error}", args.username))?;

    println!("user_uuid: {}", user.uuid);
    println!("username: {}", user.username);
    println!("is_admin: {}", user.is_admin);

    Ok(())
}

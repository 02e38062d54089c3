use bookshop_app::{
    auth::{PASSWORD_MIN_CHARS, hash_password},
    database::{self, Db},
    domain::users::{
        PgUsersService, UsersService,
        data::NewUser,
        records::UserUuid,
    },
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    #[arg(long)]
    username: String,

    #[arg(long)]
    email: String,

    /// Plain-text password; stored as an argon2 hash
    #[arg(long, env = "BOOKSHOP_USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Grant admin rights
    #[arg(long)]
    admin: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    if args.password.chars().count() < PASSWORD_MIN_CHARS {
        return Err(format!(
            "password must be at least {PASSWORD_MIN_CHARS} characters"
        ));
    }

    let password_hash = hash_password(&args.password)
        .map_err(|error| format!("failed to hash password: {error}"))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let user = PgUsersService::new(Db::new(pool))
        .create_user(NewUser {
            uuid: UserUuid::new(),
            username: args.username,
            email: args.email,
            password_hash,
            is_admin: args.admin,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("username: {}", user.username);
    println!("is_admin: {}", user.is_admin);

    Ok(())
}

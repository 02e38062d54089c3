use clap::{Args, Subcommand};

mod create;
mod promote;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Create a user, optionally with admin rights
    Create(create::CreateUserArgs),

    /// Grant admin rights to an existing user
    Promote(promote::PromoteUserArgs),
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create::run(args).await,
        UserSubcommand::Promote(args) => promote::run(args).await,
    }
}

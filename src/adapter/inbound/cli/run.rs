//! Subcommand dispatch.

use crate::adapter::inbound::cli::command::{Cli, Commands, SqlCommand};
use crate::adapter::inbound::cli::prompt::TerminalPrompter;
use crate::adapter::inbound::cli::{kv, s3, sql, todo};
use crate::error::Result;
use crate::infrastructure::config::resolver::process_env;
use crate::infrastructure::config::{Config, EnvLookup, Resolver};

/// Route the parsed command line to its handler.
pub async fn execute(cli: &Cli, config: &Config) -> Result<()> {
    let prompter = TerminalPrompter::new();
    let env: &EnvLookup = &process_env;
    let resolver = Resolver::new(config, env, &prompter);

    match &cli.command {
        Commands::Kv(args) => kv::execute(args, &resolver).await,
        Commands::S3(args) => s3::execute(args, &resolver, &prompter).await,
        Commands::Sql(SqlCommand::Check(args)) => sql::execute(args, &resolver).await,
        Commands::Todo(args) => todo::execute(args, &resolver).await,
    }
}

use anyhow::Result;
use hpa4n_config::Config;

use crate::cli::{Args, Command};

pub use self::source::Source;

mod create;
mod delete;
mod describe;
mod edit;
mod list;
mod source;

/// Runs command selected on the command line.
pub async fn execute(args: &Args, config: &Config) -> Result<()> {
    let source = Source::open(args).await?;

    match &args.command {
        Command::List(list_args) => list::run(&source, args.all_namespaces, list_args, config.wide).await,
        Command::Describe { name } => describe::run(&source, name).await,
        Command::Create(create_args) => create::run(source.cluster()?, config, create_args).await,
        Command::Edit(edit_args) => edit::run(&source, config, edit_args).await,
        Command::Delete { names } => delete::run(source.cluster()?, names).await,
    }
}

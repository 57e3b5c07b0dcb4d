pub mod init;
pub mod options;
pub mod sync;
pub mod view;
pub mod watch;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Fetch completed tasks and projects once")]
    Sync(sync::SyncArgs),
    #[command(about = "List the weeks and projects available as filters")]
    Options(options::OptionsArgs),
    #[command(about = "Show completed tasks per week")]
    View(view::ViewArgs),
    #[command(about = "Sync periodically until interrupted")]
    Watch(watch::WatchArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Sync(args) => sync::cmd(args).await,
            Commands::Options(args) => options::cmd(args),
            Commands::View(args) => view::cmd(args),
            Commands::Watch(args) => watch::cmd(args).await,
        }
    }
}

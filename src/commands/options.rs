use crate::{
    libs::{config::Config, messages::Message, query::QueryView, view::View},
    msg_error_anyhow,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct OptionsArgs {
    #[arg(long, help = "Print the options as JSON")]
    json: bool,
}

pub fn cmd(options_args: OptionsArgs) -> Result<()> {
    // One read per process, so the dashboard cache would never be hit
    let store = Config::load()?.open_store()?;
    let options = QueryView::new(&store)
        .filter_options()
        .map_err(|e| msg_error_anyhow!(Message::ViewFailed(e.to_string())))?;

    if options_args.json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    View::options(&options)
}

use crate::{
    libs::{config::Config, dashboard::Dashboard, messages::Message},
    msg_error, msg_info,
};
use anyhow::Result;
use clap::Args;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct WatchArgs {
    #[arg(short, long, help = "Seconds between syncs (overrides the configured interval)")]
    interval: Option<u64>,
}

pub async fn cmd(watch_args: WatchArgs) -> Result<()> {
    let config = Config::load()?;
    let every = watch_args
        .interval
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.sync_interval());
    let dashboard = Dashboard::from_config(&config)?;

    msg_info!(Message::WatchStarted(every.as_secs()));
    dashboard
        .run(every, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                msg_error!(Message::WatchCtrlCListenFailed(e.to_string()));
                // Without a signal handler keep watching until the process is killed
                std::future::pending::<()>().await;
            }
        })
        .await;
    msg_info!(Message::WatchStopped);

    Ok(())
}

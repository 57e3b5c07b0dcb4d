use crate::{
    libs::{config::Config, dashboard::Dashboard, messages::Message, sync::SyncState, view::View},
    msg_error_anyhow, msg_info, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SyncArgs {
    #[arg(long, help = "Print the sync report as JSON")]
    json: bool,
}

pub async fn cmd(sync_args: SyncArgs) -> Result<()> {
    let dashboard = Dashboard::from_config(&Config::load()?)?;

    if !sync_args.json {
        msg_info!(Message::SyncStarted);
    }
    let report = dashboard.sync().await.map_err(|e| msg_error_anyhow!(Message::SyncFailed(e.to_string())))?;

    if sync_args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    View::sync_report(&report)?;
    match report.state {
        SyncState::Skipped => msg_warning!(Message::SyncAlreadyRunning),
        SyncState::PartiallyFailed => msg_warning!(Message::SyncPartiallyFailed(report.skipped.len())),
        _ => msg_success!(Message::SyncCompleted {
            projects_inserted: report.projects.inserted,
            tasks_inserted: report.tasks.inserted,
        }),
    }
    Ok(())
}

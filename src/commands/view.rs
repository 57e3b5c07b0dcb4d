use crate::{
    libs::{config::Config, messages::Message, query::QueryView, task::TaskFilter, view::View, week::WeekKey},
    msg_bail_anyhow, msg_error_anyhow, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ViewArgs {
    #[arg(short, long, help = "Only tasks of this week, e.g. 2024-W11")]
    week: Option<String>,
    #[arg(short, long, help = "Only tasks of this project (local id, see `options`)")]
    project: Option<i64>,
    #[arg(long, help = "Print the view as JSON")]
    json: bool,
}

pub fn cmd(view_args: ViewArgs) -> Result<()> {
    let week = match &view_args.week {
        Some(raw) => Some(raw.parse::<WeekKey>().map_err(|_| msg_error_anyhow!(Message::InvalidWeekFilter(raw.clone())))?),
        None => None,
    };

    // One read per process, so the dashboard cache would never be hit
    let store = Config::load()?.open_store()?;
    let project = match view_args.project {
        Some(id) => match store.project_by_id(id)? {
            Some(project) => Some(project),
            None => msg_bail_anyhow!(Message::UnknownProjectFilter(id)),
        },
        None => None,
    };

    let filter = TaskFilter {
        week: week.clone(),
        project_id: project.as_ref().map(|p| p.id),
    };
    let view = QueryView::new(&store)
        .view(&filter)
        .map_err(|e| msg_error_anyhow!(Message::ViewFailed(e.to_string())))?;

    if view_args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    msg_print!(Message::FilterSummary {
        week: week.map(|w| w.to_string()),
        project: project.map(|p| p.name),
    });
    View::dashboard(&view)
}

use super::query::{DashboardView, FilterOptions};
use super::sync::SyncReport;
use crate::libs::messages::Message;
use crate::{msg_info, msg_print};
use anyhow::Result;
use prettytable::{format, row, Table};

/// Widest bar of the weekly chart, in characters.
const BAR_WIDTH: usize = 40;
const BAR: &str = "█";

pub struct View {}

impl View {
    pub fn dashboard(view: &DashboardView) -> Result<()> {
        if view.is_empty() {
            msg_info!(Message::NoTasksFound);
            return Ok(());
        }

        msg_print!(Message::ChartHeader, true);
        let max = view.series.iter().map(|point| point.count).max().unwrap_or(0);
        let mut chart = Table::new();
        chart.set_format(*format::consts::FORMAT_CLEAN);
        for point in &view.series {
            chart.add_row(row![point.week, r->point.count, bar(point.count, max)]);
        }
        chart.printstd();

        msg_print!(Message::TasksHeader, true);
        let mut table = Table::new();
        table.add_row(row!["#", "DATE", "PROJECT", "TASK"]);
        for (index, task) in view.rows.iter().enumerate() {
            table.add_row(row![index + 1, task.completed_date.format("%Y-%m-%d"), task.project_name, task.content]);
        }
        table.add_row(row!["", "", "TOTAL", view.total()]);
        table.printstd();

        Ok(())
    }

    pub fn options(options: &FilterOptions) -> Result<()> {
        msg_print!(Message::WeeksHeader, true);
        if options.weeks.is_empty() {
            msg_info!(Message::NoWeeksAvailable);
        } else {
            let mut weeks = Table::new();
            weeks.add_row(row!["WEEK", "FROM", "TO"]);
            for week in &options.weeks {
                match week.bounds() {
                    Some((from, to)) => weeks.add_row(row![week, from.format("%Y-%m-%d"), to.format("%Y-%m-%d")]),
                    None => weeks.add_row(row![week, "", ""]),
                };
            }
            weeks.printstd();
        }

        msg_print!(Message::ProjectsHeader, true);
        if options.projects.is_empty() {
            msg_info!(Message::NoProjectsAvailable);
        } else {
            let mut projects = Table::new();
            projects.add_row(row!["ID", "NAME"]);
            for project in &options.projects {
                projects.add_row(row![project.id, project.name]);
            }
            projects.printstd();
        }

        if let Some(week) = &options.default_week {
            msg_info!(Message::DefaultWeek(week.to_string()));
        }

        Ok(())
    }

    pub fn sync_report(report: &SyncReport) -> Result<()> {
        msg_print!(Message::SyncReportHeader, true);
        let mut table = Table::new();
        table.add_row(row!["", "FETCHED", "INSERTED", "EXISTING"]);
        table.add_row(row!["projects", report.projects.fetched, report.projects.inserted, report.projects.existing]);
        table.add_row(row!["tasks", report.tasks.fetched, report.tasks.inserted, report.tasks.existing]);
        table.printstd();

        if !report.skipped.is_empty() {
            msg_print!(Message::SkippedRecordsHeader, true);
            let mut skipped = Table::new();
            skipped.add_row(row!["KIND", "REASON"]);
            for record in &report.skipped {
                skipped.add_row(row![record.kind, record.reason]);
            }
            skipped.printstd();
        }

        Ok(())
    }
}

/// Bar proportional to `count`, at least one block for a non-zero count.
fn bar(count: usize, max: usize) -> String {
    if count == 0 || max == 0 {
        return String::new();
    }
    let width = (count * BAR_WIDTH).div_ceil(max).clamp(1, BAR_WIDTH);
    BAR.repeat(width)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use donelog::db::store::Store;
    use donelog::libs::project::NewProject;
    use donelog::libs::query::{QueryView, NO_PROJECT};
    use donelog::libs::task::{NewTask, TaskFilter};
    use donelog::libs::week::WeekKey;
    use test_context::{test_context, TestContext};

    struct QueryTestContext {
        store: Store,
        work: i64,
        home: i64,
    }

    impl TestContext for QueryTestContext {
        fn setup() -> Self {
            let mut store = Store::in_memory().unwrap();
            let work = store.upsert_project(&NewProject::new(1, "Work")).unwrap().id;
            let home = store.upsert_project(&NewProject::new(2, "Home")).unwrap().id;

            let mut batch = store.begin_sync().unwrap();
            batch.upsert_task(&NewTask::new(10, "Write report", at(2024, 3, 15, 10), Some(1))).unwrap();
            batch.upsert_task(&NewTask::new(11, "Fix sink", at(2024, 3, 12, 18), Some(2))).unwrap();
            batch.upsert_task(&NewTask::new(12, "Plan sprint", at(2024, 3, 19, 9), Some(1))).unwrap();
            batch.upsert_task(&NewTask::new(13, "Review PR", at(2024, 3, 20, 16), Some(1))).unwrap();
            batch.upsert_task(&NewTask::new(14, "Read book", at(2024, 3, 4, 21), None)).unwrap();
            batch.commit().unwrap();

            QueryTestContext { store, work, home }
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn week(key: &str) -> WeekKey {
        key.parse().unwrap()
    }

    #[test_context(QueryTestContext)]
    #[test]
    fn test_series_is_grouped_and_ascending(ctx: &mut QueryTestContext) {
        let view = QueryView::new(&ctx.store).view(&TaskFilter::all()).unwrap();

        let series: Vec<(String, usize)> = view.series.iter().map(|p| (p.week.to_string(), p.count)).collect();
        assert_eq!(
            series,
            vec![
                ("2024-W10".to_string(), 1),
                ("2024-W11".to_string(), 2),
                ("2024-W12".to_string(), 2),
            ]
        );
        assert_eq!(view.total(), view.rows.len());
    }

    #[test_context(QueryTestContext)]
    #[test]
    fn test_rows_are_newest_first_with_project_names(ctx: &mut QueryTestContext) {
        let view = QueryView::new(&ctx.store).view(&TaskFilter::all()).unwrap();

        let rows: Vec<(&str, &str)> = view.rows.iter().map(|r| (r.content.as_str(), r.project_name.as_str())).collect();
        assert_eq!(
            rows,
            vec![
                ("Review PR", "Work"),
                ("Plan sprint", "Work"),
                ("Write report", "Work"),
                ("Fix sink", "Home"),
                ("Read book", NO_PROJECT),
            ]
        );
        assert_eq!(view.rows[0].completed_date, NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
    }

    #[test_context(QueryTestContext)]
    #[test]
    fn test_filters_select_exact_subset(ctx: &mut QueryTestContext) {
        let query = QueryView::new(&ctx.store);
        let all = ctx.store.query_tasks(&TaskFilter::all()).unwrap();

        for filter in [
            TaskFilter::all().week(week("2024-W11")),
            TaskFilter::all().project(ctx.work),
            TaskFilter::all().project(ctx.home),
            TaskFilter::all().week(week("2024-W12")).project(ctx.work),
            TaskFilter::all().week(week("2024-W12")).project(ctx.home),
        ] {
            let view = query.view(&filter).unwrap();
            let expected = all
                .iter()
                .filter(|t| filter.week.as_ref().map_or(true, |w| &t.week == w))
                .filter(|t| filter.project_id.map_or(true, |p| t.project_id == Some(p)))
                .count();
            assert_eq!(view.rows.len(), expected, "{filter:?}");
            assert_eq!(view.total(), expected, "{filter:?}");
        }
    }

    #[test_context(QueryTestContext)]
    #[test]
    fn test_empty_result_is_not_an_error(ctx: &mut QueryTestContext) {
        let view = QueryView::new(&ctx.store).view(&TaskFilter::all().week(week("2023-W01"))).unwrap();
        assert!(view.is_empty());
        assert!(view.series.is_empty());
        assert!(view.rows.is_empty());
    }

    #[test_context(QueryTestContext)]
    #[test]
    fn test_filter_options_default_to_latest_week(ctx: &mut QueryTestContext) {
        let options = QueryView::new(&ctx.store).filter_options().unwrap();

        assert_eq!(options.weeks, vec![week("2024-W10"), week("2024-W11"), week("2024-W12")]);
        assert_eq!(options.default_week, Some(week("2024-W12")));
        let names: Vec<&str> = options.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Home", "Work"]);
    }

    #[test]
    fn test_filter_options_on_empty_store() {
        let store = Store::in_memory().unwrap();
        let options = QueryView::new(&store).filter_options().unwrap();

        assert!(options.weeks.is_empty());
        assert!(options.projects.is_empty());
        assert_eq!(options.default_week, None);
    }

    #[test_context(QueryTestContext)]
    #[test]
    fn test_view_serializes_for_json_output(ctx: &mut QueryTestContext) {
        let view = QueryView::new(&ctx.store).view(&TaskFilter::all().week(week("2024-W10"))).unwrap();
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["series"][0]["week"], "2024-W10");
        assert_eq!(json["series"][0]["count"], 1);
        assert_eq!(json["rows"][0]["completed_date"], "2024-03-04");
        assert_eq!(json["rows"][0]["project_name"], NO_PROJECT);
    }
}

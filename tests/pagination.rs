#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use uuid::Uuid;
    use worklog::db::projects::Projects;
    use worklog::db::work_entries::WorkEntries;
    use worklog::libs::error::AppError;
    use worklog::libs::pagination::{LoadMoreRequest, MonthWindow, Page};
    use worklog::libs::work_entry::WorkEntry;

    struct PaginationTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for PaginationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("worklog.db");
            PaginationTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seed_entry(db_path: &std::path::Path, project_id: Uuid, y: i32, mo: u32, d: u32, h: u32) -> WorkEntry {
        let start = Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap();
        let entry = WorkEntry::new(start, start + chrono::Duration::hours(1), project_id, "seeded");
        WorkEntries::new(db_path).unwrap().insert(&entry).unwrap();
        entry
    }

    fn seed_project(db_path: &std::path::Path) -> Uuid {
        Projects::new(db_path).unwrap().ensure_default().unwrap().0.id
    }

    #[test]
    fn single_month_window_covers_cursor_month() {
        let window = MonthWindow::compute(Some(date(2024, 3, 15)), 1, date(2025, 1, 1));
        assert_eq!(window.start.date_naive(), date(2024, 3, 1));
        assert_eq!(window.end.date_naive(), date(2024, 4, 1));
    }

    #[test]
    fn missing_cursor_anchors_on_today() {
        let window = MonthWindow::compute(None, 1, date(2024, 7, 9));
        assert_eq!(window.start.date_naive(), date(2024, 7, 1));
        assert_eq!(window.end.date_naive(), date(2024, 8, 1));
    }

    #[test]
    fn two_month_window_spans_february_and_march() {
        let window = MonthWindow::compute(Some(date(2024, 3, 31)), 2, date(2025, 1, 1));
        assert_eq!(window.start.date_naive(), date(2024, 2, 1));
        assert_eq!(window.end.date_naive(), date(2024, 4, 1));
        assert_eq!(window.next_cursor(), date(2024, 1, 31));
    }

    #[test]
    fn cursor_chain_never_skips_or_overlaps() {
        let mut window = MonthWindow::compute(Some(date(2024, 3, 10)), 1, date(2025, 1, 1));
        for _ in 0..24 {
            let next = MonthWindow::compute(Some(window.next_cursor()), 1, date(2025, 1, 1));
            assert_eq!(next.end, window.start);
            window = next;
        }
    }

    #[test]
    fn window_crosses_year_boundary() {
        let window = MonthWindow::compute(Some(date(2024, 1, 5)), 1, date(2025, 1, 1));
        assert_eq!(window.start.date_naive(), date(2024, 1, 1));
        assert_eq!(window.next_cursor(), date(2023, 12, 31));
    }

    #[test]
    fn months_to_load_zero_is_rejected() {
        let request = LoadMoreRequest {
            month_cursor: None,
            months_to_load: Some(0),
        };
        match request.validate() {
            Err(AppError::Validation(errors)) => assert!(errors[0].contains("monthsToLoad")),
            other => panic!("expected validation error, got {:?}", other.err()),
        }
        assert!(LoadMoreRequest::default().validate().is_ok());
        assert_eq!(LoadMoreRequest::default().months_to_load(), 1);
    }

    #[test_context(PaginationTestContext)]
    #[test]
    fn page_returns_only_window_entries_newest_first(ctx: &mut PaginationTestContext) {
        let project = seed_project(&ctx.db_path);
        seed_entry(&ctx.db_path, project, 2024, 2, 28, 9);
        let march_early = seed_entry(&ctx.db_path, project, 2024, 3, 5, 9);
        let march_late = seed_entry(&ctx.db_path, project, 2024, 3, 20, 14);

        let window = MonthWindow::compute(Some(date(2024, 3, 1)), 1, date(2025, 1, 1));
        let mut entries = WorkEntries::new(&ctx.db_path).unwrap();
        let items = entries.fetch_window(&window).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, march_late.id);
        assert_eq!(items[1].id, march_early.id);
    }

    #[test_context(PaginationTestContext)]
    #[test]
    fn has_more_reflects_older_entries(ctx: &mut PaginationTestContext) {
        let project = seed_project(&ctx.db_path);
        seed_entry(&ctx.db_path, project, 2024, 1, 10, 9);
        seed_entry(&ctx.db_path, project, 2024, 3, 5, 9);

        let window = MonthWindow::compute(Some(date(2024, 3, 1)), 1, date(2025, 1, 1));
        let mut entries = WorkEntries::new(&ctx.db_path).unwrap();
        let items = entries.fetch_window(&window).unwrap();
        let has_more = entries.has_entries_before(window.start).unwrap();
        let page = Page::new(items, &window, has_more);

        assert!(page.has_more);
        assert_eq!(page.next_cursor, Some(date(2024, 2, 29)));
    }

    #[test_context(PaginationTestContext)]
    #[test]
    fn last_page_has_null_cursor(ctx: &mut PaginationTestContext) {
        let project = seed_project(&ctx.db_path);
        seed_entry(&ctx.db_path, project, 2024, 3, 5, 9);

        let window = MonthWindow::compute(Some(date(2024, 3, 1)), 1, date(2025, 1, 1));
        let mut entries = WorkEntries::new(&ctx.db_path).unwrap();
        let items = entries.fetch_window(&window).unwrap();
        let has_more = entries.has_entries_before(window.start).unwrap();
        let page = Page::new(items, &window, has_more);

        assert!(!page.has_more);
        assert_eq!(page.next_cursor, None);
    }

    #[test_context(PaginationTestContext)]
    #[test]
    fn repeated_reads_are_idempotent(ctx: &mut PaginationTestContext) {
        let project = seed_project(&ctx.db_path);
        seed_entry(&ctx.db_path, project, 2024, 3, 5, 9);
        seed_entry(&ctx.db_path, project, 2024, 3, 7, 9);

        let window = MonthWindow::compute(Some(date(2024, 3, 1)), 1, date(2025, 1, 1));
        let mut entries = WorkEntries::new(&ctx.db_path).unwrap();
        let first = entries.fetch_window(&window).unwrap();
        let second = entries.fetch_window(&window).unwrap();

        assert_eq!(first, second);
    }

    #[test_context(PaginationTestContext)]
    #[test]
    fn walking_cursors_visits_every_entry_exactly_once(ctx: &mut PaginationTestContext) {
        let project = seed_project(&ctx.db_path);
        for (month, day) in [(1u32, 15u32), (2, 10), (3, 5), (3, 25)] {
            seed_entry(&ctx.db_path, project, 2024, month, day, 9);
        }

        let mut entries = WorkEntries::new(&ctx.db_path).unwrap();
        let mut cursor = Some(date(2024, 3, 1));
        let mut seen = Vec::new();
        while let Some(anchor) = cursor {
            let window = MonthWindow::compute(Some(anchor), 1, date(2025, 1, 1));
            let items = entries.fetch_window(&window).unwrap();
            let has_more = entries.has_entries_before(window.start).unwrap();
            seen.extend(items.into_iter().map(|entry| entry.id));
            cursor = has_more.then(|| window.next_cursor());
        }

        assert_eq!(seen.len(), 4);
    }
}

#[cfg(test)]
mod tests {
    use dorofy::db::store::{Store, DB_FILE_NAME};
    use dorofy::libs::history::SessionHistory;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct HistoryTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for HistoryTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            HistoryTestContext { temp_dir }
        }
    }

    impl HistoryTestContext {
        fn open_store(&self) -> Rc<RefCell<Store>> {
            Rc::new(RefCell::new(Store::open_at(self.temp_dir.path().join(DB_FILE_NAME)).unwrap()))
        }
    }

    #[test_context(HistoryTestContext)]
    #[test]
    fn test_sessions_are_stamped_and_listed_newest_first(ctx: &mut HistoryTestContext) {
        let store = ctx.open_store();
        let mut history = SessionHistory::load(store).unwrap();

        let first_id = history.add_session(1500, None).unwrap().id.clone();
        let second_id = history.add_session(3000, Some("task-1".to_string())).unwrap().id.clone();

        assert_ne!(first_id, second_id);
        let records = history.history();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, second_id);
        assert_eq!(records[0].duration_seconds, 3000);
        assert_eq!(records[0].task_id.as_deref(), Some("task-1"));
        assert_eq!(records[1].id, first_id);
        assert!(records[1].completed_at > 0);
    }

    #[test_context(HistoryTestContext)]
    #[test]
    fn test_history_survives_reload(ctx: &mut HistoryTestContext) {
        let store = ctx.open_store();
        {
            let mut history = SessionHistory::load(store.clone()).unwrap();
            history.add_session(1500, None).unwrap();
            history.add_session(1500, None).unwrap();
        }

        let reloaded = SessionHistory::load(store).unwrap();
        assert_eq!(reloaded.history().len(), 2);
    }

    #[test_context(HistoryTestContext)]
    #[test]
    fn test_records_without_task_stay_unattributed(ctx: &mut HistoryTestContext) {
        let store = ctx.open_store();
        let mut history = SessionHistory::load(store.clone()).unwrap();

        history.add_session(1500, None).unwrap();

        let stored = store.borrow().get_session_history().unwrap();
        assert_eq!(stored[0].task_id, None);
    }
}

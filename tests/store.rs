#[cfg(test)]
mod tests {
    use dorofy::db::store::{Store, DB_FILE_NAME};
    use dorofy::libs::error::CoreError;
    use dorofy::libs::session::SessionRecord;
    use dorofy::libs::task::Task;
    use serde_json::json;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct StoreTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for StoreTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            StoreTestContext { temp_dir }
        }
    }

    impl StoreTestContext {
        fn open_store(&self) -> Store {
            Store::open_at(self.temp_dir.path().join(DB_FILE_NAME)).unwrap()
        }
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_tasks_replace_and_read_back_in_order(ctx: &mut StoreTestContext) {
        let mut store = ctx.open_store();

        let first = Task::new("First", 2);
        let second = Task::new("Second", 1);
        store.replace_tasks(&[second.clone(), first.clone()]).unwrap();

        let tasks = store.get_tasks().unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, second.id);
        assert_eq!(tasks[1].id, first.id);

        // Replace is wholesale: the old collection does not survive
        store.replace_tasks(&[first.clone()]).unwrap();
        let tasks = store.get_tasks().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "First");
        assert_eq!(tasks[0].estimated_units, 2);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_sessions_append_and_read_newest_first(ctx: &mut StoreTestContext) {
        let mut store = ctx.open_store();

        let mut older = SessionRecord::new(1500, None);
        older.completed_at = 1000;
        let mut newer = SessionRecord::new(3000, Some("task-1".to_string()));
        newer.completed_at = 2000;

        store.append_session(&older).unwrap();
        store.append_session(&newer).unwrap();

        let history = store.get_session_history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, newer.id);
        assert_eq!(history[0].task_id.as_deref(), Some("task-1"));
        assert_eq!(history[1].id, older.id);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_duplicate_session_id_is_rejected(ctx: &mut StoreTestContext) {
        let mut store = ctx.open_store();

        let record = SessionRecord::new(1500, None);
        store.append_session(&record).unwrap();

        let err = store.append_session(&record).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateKey(id) if id == record.id));

        assert_eq!(store.get_session_history().unwrap().len(), 1);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_settings_roundtrip_and_removal(ctx: &mut StoreTestContext) {
        let mut store = ctx.open_store();

        assert_eq!(store.get_setting::<bool>("isLongPomodoro").unwrap(), None);

        store.set_setting("isLongPomodoro", &true).unwrap();
        store.set_setting("activeTaskId", &"task-9".to_string()).unwrap();
        store.set_setting("theme", &json!({"name": "dark"})).unwrap();

        assert_eq!(store.get_setting::<bool>("isLongPomodoro").unwrap(), Some(true));
        assert_eq!(store.get_setting::<String>("activeTaskId").unwrap(), Some("task-9".to_string()));
        assert_eq!(store.setting_keys().unwrap().len(), 3);

        // Overwrite keeps a single row per key
        store.set_setting("isLongPomodoro", &false).unwrap();
        assert_eq!(store.get_setting::<bool>("isLongPomodoro").unwrap(), Some(false));
        assert_eq!(store.setting_keys().unwrap().len(), 3);

        store.remove_setting("activeTaskId").unwrap();
        assert_eq!(store.get_setting::<String>("activeTaskId").unwrap(), None);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_close_then_reinit_preserves_data(ctx: &mut StoreTestContext) {
        let mut store = ctx.open_store();

        store.replace_tasks(&[Task::new("Persisted", 1)]).unwrap();
        store.close();
        assert!(!store.is_open());

        // Operations on a closed store fail rather than panic
        let err = store.get_tasks().unwrap_err();
        assert!(matches!(err, CoreError::StorageUnavailable(_)));

        store.init().unwrap();
        assert!(store.is_open());
        let tasks = store.get_tasks().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Persisted");
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_init_is_idempotent(ctx: &mut StoreTestContext) {
        let mut store = ctx.open_store();
        store.replace_tasks(&[Task::new("Kept", 1)]).unwrap();

        store.init().unwrap();
        store.init().unwrap();

        assert_eq!(store.get_tasks().unwrap().len(), 1);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_store_new_uses_platform_data_directory(_ctx: &mut StoreTestContext) {
        let store = Store::new().unwrap();
        assert!(store.is_open());
        assert_eq!(store.get_tasks().unwrap().len(), 0);
    }
}

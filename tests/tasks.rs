#[cfg(test)]
mod tests {
    use dorofy::db::store::{Store, DB_FILE_NAME};
    use dorofy::libs::error::CoreError;
    use dorofy::libs::tasks::{TaskRepository, TaskUpdate};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TaskTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            TaskTestContext { temp_dir }
        }
    }

    impl TaskTestContext {
        fn open_store(&self) -> Rc<RefCell<Store>> {
            Rc::new(RefCell::new(Store::open_at(self.temp_dir.path().join(DB_FILE_NAME)).unwrap()))
        }
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_blank_title_is_rejected(ctx: &mut TaskTestContext) {
        let store = ctx.open_store();
        let mut repo = TaskRepository::load(store.clone()).unwrap();

        let err = repo.add_task("   ", 2).unwrap_err();
        assert!(matches!(err, CoreError::EmptyTitle));

        assert_eq!(repo.tasks().len(), 0);
        assert_eq!(store.borrow().get_tasks().unwrap().len(), 0);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_new_tasks_go_to_the_top(ctx: &mut TaskTestContext) {
        let store = ctx.open_store();
        let mut repo = TaskRepository::load(store.clone()).unwrap();

        repo.add_task("First", 1).unwrap();
        repo.add_task("Second", 1).unwrap();

        assert_eq!(repo.tasks()[0].title, "Second");
        assert_eq!(repo.tasks()[1].title, "First");

        // The order survives a reload from storage
        let reloaded = TaskRepository::load(store).unwrap();
        assert_eq!(reloaded.tasks()[0].title, "Second");
        assert_eq!(reloaded.tasks()[1].title, "First");
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_estimate_is_floored_at_one(ctx: &mut TaskTestContext) {
        let store = ctx.open_store();
        let mut repo = TaskRepository::load(store).unwrap();

        let task = repo.add_task("Quick fix", 0).unwrap();
        assert_eq!(task.estimated_units, 1);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_first_task_becomes_active(ctx: &mut TaskTestContext) {
        let store = ctx.open_store();
        let mut repo = TaskRepository::load(store).unwrap();

        let first_id = repo.add_task("First", 1).unwrap().id.clone();
        assert_eq!(repo.active_task_id(), Some(first_id.as_str()));

        // Later additions do not steal the active slot
        repo.add_task("Second", 1).unwrap();
        assert_eq!(repo.active_task_id(), Some(first_id.as_str()));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_progress_increment_auto_completes_at_estimate(ctx: &mut TaskTestContext) {
        let store = ctx.open_store();
        let mut repo = TaskRepository::load(store.clone()).unwrap();

        let id = repo.add_task("Write report", 2).unwrap().id.clone();
        repo.set_active_task(Some(&id));

        assert_eq!(repo.increment_progress(None), Some(false));
        assert_eq!(repo.increment_progress(None), Some(true));

        let task = repo.tasks().iter().find(|t| t.id == id).unwrap();
        assert_eq!(task.completed_units, 2);
        assert!(task.completed);
        assert!(task.completed_at.is_some());

        // Progress keeps counting past the estimate without re-completing
        assert_eq!(repo.increment_progress(None), Some(false));
        let task = store.borrow().get_tasks().unwrap().remove(0);
        assert_eq!(task.completed_units, 3);
        assert!(task.completed);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_progress_increment_without_target_is_a_noop(ctx: &mut TaskTestContext) {
        let store = ctx.open_store();
        let mut repo = TaskRepository::load(store).unwrap();

        repo.add_task("Task", 2).unwrap();
        repo.set_active_task(None);

        assert_eq!(repo.increment_progress(None), None);
        assert_eq!(repo.tasks()[0].completed_units, 0);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_toggle_completion_leaves_progress_alone(ctx: &mut TaskTestContext) {
        let store = ctx.open_store();
        let mut repo = TaskRepository::load(store).unwrap();

        let id = repo.add_task("Read", 4).unwrap().id.clone();
        repo.increment_progress(Some(&id));

        assert_eq!(repo.toggle_completion(&id), Some(true));
        let task = repo.tasks().iter().find(|t| t.id == id).unwrap();
        assert!(task.completed);
        assert_eq!(task.completed_units, 1);

        assert_eq!(repo.toggle_completion(&id), Some(false));
        let task = repo.tasks().iter().find(|t| t.id == id).unwrap();
        assert!(!task.completed);
        assert_eq!(task.completed_at, None);
        assert_eq!(task.completed_units, 1);

        assert_eq!(repo.toggle_completion("unknown"), None);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_merges_only_set_fields(ctx: &mut TaskTestContext) {
        let store = ctx.open_store();
        let mut repo = TaskRepository::load(store).unwrap();

        let id = repo.add_task("Draft", 2).unwrap().id.clone();
        repo.update_task(&id, TaskUpdate { title: Some("Final".to_string()), ..Default::default() });

        let task = &repo.tasks()[0];
        assert_eq!(task.title, "Final");
        assert_eq!(task.estimated_units, 2);

        // Unknown ids change nothing
        repo.update_task("unknown", TaskUpdate { title: Some("Ghost".to_string()), ..Default::default() });
        assert_eq!(repo.tasks().len(), 1);
        assert_eq!(repo.tasks()[0].title, "Final");
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_deleting_active_task_clears_the_reference(ctx: &mut TaskTestContext) {
        let store = ctx.open_store();
        let mut repo = TaskRepository::load(store.clone()).unwrap();

        let first_id = repo.add_task("First", 1).unwrap().id.clone();
        repo.add_task("Second", 1).unwrap();
        assert_eq!(repo.active_task_id(), Some(first_id.as_str()));

        repo.delete_task(&first_id);

        // No auto-selection of another task
        assert_eq!(repo.active_task_id(), None);
        assert_eq!(repo.tasks().len(), 1);
        assert_eq!(store.borrow().get_setting::<String>("activeTaskId").unwrap(), None);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_clear_completed_tasks(ctx: &mut TaskTestContext) {
        let store = ctx.open_store();
        let mut repo = TaskRepository::load(store).unwrap();

        let done_id = repo.add_task("Done", 1).unwrap().id.clone();
        repo.add_task("Open", 1).unwrap();
        repo.toggle_completion(&done_id);

        assert_eq!(repo.clear_completed_tasks(), 1);
        assert_eq!(repo.tasks().len(), 1);
        assert_eq!(repo.tasks()[0].title, "Open");

        // The active reference pointed at the cleared task
        assert_eq!(repo.active_task_id(), None);

        // Nothing left to clear
        assert_eq!(repo.clear_completed_tasks(), 0);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_reorder_replaces_the_stored_order(ctx: &mut TaskTestContext) {
        let store = ctx.open_store();
        let mut repo = TaskRepository::load(store.clone()).unwrap();

        repo.add_task("A", 1).unwrap();
        repo.add_task("B", 1).unwrap();
        repo.add_task("C", 1).unwrap();

        let mut reordered: Vec<_> = repo.tasks().to_vec();
        reordered.reverse();
        repo.reorder_tasks(reordered).unwrap();

        assert_eq!(repo.tasks()[0].title, "A");
        let stored = store.borrow().get_tasks().unwrap();
        assert_eq!(stored[0].title, "A");
        assert_eq!(stored[2].title, "C");
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_reorder_rejects_a_different_task_set(ctx: &mut TaskTestContext) {
        let store = ctx.open_store();
        let mut repo = TaskRepository::load(store).unwrap();

        repo.add_task("A", 1).unwrap();
        repo.add_task("B", 1).unwrap();

        // Dropping a task is rejected
        let partial = vec![repo.tasks()[0].clone()];
        assert!(matches!(repo.reorder_tasks(partial), Err(CoreError::ReorderMismatch)));

        // Duplicating a task is rejected
        let duplicated = vec![repo.tasks()[0].clone(), repo.tasks()[0].clone()];
        assert!(matches!(repo.reorder_tasks(duplicated), Err(CoreError::ReorderMismatch)));

        assert_eq!(repo.tasks()[0].title, "B");
        assert_eq!(repo.tasks().len(), 2);
    }
}

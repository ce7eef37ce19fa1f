#[cfg(test)]
mod tests {
    use dorofy::libs::export::{ExportFormat, Exporter};
    use dorofy::libs::session::SessionRecord;
    use std::fs;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ExportTestContext { temp_dir }
        }
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_csv_export_writes_header_and_rows(ctx: &mut ExportTestContext) {
        let attributed = SessionRecord::new(1500, Some("task-1".to_string()));
        let unattributed = SessionRecord::new(3000, None);

        let path = ctx.temp_dir.path().join("history.csv");
        let exporter = Exporter::new(ExportFormat::Csv, Some(path.clone()));
        exporter.export(&[attributed.clone(), unattributed.clone()]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "id,completed_at,duration_seconds,task_id");
        assert!(lines[1].starts_with(&attributed.id));
        assert!(lines[1].ends_with("task-1"));
        assert!(lines[2].starts_with(&unattributed.id));
        assert!(lines[2].ends_with(","));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_json_export_roundtrips(ctx: &mut ExportTestContext) {
        let records = vec![SessionRecord::new(1500, Some("task-1".to_string())), SessionRecord::new(600, None)];

        let path = ctx.temp_dir.path().join("history.json");
        let exporter = Exporter::new(ExportFormat::Json, Some(path.clone()));
        exporter.export(&records).unwrap();

        let parsed: Vec<SessionRecord> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, records);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_unwritable_path_is_an_error(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("missing").join("history.csv");
        let exporter = Exporter::new(ExportFormat::Csv, Some(path));

        assert!(exporter.export(&[]).is_err());
    }
}

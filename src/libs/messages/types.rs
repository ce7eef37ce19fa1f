#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskAdded(String),       // title
    TaskUpdated(String),     // title
    TaskDeleted,
    TaskNotFound(String),    // id
    TaskCompleted(String),   // title
    TaskReopened(String),    // title
    TaskAutoCompleted(String), // title
    TaskSetActive(String),   // title
    TaskActiveCleared,
    NoActiveTask,
    NoTasksYet,
    CompletedTasksCleared(usize), // count
    NoCompletedTasksToClear,
    TaskSaveFailed(String),  // error

    // === TIMER MESSAGES ===
    TimerStarted(String),      // mode label
    TimerReset,
    TimerModeSwitched(String), // mode label
    FocusComplete,
    LongBreakStarting,
    ShortBreakStarting,
    BreakOver,
    LongBreakOver,
    ExtendedSessionsOn,
    ExtendedSessionsOff,
    TimerStateSaveFailed(String), // error

    // === SESSION HISTORY MESSAGES ===
    NoSessionsRecorded,
    SessionRecorded(String),    // duration label
    SessionSaveFailed(String),  // error

    // === STORAGE MESSAGES ===
    SettingSaveFailed(String, String), // key, error

    // === BACKUP MESSAGES ===
    BackupExported(String),       // path
    BackupImported(usize, usize), // tasks, sessions
    BackupInvalid(String),        // reason
    ConfirmImportReplaceAll,
    ConfirmWipeAll,
    AllDataCleared,
    OperationCancelled,

    // === MIGRATION MESSAGES ===
    MigrationAlreadyComplete,
    MigrationPending,
    MigrationNothingToDo,
    MigrationCompleted,
    MigrationFailed(String), // error

    // === EXPORT MESSAGES ===
    ExportingHistory(String), // format label
    HistoryExported(String),  // path

    // === GENERAL MESSAGES ===
    InitComplete,
}

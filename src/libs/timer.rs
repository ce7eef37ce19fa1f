//! The countdown state machine driving focus/break cycles.
//!
//! The engine owns transient countdown state and persists a snapshot of it
//! to the durable store on every change. The snapshot is advisory: on load
//! only `mode` and `completed_cycles` are trusted, while `time_left` is
//! recomputed from the current duration profile and `is_running` is forced
//! to false. Resuming a stale countdown after an arbitrarily long absence,
//! or auto-starting without user action, is intentionally impossible.
//!
//! Ticking is driven externally: the caller invokes [`TimerEngine::tick`]
//! once per second while it wants the countdown to advance. Pausing or
//! switching modes therefore cancels the countdown synchronously — there
//! is no background task that could fire a stale tick.

use crate::db::store::Store;
use crate::libs::history::SessionHistory;
use crate::libs::messages::Message;
use crate::libs::notify::Notifier;
use crate::libs::tasks::TaskRepository;
use crate::{msg_debug, msg_info, msg_success};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Settings key the timer snapshot is persisted under.
pub const TIMER_STATE_KEY: &str = "timerState";
/// Settings key for the extended-session profile flag.
pub const EXTENDED_SESSIONS_KEY: &str = "isLongPomodoro";

/// Every fourth completed focus interval earns a long break.
const CYCLES_PER_LONG_BREAK: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum TimerMode {
    // The legacy storage format called this mode "pomodoro".
    #[serde(alias = "pomodoro")]
    Focus,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Focus => "focus",
            TimerMode::ShortBreak => "short break",
            TimerMode::LongBreak => "long break",
        }
    }
}

/// The three interval lengths in seconds, derived from the extended-session
/// flag. There are exactly two profiles; durations are never set
/// individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerDurations {
    pub focus: u32,
    pub short_break: u32,
    pub long_break: u32,
}

impl TimerDurations {
    pub fn for_profile(extended: bool) -> Self {
        if extended {
            TimerDurations { focus: 50 * 60, short_break: 10 * 60, long_break: 25 * 60 }
        } else {
            TimerDurations { focus: 25 * 60, short_break: 5 * 60, long_break: 15 * 60 }
        }
    }

    pub fn duration_of(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Focus => self.focus,
            TimerMode::ShortBreak => self.short_break,
            TimerMode::LongBreak => self.long_break,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub mode: TimerMode,
    pub time_left: u32,
    pub is_running: bool,
    // The legacy storage format called this field "completedPomodoros".
    #[serde(alias = "completedPomodoros")]
    pub completed_cycles: u32,
}

/// Invoked synchronously when a focus interval completes, with the
/// finished interval's configured duration in seconds.
pub type CompletionCallback = Box<dyn FnMut(u32)>;

pub struct TimerEngine {
    state: TimerState,
    durations: TimerDurations,
    store: Rc<RefCell<Store>>,
    notifier: Box<dyn Notifier>,
    on_focus_complete: Option<CompletionCallback>,
}

impl TimerEngine {
    /// Builds the engine, restoring `mode` and `completed_cycles` from the
    /// persisted snapshot when one exists. `time_left` always starts at
    /// the full duration of the restored mode and the engine starts
    /// paused, regardless of what the snapshot says.
    pub fn new(store: Rc<RefCell<Store>>, notifier: Box<dyn Notifier>, extended_sessions: bool) -> Self {
        let durations = TimerDurations::for_profile(extended_sessions);
        let persisted = store.borrow().get_setting::<TimerState>(TIMER_STATE_KEY).ok().flatten();
        let (mode, completed_cycles) = match persisted {
            Some(state) => (state.mode, state.completed_cycles),
            None => (TimerMode::Focus, 0),
        };
        let mut engine = TimerEngine {
            state: TimerState {
                mode,
                time_left: durations.duration_of(mode),
                is_running: false,
                completed_cycles,
            },
            durations,
            store,
            notifier,
            on_focus_complete: None,
        };
        engine.persist();
        engine
    }

    pub fn set_on_focus_complete(&mut self, callback: CompletionCallback) {
        self.on_focus_complete = Some(callback);
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn durations(&self) -> &TimerDurations {
        &self.durations
    }

    /// Starts the countdown. No effect if already running.
    pub fn start(&mut self) {
        if self.state.is_running {
            return;
        }
        self.state.is_running = true;
        self.persist();
    }

    /// Stops the countdown keeping `time_left`, so it can be resumed.
    pub fn pause(&mut self) {
        self.state.is_running = false;
        self.persist();
    }

    /// Restores the current mode's full duration and stops the countdown.
    /// Mode and completed cycles are untouched.
    pub fn reset(&mut self) {
        self.state.time_left = self.durations.duration_of(self.state.mode);
        self.state.is_running = false;
        self.persist();
    }

    /// Switches to `mode`, always resetting the time — even when switching
    /// to the mode that is already active.
    pub fn switch_mode(&mut self, mode: TimerMode) {
        self.state.mode = mode;
        self.state.time_left = self.durations.duration_of(mode);
        self.state.is_running = false;
        self.persist();
    }

    /// Applies a duration-profile change. Takes precedence over an active
    /// countdown: all durations are recomputed, the current mode's time is
    /// reset, and the engine stops.
    pub fn set_extended_sessions(&mut self, extended: bool) {
        self.durations = TimerDurations::for_profile(extended);
        self.state.time_left = self.durations.duration_of(self.state.mode);
        self.state.is_running = false;
        self.persist();
    }

    /// Advances the countdown by one second. The caller invokes this once
    /// per second while running; calls while paused are no-ops. When the
    /// countdown reaches zero the interval completes: the notification
    /// fires, the next mode is entered at full duration, and — for a
    /// finished focus interval — the completion callback runs
    /// synchronously before this method returns.
    pub fn tick(&mut self) {
        if !self.state.is_running {
            return;
        }
        if self.state.time_left > 1 {
            self.state.time_left -= 1;
            self.persist();
            return;
        }
        self.complete_interval();
    }

    fn complete_interval(&mut self) {
        self.state.is_running = false;

        match self.state.mode {
            TimerMode::Focus => {
                self.state.completed_cycles += 1;
                let finished = self.durations.focus;

                if self.state.completed_cycles % CYCLES_PER_LONG_BREAK == 0 {
                    self.state.mode = TimerMode::LongBreak;
                    self.notifier
                        .notify(&Message::FocusComplete.to_string(), &Message::LongBreakStarting.to_string());
                } else {
                    self.state.mode = TimerMode::ShortBreak;
                    self.notifier
                        .notify(&Message::FocusComplete.to_string(), &Message::ShortBreakStarting.to_string());
                }
                self.state.time_left = self.durations.duration_of(self.state.mode);

                if let Some(callback) = self.on_focus_complete.as_mut() {
                    callback(finished);
                }
            }
            TimerMode::ShortBreak => {
                self.state.mode = TimerMode::Focus;
                self.state.time_left = self.durations.focus;
                self.notifier
                    .notify(&Message::BreakOver.to_string(), &Message::BreakOver.to_string());
            }
            TimerMode::LongBreak => {
                self.state.mode = TimerMode::Focus;
                self.state.time_left = self.durations.focus;
                self.notifier
                    .notify(&Message::LongBreakOver.to_string(), &Message::LongBreakOver.to_string());
            }
        }

        self.persist();
    }

    /// Serializes the full state under the fixed settings key. Failures
    /// are logged and never block the countdown.
    fn persist(&self) {
        if let Err(e) = self.store.borrow_mut().set_setting(TIMER_STATE_KEY, &self.state) {
            msg_debug!(format!("{}", Message::TimerStateSaveFailed(e.to_string())));
        }
    }
}

/// Builds the callback that records a finished focus interval: the active
/// task is credited one unit (auto-completing it at its estimate) and a
/// session record is appended to the history.
///
/// Each repository is borrowed once per step; the increment result is
/// bound before anything re-borrows the repository.
pub fn completion_recorder(
    tasks: Rc<RefCell<TaskRepository>>,
    history: Rc<RefCell<SessionHistory>>,
) -> CompletionCallback {
    Box::new(move |duration_seconds| {
        let active = tasks.borrow().active_task_id().map(str::to_string);
        let auto_completed = tasks.borrow_mut().increment_progress(active.as_deref());
        if auto_completed == Some(true) {
            let title = tasks.borrow().get_active_task().map(|t| t.title.clone()).unwrap_or_default();
            msg_success!(Message::TaskAutoCompleted(title));
        }
        if history.borrow_mut().add_session(duration_seconds, active).is_ok() {
            msg_info!(Message::SessionRecorded(format_time(duration_seconds)));
        }
    })
}

/// Formats a second count as MM:SS. Minutes are not capped at two digits:
/// 3661 seconds renders as "61:01".
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

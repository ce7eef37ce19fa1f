//! Focus timer commands.
//!
//! `timer run` drives the countdown in the foreground: one tick per
//! second until the current interval completes. Completing a focus
//! interval credits the active task and appends a session record before
//! the command returns. All state is persisted on every change, so an
//! interrupted run resumes in the same mode (with a fresh countdown) on
//! the next invocation.

use super::open_store;
use crate::libs::history::SessionHistory;
use crate::libs::messages::Message;
use crate::libs::notify::{DesktopNotifier, SilentNotifier};
use crate::libs::tasks::TaskRepository;
use crate::libs::timer::{completion_recorder, format_time, TimerEngine, TimerMode, EXTENDED_SESSIONS_KEY};
use crate::libs::view::View;
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct TimerArgs {
    #[command(subcommand)]
    command: Option<TimerCommand>,
}

#[derive(Debug, Subcommand)]
enum TimerCommand {
    #[command(about = "Run the countdown until the current interval completes")]
    Run(RunArgs),
    #[command(about = "Show the timer state")]
    Status,
    #[command(about = "Switch the timer mode (always resets the countdown)")]
    Mode(ModeArgs),
    #[command(about = "Reset the countdown for the current mode")]
    Reset,
    #[command(about = "Toggle the extended 50/10/25-minute session profile")]
    Extended(ExtendedArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Switch to this mode before starting
    #[arg(short, long, value_enum)]
    mode: Option<TimerMode>,
    /// Suppress desktop notifications
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Args)]
struct ModeArgs {
    #[arg(value_enum)]
    mode: TimerMode,
}

#[derive(Debug, Args)]
struct ExtendedArgs {
    #[arg(value_enum)]
    state: Switch,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Switch {
    On,
    Off,
}

pub fn cmd(args: TimerArgs) -> Result<()> {
    match args.command.unwrap_or(TimerCommand::Run(RunArgs { mode: None, quiet: false })) {
        TimerCommand::Run(args) => run(args),
        TimerCommand::Status => status(),
        TimerCommand::Mode(args) => switch_mode(args.mode),
        TimerCommand::Reset => reset(),
        TimerCommand::Extended(args) => set_extended(matches!(args.state, Switch::On)),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let store = open_store()?;
    let extended = store.borrow().get_setting::<bool>(EXTENDED_SESSIONS_KEY)?.unwrap_or(false);

    let tasks = Rc::new(RefCell::new(TaskRepository::load(store.clone())?));
    let history = Rc::new(RefCell::new(SessionHistory::load(store.clone())?));

    let notifier: Box<dyn crate::libs::notify::Notifier> =
        if args.quiet { Box::new(SilentNotifier) } else { Box::new(DesktopNotifier) };
    let mut engine = TimerEngine::new(store, notifier, extended);

    // Completing a focus interval credits the active task and appends a
    // session record, synchronously within the tick.
    engine.set_on_focus_complete(completion_recorder(tasks.clone(), history.clone()));

    if let Some(mode) = args.mode {
        engine.switch_mode(mode);
    }

    let label = engine.state().mode.label();
    msg_info!(Message::TimerStarted(label.to_string()));
    engine.start();

    while engine.state().is_running {
        print!("\r⏳ {} {}   ", engine.state().mode.label(), format_time(engine.state().time_left));
        std::io::stdout().flush()?;
        thread::sleep(Duration::from_secs(1));
        engine.tick();
    }
    println!();

    View::timer(engine.state(), engine.durations());
    Ok(())
}

fn status() -> Result<()> {
    let store = open_store()?;
    let extended = store.borrow().get_setting::<bool>(EXTENDED_SESSIONS_KEY)?.unwrap_or(false);
    let engine = TimerEngine::new(store, Box::new(SilentNotifier), extended);
    View::timer(engine.state(), engine.durations());
    Ok(())
}

fn switch_mode(mode: TimerMode) -> Result<()> {
    let store = open_store()?;
    let extended = store.borrow().get_setting::<bool>(EXTENDED_SESSIONS_KEY)?.unwrap_or(false);
    let mut engine = TimerEngine::new(store, Box::new(SilentNotifier), extended);
    engine.switch_mode(mode);
    msg_success!(Message::TimerModeSwitched(mode.label().to_string()));
    Ok(())
}

fn reset() -> Result<()> {
    let store = open_store()?;
    let extended = store.borrow().get_setting::<bool>(EXTENDED_SESSIONS_KEY)?.unwrap_or(false);
    let mut engine = TimerEngine::new(store, Box::new(SilentNotifier), extended);
    engine.reset();
    msg_success!(Message::TimerReset);
    Ok(())
}

fn set_extended(extended: bool) -> Result<()> {
    let store = open_store()?;
    store.borrow_mut().set_setting(EXTENDED_SESSIONS_KEY, &extended)?;

    // A profile change interrupts any countdown: recompute durations and
    // persist a stopped snapshot for the new profile.
    let mut engine = TimerEngine::new(store, Box::new(SilentNotifier), !extended);
    engine.set_extended_sessions(extended);

    if extended {
        msg_success!(Message::ExtendedSessionsOn);
    } else {
        msg_success!(Message::ExtendedSessionsOff);
    }
    Ok(())
}

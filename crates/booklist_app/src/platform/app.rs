use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use booklist_core::{
    update, AppState, KeyValueStore, Msg, PersistedValue, DEFAULT_SEARCH_TERM, SEARCH_TERM_KEY,
};
use booklist_engine::LoaderHandle;
use engine_logging::{engine_info, engine_warn};

use super::config::AppConfig;
use super::effects::{build_source, EffectRunner};
use super::persistence::{self, FileStore};
use super::ui::input::{parse_line, ShellCommand};
use super::ui::render::render;

/// How often loader results are polled while waiting for input.
const TICK: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    engine_logging::initialize(config.log_destination, config.log_level, &config.log_path());
    engine_info!(
        "Starting booklist with state file {}",
        persistence::describe(&config.state_dir)
    );

    let search = PersistedValue::new(
        FileStore::new(config.state_dir.clone()),
        SEARCH_TERM_KEY,
        DEFAULT_SEARCH_TERM,
    );
    let loader = LoaderHandle::new(build_source(&config.source));
    let runner = EffectRunner::new(loader, search);
    let mut shell = Shell::new(runner, io::stdout());

    // Stdin is read on its own thread so loads keep landing while the user types.
    let (input_tx, input_rx) = mpsc::channel::<ShellCommand>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if input_tx.send(parse_line(&line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    engine_warn!("Stopped reading input: {}", err);
                    break;
                }
            }
        }
        let _ = input_tx.send(ShellCommand::Quit);
    });

    shell.mount()?;
    loop {
        match input_rx.recv_timeout(TICK) {
            Ok(ShellCommand::Quit) | Err(RecvTimeoutError::Disconnected) => break,
            Ok(command) => shell.handle_command(command)?,
            Err(RecvTimeoutError::Timeout) => {}
        }
        shell.pump_loader()?;
    }
    shell.unmount()?;
    engine_info!("Booklist shut down");
    Ok(())
}

/// Owns the core state and drives it one message at a time.
struct Shell<S, W> {
    state: AppState,
    runner: EffectRunner<S>,
    out: W,
}

impl<S: KeyValueStore, W: Write> Shell<S, W> {
    fn new(runner: EffectRunner<S>, out: W) -> Self {
        let state = AppState::new(runner.search_term());
        Self { state, runner, out }
    }

    fn mount(&mut self) -> anyhow::Result<()> {
        self.draw()?;
        self.dispatch(Msg::Mounted)
    }

    fn unmount(&mut self) -> anyhow::Result<()> {
        self.dispatch(Msg::Unmounted)
    }

    fn handle_command(&mut self, command: ShellCommand) -> anyhow::Result<()> {
        match command {
            ShellCommand::Search(term) => self.dispatch(Msg::SearchChanged(term)),
            ShellCommand::Remove(id) => {
                let book = self.state.books().iter().find(|book| book.id == id).cloned();
                match book {
                    Some(book) => self.dispatch(Msg::RemoveRequested(book)),
                    None => self.notice(&format!("No book with id {id}")),
                }
            }
            ShellCommand::Reload => self.dispatch(Msg::ReloadRequested),
            ShellCommand::Quit => Ok(()),
            ShellCommand::Invalid(reason) => self.notice(&reason),
        }
    }

    fn pump_loader(&mut self) -> anyhow::Result<()> {
        for msg in self.runner.drain_events() {
            self.dispatch(msg)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, msg: Msg) -> anyhow::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);

        if was_dirty {
            self.draw()?;
        }
        Ok(())
    }

    fn draw(&mut self) -> anyhow::Result<()> {
        let frame = render(&self.state.view());
        writeln!(self.out, "{frame}\n").context("writing frame")?;
        self.out.flush().context("flushing output")
    }

    fn notice(&mut self, text: &str) -> anyhow::Result<()> {
        writeln!(self.out, "! {text}").context("writing notice")
    }
}

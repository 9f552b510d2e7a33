//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! All side effects happen here. The reducer produces effects; handlers run
//! them on tokio and post results to the inbox, which is drained each frame.

mod handlers;
mod inbox;

use std::future::Future;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event;
use evently_core::api::ApiClient;
use inbox::{UiEventReceiver, UiEventSender};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::terminal::TerminalSession;
use crate::{render, terminal, update};

/// Frame cadence while something is in flight (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

pub struct TuiRuntime {
    session: TerminalSession,
    pub state: AppState,
    client: ApiClient,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    /// Takes over the terminal.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(state: AppState, client: ApiClient) -> Result<Self> {
        // Before the alternate screen, so a panic restores it.
        terminal::install_panic_hook();
        let session = TerminalSession::start()?;
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let now = Instant::now();
        Ok(Self {
            session,
            state,
            client,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the event loop until quit.
    ///
    /// Must be called from a multi-threaded tokio runtime: terminal polling
    /// blocks this thread while handlers run on the workers.
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails.
    pub fn run(&mut self) -> Result<()> {
        let effects = update::start(&mut self.state);
        self.execute_effects(effects);

        let mut dirty = true;
        while !self.state.should_quit {
            let mut events = self.collect_events()?;

            let size = self.session.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                let state = &self.state;
                self.session.terminal.draw(|frame| render::render(state, frame))?;
                dirty = false;
            }
        }
        tracing::info!("tui exited");
        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if self.state.tasks.is_any_running() || recent_terminal_activity {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };
        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }
        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted lifecycle.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce(Option<CancellationToken>) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let cancel = kind.is_cancelable().then(CancellationToken::new);
        let started = TaskStarted {
            id,
            cancel: cancel.clone(),
        };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let inner = f(cancel).await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        let client = self.client.clone();
        match effect {
            UiEffect::Quit => self.state.should_quit = true,
            UiEffect::CancelTask { kind, token } => {
                if let Some(cancel) = token {
                    tracing::debug!(?kind, "cancelling task");
                    cancel.cancel();
                }
            }
            UiEffect::Login {
                task,
                email,
                password,
            } => self.spawn_task(TaskKind::Login, task, move |_| {
                handlers::login(client, email, password)
            }),
            UiEffect::SignUp { task, form } => {
                self.spawn_task(TaskKind::SignUp, task, move |_| handlers::sign_up(client, form));
            }
            UiEffect::Logout { task } => {
                self.spawn_task(TaskKind::Logout, task, move |_| handlers::logout(client));
            }
            UiEffect::FetchEvents { task } => {
                self.spawn_task(TaskKind::EventList, task, move |_| {
                    handlers::fetch_events(client)
                });
            }
            UiEffect::LoadEvent { task, id } => {
                self.spawn_task(TaskKind::EventLoad, task, move |_| {
                    handlers::load_event(client, id)
                });
            }
            UiEffect::CreateEvent { task, form } => {
                self.spawn_task(TaskKind::EventCreate, task, move |_| {
                    handlers::create_event(client, form)
                });
            }
            UiEffect::LoadCoverImage { task, path } => {
                self.spawn_task(TaskKind::CoverImageLoad, task, move |cancel| async move {
                    handlers::load_cover_image(&path, cancel).await
                });
            }
            UiEffect::ScheduleRedirect { task, to, delay } => {
                self.spawn_task(TaskKind::Redirect, task, move |cancel| {
                    handlers::delayed_redirect(task, to, delay, cancel)
                });
            }
        }
    }
}

//! # Render Scheduler
//!
//! Turns a stream of page snapshots into preview renders.
//!
//! Debounced requests wait for a quiet period and collapse into a single
//! render of the newest snapshot. Immediate requests start at once and drop
//! any pending debounced snapshot, which they supersede.
//!
//! Every render carries a generation number and only the newest generation
//! may update the preview. A slow render that finishes after a newer one is
//! discarded, and a failed render keeps the last good HTML.

use crate::errors::RenderError;
use crate::mutations::RenderUrgency;
use futures::future::{BoxFuture, FutureExt};
use lander_compiler_html::{compile_document, CompileOptions};
use lander_parts::Page;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct SchedulerOptions {
    /// How long text edits must pause before a render starts
    pub quiet_period: Duration,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            quiet_period: DEFAULT_QUIET_PERIOD,
        }
    }
}

/// Anything that can turn a page into HTML, locally or over the wire
pub trait RenderBackend: Send + Sync + 'static {
    fn render(&self, page: Page) -> BoxFuture<'static, Result<String, RenderError>>;
}

/// Renders in-process with the HTML compiler
#[derive(Debug, Clone)]
pub struct LocalRenderer {
    options: CompileOptions,
}

impl LocalRenderer {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }
}

impl Default for LocalRenderer {
    fn default() -> Self {
        Self::new(CompileOptions::preview())
    }
}

impl RenderBackend for LocalRenderer {
    fn render(&self, page: Page) -> BoxFuture<'static, Result<String, RenderError>> {
        let options = self.options.clone();
        async move { Ok(compile_document(&page, &options)) }.boxed()
    }
}

/// What the preview pane currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewState {
    /// Last successfully rendered HTML
    pub html: Option<String>,

    /// Generation that produced `html`
    pub generation: u64,

    /// Message from the newest render if it failed
    pub error: Option<String>,
}

enum Command {
    Render { page: Page, urgency: RenderUrgency },
}

pub struct RenderScheduler {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<PreviewState>,
}

impl RenderScheduler {
    /// Start the scheduling task on the current tokio runtime
    pub fn spawn(backend: Arc<dyn RenderBackend>, options: SchedulerOptions) -> Self {
        let (commands, receiver) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(PreviewState::default());

        tokio::spawn(run(backend, options, receiver, Arc::new(state_tx)));

        Self { commands, state }
    }

    pub fn schedule(&self, page: Page, urgency: RenderUrgency) {
        if urgency == RenderUrgency::None {
            return;
        }
        if self.commands.send(Command::Render { page, urgency }).is_err() {
            tracing::warn!("render scheduler has stopped; dropping render request");
        }
    }

    pub fn render_now(&self, page: Page) {
        self.schedule(page, RenderUrgency::Immediate);
    }

    pub fn subscribe(&self) -> watch::Receiver<PreviewState> {
        self.state.clone()
    }

    pub fn current(&self) -> PreviewState {
        self.state.borrow().clone()
    }
}

async fn run(
    backend: Arc<dyn RenderBackend>,
    options: SchedulerOptions,
    mut commands: mpsc::UnboundedReceiver<Command>,
    state: Arc<watch::Sender<PreviewState>>,
) {
    let latest = Arc::new(AtomicU64::new(0));
    let mut generation = 0u64;
    let mut pending: Option<Page> = None;
    let mut deadline: Option<Instant> = None;

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Render { page, urgency: RenderUrgency::Debounced }) => {
                    pending = Some(page);
                    deadline = Some(Instant::now() + options.quiet_period);
                }
                Some(Command::Render { page, urgency: RenderUrgency::Immediate }) => {
                    pending = None;
                    deadline = None;
                    generation += 1;
                    start_render(&backend, page, generation, &latest, &state);
                }
                Some(Command::Render { urgency: RenderUrgency::None, .. }) => {}
                None => break,
            },
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                deadline = None;
                if let Some(page) = pending.take() {
                    generation += 1;
                    start_render(&backend, page, generation, &latest, &state);
                }
            }
        }
    }

    tracing::debug!("render scheduler stopped after {} renders", generation);
}

fn start_render(
    backend: &Arc<dyn RenderBackend>,
    page: Page,
    generation: u64,
    latest: &Arc<AtomicU64>,
    state: &Arc<watch::Sender<PreviewState>>,
) {
    latest.store(generation, Ordering::SeqCst);

    let render = backend.render(page);
    let latest = latest.clone();
    let state = state.clone();

    tokio::spawn(async move {
        let result = render.await;

        state.send_if_modified(|preview| {
            if latest.load(Ordering::SeqCst) != generation {
                tracing::debug!("discarding stale render {}", generation);
                return false;
            }
            match result {
                Ok(html) => {
                    preview.html = Some(html);
                    preview.generation = generation;
                    preview.error = None;
                }
                Err(e) => {
                    tracing::warn!("render {} failed: {}", generation, e);
                    preview.error = Some(e.to_string());
                }
            }
            true
        });
    });
}

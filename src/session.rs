//! Per-connection session: one channel, one scene, one event loop.
//!
//! Everything a connection needs lives here; nothing is global. The
//! session is constructed around an established channel and torn down
//! when the peer goes away, taking all reconciliation state with it.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::channel::{ChannelClient, ChannelEvent};
use crate::command::Command;
use crate::error::DecodeError;
use crate::input::{InteractionTranslator, Point, PointerEvent};
use crate::reconcile::Reconciler;
use crate::scene::SceneRenderer;
use crate::series::SeriesBuffer;
use crate::update::{self, Update};

/// Samples retained per chart series before the hard wraparound.
pub const CHART_CAPACITY: usize = 200;

const DRAW_INTERVAL: Duration = Duration::from_millis(16);

/// The chart series fed from each `ChartsIncremental` frame, in wire
/// field order.
pub const CHART_SERIES: [&str; 12] = [
    "avg_speed",
    "avg_max_health",
    "avg_attack_power",
    "avg_food_collected",
    "avg_size",
    "avg_carapace_density",
    "avg_strength",
    "avg_quickness",
    "avg_venomosity",
    "avg_mandible_sharpness",
    "avg_body_width",
    "avg_body_length",
];

/// Inputs fed into the session loop by the embedding application.
#[derive(Debug)]
pub enum SessionInput {
    PointerDown(PointerEvent),
    PointerUp(PointerEvent),
    Shift(bool),
    Command(Command),
    Shutdown,
}

/// Everything the loop mutates in reaction to frames and pointer
/// events. Split out from [`Session`] so it can be exercised without a
/// live socket.
pub struct ViewState<S: SceneRenderer> {
    pub scene: S,
    pub reconciler: Reconciler,
    pub charts: SeriesBuffer,
    pub input: InteractionTranslator,
    needs_draw: bool,
}

impl<S: SceneRenderer> ViewState<S> {
    pub fn new(scene: S, surface_origin: Point) -> Self {
        Self {
            scene,
            reconciler: Reconciler::new(),
            charts: SeriesBuffer::new(CHART_CAPACITY),
            input: InteractionTranslator::new(surface_origin),
            needs_draw: false,
        }
    }

    /// Decode one inbound frame and fold it into the view. A decode
    /// fault leaves every piece of state untouched.
    pub fn apply_frame(&mut self, frame: &[u8]) -> Result<(), DecodeError> {
        match update::decode(frame)? {
            Update::GameState(state) => {
                self.reconciler.apply(&mut self.scene, &state);
                self.needs_draw = true;
            }
            Update::ChartsIncremental(charts) => {
                let samples = [
                    charts.avg_speed,
                    charts.avg_max_health,
                    charts.avg_attack_power,
                    charts.avg_food_collected,
                    charts.avg_size,
                    charts.avg_carapace_density,
                    charts.avg_strength,
                    charts.avg_quickness,
                    charts.avg_venomosity,
                    charts.avg_mandible_sharpness,
                    charts.avg_body_width,
                    charts.avg_body_length,
                ];
                for (name, value) in CHART_SERIES.iter().zip(samples) {
                    self.charts.append(name, None, value);
                }
            }
        }
        Ok(())
    }

    pub fn pointer_down(&mut self, event: &PointerEvent) {
        self.input.pointer_down(event);
    }

    /// Returns the commands the release translated into; the caller
    /// dispatches them.
    pub fn pointer_up(&mut self, event: &PointerEvent) -> Vec<Command> {
        self.input.pointer_up(event, &self.reconciler)
    }

    /// Present at most once per dirty reconcile.
    pub fn draw_if_needed(&mut self) {
        if self.needs_draw {
            self.scene.present();
            self.needs_draw = false;
        }
    }
}

pub struct Session<S: SceneRenderer> {
    channel: ChannelClient,
    view: ViewState<S>,
}

impl<S: SceneRenderer> Session<S> {
    pub fn new(channel: ChannelClient, scene: S, surface_origin: Point) -> Self {
        Self {
            channel,
            view: ViewState::new(scene, surface_origin),
        }
    }

    pub fn view(&self) -> &ViewState<S> {
        &self.view
    }

    /// Encode and ship one command. Run-simulation commands reset the
    /// chart series first so the new run starts from a clean plot.
    pub async fn dispatch(&mut self, command: Command) {
        if command.starts_simulation_run() {
            self.view.charts.reset_all();
        }
        if let Err(e) = self.channel.send(crate::command::encode(&command)).await {
            warn!(?command, error = %e, "command dropped");
        }
    }

    /// Run-to-completion loop: channel frames, user input, and the
    /// draw tick all interleave on one task, so a snapshot is fully
    /// reconciled before any draw reads the proxies.
    pub async fn run(mut self, mut inputs: mpsc::Receiver<SessionInput>) {
        let mut draw_tick = tokio::time::interval(DRAW_INTERVAL);
        loop {
            tokio::select! {
                event = self.channel.recv() => match event {
                    Some(ChannelEvent::Frame(frame)) => {
                        if let Err(e) = self.on_frame(&frame) {
                            warn!(len = frame.len(), error = %e, "dropping undecodable frame");
                        }
                    }
                    Some(ChannelEvent::Closed(reason)) => {
                        info!(%reason, "channel closed, freezing scene");
                        break;
                    }
                    None => break,
                },
                input = inputs.recv() => match input {
                    Some(SessionInput::PointerDown(event)) => {
                        self.view.pointer_down(&event);
                    }
                    Some(SessionInput::PointerUp(event)) => {
                        for command in self.view.pointer_up(&event) {
                            self.dispatch(command).await;
                        }
                    }
                    Some(SessionInput::Shift(held)) => {
                        self.view.input.set_shift(held);
                    }
                    Some(SessionInput::Command(command)) => {
                        self.dispatch(command).await;
                    }
                    Some(SessionInput::Shutdown) | None => {
                        self.channel.close().await;
                        break;
                    }
                },
                _ = draw_tick.tick() => {
                    self.view.draw_if_needed();
                }
            }
        }
    }

    fn on_frame(&mut self, frame: &[u8]) -> Result<(), DecodeError> {
        self.view.apply_frame(frame)
    }
}

//! Battle-beetles viewer.
//!
//! Connects to the simulation daemon, runs one session on a
//! current-thread runtime, and reads command lines from stdin:
//!
//!   speed | battle | food | fight   start a simulation run
//!   beetle <x> <y>                  create a beetle
//!   formation                       arrange selected beetles
//!   deselect                        clear the selection
//!   terminate                       kill selected beetles
//!   quit                            close the connection and exit
//!
//! The scene backend here only logs; a real vector renderer plugs in
//! through the same trait.

use beetles_ui::channel::ChannelClient;
use beetles_ui::input::Point;
use beetles_ui::scene::{EntityKind, Rgba, SceneHandle, SceneRenderer};
use beetles_ui::session::{Session, SessionInput};
use beetles_ui::Command;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

mod config;

use config::ViewConfig;

/// Headless backend that narrates attribute writes instead of drawing.
#[derive(Default)]
struct TraceScene {
    kinds: Vec<EntityKind>,
    visible: Vec<bool>,
}

impl SceneRenderer for TraceScene {
    fn alloc(&mut self, kind: EntityKind) -> SceneHandle {
        let handle = SceneHandle::new(self.kinds.len() as u64);
        self.kinds.push(kind);
        self.visible.push(false);
        debug!(?kind, handle = handle.raw(), "allocated proxy");
        handle
    }

    fn set_visible(&mut self, handle: SceneHandle, visible: bool) {
        self.visible[handle.raw() as usize] = visible;
    }

    fn set_transform(&mut self, handle: SceneHandle, x: f32, y: f32, angle: f32) {
        debug!(handle = handle.raw(), x, y, angle, "transform");
    }

    fn set_scale(&mut self, _handle: SceneHandle, _sx: f32, _sy: f32) {}

    fn set_fill(&mut self, _handle: SceneHandle, _fill: Rgba) {}

    fn set_selection_ring(&mut self, handle: SceneHandle, on: bool) {
        if on {
            debug!(handle = handle.raw(), "selection ring on");
        }
    }

    fn set_label(&mut self, _handle: SceneHandle, _value: i32) {}

    fn present(&mut self) {
        let shown = self.visible.iter().filter(|v| **v).count();
        debug!(proxies = self.kinds.len(), visible = shown, "present");
    }
}

fn parse_line(line: &str) -> Option<SessionInput> {
    let mut tokens = line.split_whitespace();
    let command = match tokens.next()? {
        "speed" => Command::RunSpeedSimulation,
        "battle" => Command::RunBattleSimulation,
        "food" => Command::RunFoodGa,
        "fight" => Command::RunFightSimulation,
        "formation" => Command::CreateFormation,
        "deselect" => Command::DeselectAllBeetles,
        "terminate" => Command::Terminate,
        "beetle" => {
            let x = tokens.next()?.parse().ok()?;
            let y = tokens.next()?.parse().ok()?;
            Command::CreateBeetle { x, y }
        }
        "quit" => return Some(SessionInput::Shutdown),
        other => {
            warn!(input = other, "unknown command");
            return None;
        }
    };
    Some(SessionInput::Command(command))
}

async fn read_stdin(tx: mpsc::Sender<SessionInput>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if let Some(input) = parse_line(&line) {
            let shutdown = matches!(input, SessionInput::Shutdown);
            if tx.send(input).await.is_err() || shutdown {
                break;
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = ViewConfig::load();
    info!(endpoint = %config.endpoint, "connecting");

    let channel = match ChannelClient::connect(&config.endpoint, beetles_ui::SUBPROTOCOL).await {
        Ok(channel) => channel,
        Err(e) => {
            error!(error = %e, "could not reach the daemon");
            std::process::exit(1);
        }
    };

    let (tx, rx) = mpsc::channel(32);
    tokio::spawn(read_stdin(tx));

    let origin = Point::new(config.origin_x, config.origin_y);
    let session = Session::new(channel, TraceScene::default(), origin);
    session.run(rx).await;
    info!("session ended");
}

//! Outbound command intents and their wire encoding.

use prost::Message as _;

use crate::proto;

/// A discrete user intent headed for the simulation server.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SelectBeetle { beetle_id: i32 },
    /// Rectangle in world coordinates, already normalized (x1<=x2, y1<=y2).
    SelectAllInArea { x1: f32, y1: f32, x2: f32, y2: f32 },
    SelectedMove { x: f32, y: f32 },
    CreateBeetle { x: f32, y: f32 },
    SelectedInteract { target_id: i32 },
    DeselectAllBeetles,
    Terminate,
    RunSpeedSimulation,
    RunBattleSimulation,
    RunFoodGa,
    RunFightSimulation,
    CreateFormation,
}

impl Command {
    /// Commands that start a fresh simulation run. The session resets its
    /// chart series on these so a fixed-width chart can be reused across
    /// runs.
    pub fn starts_simulation_run(&self) -> bool {
        matches!(
            self,
            Command::RunSpeedSimulation
                | Command::RunBattleSimulation
                | Command::RunFoodGa
                | Command::RunFightSimulation
        )
    }
}

/// Map one intent onto an outbound envelope frame. Stateless; exactly
/// one envelope field is populated per command.
pub fn encode(command: &Command) -> Vec<u8> {
    let mut envelope = proto::UiMessage::default();

    match *command {
        Command::SelectBeetle { beetle_id } => {
            envelope.select_beetle = Some(proto::SelectBeetle { beetle_id });
        }
        Command::SelectAllInArea { x1, y1, x2, y2 } => {
            envelope.select_all_in_area = Some(proto::SelectAllInArea { x1, y1, x2, y2 });
        }
        Command::SelectedMove { x, y } => {
            envelope.selected_move_command = Some(proto::SelectedMoveCommand { x, y });
        }
        Command::CreateBeetle { x, y } => {
            envelope.create_beetle = Some(proto::CreateBeetle { x, y });
        }
        Command::SelectedInteract { target_id } => {
            envelope.selected_interact_command =
                Some(proto::SelectedInteractCommand { target_id });
        }
        Command::DeselectAllBeetles => {
            envelope.deselect_all_beetles = Some(proto::DeselectAllBeetles {});
        }
        Command::Terminate => {
            envelope.terminate = Some(proto::Terminate {});
        }
        Command::RunSpeedSimulation => {
            envelope.run_speed_simulation = Some(proto::RunSpeedSimulation {});
        }
        Command::RunBattleSimulation => {
            envelope.run_battle_simulation = Some(proto::RunBattleSimulation {});
        }
        Command::RunFoodGa => {
            envelope.run_food_ga = Some(proto::RunFoodGa {});
        }
        Command::RunFightSimulation => {
            envelope.run_fight_simulation = Some(proto::RunFightSimulation {});
        }
        Command::CreateFormation => {
            envelope.create_formation = Some(proto::CreateFormation {});
        }
    }

    envelope.encode_to_vec()
}

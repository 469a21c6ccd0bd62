//! Wire messages for the battle-beetles protocol.
//!
//! These structs mirror the external protobuf contract the simulation
//! server speaks; field numbers are part of that contract and must not
//! be renumbered. Both envelopes (`UiMessage` outbound, `UiUpdate`
//! inbound) model their payloads as optional fields rather than a Rust
//! enum so the decoder can observe a frame that carries zero or more
//! than one payload and reject it (see `update::decode`).

/// Outbound command envelope. Exactly one payload field is set per frame.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UiMessage {
    #[prost(message, optional, tag = "1")]
    pub select_beetle: Option<SelectBeetle>,
    #[prost(message, optional, tag = "2")]
    pub select_all_in_area: Option<SelectAllInArea>,
    #[prost(message, optional, tag = "3")]
    pub selected_move_command: Option<SelectedMoveCommand>,
    #[prost(message, optional, tag = "4")]
    pub create_beetle: Option<CreateBeetle>,
    #[prost(message, optional, tag = "5")]
    pub selected_interact_command: Option<SelectedInteractCommand>,
    #[prost(message, optional, tag = "6")]
    pub deselect_all_beetles: Option<DeselectAllBeetles>,
    #[prost(message, optional, tag = "7")]
    pub terminate: Option<Terminate>,
    #[prost(message, optional, tag = "8")]
    pub run_speed_simulation: Option<RunSpeedSimulation>,
    #[prost(message, optional, tag = "9")]
    pub run_battle_simulation: Option<RunBattleSimulation>,
    #[prost(message, optional, tag = "10")]
    pub run_food_ga: Option<RunFoodGa>,
    #[prost(message, optional, tag = "11")]
    pub run_fight_simulation: Option<RunFightSimulation>,
    #[prost(message, optional, tag = "12")]
    pub create_formation: Option<CreateFormation>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SelectBeetle {
    #[prost(int32, tag = "1")]
    pub beetle_id: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SelectAllInArea {
    #[prost(float, tag = "1")]
    pub x1: f32,
    #[prost(float, tag = "2")]
    pub y1: f32,
    #[prost(float, tag = "3")]
    pub x2: f32,
    #[prost(float, tag = "4")]
    pub y2: f32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SelectedMoveCommand {
    #[prost(float, tag = "1")]
    pub x: f32,
    #[prost(float, tag = "2")]
    pub y: f32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateBeetle {
    #[prost(float, tag = "1")]
    pub x: f32,
    #[prost(float, tag = "2")]
    pub y: f32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SelectedInteractCommand {
    #[prost(int32, tag = "1")]
    pub target_id: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeselectAllBeetles {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Terminate {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RunSpeedSimulation {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RunBattleSimulation {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RunFoodGa {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RunFightSimulation {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateFormation {}

/// Inbound update envelope. Exactly one payload field is set per frame.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UiUpdate {
    #[prost(message, optional, tag = "1")]
    pub game_state: Option<GameState>,
    #[prost(message, optional, tag = "2")]
    pub charts_incremental: Option<ChartsIncremental>,
}

/// Full replacement of the authoritative state at one simulation tick.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GameState {
    #[prost(message, repeated, tag = "1")]
    pub beetles: Vec<Beetle>,
    #[prost(message, repeated, tag = "2")]
    pub food_sources: Vec<FoodSource>,
    #[prost(message, repeated, tag = "3")]
    pub home_bases: Vec<HomeBase>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Beetle {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(float, tag = "2")]
    pub x: f32,
    #[prost(float, tag = "3")]
    pub y: f32,
    /// Heading in radians.
    #[prost(float, tag = "4")]
    pub angle: f32,
    #[prost(float, tag = "5")]
    pub body_width: f32,
    #[prost(float, tag = "6")]
    pub body_length: f32,
    #[prost(message, optional, tag = "7")]
    pub color: Option<Color>,
    #[prost(bool, tag = "8")]
    pub selected: bool,
    #[prost(int32, tag = "9")]
    pub food_carrying: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Color {
    #[prost(uint32, tag = "1")]
    pub r: u32,
    #[prost(uint32, tag = "2")]
    pub g: u32,
    #[prost(uint32, tag = "3")]
    pub b: u32,
    #[prost(float, tag = "4")]
    pub a: f32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FoodSource {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(float, tag = "2")]
    pub x: f32,
    #[prost(float, tag = "3")]
    pub y: f32,
    #[prost(int32, tag = "4")]
    pub amount: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HomeBase {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(float, tag = "2")]
    pub x: f32,
    #[prost(float, tag = "3")]
    pub y: f32,
    #[prost(int32, tag = "4")]
    pub food_stored_amount: i32,
}

/// One scalar per tracked population statistic, streamed once per
/// generation while a genetic-algorithm run is active.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChartsIncremental {
    #[prost(float, tag = "1")]
    pub avg_speed: f32,
    #[prost(float, tag = "2")]
    pub avg_max_health: f32,
    #[prost(float, tag = "3")]
    pub avg_attack_power: f32,
    #[prost(float, tag = "4")]
    pub avg_food_collected: f32,
    #[prost(float, tag = "5")]
    pub avg_size: f32,
    #[prost(float, tag = "6")]
    pub avg_carapace_density: f32,
    #[prost(float, tag = "7")]
    pub avg_strength: f32,
    #[prost(float, tag = "8")]
    pub avg_quickness: f32,
    #[prost(float, tag = "9")]
    pub avg_venomosity: f32,
    #[prost(float, tag = "10")]
    pub avg_mandible_sharpness: f32,
    #[prost(float, tag = "11")]
    pub avg_body_width: f32,
    #[prost(float, tag = "12")]
    pub avg_body_length: f32,
}

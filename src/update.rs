//! Inbound frame decoding.

use prost::Message as _;

use crate::error::DecodeError;
use crate::proto;

/// One decoded inbound update.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    GameState(proto::GameState),
    ChartsIncremental(proto::ChartsIncremental),
}

/// Decode one binary frame into an [`Update`].
///
/// The envelope must carry exactly one recognized payload; a frame with
/// zero or several payloads set is a protocol violation and fails the
/// same way malformed bytes do. Decoding is pure: it never touches
/// reconciler or chart state, so a failed frame can simply be skipped.
pub fn decode(frame: &[u8]) -> Result<Update, DecodeError> {
    let envelope = proto::UiUpdate::decode(frame)?;

    match (envelope.game_state, envelope.charts_incremental) {
        (Some(state), None) => Ok(Update::GameState(state)),
        (None, Some(charts)) => Ok(Update::ChartsIncremental(charts)),
        (None, None) => Err(DecodeError::MissingPayload),
        (Some(_), Some(_)) => Err(DecodeError::ConflictingPayload),
    }
}

//! JSON-lines command protocol spoken by `hybrid-realtime run`.
//!
//! One JSON object per input line, tagged by `op`:
//!
//! ```text
//! {"op":"connect","id":"driver-1","context":{"role":"driver","isAvailable":true}}
//! {"op":"update","id":"driver-1","context":{"role":"driver","hasActiveRide":true}}
//! {"op":"disconnect","id":"driver-1"}
//! {"op":"rebalance"}
//! {"op":"stats"}
//! {"op":"participant","id":"driver-1"}
//! {"op":"participants"}
//! ```
//!
//! Every line gets exactly one JSON reply with an `ok` flag.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::{ParticipantId, RideContext};
use crate::error::{CommandError, Result};
use crate::infrastructure::realtime::RealtimeManager;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Connect { id: ParticipantId, context: RideContext },
    Update { id: ParticipantId, context: RideContext },
    Disconnect { id: ParticipantId },
    Rebalance,
    Stats,
    Participant { id: ParticipantId },
    Participants,
}

impl Command {
    /// Parse one input line.
    pub fn parse(line: &str) -> Result<Self> {
        serde_json::from_str(line).map_err(|e| CommandError::Malformed(e).into())
    }
}

/// Apply a command and build its reply payload.
pub fn dispatch(manager: &RealtimeManager, command: Command) -> Result<Value> {
    let reply = match command {
        Command::Connect { id, context } => {
            manager.connect_user(id.clone(), context);
            json!({ "ok": true, "participant": serde_json::to_value(manager.participant(id.as_str()))? })
        }
        Command::Update { id, context } => {
            let tracked = manager.update_context(id.as_str(), context);
            json!({ "ok": true, "tracked": tracked, "participant": serde_json::to_value(manager.participant(id.as_str()))? })
        }
        Command::Disconnect { id } => {
            json!({ "ok": true, "tracked": manager.disconnect_user(id.as_str()) })
        }
        Command::Rebalance => {
            json!({ "ok": true, "rebalance": serde_json::to_value(manager.rebalance_connections())? })
        }
        Command::Stats => json!({ "ok": true, "stats": serde_json::to_value(manager.get_stats())? }),
        Command::Participant { id } => {
            let snapshot = manager
                .participant(id.as_str())
                .ok_or_else(|| CommandError::UnknownParticipant(id.to_string()))?;
            json!({ "ok": true, "participant": serde_json::to_value(snapshot)? })
        }
        Command::Participants => {
            json!({ "ok": true, "participants": serde_json::to_value(manager.participants())? })
        }
    };
    Ok(reply)
}

/// Parse, apply and serialize the reply for one input line.
///
/// Failures are reported in-band so a bad line never ends the session.
pub fn execute_line(manager: &RealtimeManager, line: &str) -> String {
    match Command::parse(line).and_then(|command| dispatch(manager, command)) {
        Ok(reply) => reply.to_string(),
        Err(err) => json!({ "ok": false, "error": err.to_string() }).to_string(),
    }
}

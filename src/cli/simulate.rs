//! Handler for `simulate`: replays the reference connection scenario.
//!
//! Five sessions connect one after another against a two-slot pool, an
//! active ride disconnects, and a rebalance pass hands its slot to the best
//! waiting participant. Time is simulated, so hold times elapse instantly.

use std::sync::Arc;
use std::time::Duration;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::{output, SimulateArgs};
use crate::domain::{ConnectionStats, ParticipantSnapshot, RideContext, Role};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::realtime::{ManualClock, RealtimeManager};

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Connect(&'static str, RideContext),
    Disconnect(&'static str),
    Rebalance,
    Wait(Duration),
}

impl Step {
    fn label(&self) -> Option<String> {
        match self {
            Self::Connect(id, _) => Some(format!("connect {id}")),
            Self::Disconnect(id) => Some(format!("disconnect {id}")),
            Self::Rebalance => Some("rebalance".to_string()),
            Self::Wait(_) => None,
        }
    }
}

const ROSTER: [&str; 5] = [
    "user-active-1",
    "driver-active-1",
    "driver-available-1",
    "user-searching-1",
    "user-inactive-1",
];

/// Five sessions of descending priority, an active-ride hangup, then teardown.
#[must_use]
pub fn reference_scenario(pause: Duration) -> Vec<Step> {
    let contexts = [
        RideContext::on_ride(Role::User),
        RideContext::on_ride(Role::Driver),
        RideContext::available_driver(),
        RideContext::searching_user(),
        RideContext::idle(Role::User),
    ];

    let mut steps = Vec::new();
    for (id, context) in ROSTER.into_iter().zip(contexts) {
        steps.push(Step::Connect(id, context));
        steps.push(Step::Wait(pause));
    }
    steps.push(Step::Disconnect("user-active-1"));
    steps.push(Step::Wait(pause));
    steps.push(Step::Rebalance);
    steps.extend(ROSTER.into_iter().map(Step::Disconnect));
    steps
}

/// Result of one labelled step.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub label: String,
    pub stats: ConnectionStats,
    pub participants: Vec<ParticipantSnapshot>,
}

/// Apply `steps` in order, reporting state after every non-wait step.
pub fn run_scenario(manager: &RealtimeManager, clock: &ManualClock, steps: &[Step]) -> Vec<StepReport> {
    let mut reports = Vec::new();
    for step in steps {
        match step {
            Step::Connect(id, context) => manager.connect_user(*id, *context),
            Step::Disconnect(id) => {
                manager.disconnect_user(id);
            }
            Step::Rebalance => {
                manager.rebalance_connections();
            }
            Step::Wait(pause) => clock.advance(*pause),
        }
        if let Some(label) = step.label() {
            reports.push(StepReport {
                label,
                stats: manager.get_stats(),
                participants: manager.participants(),
            });
        }
    }
    reports
}

#[derive(Tabled)]
struct ParticipantRow {
    #[tabled(rename = "Participant")]
    id: String,
    #[tabled(rename = "Tier")]
    tier: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Poll")]
    poll: String,
}

impl From<&ParticipantSnapshot> for ParticipantRow {
    fn from(snapshot: &ParticipantSnapshot) -> Self {
        let mode = if snapshot.under_served {
            format!("{} (under-served)", snapshot.mode)
        } else {
            snapshot.mode.to_string()
        };
        Self {
            id: snapshot.id.to_string(),
            tier: format!("{} {}", snapshot.tier.rank(), snapshot.tier),
            mode,
            poll: snapshot
                .poll_interval
                .map_or_else(|| "-".to_string(), |d| format!("{}s", d.as_secs())),
        }
    }
}

/// Execute the simulate command.
pub fn execute(args: &SimulateArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(max_connections) = args.max_connections {
        config.manager.max_connections = max_connections;
    }
    config.validate()?;
    let manager_config = config.manager;

    let clock = Arc::new(ManualClock::new());
    let manager = RealtimeManager::with_clock(manager_config, clock.clone());
    let steps = reference_scenario(Duration::from_millis(args.pause_ms));

    for report in run_scenario(&manager, &clock, &steps) {
        output::section(&report.label);
        if !report.participants.is_empty() {
            let rows: Vec<ParticipantRow> = report.participants.iter().map(ParticipantRow::from).collect();
            output::indented(&Table::new(rows).with(Style::rounded()).to_string());
        }
        output::key_value("Stats", report.stats);
        output::key_value("Free slots", report.stats.free_slots());
        if report.stats.under_served > 0 {
            output::warn(&format!("{} active ride(s) under-served", report.stats.under_served));
        }
    }

    println!();
    output::ok("Scenario complete");
    Ok(())
}

//! Headless session runner
//!
//! Drives the simulation with [`AutoPlayer`] on a simulated 60 Hz clock. Used
//! by the native binary and handy for smoke-testing settings files.

use serde::Serialize;

use crate::consts::FRAME_MS;
use crate::sim::{AutoPlayer, GameEvent, GameState, SaleRecord, TickStatus, tick};

/// What happened during a headless run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub frames: u64,
    pub elapsed_ms: u64,
    pub spawned: u32,
    pub sold: u32,
    pub trashed: u32,
    pub snapped_back: u32,
    pub total_money: i64,
    /// Oldest first
    pub recent_sales: Vec<SaleRecord>,
    pub items_left: usize,
}

impl SessionSummary {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Spawned { .. } => self.spawned += 1,
            GameEvent::Sold { .. } => self.sold += 1,
            GameEvent::Trashed { .. } => self.trashed += 1,
            GameEvent::SnappedBack { .. } => self.snapped_back += 1,
            GameEvent::DragStarted { .. } => {}
        }
    }
}

/// Run `frames` autoplay ticks starting at `start_ms`
pub fn run_autoplay(state: &mut GameState, frames: u64, start_ms: u64) -> SessionSummary {
    let mut bot = AutoPlayer::default();
    let mut summary = SessionSummary {
        seed: state.seed,
        ..Default::default()
    };

    let mut now = start_ms;
    for _ in 0..frames {
        now += FRAME_MS;
        let input = bot.next_input(state, now);
        let outcome = tick(state, &input);
        for event in &outcome.events {
            log::debug!("t={now}ms {event:?}");
            summary.record(event);
        }
        summary.frames += 1;
        if outcome.status == TickStatus::Quit {
            break;
        }
    }

    summary.elapsed_ms = now - start_ms;
    summary.total_money = state.session.total_money();
    summary.recent_sales = state.session.recent_sales().cloned().collect();
    summary.items_left = state.inventory.occupied_count();

    log::info!(
        "Session over after {} frames: total ${}, {} sold, {} trashed",
        summary.frames,
        summary.total_money,
        summary.sold,
        summary.trashed
    );
    summary
}

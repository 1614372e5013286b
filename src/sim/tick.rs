//! Per-frame simulation step
//!
//! Order within a tick:
//! 1. input events in arrival order (press/release; `Quit` stops the tick)
//! 2. dragged item follows the pointer sample
//! 3. spawn timer

use glam::IVec2;

use super::drag::{drag_to, press, release};
use super::spawner::try_spawn;
use super::state::{GameEvent, GameState};

/// Input delivered by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    PointerDown(IVec2),
    PointerUp,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pending events, oldest first
    pub events: Vec<InputEvent>,
    /// Pointer position sampled this frame
    pub pointer: IVec2,
    /// Shell clock (ms)
    pub now_ms: u64,
}

/// Whether the shell should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    Quit,
}

/// Result of one tick
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub status: TickStatus,
    pub events: Vec<GameEvent>,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    let mut events = Vec::new();

    for event in &input.events {
        match *event {
            InputEvent::Quit => {
                log::info!("Quit requested");
                return TickOutcome {
                    status: TickStatus::Quit,
                    events,
                };
            }
            InputEvent::PointerDown(pos) => {
                press(state, pos, &mut events);
            }
            InputEvent::PointerUp => {
                release(state, &mut events);
            }
        }
    }

    drag_to(state, input.pointer);
    try_spawn(state, input.now_ms, &mut events);

    TickOutcome {
        status: TickStatus::Running,
        events,
    }
}

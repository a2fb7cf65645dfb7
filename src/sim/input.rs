//! Input-event queue
//!
//! Host callbacks (DOM listeners on wasm, the scripted driver on native) push
//! events here; the tick function drains the queue exactly once per tick.
//! Routing all input through one queue pins down the order in which input
//! lands relative to the simulation sub-steps.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::INPUT_QUEUE_CAP;

/// A single input event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Step the character left by its speed
    MoveLeft,
    /// Step the character right by its speed
    MoveRight,
    /// Update the aim target point (pointer position)
    Aim(Vec2),
    /// Start holding the trigger (pointer down)
    TriggerDown,
    /// Release the trigger (pointer up)
    TriggerUp,
}

/// Bounded queue of pending input events.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an event. Events beyond the capacity are dropped.
    pub fn push(&mut self, event: InputEvent) {
        if self.events.len() >= INPUT_QUEUE_CAP {
            log::warn!("Input queue full, dropping {:?}", event);
            return;
        }
        self.events.push(event);
    }

    /// Take all pending events in arrival order, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Commands the presentation side can issue.
/// Each one maps onto a single movement or combat request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Step one cell left (`direction < 0`) or right (`direction > 0`).
    Step { direction: i32 },
    Jump,
    /// Swing the equipped weapon. `holding_down` turns an airborne swing
    /// into a downward strike.
    Attack { holding_down: bool },
}

/// A queue of input events.
/// The host writes events into the queue; the game reads them during each
/// tick and the runner drains them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Discard all pending events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Step { direction: -1 });
        q.push(InputEvent::Jump);
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events, vec![InputEvent::Step { direction: -1 }, InputEvent::Jump]);
        assert!(q.is_empty());
    }

    #[test]
    fn clear_discards_pending() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Jump);
        q.push(InputEvent::Step { direction: 1 });
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.iter().count(), 0);
    }

    #[test]
    fn iter_does_not_consume() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Attack { holding_down: true });
        assert_eq!(q.iter().count(), 1);
        assert_eq!(q.len(), 1);
    }
}

use crate::sim::InputEvent;

/// Pending host input
///
/// The host pushes events as they arrive; the game drains them into the next
/// tick so state only ever changes at tick boundaries.
#[derive(Debug, Clone)]
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

    /// Take all pending events, leaving the queue empty
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
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
    use crate::sim::GameMode;

    #[test]
    fn push_and_drain_in_order() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        queue.push(InputEvent::SelectMode(GameMode::Classic));
        queue.push(InputEvent::PointerUp);
        assert_eq!(queue.len(), 3);

        let events = queue.drain();
        assert_eq!(events[0], InputEvent::PointerDown { x: 10.0, y: 20.0 });
        assert_eq!(events[2], InputEvent::PointerUp);
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }
}

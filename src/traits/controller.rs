use crate::camera::Movement;

/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
}

impl Button {
    /// Walking direction bound to this button, if any.
    pub const fn movement(self) -> Option<Movement> {
        match self {
            Button::KeyW | Button::ArrowUp => Some(Movement::Forward),
            Button::KeyS | Button::ArrowDown => Some(Movement::Backward),
            Button::KeyA | Button::ArrowLeft => Some(Movement::Left),
            Button::KeyD | Button::ArrowRight => Some(Movement::Right),
            Button::Escape => None,
        }
    }
}

/// Controller - handles button input states
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently pressed buttons, in press order
    fn get_down_keys(&self) -> &[Button];

    /// Movement intents for every held button, in press order.
    /// Two buttons bound to the same direction yield it once.
    fn held_movements(&self) -> Vec<Movement> {
        let mut moves = Vec::with_capacity(4);
        for movement in self.get_down_keys().iter().filter_map(|b| b.movement()) {
            if !moves.contains(&movement) {
                moves.push(movement);
            }
        }
        moves
    }
}

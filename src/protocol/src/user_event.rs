use crate::V2;

/// Edge of the primary pointer button observed during one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonState {
	Pressed,
	Released,
	Unchanged,
}

/// One frame worth of pointer input.
///
/// Press, release and move are exclusive: a frame that carries a press or a
/// release is never also treated as a move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
	pub button: ButtonState,
	pub position: V2,
	pub cursor_visible: bool,
}

impl PointerInput {
	pub fn pressed(position: V2) -> Self {
		Self {
			button: ButtonState::Pressed,
			position,
			cursor_visible: true,
		}
	}

	pub fn released(position: V2) -> Self {
		Self {
			button: ButtonState::Released,
			position,
			cursor_visible: true,
		}
	}

	pub fn moved(position: V2) -> Self {
		Self {
			button: ButtonState::Unchanged,
			position,
			cursor_visible: true,
		}
	}

	pub fn with_cursor_hidden(mut self) -> Self {
		self.cursor_visible = false;
		self
	}
}

impl Default for PointerInput {
	fn default() -> Self {
		Self::moved(V2::zeros())
	}
}

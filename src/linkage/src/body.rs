use serde::{Deserialize, Serialize};

use crate::V3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub usize);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
	None,
	#[default]
	Interpolate,
	Extrapolate,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Collider {
	Sphere { radius: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct BodyTemplate {
	pub name: String,
	pub pos: V3,
	pub mass: f32,
	pub drag: f32,
	pub angular_drag: f32,
	pub interpolation: Interpolation,
	pub use_gravity: bool,
	pub kinematic: bool,
	pub collider: Option<Collider>,
}

impl BodyTemplate {
	pub fn new(pos: V3) -> Self {
		Self {
			name: String::new(),
			pos,
			mass: 1.0,
			drag: 0.0,
			angular_drag: 0.05,
			interpolation: Interpolation::None,
			use_gravity: true,
			kinematic: false,
			collider: None,
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	pub fn with_mass(mut self, mass: f32) -> Self {
		self.mass = mass;
		self
	}

	pub fn with_drag(mut self, drag: f32, angular_drag: f32) -> Self {
		self.drag = drag;
		self.angular_drag = angular_drag;
		self
	}

	pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
		self.interpolation = interpolation;
		self
	}

	pub fn with_gravity(mut self, use_gravity: bool) -> Self {
		self.use_gravity = use_gravity;
		self
	}

	pub fn kinematic(mut self) -> Self {
		self.kinematic = true;
		self
	}

	pub fn with_sphere(mut self, radius: f32) -> Self {
		self.collider = Some(Collider::Sphere { radius });
		self
	}
}

#[derive(Clone, Debug)]
pub struct Body {
	pub template: BodyTemplate,
	pub pos: V3,
	pub vel: V3,
	// kinematic target set by move_position, consumed on the next step
	pub target: Option<V3>,
}

impl Body {
	pub fn new(template: BodyTemplate) -> Self {
		Self {
			pos: template.pos,
			vel: V3::zeros(),
			target: None,
			template,
		}
	}

	pub fn get_pos(&self) -> V3 {
		self.pos
	}

	pub fn update(&mut self, t: f32, gravity: V3) {
		if let Some(target) = self.target.take() {
			if t > 0. {
				self.vel = (target - self.pos) / t;
			}
			self.pos = target;
			return;
		}
		if self.template.kinematic {
			return;
		}
		if self.template.use_gravity {
			self.vel += gravity * t;
		}
		// same drag model as PhysX: v *= 1 / (1 + drag * t)
		self.vel /= 1. + self.template.drag * t;
		self.pos += self.vel * t;
	}
}

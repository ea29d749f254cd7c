use protocol::user_event::{ButtonState, PointerInput};
use protocol::view::View;
use tracing::{debug, info};

use super::control_law::{clamp_magnitude, drag_velocity};
use super::draggable::DraggableRegistry;
use crate::backend::{PhysicsBackend, RayHit};
use crate::body::BodyHandle;
use crate::config::DragConfig;
use crate::scheduler::Behaviour;
use crate::{V2, V3};

/// Body currently held by the pointer and the flags it had before.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
	pub body: BodyHandle,
	pub used_gravity: bool,
	pub was_kinematic: bool,
	pub depth: f32,
	pub target: V3,
}

pub struct DragController {
	pub config: DragConfig,
	pub view: View,
	pub draggables: DraggableRegistry,
	session: Option<DragSession>,
	hits: Vec<RayHit>,
}

impl DragController {
	pub fn new(config: DragConfig, view: View) -> Self {
		let hits = vec![RayHit::default(); config.hit_capacity];
		Self {
			config,
			view,
			draggables: DraggableRegistry::default(),
			session: None,
			hits,
		}
	}

	pub fn with_draggables(mut self, draggables: DraggableRegistry) -> Self {
		self.draggables = draggables;
		self
	}

	pub fn session(&self) -> Option<&DragSession> {
		self.session.as_ref()
	}

	pub fn is_dragging(&self) -> bool {
		self.session.is_some()
	}

	pub fn handle_input<B: PhysicsBackend + ?Sized>(
		&mut self,
		backend: &mut B,
		input: &PointerInput,
	) {
		match input.button {
			ButtonState::Pressed => {
				if self.session.is_none() && input.cursor_visible {
					self.pick(backend, input.position);
				}
			}
			ButtonState::Released => self.release(backend),
			ButtonState::Unchanged => self.update_target(input.position),
		}
	}

	/// Raycast through `screen` and start dragging the first draggable hit.
	pub fn pick<B: PhysicsBackend + ?Sized>(&mut self, backend: &mut B, screen: V2) -> bool {
		if self.hits.len() != self.config.hit_capacity {
			self.hits.resize(self.config.hit_capacity, RayHit::default());
		}
		let ray = self.view.screen_point_to_ray(screen);
		let n = backend.raycast(&ray, self.config.ray_distance, &mut self.hits);
		let body = self.hits[..n]
			.iter()
			.map(|hit| hit.body)
			.find(|body| self.draggables.contains(*body));
		let body = match body {
			Some(body) => body,
			None => {
				debug!("no draggable under {:?} ({} hits)", screen, n);
				return false;
			}
		};

		let used_gravity = backend.use_gravity(body);
		let was_kinematic = backend.is_kinematic(body);
		backend.set_use_gravity(body, false);
		backend.set_kinematic(body, false);
		let pos = backend.position(body);
		let depth = self.view.w2s(pos)[2].min(self.config.max_distance);
		self.session = Some(DragSession {
			body,
			used_gravity,
			was_kinematic,
			depth,
			target: pos,
		});
		if let Some(d) = self.draggables.get_mut(body) {
			d.on_drag_start();
		}
		info!("drag start {:?} at depth {:.2}", body, depth);
		true
	}

	pub fn update_target(&mut self, screen: V2) {
		if let Some(session) = self.session.as_mut() {
			session.target = self.view.s2w(screen, session.depth);
		}
	}

	pub fn step<B: PhysicsBackend + ?Sized>(&mut self, backend: &mut B, dt: f32) {
		let session = match self.session.as_ref() {
			Some(s) => s,
			None => return,
		};
		if self.config.use_physics {
			let delta = session.target - backend.position(session.body);
			let vel = drag_velocity(
				delta,
				dt,
				self.config.max_speed,
				self.config.stoppable_distance,
			);
			backend.set_velocity(session.body, vel);
		} else {
			backend.move_position(session.body, session.target);
		}
	}

	pub fn release<B: PhysicsBackend + ?Sized>(&mut self, backend: &mut B) {
		let session = match self.session.as_ref() {
			Some(s) => s.clone(),
			None => return,
		};
		// flags go back before the session is dropped
		backend.set_use_gravity(session.body, session.used_gravity);
		backend.set_kinematic(session.body, session.was_kinematic);
		let vel = backend.velocity(session.body);
		backend.set_velocity(
			session.body,
			clamp_magnitude(vel, self.config.max_release_velocity),
		);
		if let Some(d) = self.draggables.get_mut(session.body) {
			d.on_drag_end();
		}
		self.session = None;
		info!("drag end {:?}", session.body);
	}
}

impl Behaviour for DragController {
	fn on_frame(&mut self, world: &mut dyn PhysicsBackend, input: &PointerInput) {
		self.handle_input(world, input);
	}

	fn on_physics_step(&mut self, world: &mut dyn PhysicsBackend, dt: f32) {
		self.step(world, dt);
	}
}

use protocol::view::Ray;

use crate::body::{BodyHandle, BodyTemplate};
use crate::joint::{Joint, JointDesc, JointHandle};
use crate::V3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
	pub body: BodyHandle,
	pub distance: f32,
	pub point: V3,
}

impl Default for RayHit {
	fn default() -> Self {
		Self {
			body: BodyHandle(0),
			distance: 0.,
			point: V3::zeros(),
		}
	}
}

/// What the chain builder and drag controller need from a rigid body engine.
///
/// Accessors on handles the backend does not own are the backend's problem;
/// callers only pass handles the backend handed out.
pub trait PhysicsBackend {
	fn create_body(&mut self, template: BodyTemplate) -> BodyHandle;

	fn create_joint(&mut self, owner: BodyHandle, desc: JointDesc) -> JointHandle;

	fn joint(&self, handle: JointHandle) -> Option<&Joint>;

	fn joints(&self) -> Vec<JointHandle>;

	fn position(&self, body: BodyHandle) -> V3;

	fn velocity(&self, body: BodyHandle) -> V3;

	fn set_velocity(&mut self, body: BodyHandle, vel: V3);

	fn use_gravity(&self, body: BodyHandle) -> bool;

	fn set_use_gravity(&mut self, body: BodyHandle, on: bool);

	fn is_kinematic(&self, body: BodyHandle) -> bool;

	fn set_kinematic(&mut self, body: BodyHandle, on: bool);

	/// Move a body to `pos` during the next step.
	fn move_position(&mut self, body: BodyHandle, pos: V3);

	/// Fill `hits` with up to `hits.len()` bodies crossed by `ray` within
	/// `max_distance`, returning how many were written. Hits beyond the buffer
	/// are dropped.
	fn raycast(&self, ray: &Ray, max_distance: f32, hits: &mut [RayHit]) -> usize;

	fn step(&mut self, dt: f32);
}

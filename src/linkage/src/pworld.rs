use protocol::pr_model::{PrModel, PrPolyline};
use protocol::view::Ray;
use tracing::debug;

use crate::backend::{PhysicsBackend, RayHit};
use crate::body::{Body, BodyHandle, BodyTemplate, Collider};
use crate::error::{LinkageError, Result};
use crate::inspect::describe_joints;
use crate::joint::{Joint, JointDesc, JointHandle};
use crate::V3;

/// In-memory reference backend.
///
/// Integrates gravity, linear drag and kinematic moves, stores joints for
/// inspection and answers raycasts against sphere colliders. Joints are not
/// solved.
pub struct PWorld {
	pub gravity: V3,
	bodies: Vec<Body>,
	joints: Vec<Joint>,
}

impl Default for PWorld {
	fn default() -> Self {
		Self {
			gravity: V3::new(0., -9.81, 0.),
			bodies: Vec::new(),
			joints: Vec::new(),
		}
	}
}

impl PWorld {
	pub fn with_gravity(mut self, gravity: V3) -> Self {
		self.gravity = gravity;
		self
	}

	pub fn try_body(&self, h: BodyHandle) -> Result<&Body> {
		self.bodies.get(h.0).ok_or(LinkageError::UnknownBody(h))
	}

	pub fn try_body_mut(&mut self, h: BodyHandle) -> Result<&mut Body> {
		self.bodies.get_mut(h.0).ok_or(LinkageError::UnknownBody(h))
	}

	pub fn body_count(&self) -> usize {
		self.bodies.len()
	}

	pub fn name(&self, h: BodyHandle) -> &str {
		&self.body(h).template.name
	}

	fn body(&self, h: BodyHandle) -> &Body {
		&self.bodies[h.0]
	}

	fn body_mut(&mut self, h: BodyHandle) -> &mut Body {
		&mut self.bodies[h.0]
	}

	pub fn pr_model(&self, chains: Vec<PrPolyline>) -> PrModel {
		PrModel {
			chains,
			joints: describe_joints(self),
		}
	}

	#[cfg(not(debug_assertions))]
	fn integrate(&mut self, dt: f32) {
		use rayon::prelude::*;
		let gravity = self.gravity;
		self.bodies
			.par_iter_mut()
			.for_each(|body| body.update(dt, gravity));
	}

	#[cfg(debug_assertions)]
	fn integrate(&mut self, dt: f32) {
		let gravity = self.gravity;
		self.bodies
			.iter_mut()
			.for_each(|body| body.update(dt, gravity));
	}
}

fn ray_sphere(ray: &Ray, center: V3, radius: f32) -> Option<f32> {
	let oc = ray.origin - center;
	let b = oc.dot(&ray.dir);
	let c = oc.dot(&oc) - radius * radius;
	let disc = b * b - c;
	if disc < 0. {
		return None;
	}
	let sqrt_d = disc.sqrt();
	let t = -b - sqrt_d;
	if t >= 0. {
		return Some(t);
	}
	// origin inside the sphere
	let t = -b + sqrt_d;
	if t >= 0. {
		Some(t)
	} else {
		None
	}
}

impl PhysicsBackend for PWorld {
	fn create_body(&mut self, template: BodyTemplate) -> BodyHandle {
		let h = BodyHandle(self.bodies.len());
		debug!("create body {:?} '{}' at {:?}", h, template.name, template.pos);
		self.bodies.push(Body::new(template));
		h
	}

	fn create_joint(&mut self, owner: BodyHandle, desc: JointDesc) -> JointHandle {
		let id = JointHandle(self.joints.len());
		self.joints.push(Joint { id, owner, desc });
		id
	}

	fn joint(&self, handle: JointHandle) -> Option<&Joint> {
		self.joints.get(handle.0)
	}

	fn joints(&self) -> Vec<JointHandle> {
		self.joints.iter().map(|j| j.id).collect()
	}

	fn position(&self, body: BodyHandle) -> V3 {
		self.body(body).get_pos()
	}

	fn velocity(&self, body: BodyHandle) -> V3 {
		self.body(body).vel
	}

	fn set_velocity(&mut self, body: BodyHandle, vel: V3) {
		self.body_mut(body).vel = vel;
	}

	fn use_gravity(&self, body: BodyHandle) -> bool {
		self.body(body).template.use_gravity
	}

	fn set_use_gravity(&mut self, body: BodyHandle, on: bool) {
		self.body_mut(body).template.use_gravity = on;
	}

	fn is_kinematic(&self, body: BodyHandle) -> bool {
		self.body(body).template.kinematic
	}

	fn set_kinematic(&mut self, body: BodyHandle, on: bool) {
		self.body_mut(body).template.kinematic = on;
	}

	fn move_position(&mut self, body: BodyHandle, pos: V3) {
		self.body_mut(body).target = Some(pos);
	}

	fn raycast(&self, ray: &Ray, max_distance: f32, hits: &mut [RayHit]) -> usize {
		let mut all: Vec<RayHit> = self
			.bodies
			.iter()
			.enumerate()
			.filter_map(|(idx, body)| {
				let Collider::Sphere { radius } = body.template.collider?;
				let t = ray_sphere(ray, body.pos, radius)?;
				if t > max_distance {
					return None;
				}
				Some(RayHit {
					body: BodyHandle(idx),
					distance: t,
					point: ray.at(t),
				})
			})
			.collect();
		all.sort_by(|a, b| a.distance.total_cmp(&b.distance));
		let n = all.len().min(hits.len());
		hits[..n].copy_from_slice(&all[..n]);
		n
	}

	fn step(&mut self, dt: f32) {
		if dt == 0f32 {
			return;
		}
		self.integrate(dt);
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use approx::assert_relative_eq;

	fn hit_buf(n: usize) -> Vec<RayHit> {
		vec![RayHit::default(); n]
	}

	#[test]
	fn test_raycast_sorted_and_bounded() {
		let mut w = PWorld::default();
		let far = w.create_body(BodyTemplate::new(V3::new(0., 0., 10.)).with_sphere(0.5));
		let near = w.create_body(BodyTemplate::new(V3::new(0., 0., 5.)).with_sphere(0.5));
		let _miss = w.create_body(BodyTemplate::new(V3::new(3., 0., 5.)).with_sphere(0.5));
		let _no_collider = w.create_body(BodyTemplate::new(V3::new(0., 0., 7.)));
		let ray = Ray::new(V3::zeros(), V3::z());

		let mut hits = hit_buf(16);
		let n = w.raycast(&ray, 500., &mut hits);
		assert_eq!(n, 2);
		assert_eq!(hits[0].body, near);
		assert_eq!(hits[1].body, far);
		assert_relative_eq!(hits[0].distance, 4.5);

		let mut hits = hit_buf(1);
		assert_eq!(w.raycast(&ray, 500., &mut hits), 1);
		assert_eq!(hits[0].body, near);

		let mut hits = hit_buf(16);
		assert_eq!(w.raycast(&ray, 6., &mut hits), 1);
	}

	#[test]
	fn test_step_gravity_flag() {
		let mut w = PWorld::default().with_gravity(V3::new(0., -10., 0.));
		let a = w.create_body(BodyTemplate::new(V3::zeros()));
		let b = w.create_body(BodyTemplate::new(V3::zeros()).with_gravity(false));
		w.step(0.1);
		assert!(w.position(a)[1] < 0.);
		assert_relative_eq!(w.position(b), V3::zeros());
	}

	#[test]
	fn test_unknown_body() {
		let w = PWorld::default();
		assert!(matches!(
			w.try_body(BodyHandle(3)),
			Err(LinkageError::UnknownBody(BodyHandle(3)))
		));
	}

	#[test]
	fn test_try_body_mut() {
		let mut w = PWorld::default();
		let h = w.create_body(BodyTemplate::new(V3::zeros()));
		w.try_body_mut(h).unwrap().template.use_gravity = false;
		assert!(!w.use_gravity(h));
		w.step(0.1);
		assert_relative_eq!(w.position(h), V3::zeros());
		assert!(matches!(
			w.try_body_mut(BodyHandle(1)),
			Err(LinkageError::UnknownBody(BodyHandle(1)))
		));
	}
}

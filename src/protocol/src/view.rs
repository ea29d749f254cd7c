use crate::{Rot, V2, V3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
	pub origin: V3,
	pub dir: V3,
}

impl Ray {
	pub fn new(origin: V3, dir: V3) -> Self {
		let len = dir.magnitude();
		let dir = if len > 0. { dir / len } else { V3::z() };
		Self { origin, dir }
	}

	pub fn at(&self, t: f32) -> V3 {
		self.origin + self.dir * t
	}
}

/// Perspective camera looking down its local +z axis.
///
/// Screen coordinates are pixels with the origin in the lower left corner,
/// the third component of a screen point is the camera space depth.
#[derive(Clone, Debug)]
pub struct View {
	pos: V3,
	rot: Rot,
	fov_y: f32, // radians
	screen_r: V2, // half size
}

impl Default for View {
	fn default() -> Self {
		Self {
			pos: V3::new(0., 0., -10.),
			rot: Rot::identity(),
			fov_y: 60f32.to_radians(),
			screen_r: V2::new(640., 480.),
		}
	}
}

impl View {
	pub fn with_pos(mut self, pos: V3) -> Self {
		self.pos = pos;
		self
	}

	pub fn with_fov(mut self, degrees: f32) -> Self {
		self.fov_y = degrees.to_radians();
		self
	}

	pub fn look_at(mut self, target: V3) -> Self {
		let dir = target - self.pos;
		if dir.magnitude() > 0. {
			self.rot = Rot::face_towards(&dir, &V3::y());
		}
		self
	}

	pub fn get_pos(&self) -> V3 {
		self.pos
	}

	fn half_extent(&self) -> V2 {
		let tan = (self.fov_y / 2.).tan();
		let aspect = self.screen_r[0] / self.screen_r[1];
		V2::new(tan * aspect, tan)
	}

	fn ndc(&self, screen: V2) -> V2 {
		V2::new(
			screen[0] / self.screen_r[0] - 1.,
			screen[1] / self.screen_r[1] - 1.,
		)
	}

	/// World point to screen point, z is camera space depth.
	pub fn w2s(&self, world: V3) -> V3 {
		let pc = self.rot.inverse() * (world - self.pos);
		let ext = self.half_extent();
		let nx = pc[0] / (pc[2] * ext[0]);
		let ny = pc[1] / (pc[2] * ext[1]);
		V3::new(
			(nx + 1.) * self.screen_r[0],
			(ny + 1.) * self.screen_r[1],
			pc[2],
		)
	}

	/// Screen point at camera space `depth` to world point.
	pub fn s2w(&self, screen: V2, depth: f32) -> V3 {
		let ndc = self.ndc(screen);
		let ext = self.half_extent();
		let pc = V3::new(ndc[0] * ext[0] * depth, ndc[1] * ext[1] * depth, depth);
		self.pos + self.rot * pc
	}

	pub fn screen_point_to_ray(&self, screen: V2) -> Ray {
		let ndc = self.ndc(screen);
		let ext = self.half_extent();
		let dir = V3::new(ndc[0] * ext[0], ndc[1] * ext[1], 1.);
		Ray::new(self.pos, self.rot * dir)
	}
}

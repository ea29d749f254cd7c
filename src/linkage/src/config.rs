use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::body::Interpolation;
use crate::error::{LinkageError, Result};
use crate::joint::ProjectionMode;

fn check(field: &str, value: f32) -> Result<()> {
	if !value.is_finite() || value < 0. {
		return Err(LinkageError::invalid(field, value));
	}
	Ok(())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentParams {
	pub mass: f32,
	pub drag: f32,
	pub angular_drag: f32,
	pub interpolation: Interpolation,
}

impl Default for SegmentParams {
	fn default() -> Self {
		Self {
			mass: 0.5,
			drag: 0.05,
			angular_drag: 0.,
			interpolation: Interpolation::Interpolate,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JointParams {
	/// Total angular arc in degrees, split evenly around the rest pose.
	pub angle_limit: f32,
	pub position_spring: f32,
	pub position_damper: f32,
	pub max_force: f32,
	// linear limit spring, applied although translation is locked
	pub spring: f32,
	pub damper: f32,
	pub projection: ProjectionMode,
	pub preprocessing: bool,
}

impl Default for JointParams {
	fn default() -> Self {
		Self {
			angle_limit: 60.,
			position_spring: 0.,
			position_damper: 0.,
			max_force: 5.,
			spring: 1.,
			damper: 5.,
			projection: ProjectionMode::None,
			preprocessing: false,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
	pub segments: i32,
	pub segment: SegmentParams,
	pub joint: JointParams,
}

impl Default for ChainConfig {
	fn default() -> Self {
		Self {
			segments: 1,
			segment: Default::default(),
			joint: Default::default(),
		}
	}
}

impl ChainConfig {
	pub fn with_segments(mut self, segments: i32) -> Self {
		self.segments = segments;
		self
	}

	pub fn with_segment(mut self, segment: SegmentParams) -> Self {
		self.segment = segment;
		self
	}

	pub fn with_joint(mut self, joint: JointParams) -> Self {
		self.joint = joint;
		self
	}

	pub fn segment_count(&self) -> usize {
		self.segments.max(1) as usize
	}

	pub fn validate(mut self) -> Result<Self> {
		if self.segments < 1 {
			warn!("segment count {} clamped to 1", self.segments);
			self.segments = 1;
		}
		check("segment.mass", self.segment.mass)?;
		check("segment.drag", self.segment.drag)?;
		check("segment.angular_drag", self.segment.angular_drag)?;
		check("joint.angle_limit", self.joint.angle_limit)?;
		check("joint.position_spring", self.joint.position_spring)?;
		check("joint.position_damper", self.joint.position_damper)?;
		check("joint.max_force", self.joint.max_force)?;
		check("joint.spring", self.joint.spring)?;
		check("joint.damper", self.joint.damper)?;
		Ok(self)
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
	/// Drive the body through its velocity; otherwise move it directly.
	pub use_physics: bool,
	pub max_speed: f32,
	pub stoppable_distance: f32,
	pub max_distance: f32,
	pub max_release_velocity: f32,
	pub hit_capacity: usize,
	pub ray_distance: f32,
}

impl Default for DragConfig {
	fn default() -> Self {
		Self {
			use_physics: true,
			max_speed: 10.,
			stoppable_distance: 1.,
			max_distance: 40.,
			max_release_velocity: 20.,
			hit_capacity: 16,
			ray_distance: 500.,
		}
	}
}

impl DragConfig {
	pub fn kinematic(mut self) -> Self {
		self.use_physics = false;
		self
	}

	pub fn with_max_speed(mut self, max_speed: f32) -> Self {
		self.max_speed = max_speed;
		self
	}

	pub fn with_stoppable_distance(mut self, d: f32) -> Self {
		self.stoppable_distance = d;
		self
	}

	pub fn with_max_distance(mut self, d: f32) -> Self {
		self.max_distance = d;
		self
	}

	pub fn with_max_release_velocity(mut self, v: f32) -> Self {
		self.max_release_velocity = v;
		self
	}

	pub fn with_hit_capacity(mut self, n: usize) -> Self {
		self.hit_capacity = n;
		self
	}

	pub fn validate(self) -> Result<Self> {
		check("drag.max_speed", self.max_speed)?;
		check("drag.max_distance", self.max_distance)?;
		check("drag.max_release_velocity", self.max_release_velocity)?;
		check("drag.ray_distance", self.ray_distance)?;
		check("drag.stoppable_distance", self.stoppable_distance)?;
		if self.stoppable_distance == 0. {
			return Err(LinkageError::invalid(
				"drag.stoppable_distance",
				self.stoppable_distance,
			));
		}
		if self.hit_capacity == 0 {
			return Err(LinkageError::InvalidConfig(
				"drag.hit_capacity = 0".to_string(),
			));
		}
		Ok(self)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkageConfig {
	pub chain: ChainConfig,
	pub drag: DragConfig,
}

impl LinkageConfig {
	pub fn validate(self) -> Result<Self> {
		Ok(Self {
			chain: self.chain.validate()?,
			drag: self.drag.validate()?,
		})
	}

	pub fn from_json_str(s: &str) -> Result<Self> {
		let config: Self = serde_json::from_str(s)?;
		config.validate()
	}

	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let s = std::fs::read_to_string(path)?;
		Self::from_json_str(&s)
	}
}

use serde::{Deserialize, Serialize};

use crate::body::BodyHandle;
use crate::V3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JointHandle(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
	Locked,
	Limited,
	Free,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionMode {
	#[default]
	None,
	PositionAndRotation,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JointDrive {
	pub position_spring: f32,
	pub position_damper: f32,
	pub max_force: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SoftLimitSpring {
	pub spring: f32,
	pub damper: f32,
}

/// Angular limits in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngularLimits {
	pub low_x: f32,
	pub high_x: f32,
	pub y: f32,
	pub z: f32,
}

impl AngularLimits {
	/// Symmetric limits covering a total arc of `angle` degrees on every axis.
	pub fn symmetric(angle: f32) -> Self {
		let half = angle / 2.;
		Self {
			low_x: -half,
			high_x: half,
			y: half,
			z: half,
		}
	}
}

impl Default for AngularLimits {
	fn default() -> Self {
		Self::symmetric(0.)
	}
}

/// Six degree of freedom joint, the way a configurable joint is handed to the
/// physics backend. The owner body is passed separately on creation.
#[derive(Clone, Debug, PartialEq)]
pub struct JointDesc {
	pub connected: BodyHandle,
	pub linear: [Motion; 3],
	pub angular: [Motion; 3],
	pub angular_limits: AngularLimits,
	pub angular_x_drive: JointDrive,
	pub angular_yz_drive: JointDrive,
	pub linear_limit_spring: SoftLimitSpring,
	pub axis: V3,
	pub secondary_axis: V3,
	// None: the backend derives it from the current pose
	pub connected_anchor: Option<V3>,
	pub projection: ProjectionMode,
	pub preprocessing: bool,
}

impl JointDesc {
	pub fn new(connected: BodyHandle) -> Self {
		Self {
			connected,
			linear: [Motion::Free; 3],
			angular: [Motion::Free; 3],
			angular_limits: AngularLimits::default(),
			angular_x_drive: JointDrive::default(),
			angular_yz_drive: JointDrive::default(),
			linear_limit_spring: SoftLimitSpring::default(),
			axis: V3::x(),
			secondary_axis: V3::y(),
			connected_anchor: None,
			projection: ProjectionMode::None,
			preprocessing: true,
		}
	}

	pub fn with_linear(mut self, motion: Motion) -> Self {
		self.linear = [motion; 3];
		self
	}

	pub fn with_angular(mut self, motion: Motion) -> Self {
		self.angular = [motion; 3];
		self
	}

	pub fn with_angular_limits(mut self, limits: AngularLimits) -> Self {
		self.angular_limits = limits;
		self
	}

	pub fn with_drive(mut self, drive: JointDrive) -> Self {
		self.angular_x_drive = drive;
		self.angular_yz_drive = drive;
		self
	}

	pub fn with_linear_limit_spring(mut self, spring: SoftLimitSpring) -> Self {
		self.linear_limit_spring = spring;
		self
	}

	pub fn with_axes(mut self, axis: V3, secondary_axis: V3) -> Self {
		self.axis = axis;
		self.secondary_axis = secondary_axis;
		self
	}

	pub fn with_connected_anchor(mut self, anchor: V3) -> Self {
		self.connected_anchor = Some(anchor);
		self
	}

	pub fn with_projection(mut self, projection: ProjectionMode) -> Self {
		self.projection = projection;
		self
	}

	pub fn with_preprocessing(mut self, preprocessing: bool) -> Self {
		self.preprocessing = preprocessing;
		self
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Joint {
	pub id: JointHandle,
	pub owner: BodyHandle,
	pub desc: JointDesc,
}

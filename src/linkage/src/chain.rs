use protocol::pr_model::PrPolyline;
use protocol::user_event::PointerInput;
use tracing::{debug, info};

use crate::backend::PhysicsBackend;
use crate::body::{BodyHandle, BodyTemplate};
use crate::config::{ChainConfig, JointParams};
use crate::joint::{
	AngularLimits, JointDesc, JointDrive, JointHandle, Motion, SoftLimitSpring,
};
use crate::render::LineRenderer;
use crate::scheduler::Behaviour;
use crate::{MIN_CHAIN_SPAN, V3};

/// Positions of the bodies synthesized between anchor and end.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainPlan {
	pub intermediates: Vec<V3>,
}

impl ChainPlan {
	/// `None` when the span is too short to need a chain.
	pub fn new(anchor: V3, end: V3, segments: usize) -> Option<Self> {
		if (end - anchor).magnitude() < MIN_CHAIN_SPAN {
			return None;
		}
		let segments = segments.max(1);
		let step = (end - anchor) / segments as f32;
		let intermediates = (1..segments).map(|i| anchor + step * i as f32).collect();
		Some(Self { intermediates })
	}
}

pub fn joint_desc(prev: BodyHandle, anchor: V3, params: &JointParams) -> JointDesc {
	let drive = JointDrive {
		position_spring: params.position_spring,
		position_damper: params.position_damper,
		max_force: params.max_force,
	};
	JointDesc::new(prev)
		.with_linear(Motion::Locked)
		.with_angular(Motion::Limited)
		.with_axes(V3::z(), V3::zeros())
		.with_angular_limits(AngularLimits::symmetric(params.angle_limit))
		.with_drive(drive)
		.with_connected_anchor(anchor)
		.with_projection(params.projection)
		.with_linear_limit_spring(SoftLimitSpring {
			spring: params.spring,
			damper: params.damper,
		})
		.with_preprocessing(params.preprocessing)
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChainInstance {
	pub bodies: Vec<BodyHandle>,
	pub joints: Vec<JointHandle>,
}

impl ChainInstance {
	/// Synthesize the intermediate bodies and joint every adjacent pair.
	/// Returns `None` without touching the backend when `end` is unset or
	/// coincides with `anchor`.
	pub fn build<B: PhysicsBackend + ?Sized>(
		backend: &mut B,
		anchor: BodyHandle,
		end: Option<BodyHandle>,
		config: &ChainConfig,
	) -> Option<Self> {
		let end = match end {
			Some(end) => end,
			None => {
				debug!("chain on {:?} has no end point", anchor);
				return None;
			}
		};
		let anchor_pos = backend.position(anchor);
		let end_pos = backend.position(end);
		let segments = config.segment_count();
		let plan = match ChainPlan::new(anchor_pos, end_pos, segments) {
			Some(plan) => plan,
			None => {
				debug!("chain {:?} -> {:?} already connected", anchor, end);
				return None;
			}
		};

		let seg = &config.segment;
		let mut bodies = Vec::with_capacity(plan.intermediates.len() + 2);
		bodies.push(anchor);
		for (i, pos) in plan.intermediates.iter().enumerate() {
			let template = BodyTemplate::new(*pos)
				.with_name(format!("Segment {}", i))
				.with_mass(seg.mass)
				.with_drag(seg.drag, seg.angular_drag)
				.with_interpolation(seg.interpolation);
			bodies.push(backend.create_body(template));
		}
		bodies.push(end);

		let joints = bodies
			.windows(2)
			.map(|pair| {
				let (prev, next) = (pair[0], pair[1]);
				let offset = backend.position(prev) - backend.position(next);
				let desc = joint_desc(prev, offset, &config.joint);
				backend.create_joint(next, desc)
			})
			.collect();
		info!(
			"built chain {:?} -> {:?} with {} segments",
			anchor, end, segments
		);
		Some(Self { bodies, joints })
	}

	pub fn render<B: PhysicsBackend + ?Sized>(&self, backend: &B) -> Vec<V3> {
		self.bodies.iter().map(|b| backend.position(*b)).collect()
	}
}

/// Chain between the body it is attached to and an end body, mirrored each
/// frame into an optional line renderer.
pub struct Chain<L: LineRenderer = PrPolyline> {
	pub anchor: BodyHandle,
	pub end: Option<BodyHandle>,
	pub config: ChainConfig,
	instance: Option<ChainInstance>,
	line: Option<L>,
}

impl<L: LineRenderer> Chain<L> {
	pub fn new(anchor: BodyHandle, end: Option<BodyHandle>, config: ChainConfig) -> Self {
		Self {
			anchor,
			end,
			config,
			instance: None,
			line: None,
		}
	}

	pub fn with_line(mut self, line: L) -> Self {
		self.line = Some(line);
		self
	}

	pub fn instance(&self) -> Option<&ChainInstance> {
		self.instance.as_ref()
	}

	pub fn line(&self) -> Option<&L> {
		self.line.as_ref()
	}

	pub fn start<B: PhysicsBackend + ?Sized>(&mut self, backend: &mut B) {
		if self.instance.is_some() {
			return;
		}
		self.instance = ChainInstance::build(backend, self.anchor, self.end, &self.config);
	}

	pub fn update_line<B: PhysicsBackend + ?Sized>(&mut self, backend: &B) {
		let (line, instance) = match (self.line.as_mut(), self.instance.as_ref()) {
			(Some(line), Some(instance)) => (line, instance),
			_ => return,
		};
		let positions = instance.render(backend);
		line.set_position_count(positions.len());
		for (i, pos) in positions.into_iter().enumerate() {
			line.set_position(i, pos);
		}
	}
}

impl<L: LineRenderer> Behaviour for Chain<L> {
	fn on_start(&mut self, world: &mut dyn PhysicsBackend) {
		self.start(world);
	}

	fn on_frame(&mut self, world: &mut dyn PhysicsBackend, _input: &PointerInput) {
		self.update_line(&*world);
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::body::Interpolation;
	use crate::config::SegmentParams;
	use crate::joint::ProjectionMode;
	use crate::pworld::PWorld;
	use approx::assert_relative_eq;

	fn world_with(anchor: V3, end: V3) -> (PWorld, BodyHandle, BodyHandle) {
		let mut w = PWorld::default();
		let a = w.create_body(BodyTemplate::new(anchor).kinematic());
		let e = w.create_body(BodyTemplate::new(end));
		(w, a, e)
	}

	#[test]
	fn test_plan_spacing() {
		let plan = ChainPlan::new(V3::zeros(), V3::new(0., -4., 0.), 4).unwrap();
		let ys: Vec<f32> = plan.intermediates.iter().map(|p| p[1]).collect();
		assert_eq!(ys, vec![-1., -2., -3.]);
		assert!(ChainPlan::new(V3::zeros(), V3::new(0.005, 0., 0.), 4).is_none());
	}

	#[test]
	fn test_topology() {
		for n in 1..8 {
			let (mut w, a, e) = world_with(V3::zeros(), V3::new(3., -2., 1.));
			let config = ChainConfig::default().with_segments(n);
			let c = ChainInstance::build(&mut w, a, Some(e), &config).unwrap();
			assert_eq!(c.bodies.len(), n as usize + 1);
			assert_eq!(c.joints.len(), n as usize);
			assert_eq!(c.bodies[0], a);
			assert_eq!(*c.bodies.last().unwrap(), e);
			for (i, jh) in c.joints.iter().enumerate() {
				let j = w.joint(*jh).unwrap();
				assert_eq!(j.desc.connected, c.bodies[i]);
				assert_eq!(j.owner, c.bodies[i + 1]);
			}
		}
	}

	#[test]
	fn test_single_segment() {
		let (mut w, a, e) = world_with(V3::zeros(), V3::new(0., -2., 0.));
		let c = ChainInstance::build(&mut w, a, Some(e), &ChainConfig::default()).unwrap();
		assert_eq!(c.bodies, vec![a, e]);
		let j = w.joint(c.joints[0]).unwrap();
		assert_eq!(j.desc.connected_anchor, Some(V3::new(0., 2., 0.)));
		assert_eq!(w.body_count(), 2);
	}

	#[test]
	fn test_four_segments() {
		let (mut w, a, e) = world_with(V3::zeros(), V3::new(0., -4., 0.));
		let config = ChainConfig::default().with_segments(4);
		let c = ChainInstance::build(&mut w, a, Some(e), &config).unwrap();
		let ys: Vec<f32> = c.render(&w).iter().map(|p| p[1]).collect();
		assert_eq!(ys, vec![0., -1., -2., -3., -4.]);
		assert_eq!(c.joints.len(), 4);
		assert_eq!(w.name(c.bodies[1]), "Segment 0");
		for jh in c.joints.iter() {
			let j = w.joint(*jh).unwrap();
			assert_relative_eq!(j.desc.connected_anchor.unwrap(), V3::new(0., 1., 0.));
		}
	}

	#[test]
	fn test_joint_params() {
		let (mut w, a, e) = world_with(V3::zeros(), V3::new(1., 0., 0.));
		let mut config = ChainConfig::default().with_segments(3);
		config.joint.angle_limit = 90.;
		config.joint.preprocessing = true;
		config.joint.position_spring = 2.;
		config.joint.position_damper = 3.;
		config.joint.projection = ProjectionMode::PositionAndRotation;
		let c = ChainInstance::build(&mut w, a, Some(e), &config).unwrap();
		for jh in c.joints.iter() {
			let d = &w.joint(*jh).unwrap().desc;
			assert_eq!(d.linear, [Motion::Locked; 3]);
			assert_eq!(d.angular, [Motion::Limited; 3]);
			assert_eq!(d.angular_limits.high_x, 45.);
			assert_eq!(d.angular_limits.low_x, -45.);
			assert_eq!(d.angular_limits.y, 45.);
			assert_eq!(d.angular_limits.z, 45.);
			for drive in [d.angular_x_drive, d.angular_yz_drive] {
				assert_eq!(drive.position_spring, 2.);
				assert_eq!(drive.position_damper, 3.);
				assert_eq!(drive.max_force, 5.);
			}
			assert_eq!(d.projection, ProjectionMode::PositionAndRotation);
			assert_eq!(d.linear_limit_spring.spring, 1.);
			assert_eq!(d.linear_limit_spring.damper, 5.);
			assert_eq!(d.axis, V3::z());
			assert_eq!(d.secondary_axis, V3::zeros());
			assert!(d.preprocessing);
		}
	}

	#[test]
	fn test_segment_params() {
		let (mut w, a, e) = world_with(V3::zeros(), V3::new(2., 0., 0.));
		let seg = SegmentParams {
			mass: 2.,
			drag: 0.3,
			angular_drag: 0.7,
			interpolation: Interpolation::Extrapolate,
		};
		let config = ChainConfig::default().with_segments(2).with_segment(seg);
		let c = ChainInstance::build(&mut w, a, Some(e), &config).unwrap();
		let b = w.try_body(c.bodies[1]).unwrap();
		assert_eq!(b.template.mass, 2.);
		assert_eq!(b.template.drag, 0.3);
		assert_eq!(b.template.angular_drag, 0.7);
		assert_eq!(b.template.interpolation, Interpolation::Extrapolate);
		assert!(b.template.collider.is_none());
	}

	#[test]
	fn test_skip() {
		let (mut w, a, e) = world_with(V3::zeros(), V3::new(0., 0.009, 0.));
		let config = ChainConfig::default().with_segments(5);
		assert!(ChainInstance::build(&mut w, a, Some(e), &config).is_none());
		assert!(ChainInstance::build(&mut w, a, None, &config).is_none());
		assert_eq!(w.body_count(), 2);
		assert!(w.joints().is_empty());
	}

	#[test]
	fn test_anchor_frozen_at_build() {
		let (mut w, a, e) = world_with(V3::zeros(), V3::new(0., -3., 0.));
		let config = ChainConfig::default().with_segments(3);
		let c = ChainInstance::build(&mut w, a, Some(e), &config).unwrap();
		let before: Vec<_> = c.joints.iter().map(|j| w.joint(*j).unwrap().desc.clone()).collect();
		w.step(0.1);
		let after: Vec<_> = c.joints.iter().map(|j| w.joint(*j).unwrap().desc.clone()).collect();
		assert_eq!(before, after);

		let (mut w2, a2, e2) = world_with(V3::zeros(), V3::new(0., -3., 0.));
		let c2 = ChainInstance::build(&mut w2, a2, Some(e2), &config).unwrap();
		let rebuilt: Vec<_> = c2.joints.iter().map(|j| w2.joint(*j).unwrap().desc.clone()).collect();
		assert_eq!(before, rebuilt);
	}

	#[test]
	fn test_line_follows_bodies() {
		let (mut w, a, e) = world_with(V3::zeros(), V3::new(0., -2., 0.));
		let config = ChainConfig::default().with_segments(2);
		let mut chain = Chain::new(a, Some(e), config).with_line(PrPolyline::default());
		chain.start(&mut w);
		chain.update_line(&w);
		assert_eq!(chain.line().unwrap().len(), 3);
		w.step(0.1);
		chain.update_line(&w);
		let line = chain.line().unwrap();
		assert_eq!(line.positions[0], V3::zeros());
		assert!(line.positions[2][1] < -2.);
	}

	#[test]
	fn test_line_noop_without_chain() {
		let (mut w, a, _) = world_with(V3::zeros(), V3::new(0., -2., 0.));
		let mut chain: Chain = Chain::new(a, None, ChainConfig::default())
			.with_line(PrPolyline::default());
		chain.start(&mut w);
		chain.update_line(&w);
		assert!(chain.instance().is_none());
		assert!(chain.line().unwrap().is_empty());
	}
}

use protocol::pr_model::PrJoint;

use crate::backend::PhysicsBackend;
use crate::joint::JointHandle;

/// Every joint in the world, for debug tooling.
pub fn select_joints<B: PhysicsBackend + ?Sized>(backend: &B) -> Vec<JointHandle> {
	backend.joints()
}

pub fn describe_joints<B: PhysicsBackend + ?Sized>(backend: &B) -> Vec<PrJoint> {
	select_joints(backend)
		.into_iter()
		.filter_map(|h| backend.joint(h))
		.map(|j| PrJoint {
			id: j.id.0,
			owner: j.owner.0,
			connected: j.desc.connected.0,
			connected_anchor: j.desc.connected_anchor.unwrap_or_else(|| {
				backend.position(j.desc.connected) - backend.position(j.owner)
			}),
		})
		.collect()
}

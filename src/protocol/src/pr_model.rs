// pr_model: Physical model for rendering

use serde::Serialize;

use crate::V3;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PrPolyline {
	pub positions: Vec<V3>,
}

impl PrPolyline {
	pub fn len(&self) -> usize {
		self.positions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PrJoint {
	pub id: usize,
	pub owner: usize,
	pub connected: usize,
	pub connected_anchor: V3,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct PrModel {
	pub chains: Vec<PrPolyline>,
	pub joints: Vec<PrJoint>,
}

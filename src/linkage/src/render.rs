use protocol::pr_model::PrPolyline;

use crate::V3;

/// Ordered polyline primitive owned by the host renderer.
pub trait LineRenderer {
	fn set_position_count(&mut self, count: usize);

	fn set_position(&mut self, idx: usize, pos: V3);
}

impl LineRenderer for PrPolyline {
	fn set_position_count(&mut self, count: usize) {
		self.positions.resize(count, V3::zeros());
	}

	fn set_position(&mut self, idx: usize, pos: V3) {
		if let Some(p) = self.positions.get_mut(idx) {
			*p = pos;
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_polyline_resize() {
		let mut line = PrPolyline::default();
		line.set_position_count(3);
		line.set_position(1, V3::new(1., 2., 3.));
		line.set_position(7, V3::new(9., 9., 9.));
		assert_eq!(line.len(), 3);
		assert_eq!(line.positions[1], V3::new(1., 2., 3.));
		line.set_position_count(1);
		assert_eq!(line.positions, vec![V3::zeros()]);
	}
}

use crate::V3;

/// Scale `v` down to at most `max` keeping its direction.
pub fn clamp_magnitude(v: V3, max: f32) -> V3 {
	let m = v.magnitude();
	if m > max {
		v * (max / m)
	} else {
		v
	}
}

/// Velocity that moves a body by `delta` within one step of `dt`, limited to
/// `max_speed` and eased linearly to zero inside `stoppable_distance`.
pub fn drag_velocity(delta: V3, dt: f32, max_speed: f32, stoppable_distance: f32) -> V3 {
	let dist = delta.magnitude();
	if dt <= 0. || dist == 0. {
		return V3::zeros();
	}
	let mut speed = (dist / dt).min(max_speed);
	if dist < stoppable_distance {
		speed *= dist / stoppable_distance;
	}
	delta * (speed / dist)
}

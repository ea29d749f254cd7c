use std::cell::RefCell;
use std::rc::Rc;

use protocol::user_event::PointerInput;
use tracing::warn;

use crate::backend::PhysicsBackend;

/// Frame and physics step hooks driven by a [`Scheduler`].
pub trait Behaviour {
	fn on_start(&mut self, _world: &mut dyn PhysicsBackend) {}

	fn on_frame(&mut self, world: &mut dyn PhysicsBackend, input: &PointerInput);

	fn on_physics_step(&mut self, _world: &mut dyn PhysicsBackend, _dt: f32) {}
}

// lets the owner keep reading a behaviour after handing it to a scheduler
impl<T: Behaviour> Behaviour for Rc<RefCell<T>> {
	fn on_start(&mut self, world: &mut dyn PhysicsBackend) {
		self.borrow_mut().on_start(world);
	}

	fn on_frame(&mut self, world: &mut dyn PhysicsBackend, input: &PointerInput) {
		self.borrow_mut().on_frame(world, input);
	}

	fn on_physics_step(&mut self, world: &mut dyn PhysicsBackend, dt: f32) {
		self.borrow_mut().on_physics_step(world, dt);
	}
}

/// Fixed step loop: physics steps catch up with rendered time, then every
/// behaviour sees one frame.
pub struct Scheduler {
	pub fixed_dt: f32,
	pub max_steps: usize,
	accumulator: f32,
	started: bool,
	behaviours: Vec<Box<dyn Behaviour>>,
}

impl Default for Scheduler {
	fn default() -> Self {
		Self {
			fixed_dt: 0.02,
			max_steps: 8,
			accumulator: 0.,
			started: false,
			behaviours: Vec::new(),
		}
	}
}

impl Scheduler {
	pub fn with_fixed_dt(mut self, dt: f32) -> Self {
		self.fixed_dt = dt;
		self
	}

	pub fn with_max_steps(mut self, n: usize) -> Self {
		self.max_steps = n;
		self
	}

	pub fn add(&mut self, behaviour: Box<dyn Behaviour>) {
		self.behaviours.push(behaviour);
	}

	fn start(&mut self, world: &mut dyn PhysicsBackend) {
		if self.started {
			return;
		}
		self.started = true;
		for b in self.behaviours.iter_mut() {
			b.on_start(world);
		}
	}

	/// Physics steps only; returns how many ran.
	pub fn advance(&mut self, world: &mut dyn PhysicsBackend, frame_dt: f32) -> usize {
		self.start(world);
		if self.fixed_dt <= 0. {
			return 0;
		}
		self.accumulator += frame_dt.max(0.);
		let mut steps = 0;
		while self.accumulator >= self.fixed_dt {
			if steps == self.max_steps {
				warn!("dropping {:.3}s of physics time", self.accumulator);
				self.accumulator = 0.;
				break;
			}
			for b in self.behaviours.iter_mut() {
				b.on_physics_step(world, self.fixed_dt);
			}
			world.step(self.fixed_dt);
			self.accumulator -= self.fixed_dt;
			steps += 1;
		}
		steps
	}

	pub fn frame(
		&mut self,
		world: &mut dyn PhysicsBackend,
		input: &PointerInput,
		frame_dt: f32,
	) -> usize {
		let steps = self.advance(world, frame_dt);
		for b in self.behaviours.iter_mut() {
			b.on_frame(world, input);
		}
		steps
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use std::sync::{Arc, Mutex};

	use crate::pworld::PWorld;

	#[derive(Default)]
	struct Counts {
		start: usize,
		frames: usize,
		steps: usize,
	}

	struct Counter(Arc<Mutex<Counts>>);

	impl Behaviour for Counter {
		fn on_start(&mut self, _world: &mut dyn PhysicsBackend) {
			self.0.lock().unwrap().start += 1;
		}

		fn on_frame(&mut self, _world: &mut dyn PhysicsBackend, _input: &PointerInput) {
			self.0.lock().unwrap().frames += 1;
		}

		fn on_physics_step(&mut self, _world: &mut dyn PhysicsBackend, _dt: f32) {
			self.0.lock().unwrap().steps += 1;
		}
	}

	#[test]
	fn test_fixed_steps() {
		let counts = Arc::new(Mutex::new(Counts::default()));
		let mut s = Scheduler::default().with_fixed_dt(0.25);
		s.add(Box::new(Counter(counts.clone())));
		let mut w = PWorld::default();
		let input = PointerInput::default();
		assert_eq!(s.frame(&mut w, &input, 0.625), 2);
		assert_eq!(s.frame(&mut w, &input, 0.125), 1);
		assert_eq!(s.frame(&mut w, &input, 0.0), 0);
		let c = counts.lock().unwrap();
		assert_eq!(c.start, 1);
		assert_eq!(c.frames, 3);
		assert_eq!(c.steps, 3);
	}

	#[test]
	fn test_step_cap() {
		let counts = Arc::new(Mutex::new(Counts::default()));
		let mut s = Scheduler::default().with_fixed_dt(0.25).with_max_steps(2);
		s.add(Box::new(Counter(counts.clone())));
		let mut w = PWorld::default();
		assert_eq!(s.frame(&mut w, &PointerInput::default(), 10.), 2);
		assert_eq!(s.frame(&mut w, &PointerInput::default(), 0.), 0);
		assert_eq!(counts.lock().unwrap().steps, 2);
	}
}

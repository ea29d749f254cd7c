use std::rc::Rc;

use dyn_clone::DynClone;
use fnv::FnvHashMap;

use crate::body::BodyHandle;

/// Capability of being picked up by a drag controller.
pub trait Draggable: DynClone {
	fn on_drag_start(&mut self);

	fn on_drag_end(&mut self);
}

dyn_clone::clone_trait_object!(Draggable);

type Listener = Rc<dyn Fn()>;

#[derive(Clone, Default)]
pub struct EventDraggable {
	start: Vec<Listener>,
	end: Vec<Listener>,
	dragging: bool,
}

impl EventDraggable {
	pub fn on_start(mut self, f: impl Fn() + 'static) -> Self {
		self.start.push(Rc::new(f));
		self
	}

	pub fn on_end(mut self, f: impl Fn() + 'static) -> Self {
		self.end.push(Rc::new(f));
		self
	}

	pub fn is_dragging(&self) -> bool {
		self.dragging
	}
}

impl Draggable for EventDraggable {
	fn on_drag_start(&mut self) {
		self.dragging = true;
		self.start.iter().for_each(|f| f());
	}

	fn on_drag_end(&mut self) {
		self.dragging = false;
		self.end.iter().for_each(|f| f());
	}
}

#[derive(Clone, Default)]
pub struct DraggableRegistry {
	data: FnvHashMap<BodyHandle, Box<dyn Draggable>>,
}

impl DraggableRegistry {
	pub fn insert(&mut self, body: BodyHandle, draggable: Box<dyn Draggable>) {
		self.data.insert(body, draggable);
	}

	pub fn with(mut self, body: BodyHandle, draggable: Box<dyn Draggable>) -> Self {
		self.insert(body, draggable);
		self
	}

	pub fn remove(&mut self, body: BodyHandle) -> Option<Box<dyn Draggable>> {
		self.data.remove(&body)
	}

	pub fn contains(&self, body: BodyHandle) -> bool {
		self.data.contains_key(&body)
	}

	pub fn get_mut(&mut self, body: BodyHandle) -> Option<&mut (dyn Draggable + 'static)> {
		self.data.get_mut(&body).map(|d| &mut **d)
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}
}

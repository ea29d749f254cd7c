use std::cell::RefCell;
use std::rc::Rc;

use rand::Rng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use linkage::backend::PhysicsBackend;
use linkage::body::BodyTemplate;
use linkage::chain::Chain;
use linkage::config::LinkageConfig;
use linkage::drag::{DragController, DraggableRegistry, EventDraggable};
use linkage::pworld::PWorld;
use linkage::scheduler::Scheduler;
use linkage::{V2, V3};
use protocol::pr_model::PrPolyline;
use protocol::user_event::PointerInput;
use protocol::view::View;

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	let mut iter = std::env::args();
	iter.next();
	let config = match iter.next() {
		Some(path) => match LinkageConfig::from_path(&path) {
			Ok(c) => c,
			Err(e) => {
				error!("{}: {}", path, e);
				std::process::exit(1);
			}
		},
		None => LinkageConfig::default(),
	};

	let mut pworld = PWorld::default();
	let anchor = pworld.create_body(BodyTemplate::new(V3::new(0., 5., 0.)).kinematic());
	let ball = pworld.create_body(
		BodyTemplate::new(V3::zeros())
			.with_name("Ball")
			.with_mass(2.)
			.with_sphere(0.5),
	);

	let chain = Rc::new(RefCell::new(
		Chain::new(anchor, Some(ball), config.chain.clone()).with_line(PrPolyline::default()),
	));
	let view = View::default()
		.with_pos(V3::new(0., 2.5, -15.))
		.look_at(V3::new(0., 2.5, 0.));
	let draggable = EventDraggable::default()
		.on_start(|| info!("ball picked up"))
		.on_end(|| info!("ball dropped"));
	let drag = Rc::new(RefCell::new(
		DragController::new(config.drag.clone(), view.clone())
			.with_draggables(DraggableRegistry::default().with(ball, Box::new(draggable))),
	));

	let mut scheduler = Scheduler::default();
	scheduler.add(Box::new(chain.clone()));
	scheduler.add(Box::new(drag.clone()));

	let frame_dt = 1. / 60.;
	let ball_screen = view.w2s(V3::zeros());
	let mut cursor = V2::new(ball_screen[0], ball_screen[1]);
	let mut rng = rand::thread_rng();
	for frame in 0..240 {
		let input = match frame {
			0 => PointerInput::pressed(cursor),
			120 => PointerInput::released(cursor),
			_ => {
				if frame < 120 {
					cursor += V2::new(rng.gen_range(-8.0..8.0), rng.gen_range(-2.0..6.0));
				}
				PointerInput::moved(cursor)
			}
		};
		scheduler.frame(&mut pworld, &input, frame_dt);
	}

	let chains = chain.borrow().line().cloned().into_iter().collect();
	let model = pworld.pr_model(chains);
	info!(
		"{} joints, ball at {:?}",
		model.joints.len(),
		pworld.position(ball)
	);
	match serde_json::to_string_pretty(&model) {
		Ok(s) => println!("{}", s),
		Err(e) => error!("{}", e),
	}
}

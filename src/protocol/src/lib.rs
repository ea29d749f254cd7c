pub mod pr_model;
pub mod user_event;
pub mod view;

pub type V2 = nalgebra::Vector2<f32>;
pub type V3 = nalgebra::Vector3<f32>;
pub type Rot = nalgebra::UnitQuaternion<f32>;

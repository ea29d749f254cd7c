pub mod backend;
pub mod body;
pub mod chain;
pub mod config;
pub mod drag;
pub mod error;
pub mod inspect;
pub mod joint;
pub mod pworld;
pub mod render;
pub mod scheduler;

pub use protocol::{Rot, V2, V3};

/// Anchor and end closer than this are treated as an already connected chain.
pub const MIN_CHAIN_SPAN: f32 = 0.01;

use thiserror::Error;

use crate::body::BodyHandle;

#[derive(Debug, Error)]
pub enum LinkageError {
	#[error("invalid config: {0}")]
	InvalidConfig(String),

	#[error("unknown body {0:?}")]
	UnknownBody(BodyHandle),

	#[error("config parse: {0}")]
	Parse(#[from] serde_json::Error),

	#[error("config io: {0}")]
	Io(#[from] std::io::Error),
}

impl LinkageError {
	pub fn invalid(field: &str, value: f32) -> Self {
		Self::InvalidConfig(format!("{} = {}", field, value))
	}
}

pub type Result<T> = std::result::Result<T, LinkageError>;

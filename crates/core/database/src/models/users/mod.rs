mod model;
mod ops;

#[cfg(feature = "rocket")]
mod rocket;

pub use model::*;

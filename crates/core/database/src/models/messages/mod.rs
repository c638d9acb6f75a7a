mod model;
mod ops;

pub use model::*;

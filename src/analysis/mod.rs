mod load;
mod model;
mod parse;

pub use load::load_analysis;
pub use model::{Community, WordGraph, WordRecord};

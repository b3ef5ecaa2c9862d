/// Uniform module - typed shader values and ordered uniform sets

pub mod uniform;
pub mod uniform_set;

pub use uniform::*;
pub use uniform_set::*;

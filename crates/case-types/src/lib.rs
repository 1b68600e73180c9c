pub mod corner;
pub mod params;
pub mod pose;
pub mod transform;

pub use corner::*;
pub use params::*;
pub use pose::*;
pub use transform::*;

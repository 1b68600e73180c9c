pub mod matrix;
pub mod posts;
pub mod types;
pub mod wall;
pub mod web;

pub use types::OpError;

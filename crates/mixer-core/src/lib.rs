pub mod constants;
pub mod error;
pub mod geometry;
pub mod mapper;
pub mod mix_graph;
pub mod motion;
pub mod preset;
pub mod session;

pub use constants::*;
pub use error::*;
pub use geometry::*;
pub use mapper::*;
pub use mix_graph::*;
pub use motion::*;
pub use preset::*;
pub use session::*;

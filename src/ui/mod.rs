pub mod builder;
pub mod position;
pub mod session;

pub use builder::MapSessionBuilder;
pub use position::PositionReadout;
pub use session::{CoordinateInputs, MapSession};

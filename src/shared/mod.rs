pub mod macros;
pub mod structs;

pub use structs::Direction;
pub use structs::LiftState;
pub use structs::LiftStatus;

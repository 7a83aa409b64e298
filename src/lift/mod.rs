pub mod controller;
pub mod register;
pub mod register_tests;

pub use controller::CallError;
pub use controller::Lift;
pub use register::RequestRegister;

mod clearinghouse;
mod request;

pub use clearinghouse::*;
pub use request::*;

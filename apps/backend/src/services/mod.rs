pub mod lifecycle;
pub mod session_gateway;

pub mod http;
pub mod ports;

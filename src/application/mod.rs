pub mod mappers;
pub mod ports;
pub mod services;

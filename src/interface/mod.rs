pub mod dto;
pub mod http;

pub mod contract_service;
pub mod error;
pub mod realtime;

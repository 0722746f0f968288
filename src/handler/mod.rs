pub mod auction;
pub mod auth;
pub mod chat;
pub mod contract;
pub mod contractor;
pub mod review;
pub mod users;

pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod outbound;

pub use domain::account;
pub use outbound::repositories;

//! External operations of the lifecycle engine

mod service;

#[cfg(test)]
mod tests;

pub use service::AuthGateway;

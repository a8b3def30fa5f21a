//! Users API client module for HTTP communication

mod client;
mod error;
mod traits;

pub use client::UsersClient;
pub use error::ApiError;
pub use traits::UsersApi;

#[cfg(test)]
pub use traits::MockUsersApi;

//! Auth Interceptor Pipeline
//!
//! Every adapter call flows through [`ApiClient`]: the outbound stage attaches
//! the session credential, the transport sends the request, and the inbound
//! stage normalizes failures and reacts to rejected credentials.

mod client;
mod interceptor;

pub use client::ApiClient;
pub use interceptor::AuthInterceptor;

#[cfg(test)]
pub(crate) mod testing;

//! Solve Service Abstraction
//!
//! The external service that interprets an image of a handwritten
//! expression sits behind the [`SolveBackend`] trait, so the relay client
//! can be exercised against mocks and the HTTP transport stays in one
//! place.

mod http;
mod traits;

pub use http::HttpSolveBackend;
pub use traits::SolveBackend;

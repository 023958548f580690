//! Product service integration tests.


#[cfg(feature = "http")]
mod http;

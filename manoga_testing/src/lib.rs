//! Fake implementations of external services for local development and
//! integration tests.

pub mod resend;

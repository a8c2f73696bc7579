// Each test binary uses a different subset of the helpers
#[allow(dead_code)]
pub mod mocks;
#[allow(dead_code)]
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use mocks::{SteppingClock, StubTokenIssuer};
#[allow(unused_imports)]
pub use setup::{ApiClient, TestSetup, TestSetupBuilder};

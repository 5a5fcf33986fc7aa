//! Integration tests for the dispatch core and the `cmdprompt` binary.

pub mod binary_test;
pub mod dispatch_test;
pub mod session_test;

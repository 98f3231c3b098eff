//! Integration tests for the Coffer compound container tooling

mod enumeration;
mod support;
mod fail_fast;
mod round_trip;

//! Integration test support for Trueline.
//!
//! The tests in `tests/` are `#[ignore]`-gated. Most exercise a running
//! server over HTTP and expect `TRUELINE_BASE_URL` (default
//! `http://localhost:3000`) to point at a server with migrations applied;
//! the scan-series tests talk to `PostgreSQL` directly via
//! `TRUELINE_DATABASE_URL` to control event timestamps.

#![cfg_attr(not(test), forbid(unsafe_code))]

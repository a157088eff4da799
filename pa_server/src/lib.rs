//! HTTP adapter for the poker session core.
//!
//! The heavy lifting lives in the `poker_app` crate; this crate only
//! parses requests, calls the game service, and serializes the
//! projections it returns.

pub mod api;

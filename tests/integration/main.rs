//! Integration tests for the stream limit tracker against the in-memory store.

mod helpers;
mod limit_test;
mod tracking_test;

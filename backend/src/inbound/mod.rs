//! Inbound adapters translating HTTP requests into driving-port calls.

pub mod http;

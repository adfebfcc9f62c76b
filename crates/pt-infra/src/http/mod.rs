//! Marketplace REST API adapter.
//!
//! The only place that knows the service's wire format. Everything that
//! leaves this module is a `pt-core` type or a typed port error.

mod client;
mod dto;
mod mapper;

pub use client::{HttpMarketApi, HttpMarketApiConfig};

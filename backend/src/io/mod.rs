//! # IO Module
//!
//! Exposes the domain to the outside world. The only adapter today is the
//! REST API under [`rest`].

pub mod rest;

//! Sabbpe Payment Gateway - NDPS merchant integration
//!
//! This crate implements the merchant side of the NDPS encrypted transport
//! protocol: an AES-256-CBC request/response envelope with PBKDF2-derived
//! keys and HMAC-SHA512 authenticity binding, plus the orchestration around
//! it (payment initiation, status enquiry, refund initiation and callback
//! processing).
//!
//! HTTP routing, page rendering and durable persistence belong to the
//! embedding application; this crate exposes ports for the pieces it does
//! not own.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

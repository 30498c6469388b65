//! # Pricer Models (L2: Business Logic)
//!
//! Option contracts and closed-form pricing.
//!
//! This crate provides:
//! - Instrument definitions: [`instruments::VanillaOption`] with
//!   [`instruments::ExerciseStyle`] and [`instruments::PayoffType`]
//! - The Black-Scholes formula for European contracts ([`analytical`])
//!
//! ## Design Principles
//!
//! - **Tagged exercise style**: one contract type, the style is data
//! - **Exact payoffs**: `max(S - K, 0)` / `max(K - S, 0)` with no smoothing
//! - **Structured errors**: every module error converts into
//!   `pricer_core::types::PricingError`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;

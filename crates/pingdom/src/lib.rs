//! Pingdom check-notification payload schema and decoding.
//!
//! This crate models the JSON body Pingdom posts to a webhook endpoint
//! when a check changes state, and normalizes its quirks into one
//! canonical [`CheckEvent`]:
//!
//! - Two redundant timestamp encodings (epoch seconds and a literal
//!   date-time string without zone) both decode to UTC.
//! - Two probe shapes (plain and versioned) behind one [`ProbeInfo`]
//!   capability trait.
//! - Loosely-typed `check_params` values modeled as a closed set of
//!   kinds via [`ParamValue`].
//!
//! Decoding is side-effect free: bytes in, [`CheckEvent`] or
//! [`DecodeError`] out.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod message;
pub mod probe;
pub mod time;

pub use error::{DecodeError, ValidationError};
pub use message::{CheckEvent, CheckType, ParamValue};
pub use probe::{Probe, ProbeInfo, VersionedProbe};

//! Request binding extractors.
//!
//! - [`binding::TodoIdPath`] -- Positive todo id from the `{id}` path segment.
//! - [`binding::JsonBody`] -- JSON body whose rejections render as 400.

pub mod binding;

//! Shared building blocks: error taxonomy and keyword-argument helpers.

pub(crate) mod error;
pub(crate) mod kwargs;

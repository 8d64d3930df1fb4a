//! Internal buffer management for codec output.
//!
//! This module provides the pooled scratch buffer that codecs write into.
//! It is an implementation detail and not part of the public API.

mod scratch;

pub(crate) use scratch::ScratchBuffer;

//! Marker types.

/// Marker type describing the start of something (a season, for example).
#[derive(Clone, Copy, Debug)]
pub struct Start;

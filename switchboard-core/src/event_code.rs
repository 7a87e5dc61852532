use std::fmt;

/// Identifies the solver phase ("where") that triggered a callback.
///
/// Event codes are defined and emitted by the external engine; this layer
/// never interprets them, it only uses them as registry keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "serde-derive", serde(transparent))]
pub struct EventCode(i32);

impl EventCode {
    /// Wraps a raw engine-defined code.
    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// Returns the raw engine-defined code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self.0
    }
}

impl From<i32> for EventCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

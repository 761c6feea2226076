use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Items per page when the request does not say.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest page a single request may ask for.
pub const MAX_PAGE_SIZE: usize = 200;

/// An offset/count window into a stream, newest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub offset: usize,
    pub count: usize,
}

impl PageWindow {
    /// A window of `count` items starting at `offset`.
    ///
    /// A zero count is rejected; use [`PageWindow::clamped`] for
    /// request-supplied values.
    pub fn new(offset: usize, count: usize) -> Result<Self, TypeError> {
        if count == 0 {
            return Err(TypeError::InvalidWindow("count must be positive".into()));
        }
        Ok(Self { offset, count })
    }

    /// Build a window from optional request values, applying the default
    /// size and clamping to `max`.
    pub fn clamped(
        offset: Option<usize>,
        count: Option<usize>,
        default: usize,
        max: usize,
    ) -> Self {
        let count = count.unwrap_or(default).clamp(1, max.max(1));
        Self {
            offset: offset.unwrap_or(0),
            count,
        }
    }

    /// Range of indices this window covers in a stream of `len` items.
    pub fn range(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.offset.min(len);
        let end = self.offset.saturating_add(self.count).min(len);
        start..end
    }

    /// The window immediately after this one.
    pub fn next(&self) -> Self {
        Self {
            offset: self.offset + self.count,
            count: self.count,
        }
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            offset: 0,
            count: DEFAULT_PAGE_SIZE,
        }
    }
}

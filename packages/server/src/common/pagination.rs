//! Offset pagination (`first` / `skip`) for collection queries.
//!
//! `skip` is applied before `first`: the filtered, store-ordered result set
//! is sliced from offset `skip`, then truncated to at most `first` rows.
//!
//! ```rust,ignore
//! let window = OffsetArgs::new(first, skip).validate()?;
//! let page = deps.repository.list_categories(search.as_ref(), window).await?;
//! ```

use crate::common::error::{ApiError, ApiResult};

/// Raw pagination arguments as received from GraphQL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OffsetArgs {
    /// Maximum number of rows to return.
    pub first: Option<i32>,
    /// Number of rows to skip before the page starts.
    pub skip: Option<i32>,
}

impl OffsetArgs {
    pub fn new(first: Option<i32>, skip: Option<i32>) -> Self {
        Self { first, skip }
    }

    /// Rejects negative values and converts to a `PageWindow`.
    pub fn validate(&self) -> ApiResult<PageWindow> {
        let offset = match self.skip {
            Some(skip) => usize::try_from(skip)
                .map_err(|_| ApiError::validation("skip must not be negative"))?,
            None => 0,
        };

        let limit = self
            .first
            .map(usize::try_from)
            .transpose()
            .map_err(|_| ApiError::validation("first must not be negative"))?;

        Ok(PageWindow { offset, limit })
    }
}

/// Validated window over an ordered result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: usize,
    /// `None` means "to the end".
    pub limit: Option<usize>,
}

impl PageWindow {
    /// The whole result set.
    pub const ALL: PageWindow = PageWindow {
        offset: 0,
        limit: None,
    };

    /// Slices an already ordered sequence.
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let skipped = items.into_iter().skip(self.offset);
        match self.limit {
            Some(limit) => skipped.take(limit).collect(),
            None => skipped.collect(),
        }
    }

    pub fn sql_offset(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }

    /// `LIMIT NULL` means no limit in Postgres.
    pub fn sql_limit(&self) -> Option<i64> {
        self.limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX))
    }
}

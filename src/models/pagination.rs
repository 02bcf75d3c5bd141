use serde::Serialize;

use crate::error::{CurrencyError, Result};

pub const DEFAULT_TAKE: u32 = 10;
pub const MAX_TAKE: u32 = 50;

/// A validated skip/take window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    skip: u32,
    take: u32,
}

impl PageRequest {
    pub fn new(skip: u32, take: u32) -> Result<Self> {
        if take == 0 || take > MAX_TAKE {
            return Err(CurrencyError::InvalidPageRequest(format!(
                "take must be between 1 and {}, got {}",
                MAX_TAKE, take
            )));
        }
        Ok(Self { skip, take })
    }

    /// Build a request from a 1-based page number.
    pub fn from_page(page: u32, take: u32) -> Result<Self> {
        if page == 0 {
            return Err(CurrencyError::InvalidPageRequest(
                "page numbers start at 1".to_string(),
            ));
        }
        let skip = (page - 1).checked_mul(take).ok_or_else(|| {
            CurrencyError::InvalidPageRequest(format!("page {} is out of range", page))
        })?;
        Self::new(skip, take)
    }

    pub fn skip(&self) -> u32 {
        self.skip
    }

    pub fn take(&self) -> u32 {
        self.take
    }

    pub fn page(&self) -> u32 {
        self.skip / self.take + 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            take: DEFAULT_TAKE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub take: u32,
    pub item_count: u64,
    pub page_count: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl PageMeta {
    pub fn new(request: &PageRequest, item_count: u64) -> Self {
        let take = request.take();
        let page = request.page();
        let page_count = item_count.div_ceil(u64::from(take));

        Self {
            page,
            take,
            item_count,
            page_count,
            has_previous_page: page > 1,
            has_next_page: u64::from(page) < page_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln, References};

use crate::{fail, KernelError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Page(u64);

impl Page {
    pub fn new(value: impl Into<u64>) -> error_stack::Result<Self, KernelError> {
        let value = value.into();
        if value == 0 {
            return Err(fail(KernelError::Validation, "page starts at 1"));
        }
        Ok(Page(value))
    }

    pub fn parse(raw: &str) -> error_stack::Result<Self, KernelError> {
        let value = raw.trim().parse::<u64>().map_err(|_| {
            fail(
                KernelError::Validation,
                format!("page must be a positive integer, got `{raw}`"),
            )
        })?;
        Self::new(value)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Limit(u64);

impl Limit {
    pub const MAX: u64 = 1000;

    pub fn new(value: impl Into<u64>) -> error_stack::Result<Self, KernelError> {
        let value = value.into();
        if value == 0 || value > Self::MAX {
            return Err(fail(
                KernelError::Validation,
                format!("limit must be between 1 and {}", Self::MAX),
            ));
        }
        Ok(Limit(value))
    }

    pub fn parse(raw: &str) -> error_stack::Result<Self, KernelError> {
        let value = raw.trim().parse::<u64>().map_err(|_| {
            fail(
                KernelError::Validation,
                format!("limit must be a positive integer, got `{raw}`"),
            )
        })?;
        Self::new(value)
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self(100)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, References)]
pub struct Pagination {
    page: Page,
    limit: Limit,
}

impl Pagination {
    pub fn new(page: Page, limit: Limit) -> Self {
        Self { page, limit }
    }

    pub fn skip(&self) -> u64 {
        (self.page.0 - 1).saturating_mul(self.limit.0)
    }

    pub fn take(&self) -> u64 {
        self.limit.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn skip_is_derived_from_page_and_limit() {
        let pagination = Pagination::new(Page::new(3_u64).unwrap(), Limit::new(20_u64).unwrap());
        assert_eq!(pagination.skip(), 40);
        assert_eq!(pagination.take(), 20);
        assert_eq!(Pagination::default().skip(), 0);
        assert_eq!(Pagination::default().take(), 100);
    }

    #[test]
    fn page_and_limit_are_bounded() {
        assert!(Page::parse("0").is_err());
        assert!(Page::parse("-1").is_err());
        assert!(Page::parse("two").is_err());
        assert!(Limit::parse("0").is_err());
        assert!(Limit::parse("1001").is_err());
        assert_eq!(Limit::parse(" 5 ").unwrap(), Limit::new(5_u64).unwrap());
    }
}

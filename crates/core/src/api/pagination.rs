use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// Pagination metadata for one page of a list result.
///
/// Only constructible through [`PageDescriptor::new`], which derives the
/// page count and navigation flags from the raw counts, so the invariants
/// hold for every value:
///
/// - `total_pages = max(1, ceil(total_count / page_size))`
/// - `has_next == (current_page < total_pages)`
/// - `has_previous == (current_page > 1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "DescriptorParts")]
pub struct PageDescriptor {
    current_page: u32,
    total_pages: u32,
    total_count: u64,
    page_size: u32,
    has_next: bool,
    has_previous: bool,
}

/// The independent fields a descriptor is rebuilt from on deserialization.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescriptorParts {
    current_page: u32,
    total_count: u64,
    page_size: u32,
}

impl From<DescriptorParts> for PageDescriptor {
    fn from(parts: DescriptorParts) -> Self {
        Self::new(parts.current_page, parts.total_count, parts.page_size)
    }
}

impl PageDescriptor {
    /// Builds a descriptor. `current_page` and `page_size` below 1 are raised to 1.
    ///
    /// `current_page` may exceed `total_pages`: requesting a page past the
    /// end is a normal empty result, and `has_previous` stays meaningful.
    pub fn new(current_page: u32, total_count: u64, page_size: u32) -> Self {
        let current_page = current_page.max(1);
        let page_size = page_size.max(1);
        let pages = total_count.div_ceil(u64::from(page_size)).max(1);
        let total_pages = u32::try_from(pages).unwrap_or(u32::MAX);

        Self {
            current_page,
            total_pages,
            total_count,
            page_size,
            has_next: current_page < total_pages,
            has_previous: current_page > 1,
        }
    }

    /// Descriptor for an empty result on the first page.
    pub fn empty(page_size: u32) -> Self {
        Self::new(1, 0, page_size)
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn has_previous(&self) -> bool {
        self.has_previous
    }
}

/// Page size used when nothing else is known.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

impl Default for PageDescriptor {
    fn default() -> Self {
        Self::empty(DEFAULT_PAGE_SIZE)
    }
}

/// One page of profiles together with its descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePage {
    pub profiles: Vec<Profile>,
    pub page: PageDescriptor,
}

impl ProfilePage {
    pub fn new(profiles: Vec<Profile>, page: PageDescriptor) -> Self {
        Self { profiles, page }
    }

    /// Empty placeholder page used for failed list results.
    pub fn empty(page_size: u32) -> Self {
        Self {
            profiles: Vec::new(),
            page: PageDescriptor::empty(page_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(d: &PageDescriptor) {
        assert!(d.current_page() >= 1);
        assert!(d.total_pages() >= 1);
        assert_eq!(d.has_next(), d.current_page() < d.total_pages());
        assert_eq!(d.has_previous(), d.current_page() > 1);
        let expected = d.total_count().div_ceil(u64::from(d.page_size())).max(1);
        assert_eq!(u64::from(d.total_pages()), expected);
    }

    #[test]
    fn test_zero_count_has_single_page() {
        let d = PageDescriptor::new(1, 0, 20);
        assert_eq!(d.total_pages(), 1);
        assert!(!d.has_next());
        assert!(!d.has_previous());
        assert_invariants(&d);
    }

    #[test]
    fn test_exact_multiple_of_page_size() {
        let d = PageDescriptor::new(2, 40, 20);
        assert_eq!(d.total_pages(), 2);
        assert!(!d.has_next());
        assert!(d.has_previous());
    }

    #[test]
    fn test_partial_last_page() {
        let d = PageDescriptor::new(1, 41, 20);
        assert_eq!(d.total_pages(), 3);
        assert!(d.has_next());
        assert!(!d.has_previous());
    }

    #[test]
    fn test_page_beyond_total() {
        let d = PageDescriptor::new(5, 10, 20);
        assert_eq!(d.total_pages(), 1);
        assert!(!d.has_next());
        assert!(d.has_previous());
        assert_invariants(&d);
    }

    #[test]
    fn test_zero_inputs_are_clamped() {
        let d = PageDescriptor::new(0, 3, 0);
        assert_eq!(d.current_page(), 1);
        assert_eq!(d.page_size(), 1);
        assert_eq!(d.total_pages(), 3);
        assert_invariants(&d);
    }

    #[test]
    fn test_invariants_over_grid() {
        for total_count in [0u64, 1, 19, 20, 21, 39, 40, 41, 200, 1001] {
            for page_size in [1u32, 5, 20, 50] {
                for current_page in 0u32..=12 {
                    assert_invariants(&PageDescriptor::new(current_page, total_count, page_size));
                }
            }
        }
    }

    #[test]
    fn test_deserialize_recomputes_flags() {
        let json = r#"{
            "currentPage": 1,
            "totalPages": 9,
            "totalCount": 0,
            "pageSize": 20,
            "hasNext": true,
            "hasPrevious": true
        }"#;
        let d: PageDescriptor = serde_json::from_str(json).unwrap();

        assert_eq!(d, PageDescriptor::empty(20));
    }

    #[test]
    fn test_profile_page_cache_roundtrip() {
        let page = ProfilePage::new(
            vec![Profile::new("Ada", "ada@example.com").with_id("1")],
            PageDescriptor::new(1, 1, 20),
        );

        let json = serde_json::to_string(&page).unwrap();
        let back: ProfilePage = serde_json::from_str(&json).unwrap();

        assert_eq!(page, back);
    }
}

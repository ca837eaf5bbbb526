//! Property-based tests for the pagination engine

use indexmap::IndexMap;
use opds2::catalog::{add_pagination, create_catalog};
use opds2::{paginate, Paginator};
use proptest::prelude::*;

proptest! {
    /// `next` never points past the result set.
    #[test]
    fn next_absent_on_final_page(
        total in 0usize..5000,
        limit in 1usize..100,
        offset in 0usize..5000,
    ) {
        let paginator = Paginator::new(limit, offset, total).unwrap();
        if offset + limit >= total {
            prop_assert!(paginator.next_offset().is_none());
        } else {
            prop_assert_eq!(paginator.next_offset(), Some(offset + limit));
        }
    }

    /// `previous` never exists on the first page.
    #[test]
    fn previous_absent_at_offset_zero(
        total in 0usize..5000,
        limit in 1usize..100,
    ) {
        let paginator = Paginator::new(limit, 0, total).unwrap();
        prop_assert!(paginator.previous_offset().is_none());
    }

    /// `last` starts a page: its offset is limit-aligned and inside the set.
    #[test]
    fn last_offset_is_page_aligned(
        total in 1usize..5000,
        limit in 1usize..100,
    ) {
        let paginator = Paginator::new(limit, 0, total).unwrap();
        let last = paginator.last_offset().unwrap();
        prop_assert_eq!(last % limit, 0);
        prop_assert!(last <= total - 1);
        // The final page is non-empty
        prop_assert!(last < total);
    }

    /// The synthesized link set always contains exactly one `self`, and
    /// `first`/`last` exactly when any results exist.
    #[test]
    fn link_set_is_consistent(
        total in 0usize..5000,
        limit in 1usize..100,
        offset in 0usize..5000,
    ) {
        let links = paginate(total, limit, offset, "https://example.com/feed", &IndexMap::new())
            .unwrap();

        let count = |rel: &str| links.iter().filter(|link| link.has_rel(rel)).count();
        prop_assert_eq!(count("self"), 1);
        prop_assert_eq!(count("first"), usize::from(total > 0));
        prop_assert_eq!(count("last"), usize::from(total > 0));
        prop_assert_eq!(count("previous"), usize::from(offset > 0));
        prop_assert_eq!(count("next"), usize::from(offset + limit < total));
    }

    /// Re-applying pagination replaces links instead of accumulating them.
    #[test]
    fn add_pagination_idempotent(
        total in 0usize..5000,
        limit in 1usize..100,
        offset in 0usize..5000,
    ) {
        let catalog = create_catalog("Feed", "https://example.com/feed").unwrap();
        let params = IndexMap::new();

        let once =
            add_pagination(&catalog, total, limit, offset, "https://example.com/feed", &params)
                .unwrap();
        let twice =
            add_pagination(&once, total, limit, offset, "https://example.com/feed", &params)
                .unwrap();

        prop_assert_eq!(&once.links, &twice.links);
        prop_assert_eq!(once.links.len(), twice.links.len());
    }
}

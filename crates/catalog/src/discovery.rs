//! Product discovery: search, filter, sort, paginate.
//!
//! [`discover`] is a pure function of (catalog snapshot, [`FilterState`]):
//! no I/O, no hidden state, safe to re-run on every filter change. Stages
//! apply in a fixed order — search, category, price range, stable sort,
//! pagination — each over the previous stage's output.

use std::cmp::Ordering;

use snackkart_core::{CommerceError, CommerceResult};

use crate::product::Product;

/// Fixed listing page size.
pub const PAGE_SIZE: usize = 12;

/// Category selection: the `All` sentinel passes every product through.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Tag(String),
}

/// Inclusive price range in paise. `min <= max` is enforced at construction
/// so an inverted range can never reach the filter stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    min: u64,
    max: u64,
}

impl PriceRange {
    pub fn new(min: u64, max: u64) -> CommerceResult<Self> {
        if min > max {
            return Err(CommerceError::validation(format!(
                "price range min ({min}) exceeds max ({max})"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    pub fn contains(&self, price: u64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Sort key for the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Default ordering: stable by product id ascending.
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    /// Case-folded lexicographic ordering on the product name.
    Name,
    /// Demand ordering: review count descending, rating as tie-break.
    Popularity,
}

/// The full set of user-chosen discovery parameters.
///
/// Ephemeral UI state — never persisted. Every setter that narrows or
/// reorders the result set resets the page to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    search: String,
    category: CategoryFilter,
    price_range: Option<PriceRange>,
    sort: SortKey,
    page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: CategoryFilter::All,
            price_range: None,
            sort: SortKey::Relevance,
            page: 1,
        }
    }
}

impl FilterState {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn price_range(&self) -> Option<&PriceRange> {
        self.price_range.as_ref()
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
        self.page = 1;
    }

    pub fn set_price_range(&mut self, range: Option<PriceRange>) {
        self.price_range = range;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
    }

    /// Page numbers start at 1; a request for page 0 is treated as page 1.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }
}

/// One visible page of the filtered catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryPage {
    pub items: Vec<Product>,
    /// Count of products matching the filters, across all pages.
    pub total_matching: usize,
    /// `ceil(total_matching / PAGE_SIZE)`; 0 when nothing matches.
    pub total_pages: u32,
    /// The effective (clamped) page this result represents.
    pub page: u32,
}

impl DiscoveryPage {
    /// Zero matches is a "no results" signal, not an error.
    pub fn is_empty(&self) -> bool {
        self.total_matching == 0
    }
}

/// Run the discovery pipeline over a catalog snapshot.
pub fn discover(products: &[Product], filter: &FilterState) -> DiscoveryPage {
    let needle = filter.search.trim().to_lowercase();

    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|p| matches_search(p, &needle))
        .filter(|p| matches_category(p, &filter.category))
        .filter(|p| match filter.price_range {
            Some(range) => range.contains(p.price),
            None => true,
        })
        .collect();

    sort_products(&mut matched, filter.sort);

    let total_matching = matched.len();
    let total_pages = total_matching.div_ceil(PAGE_SIZE) as u32;
    let page = filter.page.clamp(1, total_pages.max(1));

    let start = (page as usize - 1) * PAGE_SIZE;
    let items = matched
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .cloned()
        .collect();

    DiscoveryPage {
        items,
        total_matching,
        total_pages,
        page,
    }
}

fn matches_search(product: &Product, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
}

fn matches_category(product: &Product, category: &CategoryFilter) -> bool {
    match category {
        CategoryFilter::All => true,
        CategoryFilter::Tag(tag) => product.category == *tag,
    }
}

fn sort_products(products: &mut [&Product], sort: SortKey) {
    match sort {
        SortKey::Relevance => products.sort_by_key(|p| p.id),
        SortKey::PriceAsc => products.sort_by_key(|p| p.price),
        SortKey::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Name => {
            products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        SortKey::Popularity => products.sort_by(|a, b| {
            b.review_count
                .cmp(&a.review_count)
                .then_with(|| {
                    b.rating
                        .partial_cmp(&a.rating)
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| a.id.cmp(&b.id))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use snackkart_core::ProductId;
    use snackkart_core::money::rupees;
    use uuid::Uuid;

    fn pid(n: u128) -> ProductId {
        ProductId::from_uuid(Uuid::from_u128(n))
    }

    fn product(n: u128, name: &str, price_rupees: u64) -> Product {
        Product {
            id: pid(n),
            name: name.to_string(),
            description: String::new(),
            price: rupees(price_rupees),
            original_price: None,
            weight: "100g".to_string(),
            flavor: String::new(),
            category: "makhana".to_string(),
            in_stock: true,
            stock_qty: 5,
            rating: 4.0,
            review_count: 10,
        }
    }

    fn fixture() -> Vec<Product> {
        vec![
            product(1, "Premium Roasted Makhana", 199),
            product(2, "Peri Peri Makhana", 229),
            product(3, "Cheese Makhana", 249),
            product(4, "Deluxe Flavor Collection", 269),
        ]
    }

    #[test]
    fn price_range_filter_is_inclusive_and_sorts_ascending() {
        let products = fixture();
        let mut filter = FilterState::default();
        filter.set_price_range(Some(PriceRange::new(rupees(200), rupees(260)).unwrap()));
        filter.set_sort(SortKey::PriceAsc);

        let page = discover(&products, &filter);
        let prices: Vec<u64> = page.items.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![rupees(229), rupees(249)]);
        assert_eq!(page.total_matching, 2);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn search_matches_name_or_description_case_insensitively() {
        let mut products = fixture();
        // "Deluxe Flavor Collection" only matches via its description.
        products[3].description = "A mix of our best makhana flavors".to_string();

        let mut filter = FilterState::default();
        filter.set_search("MAKHANA");
        assert_eq!(discover(&products, &filter).total_matching, 4);

        products[3].description.clear();
        assert_eq!(discover(&products, &filter).total_matching, 3);
    }

    #[test]
    fn empty_search_passes_everything_through() {
        let products = fixture();
        let filter = FilterState::default();
        assert_eq!(discover(&products, &filter).total_matching, 4);
    }

    #[test]
    fn category_filter_requires_exact_tag() {
        let mut products = fixture();
        products[3].category = "combo".to_string();

        let mut filter = FilterState::default();
        filter.set_category(CategoryFilter::Tag("combo".to_string()));
        let page = discover(&products, &filter);
        assert_eq!(page.total_matching, 1);
        assert_eq!(page.items[0].id, pid(4));
    }

    #[test]
    fn inverted_price_range_is_rejected_at_the_boundary() {
        assert!(PriceRange::new(rupees(260), rupees(200)).is_err());
        assert!(PriceRange::new(rupees(200), rupees(200)).is_ok());
    }

    #[test]
    fn zero_matches_yield_an_empty_page_not_an_error() {
        let products = fixture();
        let mut filter = FilterState::default();
        filter.set_search("quinoa");

        let page = discover(&products, &filter);
        assert!(page.is_empty());
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn name_sort_is_case_folded() {
        let mut products = fixture();
        products[0].name = "aachari makhana".to_string();

        let mut filter = FilterState::default();
        filter.set_sort(SortKey::Name);
        let page = discover(&products, &filter);
        assert_eq!(page.items[0].name, "aachari makhana");
        assert_eq!(page.items[1].name, "Cheese Makhana");
    }

    #[test]
    fn popularity_sort_orders_by_review_count_then_rating() {
        let mut products = fixture();
        products[0].review_count = 5;
        products[1].review_count = 50;
        products[2].review_count = 50;
        products[2].rating = 4.9;
        products[1].rating = 4.1;
        products[3].review_count = 20;

        let mut filter = FilterState::default();
        filter.set_sort(SortKey::Popularity);
        let page = discover(&products, &filter);
        let ids: Vec<ProductId> = page.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![pid(3), pid(2), pid(4), pid(1)]);
    }

    #[test]
    fn pagination_slices_and_clamps_the_page() {
        let products: Vec<Product> = (1..=30)
            .map(|n| product(n as u128, &format!("Snack {n:02}"), 100 + n))
            .collect();

        let mut filter = FilterState::default();
        filter.set_page(2);
        let page = discover(&products, &filter);
        assert_eq!(page.total_matching, 30);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 2);
        assert_eq!(page.items.len(), PAGE_SIZE);
        assert_eq!(page.items[0].id, pid(13));

        // A page past the end clamps to the last page.
        filter.set_page(99);
        let page = discover(&products, &filter);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 30 - 2 * PAGE_SIZE);
    }

    #[test]
    fn changing_any_filter_resets_page_to_one() {
        let mut filter = FilterState::default();
        filter.set_page(4);
        filter.set_search("makhana");
        assert_eq!(filter.page(), 1);

        filter.set_page(4);
        filter.set_category(CategoryFilter::Tag("combo".to_string()));
        assert_eq!(filter.page(), 1);

        filter.set_page(4);
        filter.set_price_range(None);
        assert_eq!(filter.page(), 1);

        filter.set_page(4);
        filter.set_sort(SortKey::Name);
        assert_eq!(filter.page(), 1);
    }

    fn arb_products() -> impl Strategy<Value = Vec<Product>> {
        prop::collection::vec(
            (1u128..10_000, 50u64..500, 0u32..100, "[a-z]{3,12}"),
            0..40,
        )
        .prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (n, price, reviews, name))| {
                    let mut p = product(n + i as u128 * 10_000, &name, price);
                    p.review_count = reviews;
                    p
                })
                .collect()
        })
    }

    proptest! {
        /// Property: discovery is idempotent — identical inputs, identical output.
        #[test]
        fn discover_is_idempotent(products in arb_products(), page in 1u32..5) {
            let mut filter = FilterState::default();
            filter.set_sort(SortKey::PriceAsc);
            filter.set_page(page);

            let first = discover(&products, &filter);
            let second = discover(&products, &filter);
            prop_assert_eq!(first, second);
        }

        /// Property: adding a filter on top of the base list never grows the
        /// match count, and total pages always equals ceil(count / PAGE_SIZE).
        #[test]
        fn filters_are_monotone_and_pages_consistent(
            products in arb_products(),
            min in 0u64..30_000,
            span in 0u64..30_000,
        ) {
            let base = discover(&products, &FilterState::default());

            let mut narrowed = FilterState::default();
            narrowed.set_price_range(Some(PriceRange::new(min, min + span).unwrap()));
            let filtered = discover(&products, &narrowed);

            prop_assert!(filtered.total_matching <= base.total_matching);
            prop_assert_eq!(
                filtered.total_pages as usize,
                filtered.total_matching.div_ceil(PAGE_SIZE)
            );
        }
    }
}

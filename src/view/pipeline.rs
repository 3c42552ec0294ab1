//! View Pipeline
//! Sort → filter → paginate over the market list. Pure and deterministic.

use super::{SortDirection, SortKey, ViewState};
use crate::data::MarketRecord;
use std::cmp::Ordering;

/// Fixed table page size
pub const PAGE_SIZE: usize = 10;

/// One rendered page of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub rows: Vec<&'a MarketRecord>,
    pub page: usize,
    pub page_count: usize,
    pub total_matches: usize,
}

/// Natural ordering of one field between two records.
/// Missing values get their own place in the order instead of counting as 0.
fn compare_field(a: &MarketRecord, b: &MarketRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::CurrentPrice => a.current_price.total_cmp(&b.current_price),
        SortKey::MarketCap => a.market_cap.total_cmp(&b.market_cap),
        // Unranked coins go last
        SortKey::MarketCapRank => match (a.market_cap_rank, b.market_cap_rank) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        // Missing change sorts first, as None < Some
        SortKey::PriceChange24h => {
            match (a.price_change_percentage_24h, b.price_change_percentage_24h) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (x, y) => x.is_some().cmp(&y.is_some()),
            }
        }
    }
}

/// Stable sort by the view's key and direction.
pub fn sort_records<'a>(records: &'a [MarketRecord], state: &ViewState) -> Vec<&'a MarketRecord> {
    let mut sorted: Vec<&MarketRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        let ord = compare_field(a, b, state.sort_key);
        match state.sort_direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    sorted
}

/// Name query first, then the rank tier.
pub fn filter_records<'a>(
    sorted: Vec<&'a MarketRecord>,
    state: &ViewState,
) -> Vec<&'a MarketRecord> {
    let query = state.filter_query.to_lowercase();
    let limit = state.filter_tier.rank_limit();

    sorted
        .into_iter()
        .filter(|record| query.is_empty() || record.name.to_lowercase().contains(&query))
        .filter(|record| limit.map_or(true, |limit| record.rank_within(limit)))
        .collect()
}

pub fn page_count(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// Rows of a 1-based page; empty when the page is out of range.
pub fn paginate<'a>(filtered: &[&'a MarketRecord], page: usize) -> Vec<&'a MarketRecord> {
    if page == 0 {
        return Vec::new();
    }
    let start = (page - 1).saturating_mul(PAGE_SIZE);
    filtered
        .iter()
        .skip(start)
        .take(PAGE_SIZE)
        .copied()
        .collect()
}

/// Run the full pipeline for one table.
pub fn apply<'a>(records: &'a [MarketRecord], state: &ViewState) -> PageView<'a> {
    let filtered = filter_records(sort_records(records, state), state);
    let rows = paginate(&filtered, state.page);

    PageView {
        rows,
        page: state.page,
        page_count: page_count(filtered.len()),
        total_matches: filtered.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::record;
    use crate::view::FilterTier;
    use proptest::prelude::*;

    fn names(rows: &[&MarketRecord]) -> Vec<String> {
        rows.iter().map(|r| r.name.clone()).collect()
    }

    fn alpha_beta() -> Vec<MarketRecord> {
        vec![
            record("a", "Alpha", 10.0, 100.0, 1),
            record("b", "Beta", 5.0, 50.0, 2),
        ]
    }

    fn many(n: usize) -> Vec<MarketRecord> {
        (1..=n)
            .map(|i| record(&format!("c{i}"), &format!("Coin {i:03}"), i as f64, 0.0, i as u32))
            .collect()
    }

    #[test]
    fn test_sort_by_price_ascending() {
        let records = alpha_beta();
        let state = ViewState {
            sort_key: SortKey::CurrentPrice,
            ..ViewState::default()
        };
        let view = apply(&records, &state);
        assert_eq!(names(&view.rows), vec!["Beta", "Alpha"]);
        assert_eq!(view.page_count, 1);
    }

    #[test]
    fn test_default_sorts_by_name() {
        let mut records = alpha_beta();
        records.reverse();
        let view = apply(&records, &ViewState::default());
        assert_eq!(names(&view.rows), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_descending_keeps_ties_in_input_order() {
        let records = vec![
            record("x", "X", 1.0, 0.0, 1),
            record("y", "Y", 1.0, 0.0, 2),
            record("z", "Z", 2.0, 0.0, 3),
        ];
        let state = ViewState {
            sort_key: SortKey::CurrentPrice,
            sort_direction: SortDirection::Descending,
            ..ViewState::default()
        };
        let view = apply(&records, &state);
        assert_eq!(names(&view.rows), vec!["Z", "X", "Y"]);
    }

    #[test]
    fn test_missing_change_sorts_first() {
        let mut up = record("u", "Up", 1.0, 0.0, 1);
        up.price_change_percentage_24h = Some(2.5);
        let mut down = record("d", "Down", 1.0, 0.0, 2);
        down.price_change_percentage_24h = Some(-3.0);
        let unknown = record("n", "Unknown", 1.0, 0.0, 3);

        let records = vec![up, down, unknown];
        let state = ViewState {
            sort_key: SortKey::PriceChange24h,
            ..ViewState::default()
        };
        let view = apply(&records, &state);
        assert_eq!(names(&view.rows), vec!["Unknown", "Down", "Up"]);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let records = alpha_beta();
        let state = ViewState {
            filter_query: "aLP".to_string(),
            ..ViewState::default()
        };
        let view = apply(&records, &state);
        assert_eq!(names(&view.rows), vec!["Alpha"]);
        assert_eq!(view.total_matches, 1);
    }

    #[test]
    fn test_tier_filters() {
        let records = many(60);
        let top10 = ViewState {
            filter_tier: FilterTier::Top10,
            ..ViewState::default()
        };
        assert_eq!(apply(&records, &top10).total_matches, 10);

        let top50 = ViewState {
            filter_tier: FilterTier::Top50,
            ..ViewState::default()
        };
        assert_eq!(apply(&records, &top50).total_matches, 50);
        assert_eq!(apply(&records, &ViewState::default()).total_matches, 60);
    }

    #[test]
    fn test_unranked_excluded_from_tiers() {
        let mut unranked = record("n", "Nobody", 1.0, 0.0, 1);
        unranked.market_cap_rank = None;
        let records = vec![unranked];
        let state = ViewState {
            filter_tier: FilterTier::Top50,
            ..ViewState::default()
        };
        assert!(apply(&records, &state).rows.is_empty());
    }

    #[test]
    fn test_pagination_last_page_partial() {
        let records = many(23);
        let state = ViewState {
            page: 3,
            ..ViewState::default()
        };
        let view = apply(&records, &state);
        assert_eq!(view.page_count, 3);
        assert_eq!(view.rows.len(), 3);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let records = many(5);
        for page in [0, 2, usize::MAX] {
            let state = ViewState {
                page,
                ..ViewState::default()
            };
            let view = apply(&records, &state);
            assert!(view.rows.is_empty());
            assert_eq!(view.page_count, 1);
        }
    }

    #[test]
    fn test_empty_records() {
        let view = apply(&[], &ViewState::default());
        assert!(view.rows.is_empty());
        assert_eq!(view.page_count, 0);
    }

    fn records_strategy() -> impl Strategy<Value = Vec<MarketRecord>> {
        prop::collection::vec(
            ("[a-zA-Z]{1,8}", 0.0f64..1e6, 0.0f64..1e12, 1u32..120),
            0..60,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (name, price, cap, rank))| {
                    record(&format!("id{i}"), &name, price, cap, rank)
                })
                .collect()
        })
    }

    fn key_strategy() -> impl Strategy<Value = SortKey> {
        prop::sample::select(SortKey::ALL.to_vec())
    }

    fn sort_value(record: &MarketRecord, key: SortKey) -> String {
        match key {
            SortKey::Name => record.name.clone(),
            SortKey::CurrentPrice => record.current_price.to_string(),
            SortKey::MarketCap => record.market_cap.to_string(),
            SortKey::MarketCapRank => format!("{:?}", record.market_cap_rank),
            SortKey::PriceChange24h => format!("{:?}", record.price_change_percentage_24h),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn test_descending_is_reverse_without_ties(
            records in records_strategy(),
            key in key_strategy()
        ) {
            let mut seen = std::collections::HashSet::new();
            let distinct = records.iter().all(|r| seen.insert(sort_value(r, key)));
            prop_assume!(distinct);

            let asc = ViewState { sort_key: key, ..ViewState::default() };
            let desc = ViewState { sort_direction: SortDirection::Descending, ..asc.clone() };

            let mut ascending = sort_records(&records, &asc);
            ascending.reverse();
            prop_assert_eq!(ascending, sort_records(&records, &desc));
        }

        #[test]
        fn test_top50_subset_of_all(
            records in records_strategy(),
            key in key_strategy(),
            query in "[a-z]{0,2}"
        ) {
            let all = ViewState { sort_key: key, filter_query: query, ..ViewState::default() };
            let top50 = ViewState { filter_tier: FilterTier::Top50, ..all.clone() };

            let all_rows = filter_records(sort_records(&records, &all), &all);
            let top_rows = filter_records(sort_records(&records, &top50), &top50);
            for row in top_rows {
                prop_assert!(all_rows.iter().any(|r| std::ptr::eq(*r, row)));
            }
        }

        #[test]
        fn test_pages_concatenate_to_filtered(
            records in records_strategy(),
            key in key_strategy(),
            query in "[a-z]{0,1}"
        ) {
            let state = ViewState { sort_key: key, filter_query: query, ..ViewState::default() };
            let filtered = filter_records(sort_records(&records, &state), &state);
            let count = apply(&records, &state).page_count;
            prop_assert_eq!(count, filtered.len().div_ceil(PAGE_SIZE));

            let mut joined = Vec::new();
            for page in 1..=count {
                let page_state = ViewState { page, ..state.clone() };
                let view = apply(&records, &page_state);
                prop_assert!(!view.rows.is_empty());
                joined.extend(view.rows);
            }
            prop_assert_eq!(joined, filtered);
        }
    }
}

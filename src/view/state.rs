//! Table View State
//! Per-table sort, filter and pagination selection. Never persisted.

/// Column the table is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Name,
    CurrentPrice,
    MarketCap,
    MarketCapRank,
    PriceChange24h,
}

impl SortKey {
    #[cfg(test)]
    pub const ALL: [SortKey; 5] = [
        SortKey::Name,
        SortKey::CurrentPrice,
        SortKey::MarketCap,
        SortKey::MarketCapRank,
        SortKey::PriceChange24h,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Market-cap tier filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterTier {
    #[default]
    All,
    Top10,
    Top50,
}

impl FilterTier {
    pub const ALL: [FilterTier; 3] = [FilterTier::All, FilterTier::Top10, FilterTier::Top50];

    /// Highest rank allowed through, `None` for no limit
    pub fn rank_limit(&self) -> Option<u32> {
        match self {
            FilterTier::All => None,
            FilterTier::Top10 => Some(10),
            FilterTier::Top50 => Some(50),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterTier::All => "All Coins",
            FilterTier::Top10 => "Top 10 by Market Cap",
            FilterTier::Top50 => "Top 50 by Market Cap",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub filter_tier: FilterTier,
    pub filter_query: String,
    /// 1-based
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            sort_key: SortKey::Name,
            sort_direction: SortDirection::Ascending,
            filter_tier: FilterTier::All,
            filter_query: String::new(),
            page: 1,
        }
    }
}

impl ViewState {
    /// Header click: same key flips direction, new key starts ascending.
    /// The page is left alone.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_key = key;
            self.sort_direction = SortDirection::Ascending;
        }
    }

    /// Arrow shown next to a column header, empty for inactive columns.
    pub fn indicator(&self, key: SortKey) -> &'static str {
        if self.sort_key == key {
            self.sort_direction.arrow()
        } else {
            ""
        }
    }

    pub fn previous_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    pub fn next_page(&mut self, page_count: usize) {
        if self.page < page_count {
            self.page += 1;
        }
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_same_key_flips() {
        let mut state = ViewState::default();
        state.toggle_sort(SortKey::Name);
        assert_eq!(state.sort_direction, SortDirection::Descending);
        state.toggle_sort(SortKey::Name);
        assert_eq!(state.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_toggle_new_key_resets_direction() {
        let mut state = ViewState::default();
        state.toggle_sort(SortKey::Name);
        state.page = 3;
        state.toggle_sort(SortKey::MarketCap);
        assert_eq!(state.sort_key, SortKey::MarketCap);
        assert_eq!(state.sort_direction, SortDirection::Ascending);
        assert_eq!(state.page, 3);
    }

    #[test]
    fn test_page_navigation_bounds() {
        let mut state = ViewState::default();
        state.previous_page();
        assert_eq!(state.page, 1);

        state.next_page(2);
        state.next_page(2);
        assert_eq!(state.page, 2);

        state.go_to_page(1);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_indicator() {
        let mut state = ViewState::default();
        assert_eq!(state.indicator(SortKey::Name), "↑");
        assert_eq!(state.indicator(SortKey::MarketCap), "");
        state.toggle_sort(SortKey::Name);
        assert_eq!(state.indicator(SortKey::Name), "↓");
    }
}

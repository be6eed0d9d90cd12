//! View derivation — the visible, ordered row set.
//!
//! [`derive_view`] is a pure function of `(records, ViewState)`. It is cheap
//! enough over a few dozen rows to recompute on every read, so nothing is
//! memoized.

use std::cmp::Ordering;

use crate::types::{QuoteRecord, SortDirection, SortField};

/// User-controlled view parameters. Defaults to `("", Ticker, Ascending)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub query: String,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl ViewState {
    /// Next state with a new search query.
    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self { query: query.into(), ..self.clone() }
    }

    /// Next state after selecting `field`: the active field flips direction,
    /// any other field becomes active in ascending order.
    pub fn toggle_sort(&self, field: SortField) -> Self {
        let sort_direction = if field == self.sort_field {
            self.sort_direction.flipped()
        } else {
            SortDirection::Ascending
        };
        Self { query: self.query.clone(), sort_field: field, sort_direction }
    }
}

/// Filter and sort `records` according to `view`.
///
/// Uses a stable sort, so ties keep their input (registry) order in both
/// directions.
pub fn derive_view<'a>(records: &'a [QuoteRecord], view: &ViewState) -> Vec<&'a QuoteRecord> {
    let needle = view.query.to_lowercase();
    let mut rows: Vec<&QuoteRecord> =
        records.iter().filter(|r| matches_query(r, &needle)).collect();

    rows.sort_by(|a, b| {
        let ord = compare_by(a, b, view.sort_field);
        match view.sort_direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    rows
}

/// Case-insensitive substring match on ticker or display name.
///
/// `needle` must already be lower-cased; an empty needle matches everything.
pub fn matches_query(record: &QuoteRecord, needle: &str) -> bool {
    needle.is_empty()
        || record.ticker.to_lowercase().contains(needle)
        || record.display_name.to_lowercase().contains(needle)
}

fn compare_by(a: &QuoteRecord, b: &QuoteRecord, field: SortField) -> Ordering {
    match field {
        SortField::Ticker => collate(&a.ticker, &b.ticker),
        SortField::Price => a.price.total_cmp(&b.price),
        SortField::AbsoluteChange => a.absolute_change.total_cmp(&b.absolute_change),
        SortField::PercentChange => a.percent_change.total_cmp(&b.percent_change),
        SortField::Volume => a.volume.cmp(&b.volume),
    }
}

/// Dictionary-style string ordering: case-insensitive first, byte order as the
/// tie-break so the result stays total.
fn collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(ticker: &str, name: &str, price: f64) -> QuoteRecord {
        QuoteRecord {
            ticker: ticker.into(),
            display_name: name.into(),
            price,
            absolute_change: 0.0,
            percent_change: 0.0,
            volume: 1_000_000,
            volume_synthetic: true,
            market_cap_label: "N/A".into(),
        }
    }

    fn tickers(rows: &[&QuoteRecord]) -> Vec<String> {
        rows.iter().map(|r| r.ticker.clone()).collect()
    }

    #[test]
    fn filter_matches_ticker_or_name_case_insensitive() {
        let records = vec![rec("AAPL", "Apple Inc.", 1.0), rec("GOOGL", "Alphabet Inc.", 2.0)];
        let view = ViewState::default().with_query("app");
        assert_eq!(tickers(&derive_view(&records, &view)), vec!["AAPL"]);

        let view = ViewState::default().with_query("ALPHA");
        assert_eq!(tickers(&derive_view(&records, &view)), vec!["GOOGL"]);

        let view = ViewState::default().with_query("inc");
        assert_eq!(derive_view(&records, &view).len(), 2);
    }

    #[test]
    fn query_whitespace_is_literal() {
        let records = vec![rec("AAPL", "Apple Inc.", 1.0), rec("V", "Visa Inc.", 2.0)];
        let view = ViewState::default().with_query("a ");
        assert_eq!(tickers(&derive_view(&records, &view)), vec!["V"]);

        let view = ViewState::default().with_query(" apple");
        assert!(derive_view(&records, &view).is_empty());
    }

    #[test]
    fn empty_query_passes_everything() {
        let records = vec![rec("B", "Bee", 1.0), rec("A", "Ay", 2.0)];
        assert_eq!(tickers(&derive_view(&records, &ViewState::default())), vec!["A", "B"]);
    }

    #[test]
    fn price_sort_and_toggle() {
        let records =
            vec![rec("X", "x", 150.0), rec("Y", "y", 90.5), rec("Z", "z", 300.2)];
        let view = ViewState::default().toggle_sort(SortField::Price);
        assert_eq!(view.sort_direction, SortDirection::Ascending);
        let prices: Vec<f64> = derive_view(&records, &view).iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![90.5, 150.0, 300.2]);

        let view = view.toggle_sort(SortField::Price);
        assert_eq!(view.sort_direction, SortDirection::Descending);
        let prices: Vec<f64> = derive_view(&records, &view).iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![300.2, 150.0, 90.5]);
    }

    #[test]
    fn new_field_resets_to_ascending() {
        let view = ViewState::default().toggle_sort(SortField::Price).toggle_sort(SortField::Price);
        assert_eq!(view.sort_direction, SortDirection::Descending);
        let view = view.toggle_sort(SortField::Volume);
        assert_eq!(view.sort_field, SortField::Volume);
        assert_eq!(view.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn toggling_default_field_flips() {
        let view = ViewState::default().toggle_sort(SortField::Ticker);
        assert_eq!(view.sort_direction, SortDirection::Descending);
    }

    #[test]
    fn ties_keep_input_order_both_directions() {
        let records = vec![rec("A", "a", 10.0), rec("B", "b", 10.0), rec("C", "c", 5.0)];
        let asc = ViewState::default().toggle_sort(SortField::Price);
        assert_eq!(tickers(&derive_view(&records, &asc)), vec!["C", "A", "B"]);
        let desc = asc.toggle_sort(SortField::Price);
        assert_eq!(tickers(&derive_view(&records, &desc)), vec!["A", "B", "C"]);
    }

    #[test]
    fn ticker_collation_ignores_case() {
        let records = vec![rec("b", "", 0.0), rec("A", "", 0.0), rec("a", "", 0.0)];
        assert_eq!(tickers(&derive_view(&records, &ViewState::default())), vec!["A", "a", "b"]);
    }

    #[test]
    fn derivation_is_idempotent() {
        let records =
            vec![rec("MSFT", "Microsoft", 410.0), rec("AAPL", "Apple", 190.0), rec("V", "Visa", 280.0)];
        let view = ViewState::default().with_query("a").toggle_sort(SortField::Price);
        let first = tickers(&derive_view(&records, &view));
        let second = tickers(&derive_view(&records, &view));
        assert_eq!(first, second);
    }
}

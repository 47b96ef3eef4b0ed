//! Search expression construction for the zbMATH document API

use chrono::{Datelike, NaiveDate};

/// Publication-year filter for a run happening on `today`.
///
/// Normally the current calendar year. In January the filter widens to a
/// two-year range, since documents published late in the prior year are
/// often still being indexed.
pub fn year_filter(today: NaiveDate) -> String {
    let year = today.year();
    if today.month() < 2 {
        format!("{}-{}", year - 1, year)
    } else {
        year.to_string()
    }
}

/// Boolean search expression: any of the author codes, within the year
/// filter. `ia:` is the zbMATH author-identifier field.
pub fn build_query(author_codes: &[String], today: NaiveDate) -> String {
    let authors: Vec<String> = author_codes.iter().map(|c| format!("ia:{c}")).collect();
    format!("({}) & py:{}", authors.join(" | "), year_filter(today))
}

/// Full search URL with the expression percent-encoded into the single
/// `search_string` query parameter.
pub fn search_url(base_url: &str, query: &str) -> String {
    format!(
        "{}/document/_search?search_string={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(query)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn year_filter_mid_year() {
        assert_eq!(year_filter(date(2024, 6, 15)), "2024");
    }

    #[test]
    fn year_filter_widens_in_january() {
        assert_eq!(year_filter(date(2024, 1, 15)), "2023-2024");
    }

    #[test]
    fn year_filter_february_is_single_year() {
        assert_eq!(year_filter(date(2024, 2, 1)), "2024");
    }

    #[test]
    fn query_joins_authors_with_disjunction() {
        let codes = vec!["smith.jane".to_string(), "doe.john-b".to_string()];
        assert_eq!(
            build_query(&codes, date(2024, 6, 15)),
            "(ia:smith.jane | ia:doe.john-b) & py:2024"
        );
    }

    #[test]
    fn query_single_author() {
        let codes = vec!["smith.jane".to_string()];
        assert_eq!(
            build_query(&codes, date(2024, 1, 15)),
            "(ia:smith.jane) & py:2023-2024"
        );
    }

    #[test]
    fn search_url_encodes_expression() {
        let url = search_url("https://api.zbmath.org/v1", "(ia:a | ia:b) & py:2024");
        assert_eq!(
            url,
            "https://api.zbmath.org/v1/document/_search?search_string=%28ia%3Aa%20%7C%20ia%3Ab%29%20%26%20py%3A2024"
        );
    }

    #[test]
    fn search_url_tolerates_trailing_slash() {
        let a = search_url("https://api.zbmath.org/v1/", "x");
        let b = search_url("https://api.zbmath.org/v1", "x");
        assert_eq!(a, b);
    }
}

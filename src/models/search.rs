//! Brewery search criteria.

use serde::Deserialize;

/// Optional equality filters for a brewery search.
///
/// Each filter is either absent (`None`, empty or whitespace-only), meaning
/// no constraint, or a value the column must equal exactly. A blank filter
/// never matches blank-valued rows; it is simply ignored.
///
/// # Query Parameters Example
///
/// `?city=Denver&state=CO&zipcode=`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub zipcode: Option<String>,
}

impl SearchCriteria {
    pub fn with_city(self, city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            ..self
        }
    }

    pub fn with_state(self, state: impl Into<String>) -> Self {
        Self {
            state: Some(state.into()),
            ..self
        }
    }

    pub fn with_zipcode(self, zipcode: impl Into<String>) -> Self {
        Self {
            zipcode: Some(zipcode.into()),
            ..self
        }
    }

    /// The supplied filters as `(column, value)` pairs.
    ///
    /// Pairs always come out in column order (city, state, zip_code) no
    /// matter how the criteria were populated. Values are returned verbatim.
    pub fn filters(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("city", self.city.as_deref()),
            ("state", self.state.as_deref()),
            ("zip_code", self.zipcode.as_deref()),
        ]
        .into_iter()
        .filter_map(|(column, value)| match value {
            Some(v) if !v.trim().is_empty() => Some((column, v)),
            _ => None,
        })
    }

    /// True when no filter is supplied, i.e. the search is a full scan.
    pub fn is_unconstrained(&self) -> bool {
        self.filters().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_criteria_has_no_filters() {
        assert!(SearchCriteria::default().is_unconstrained());
    }

    #[rstest]
    #[case::empty("")]
    #[case::spaces("   ")]
    #[case::tab("\t")]
    fn blank_filter_is_the_same_as_omitted(#[case] blank: &str) {
        let criteria = SearchCriteria::default().with_city(blank);
        assert!(criteria.is_unconstrained());
        assert_eq!(criteria.filters().count(), 0);
    }

    #[rstest]
    fn filters_follow_column_order_not_population_order() {
        let criteria = SearchCriteria::default()
            .with_zipcode("80202")
            .with_city("Denver");

        let filters: Vec<_> = criteria.filters().collect();
        assert_eq!(filters, vec![("city", "Denver"), ("zip_code", "80202")]);
    }

    #[rstest]
    fn present_values_are_not_trimmed() {
        let criteria = SearchCriteria::default().with_state(" CO ");
        let filters: Vec<_> = criteria.filters().collect();
        assert_eq!(filters, vec![("state", " CO ")]);
    }

    #[rstest]
    fn deserializes_from_partial_query_parameters() {
        let criteria: SearchCriteria =
            serde_json::from_str(r#"{"city":"Denver","zipcode":""}"#).unwrap();

        assert_eq!(criteria.city.as_deref(), Some("Denver"));
        assert_eq!(criteria.state, None);
        assert_eq!(criteria.filters().collect::<Vec<_>>(), vec![("city", "Denver")]);
    }
}

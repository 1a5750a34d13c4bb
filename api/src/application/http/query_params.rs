use populus_core::domain::filter::value_objects::SearchParams;

/// Filter parameters as they arrive on a search URL.
///
/// Every value is text. When a key repeats, the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub params: SearchParams,
}

impl SearchQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            params: pairs.into_iter().collect(),
        }
    }

    /// Parse a raw query string such as `status=alive&birth_dateMin=2100-01-01`.
    pub fn from_query_string(query: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
        Ok(Self::from_pairs(pairs))
    }
}

#[cfg(test)]
mod tests {
    use populus_core::domain::filter::value_objects::ParamValue;

    use super::*;

    #[test]
    fn test_parse_keeps_values_as_text() {
        let query = SearchQuery::from_query_string("status=alive&current_populationMin=100").unwrap();

        assert_eq!(query.params.len(), 2);
        assert_eq!(
            query.params.get("current_populationMin"),
            Some(&ParamValue::Text("100".to_string()))
        );
    }

    #[test]
    fn test_parse_decodes_percent_and_plus() {
        let query = SearchQuery::from_query_string("address=Dome%207+North").unwrap();
        assert_eq!(
            query.params.get("address"),
            Some(&ParamValue::Text("Dome 7 North".to_string()))
        );
    }

    #[test]
    fn test_last_repeated_key_wins() {
        let query = SearchQuery::from_query_string("order=asc&order=desc").unwrap();
        assert_eq!(
            query.params.get("order"),
            Some(&ParamValue::Text("desc".to_string()))
        );
    }

    #[test]
    fn test_empty_values_survive_parsing() {
        let query = SearchQuery::from_query_string("first_name=&status=alive").unwrap();
        assert_eq!(
            query.params.get("first_name"),
            Some(&ParamValue::Text(String::new()))
        );
    }

    #[test]
    fn test_empty_query() {
        let query = SearchQuery::from_query_string("").unwrap();
        assert!(query.params.is_empty());
    }
}

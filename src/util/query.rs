use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// Query string parameters with forgiving key lookup.
#[derive(Debug, Default)]
pub struct QueryParams {
    map: HashMap<String, String>,
}

impl<'de> Deserialize<'de> for QueryParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Deserialize into a temporary normal map first
        let map = HashMap::<String, String>::deserialize(deserializer)?;
        Ok(QueryParams { map })
    }
}

impl QueryParams {
    pub fn get(&self, key: &str) -> Option<&str> {
        if let Some(val) = self.map.get(key) {
            return Some(val);
        }

        // Fall back to an ASCII case-insensitive match, so ?n=5 reads as ?N=5.
        self.map
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        QueryParams {
            map: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

use std::collections::BTreeMap;

use url::form_urlencoded;
use url::Url;

/// A query parameter value. Each kind carries its own notion of "empty",
/// which [`UrlBuilder::add_query_param_not_empty`] dispatches on.
#[derive(Debug, Clone)]
pub(crate) enum QueryValue {
    Str(String),
    OptStr(Option<String>),
    Int(i64),
    OptInt(Option<i64>),
    Other(String),
}

impl QueryValue {
    /// True when the value is elided by [`UrlBuilder::add_query_param_not_empty`]:
    /// an empty string, a zero integer, or an absent optional. `Other` values
    /// are never considered empty.
    fn is_empty(&self) -> bool {
        match self {
            QueryValue::Str(value) => value.is_empty(),
            QueryValue::OptStr(value) => value.as_deref().map_or(true, str::is_empty),
            QueryValue::Int(value) => *value == 0,
            QueryValue::OptInt(value) => value.map_or(true, |value| value == 0),
            QueryValue::Other(_) => false,
        }
    }

    fn render(&self) -> String {
        match self {
            QueryValue::Str(value) => value.clone(),
            QueryValue::OptStr(value) => value.clone().unwrap_or_default(),
            QueryValue::Int(value) => value.to_string(),
            QueryValue::OptInt(value) => value.map(|value| value.to_string()).unwrap_or_default(),
            QueryValue::Other(value) => value.clone(),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Str(value)
    }
}

impl From<Option<String>> for QueryValue {
    fn from(value: Option<String>) -> Self {
        QueryValue::OptStr(value)
    }
}

impl From<Option<&str>> for QueryValue {
    fn from(value: Option<&str>) -> Self {
        QueryValue::OptStr(value.map(str::to_string))
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Int(i64::from(value))
    }
}

impl From<Option<i64>> for QueryValue {
    fn from(value: Option<i64>) -> Self {
        QueryValue::OptInt(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Other(value.to_string())
    }
}

/// Assembles an absolute request URL from a validated base, one path, and an
/// ordered set of query parameters. Construction never fails; malformed path
/// fragments are trimmed, not rejected.
pub(crate) struct UrlBuilder {
    base: Url,
    path: String,
    ordered_query: Vec<(String, QueryValue)>,
}

impl UrlBuilder {
    pub fn new(base: Url) -> Self {
        Self {
            base,
            path: String::new(),
            ordered_query: Vec::new(),
        }
    }

    /// Sets the path verbatim. The path must already start with a `/`.
    pub fn set_path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Joins path fragments with single separators, trimming redundant ones
    /// and dropping fragments that end up empty.
    #[allow(dead_code)]
    pub fn set_paths<I, S>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fragments: Vec<String> = fragments
            .into_iter()
            .map(|fragment| fragment.as_ref().trim_matches('/').to_string())
            .filter(|fragment| !fragment.is_empty())
            .collect();
        self.path = format!("/{}", fragments.join("/"));
        self
    }

    /// Appends a query parameter unconditionally.
    pub fn add_query_param(mut self, key: &str, value: impl Into<QueryValue>) -> Self {
        self.ordered_query.push((key.to_string(), value.into()));
        self
    }

    /// Appends a query parameter unless its value is empty for its kind:
    /// empty strings, zero integers, and absent optionals are elided.
    pub fn add_query_param_not_empty(self, key: &str, value: impl Into<QueryValue>) -> Self {
        let value = value.into();
        if value.is_empty() {
            return self;
        }
        self.add_query_param(key, value)
    }

    /// Concatenates base and path, then appends the canonically encoded query
    /// string: percent-encoded, sorted by key, later duplicates replacing
    /// earlier ones.
    pub fn build(self) -> Url {
        let mut url = self.base;
        let joined = format!("{}{}", url.path().trim_end_matches('/'), self.path);
        url.set_path(&joined);
        if self.ordered_query.is_empty() {
            url.set_query(None);
        } else {
            let mut canonical = BTreeMap::new();
            for (key, value) in &self.ordered_query {
                canonical.insert(key.clone(), value.render());
            }
            let mut serializer = form_urlencoded::Serializer::new(String::new());
            for (key, value) in &canonical {
                serializer.append_pair(key, value);
            }
            url.set_query(Some(&serializer.finish()));
        }
        url
    }
}

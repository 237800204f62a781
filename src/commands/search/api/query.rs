use std::{borrow::Cow, fmt::Display};

/// A single query string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Text(String),
    /// Sent as the literal strings `true` / `false`.
    Flag(bool),
}

impl Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Flag(flag) => f.write_str(if *flag { "true" } else { "false" }),
        }
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Path and parameters of a request to workshop.codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    path: String,
    params: Vec<(String, Option<Param>)>,
}

impl SearchQuery {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Sets `key`, replacing any earlier value. `None` values are left out of the url.
    pub fn param<V: Into<Param>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        let key = key.into();
        self.params.retain(|(existing, _)| *existing != key);
        self.params.push((key, value.map(Into::into)));
        self
    }

    pub fn path(&self) -> Cow<'_, str> {
        if self.path.starts_with('/') {
            Cow::Borrowed(self.path.as_str())
        } else {
            Cow::Owned(format!("/{}", self.path))
        }
    }

    fn present_params(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.params
            .iter()
            .filter_map(|(key, value)| value.as_ref().map(|value| (key.as_str(), value)))
    }

    /// Resolves the query against `base`.
    ///
    /// Values are percent-encoded before being added to the query string, so the
    /// query string carries them encoded a second time. workshop.codes expects this.
    pub fn url(&self, base: &reqwest::Url) -> Result<reqwest::Url, url::ParseError> {
        let mut url = base.join(&self.path())?;

        let mut present = self.present_params().peekable();
        if present.peek().is_some() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in present {
                pairs.append_pair(key, &urlencoding::encode(&value.to_string()));
            }
        }

        Ok(url)
    }
}

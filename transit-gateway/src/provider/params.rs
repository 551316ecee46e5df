//! Per-call query parameters.

/// Query parameters forwarded to a provider.
///
/// Omitted (`None`) and empty values are never added, so the provider only
/// ever sees the parameters the caller actually supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter unless its value is empty.
    pub fn with(mut self, name: &'static str, value: impl ToString) -> Self {
        let value = value.to_string();
        if !value.trim().is_empty() {
            self.0.push((name, value));
        }
        self
    }

    /// Add a parameter if one was supplied.
    pub fn with_opt<T: ToString>(self, name: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }

    #[cfg(test)]
    fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

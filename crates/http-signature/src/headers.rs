use http::HeaderMap;

use crate::error::{Result, SignatureError};

/// Ordered header sequence used as signing input.
///
/// A sequence rather than a map: the same name may appear more than once
/// (e.g. several `Cookie` entries), and the first occurrence of each name
/// fixes its position in the signing string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    /// Builds the sequence from an `http` header map, in the map's iteration order.
    pub fn from_header_map(map: &HeaderMap) -> Result<Self> {
        let entries = map
            .iter()
            .map(|(name, value)| -> Result<(String, String)> {
                let value = std::str::from_utf8(value.as_bytes()).map_err(|e| {
                    SignatureError::Encoding(format!("value of header `{name}` is not UTF-8: {e}"))
                })?;
                Ok((name.as_str().to_owned(), value.to_owned()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct names in first-occurrence order, case preserved.
    ///
    /// Names are compared as supplied: `Date` and `date` are two names here.
    pub fn unique_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (name, _) in &self.entries {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        names
    }

    /// All values recorded under exactly `name`, joined with `", "`.
    pub fn values_for(&self, name: &str) -> String {
        self.entries
            .iter()
            .filter(|(candidate, _)| candidate == name)
            .map(|(_, value)| value.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `"{name}: {values}"` with the name lower-cased and stripped of
    /// surrounding horizontal whitespace.
    pub fn canonical_line(&self, name: &str) -> String {
        format!(
            "{}: {}",
            name.to_lowercase().trim_matches(is_horizontal_whitespace),
            self.values_for(name)
        )
    }

    /// One canonical line per unique name, newline-separated.
    pub fn canonical_block(&self) -> String {
        self.unique_names()
            .into_iter()
            .map(|name| self.canonical_line(name))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Body of the `headers=` field after `(request-target)`: unique names
    /// lower-cased and space-joined. Unlike the canonical block, names are not trimmed.
    pub fn header_list(&self) -> String {
        self.unique_names()
            .into_iter()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Tab and the Unicode space separators; line breaks are left alone.
fn is_horizontal_whitespace(c: char) -> bool {
    c == '\t'
        || (c.is_whitespace()
            && !matches!(c, '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'))
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter)
    }
}

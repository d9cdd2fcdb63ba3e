use serde::Deserialize;

use crate::types::LibraryShare;

/// Seconds added to the end-date filter so it covers the whole day.
pub const END_OF_DAY_SECONDS: i64 = 86_399;

/// Share list filters as they arrive on the query string. Zero and empty
/// values mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShareListFilter {
    pub search_key: String,
    pub search_create_start: i64,
    pub search_create_end: i64,
}

impl ShareListFilter {
    pub fn name_contains(&self) -> Option<&str> {
        let key = self.search_key.trim();
        (!key.is_empty()).then_some(key)
    }

    /// Inclusive lower bound on `create_time`.
    pub fn created_from(&self) -> Option<i64> {
        (self.search_create_start != 0).then_some(self.search_create_start)
    }

    /// Inclusive upper bound on `create_time`: the end-date value marks the
    /// start of a day, so the bound extends to that day's last second.
    pub fn created_until(&self) -> Option<i64> {
        (self.search_create_end != 0)
            .then(|| self.search_create_end.saturating_add(END_OF_DAY_SECONDS))
    }

    /// `LIKE` pattern for the name filter with wildcards in the key escaped.
    pub fn like_pattern(&self) -> Option<String> {
        self.name_contains().map(|key| {
            let mut escaped = String::with_capacity(key.len() + 2);
            escaped.push('%');
            for ch in key.chars() {
                if matches!(ch, '%' | '_' | '\\') {
                    escaped.push('\\');
                }
                escaped.push(ch);
            }
            escaped.push('%');
            escaped
        })
    }

    /// Whether a share satisfies every active filter.
    pub fn matches(&self, share: &LibraryShare) -> bool {
        if let Some(key) = self.name_contains()
            && !share.share_name.contains(key)
        {
            return false;
        }
        if let Some(start) = self.created_from()
            && share.create_time < start
        {
            return false;
        }
        if let Some(end) = self.created_until()
            && share.create_time > end
        {
            return false;
        }
        true
    }
}

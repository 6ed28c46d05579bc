use crate::journal_entry::JournalEntry;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub keyword: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

fn given(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl SearchFilter {
    pub fn keyword(&self) -> Option<&str> {
        given(&self.keyword)
    }

    pub fn date_from(&self) -> Option<&str> {
        given(&self.date_from)
    }

    pub fn date_to(&self) -> Option<&str> {
        given(&self.date_to)
    }

    /// Query parameters for the remote search endpoint, only those that are set.
    pub fn query_params(&self) -> Vec<(&'static str, &str)> {
        [
            ("q", self.keyword()),
            ("date_from", self.date_from()),
            ("date_to", self.date_to()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }

    pub fn matches(&self, entry: &JournalEntry) -> bool {
        if let Some(keyword) = self.keyword() {
            let keyword = keyword.to_lowercase();
            if !entry.title.to_lowercase().contains(&keyword)
                && !entry.content.to_lowercase().contains(&keyword)
            {
                return false;
            }
        }
        // dates are YYYY-MM-DD, so string order is calendar order
        if let Some(from) = self.date_from() {
            if entry.date.as_str() < from {
                return false;
            }
        }
        if let Some(to) = self.date_to() {
            if entry.date.as_str() > to {
                return false;
            }
        }
        true
    }
}

pub fn client_side_search(entries: &[JournalEntry], filter: &SearchFilter) -> Vec<JournalEntry> {
    entries
        .iter()
        .filter(|e| filter.matches(e))
        .cloned()
        .collect()
}

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::{QueryLimits, WordSuggestion};

/// Raw parameters of a listing request.
///
/// Values are kept as the caller sent them; interpretation happens in
/// [`resolve`] so malformed input degrades instead of failing the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub keyword: Option<String>,
    pub filter: BTreeMap<String, String>,
    pub range: Option<String>,
    pub page: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "1" => Some(Self::Asc),
            "desc" | "descending" | "-1" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Word,
    WordClass,
    Definitions,
    Variations,
    Approvals,
    OriginalWordId,
}

impl SortKey {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "id" | "_id" => Some(Self::Id),
            "word" => Some(Self::Word),
            "wordClass" => Some(Self::WordClass),
            "definitions" => Some(Self::Definitions),
            "variations" => Some(Self::Variations),
            "approvals" => Some(Self::Approvals),
            "originalWordId" => Some(Self::OriginalWordId),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Word => "word",
            Self::WordClass => "wordClass",
            Self::Definitions => "definitions",
            Self::Variations => "variations",
            Self::Approvals => "approvals",
            Self::OriginalWordId => "originalWordId",
        }
    }

    fn compare(self, a: &WordSuggestion, b: &WordSuggestion) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Word => a.word.cmp(&b.word),
            Self::WordClass => a.word_class.cmp(&b.word_class),
            Self::Definitions => a.definitions.cmp(&b.definitions),
            Self::Variations => a.variations.cmp(&b.variations),
            Self::Approvals => a.approvals.cmp(&b.approvals),
            Self::OriginalWordId => a.original_word_id.cmp(&b.original_word_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Sort {
    /// Order used when no sort key can be recognised.
    pub const DEFAULT: Sort = Sort {
        key: SortKey::Approvals,
        direction: SortDirection::Desc,
    };

    /// Reads a loosely structured sort expression.
    ///
    /// The first known key wins and the first direction after it sets the
    /// direction. `["word": "desc"]`, `["word","DESC"]`
    /// and the unterminated `["wordClass]` all parse.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut tokens = raw
            .split(|c: char| {
                c.is_whitespace()
                    || matches!(c, '[' | ']' | '{' | '}' | '(' | ')' | '"' | '\'' | ':' | ',')
            })
            .filter(|token| !token.is_empty());
        let key = tokens.by_ref().find_map(SortKey::parse)?;
        let direction = tokens
            .find_map(SortDirection::parse)
            .unwrap_or(SortDirection::Asc);
        Some(Self { key, direction })
    }

    fn compare(&self, a: &WordSuggestion, b: &WordSuggestion) -> Ordering {
        let ordering = self.key.compare(a, b);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Offset and length of the slice a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub skip: usize,
    pub limit: usize,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter.insert(field.into(), value.into());
        self
    }

    /// Inclusive bound, sent as `[start,end]`.
    #[must_use]
    pub fn range(mut self, start: usize, end: usize) -> Self {
        self.range = Some(format!("[{start},{end}]"));
        self
    }

    #[must_use]
    pub fn raw_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    #[must_use]
    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page.to_string());
        self
    }

    #[must_use]
    pub fn raw_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    #[must_use]
    pub fn sort(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort = Some(format!(r#"["{}","{}"]"#, key.as_str(), direction.as_str()));
        self
    }

    #[must_use]
    pub fn raw_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Builds a query from URL query pairs.
    ///
    /// `range` may arrive as one `[a,b]` string or as repeated values
    /// (`range=a&range=b`, `range[0]=a&range[1]=b`). `filter` may arrive as
    /// a JSON object string or as `filter[field]=value` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        let mut range_parts = Vec::new();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                "keyword" => query.keyword = Some(value),
                "range" | "range[]" | "range[0]" | "range[1]" => range_parts.push(value),
                "page" => query.page = Some(value),
                "sort" => query.sort = Some(value),
                "filter" => query.filter.extend(parse_filter_object(&value)),
                other => {
                    if let Some(field) = other
                        .strip_prefix("filter[")
                        .and_then(|rest| rest.strip_suffix(']'))
                    {
                        query.filter.insert(field.to_owned(), value);
                    } else {
                        debug!(parameter = other, "ignoring unknown query parameter");
                    }
                }
            }
        }
        query.range = match range_parts.len() {
            0 => None,
            1 => range_parts.pop(),
            _ => Some(format!("[{}]", range_parts.join(","))),
        };
        query
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(keyword) = &self.keyword {
            pairs.push(("keyword".to_owned(), keyword.clone()));
        }
        for (field, value) in &self.filter {
            pairs.push((format!("filter[{field}]"), value.clone()));
        }
        if let Some(range) = &self.range {
            pairs.push(("range".to_owned(), range.clone()));
        }
        if let Some(page) = &self.page {
            pairs.push(("page".to_owned(), page.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_owned(), sort.clone()));
        }
        pairs
    }

    /// The slice this query selects. A usable range wins over `page`;
    /// any other range is treated as absent.
    pub fn window(&self, limits: &QueryLimits) -> Window {
        if let Some(raw) = self.range.as_deref() {
            match parse_range(raw) {
                Some((start, end)) if end >= start && end - start < limits.max_range_span => {
                    return Window {
                        skip: start,
                        limit: end - start + 1,
                    };
                }
                Some((start, end)) => {
                    debug!(start, end, "range is inverted or too wide, using the page window");
                }
                None => debug!(range = raw, "malformed range, using the page window"),
            }
        }
        let page = match self.page.as_deref() {
            // searches return every match unless a window was asked for
            None if self.is_search() => {
                return Window {
                    skip: 0,
                    limit: usize::MAX,
                };
            }
            None => 0,
            Some(raw) => raw.trim().parse::<usize>().unwrap_or_else(|_| {
                debug!(page = raw, "malformed page, using the first page");
                0
            }),
        };
        Window {
            skip: page.saturating_mul(limits.default_page_size),
            limit: limits.default_page_size,
        }
    }

    /// The sort this query asks for, or [`Sort::DEFAULT`].
    pub fn resolved_sort(&self) -> Sort {
        match self.sort.as_deref() {
            None => Sort::DEFAULT,
            Some(raw) => Sort::parse(raw).unwrap_or_else(|| {
                debug!(sort = raw, "no sortable key in sort expression, using the default order");
                Sort::DEFAULT
            }),
        }
    }

    /// Whether a keyword or a filter on a known field narrows the listing.
    pub fn is_search(&self) -> bool {
        let has_keyword = self
            .keyword
            .as_deref()
            .is_some_and(|keyword| !keyword.trim().is_empty());
        has_keyword || self.filter.keys().any(|field| FILTER_FIELDS.contains(&field.as_str()))
    }

    fn matches(&self, suggestion: &WordSuggestion) -> bool {
        let keyword_matches = self
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map_or(true, |keyword| {
                suggestion.word.trim().to_lowercase() == keyword.to_lowercase()
            });
        keyword_matches
            && self
                .filter
                .iter()
                .all(|(field, value)| field_matches(suggestion, field, value))
    }
}

/// Selects and orders the part of `collection` a listing request returns.
///
/// Filtering by keyword and filter comes first, then the whole remaining
/// collection is sorted (ties broken by ascending id), then the window
/// from [`ListQuery::window`] is cut out of it.
pub fn resolve<'a>(
    collection: &'a [WordSuggestion],
    query: &ListQuery,
    limits: &QueryLimits,
) -> Vec<&'a WordSuggestion> {
    let sort = query.resolved_sort();
    let mut matches = collection
        .iter()
        .filter(|suggestion| query.matches(suggestion))
        .collect::<Vec<&WordSuggestion>>();
    matches.sort_by(|a, b| sort.compare(a, b).then_with(|| a.id.cmp(&b.id)));
    let window = query.window(limits);
    matches
        .into_iter()
        .skip(window.skip)
        .take(window.limit)
        .collect()
}

fn parse_range(raw: &str) -> Option<(usize, usize)> {
    serde_json::from_str::<(usize, usize)>(raw.trim()).ok()
}

fn parse_filter_object(raw: &str) -> Vec<(String, String)> {
    match serde_json::from_str::<serde_json::Map<String, Value>>(raw) {
        Ok(object) => object
            .into_iter()
            .filter_map(|(field, value)| match value {
                Value::String(value) => Some((field, value)),
                Value::Number(value) => Some((field, value.to_string())),
                Value::Bool(value) => Some((field, value.to_string())),
                _ => None,
            })
            .collect(),
        Err(error) => {
            debug!(filter = raw, %error, "malformed filter, ignoring it");
            Vec::new()
        }
    }
}

const FILTER_FIELDS: [&str; 8] = [
    "id",
    "_id",
    "word",
    "wordClass",
    "originalWordId",
    "definitions",
    "variations",
    "approvals",
];

fn field_matches(suggestion: &WordSuggestion, field: &str, value: &str) -> bool {
    match field {
        "id" | "_id" => suggestion.id == value,
        "word" => suggestion.word == value,
        "wordClass" => suggestion.word_class == value,
        "originalWordId" => suggestion.original_word_id.as_deref() == Some(value),
        "definitions" => suggestion.definitions.iter().any(|entry| entry == value),
        "variations" => suggestion.variations.iter().any(|entry| entry == value),
        "approvals" => value
            .trim()
            .parse::<u32>()
            .map_or(false, |approvals| approvals == suggestion.approvals),
        _ => {
            debug!(field, "ignoring filter on unknown field");
            true
        }
    }
}

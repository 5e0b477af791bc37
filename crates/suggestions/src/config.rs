use url::Url;

/// Where the word suggestion API lives and how to authenticate with it.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub api_key: Option<String>,
}

impl ApiConfig {
    /// Parses `base_url`, e.g. `http://localhost:8080/api/v1`.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            api_key: None,
        })
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

/// Window sizes applied when resolving a listing request.
///
/// The two limits are independent: `default_page_size` is the window used
/// by pages and by every range that falls back, `max_range_span` is the
/// widest range that is honoured as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    pub default_page_size: usize,
    pub max_range_span: usize,
}

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_RANGE_SPAN: usize = 25;

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_range_span: MAX_RANGE_SPAN,
        }
    }
}

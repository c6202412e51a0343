//! Site profiles: the declarative tables that drive extraction.
//!
//! A [`SiteProfile`] bundles everything that differs between supported
//! stores: request headers and, per field, an ordered fallback chain of
//! selector rules. Rule order is a priority order; the extractor stops at
//! the first rule whose value validates.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::AppError;
use crate::profiles::{AMAZON, FLIPKART, SNAPDEAL};

/// A supported store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Site {
    Amazon,
    Flipkart,
    Snapdeal,
}

impl Site {
    /// Routing precedence. A URL is matched against tokens in this order.
    pub const ALL: [Site; 3] = [Site::Amazon, Site::Flipkart, Site::Snapdeal];

    /// Display name reported in the `website` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Site::Amazon => "Amazon",
            Site::Flipkart => "Flipkart",
            Site::Snapdeal => "Snapdeal",
        }
    }

    /// Substring a URL must contain to route to this site.
    pub fn url_token(&self) -> &'static str {
        match self {
            Site::Amazon => "amazon",
            Site::Flipkart => "flipkart",
            Site::Snapdeal => "snapdeal",
        }
    }

    pub fn profile(&self) -> &'static SiteProfile {
        match self {
            Site::Amazon => &AMAZON,
            Site::Flipkart => &FLIPKART,
            Site::Snapdeal => &SNAPDEAL,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Site {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "amazon" => Ok(Site::Amazon),
            "flipkart" => Ok(Site::Flipkart),
            "snapdeal" => Ok(Site::Snapdeal),
            _ => Err(format!("Unknown site: {}", s)),
        }
    }
}

/// Pick the profile for a URL.
///
/// Tokens are tested in [`Site::ALL`] order (amazon, flipkart, snapdeal).
/// The first token found anywhere in the URL wins, so a URL containing both
/// "flipkart" and "amazon" routes to Amazon.
///
/// Matching is case-insensitive: `https://www.Amazon.in/...` and a path
/// segment like `/AMAZON` both route to Amazon. This is looser than a plain
/// substring test, which would report such URLs as unsupported.
pub fn route(url: &str) -> Result<&'static SiteProfile, AppError> {
    let haystack = url.to_ascii_lowercase();
    Site::ALL
        .iter()
        .find(|site| haystack.contains(site.url_token()))
        .map(|site| site.profile())
        .ok_or_else(|| AppError::UnsupportedSite(url.to_string()))
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

/// Where a rule reads its candidate value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// Trimmed text content of the element and its descendants.
    Text,
    /// Value of the named attribute.
    Attr(&'static str),
}

/// One entry in a field's fallback chain.
pub trait FieldRule {
    /// CSS selector. Only the first matching element is considered.
    fn selector(&self) -> &'static str;

    fn source(&self) -> ValueSource;

    /// Whether an extracted value is plausible for this field.
    fn accepts(&self, value: &str) -> bool;
}

static DIGIT_GROUPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*").expect("digit group pattern is valid"));

static RUPEE_PREFIXED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"₹\s*\d[\d,]*").expect("rupee pattern is valid"));

/// Validation pattern for price text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricePattern {
    /// Bare digit groups with optional thousands separators, e.g. `1,299`.
    DigitGroups,
    /// `₹` followed by digit groups, e.g. `₹ 1,299`.
    RupeePrefixed,
}

impl PricePattern {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            PricePattern::DigitGroups => DIGIT_GROUPS.is_match(text),
            PricePattern::RupeePrefixed => RUPEE_PREFIXED.is_match(text),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PriceRule {
    pub selector: &'static str,
    pub pattern: PricePattern,
}

impl FieldRule for PriceRule {
    fn selector(&self) -> &'static str {
        self.selector
    }

    fn source(&self) -> ValueSource {
        ValueSource::Text
    }

    fn accepts(&self, value: &str) -> bool {
        !value.is_empty() && self.pattern.matches(value)
    }
}

pub const TITLE_MIN_LEN: usize = 10;
pub const TITLE_MAX_LEN: usize = 500;

/// Title rule with exclusive character-count bounds.
#[derive(Debug, Clone, Copy)]
pub struct TitleRule {
    pub selector: &'static str,
    pub min_len: usize,
    pub max_len: usize,
}

impl TitleRule {
    pub const fn new(selector: &'static str) -> Self {
        Self {
            selector,
            min_len: TITLE_MIN_LEN,
            max_len: TITLE_MAX_LEN,
        }
    }
}

impl FieldRule for TitleRule {
    fn selector(&self) -> &'static str {
        self.selector
    }

    fn source(&self) -> ValueSource {
        ValueSource::Text
    }

    fn accepts(&self, value: &str) -> bool {
        let len = value.chars().count();
        len > self.min_len && len < self.max_len
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ImageRule {
    pub selector: &'static str,
    pub attr: &'static str,
}

impl ImageRule {
    pub const fn src(selector: &'static str) -> Self {
        Self {
            selector,
            attr: "src",
        }
    }
}

impl FieldRule for ImageRule {
    fn selector(&self) -> &'static str {
        self.selector
    }

    fn source(&self) -> ValueSource {
        ValueSource::Attr(self.attr)
    }

    fn accepts(&self, value: &str) -> bool {
        !value.is_empty()
    }
}

/// Everything that parameterizes fetching and extraction for one site.
#[derive(Debug)]
pub struct SiteProfile {
    pub site: Site,
    /// Request headers, sent in order. Real stores reject generic clients.
    pub headers: &'static [(&'static str, &'static str)],
    pub price_rules: &'static [PriceRule],
    pub title_rules: &'static [TitleRule],
    pub image_rules: &'static [ImageRule],
}

impl SiteProfile {
    pub fn name(&self) -> &'static str {
        self.site.as_str()
    }
}

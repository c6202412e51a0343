use std::collections::HashMap;
use std::sync::LazyLock;

use pricelens_core::models::{
    ExtractionResult, IMAGE_NOT_FOUND, PRICE_NOT_FOUND, TITLE_NOT_FOUND,
};
use pricelens_core::site::{FieldRule, Site, SiteProfile, ValueSource};
use pricelens_core::traits::Extractor;
use scraper::{Html, Selector};

/// Every selector of the built-in profiles, parsed once.
///
/// Invalid entries are logged and left out; lookups for them fall back to
/// [`parse_selector`], which skips them again.
static COMPILED: LazyLock<HashMap<&'static str, Selector>> = LazyLock::new(|| {
    Site::ALL
        .iter()
        .map(|site| site.profile())
        .flat_map(|profile| {
            let prices = profile.price_rules.iter().map(FieldRule::selector);
            let titles = profile.title_rules.iter().map(FieldRule::selector);
            let images = profile.image_rules.iter().map(FieldRule::selector);
            prices.chain(titles).chain(images)
        })
        .filter_map(|css| parse_selector(css).map(|selector| (css, selector)))
        .collect()
});

/// Selector-fallback extractor using the `scraper` crate.
///
/// One algorithm for every site and field: walk the field's rules in order,
/// read the first element each selector matches, and keep the first value
/// the rule accepts. Fields with no accepted value get their sentinel.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorExtractor;

impl SelectorExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for SelectorExtractor {
    fn extract(&self, profile: &SiteProfile, html: &str) -> ExtractionResult {
        let document = Html::parse_document(html);
        let site = profile.name();

        let field = |name: &str, value: Option<String>, sentinel: &str| {
            value.unwrap_or_else(|| {
                tracing::debug!(%site, field = name, "No selector matched");
                sentinel.to_string()
            })
        };

        ExtractionResult {
            website: site.to_string(),
            title: field("title", first_match(&document, profile.title_rules), TITLE_NOT_FOUND),
            price: field("price", first_match(&document, profile.price_rules), PRICE_NOT_FOUND),
            image: field("image", first_match(&document, profile.image_rules), IMAGE_NOT_FOUND),
        }
    }
}

/// Value of the first rule, in declared order, that yields an accepted value.
pub fn first_match<R: FieldRule>(document: &Html, rules: &[R]) -> Option<String> {
    rules.iter().find_map(|rule| {
        let value = candidate(document, rule)?;
        rule.accepts(&value).then_some(value)
    })
}

/// Read the value a single rule points at, if its selector matches.
fn candidate<R: FieldRule>(document: &Html, rule: &R) -> Option<String> {
    let parsed;
    let selector = match COMPILED.get(rule.selector()) {
        Some(selector) => selector,
        None => {
            parsed = parse_selector(rule.selector())?;
            &parsed
        }
    };

    let element = document.select(selector).next()?;
    let value = match rule.source() {
        ValueSource::Text => element.text().collect::<String>(),
        ValueSource::Attr(name) => element.value().attr(name)?.to_string(),
    };
    Some(value.trim().to_string())
}

fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!(selector = css, error = %e, "Skipping invalid selector");
            None
        }
    }
}

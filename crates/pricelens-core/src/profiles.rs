//! Built-in profiles for the supported stores.
//!
//! Update these tables when a store changes its markup. Rule order encodes
//! which markup variant is preferred, so append new variants rather than
//! reordering unless the old ones are gone.

use crate::site::{ImageRule, PricePattern, PriceRule, Site, SiteProfile, TitleRule};

const DESKTOP_CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const fn amazon_price(selector: &'static str) -> PriceRule {
    PriceRule {
        selector,
        pattern: PricePattern::DigitGroups,
    }
}

const fn rupee_price(selector: &'static str) -> PriceRule {
    PriceRule {
        selector,
        pattern: PricePattern::RupeePrefixed,
    }
}

pub static AMAZON: SiteProfile = SiteProfile {
    site: Site::Amazon,
    headers: &[
        ("User-Agent", DESKTOP_CHROME_UA),
        (
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
        ("Accept-Language", "en-US,en;q=0.9"),
        ("Cache-Control", "no-cache"),
    ],
    // Whole and fraction parts live in separate nodes, hence no currency symbol.
    price_rules: &[
        amazon_price(".a-price-whole"),
        amazon_price(".a-price-fraction"),
        amazon_price("[data-a-color='price']"),
        amazon_price("span.a-price"),
        amazon_price("[data-price]"),
    ],
    title_rules: &[
        TitleRule::new("#productTitle"),
        TitleRule::new("h1 span"),
        TitleRule::new("[data-feature-name='title']"),
        TitleRule::new("h1"),
    ],
    image_rules: &[
        ImageRule::src("#landingImage"),
        ImageRule::src("#imageBlock_feature_div img"),
        ImageRule::src("img[data-a-dynamic-image]"),
        ImageRule::src("img[alt*='product']"),
    ],
};

pub static FLIPKART: SiteProfile = SiteProfile {
    site: Site::Flipkart,
    headers: &[
        ("User-Agent", DESKTOP_CHROME_UA),
        ("Accept", "text/html,application/xhtml+xml"),
        ("Accept-Language", "en-US,en;q=0.9"),
        ("Referer", "https://www.flipkart.com/"),
        ("Cache-Control", "no-cache"),
    ],
    price_rules: &[
        rupee_price("._30jeq3._16Jk6d"),
        rupee_price("._30jeq3"),
        rupee_price("[data-qa='price']"),
        rupee_price(".UqFsDK"),
        rupee_price("div[class*='price']"),
        rupee_price(".rZx6O"),
    ],
    title_rules: &[
        TitleRule::new(".B_NuCI"),
        TitleRule::new("[data-qa='productTitle']"),
        TitleRule::new("h1"),
        TitleRule::new("span[class*='Title']"),
    ],
    image_rules: &[
        ImageRule::src("._396cs4._2amPTt"),
        ImageRule::src("._396cs4"),
        ImageRule::src("[data-qa='productImage']"),
        ImageRule::src("img[alt*='product']"),
    ],
};

pub static SNAPDEAL: SiteProfile = SiteProfile {
    site: Site::Snapdeal,
    headers: &[(
        "User-Agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    )],
    price_rules: &[
        rupee_price(".payBlkBig"),
        rupee_price("#selling-price-id"),
        rupee_price("[data-qa='productPrice']"),
        rupee_price(".discountedPriceText"),
        rupee_price("div[class*='price']"),
    ],
    title_rules: &[
        TitleRule::new("h1.pdp-e-i-head"),
        TitleRule::new(".pdp-e-i-x-title"),
        TitleRule::new("h1"),
        TitleRule::new("[data-qa='productTitle']"),
    ],
    image_rules: &[
        ImageRule::src("#zoompro"),
        ImageRule::src(".cloudzoom"),
        ImageRule::src("img[alt*='product']"),
        ImageRule::src("img"),
    ],
};

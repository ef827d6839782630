//! Best-effort product importer for marketplace listings.
//!
//! Fetches a recognized marketplace page and runs independent regex
//! extractions over the raw HTML. Every extraction degrades to an empty
//! value on non-match; nothing here is a parser with a grammar. A 403
//! from the site is surfaced as its own error so the UI can steer the
//! user to the clipboard quick-fill fallback.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use ts_rs::TS;
use url::Url;

const RECOGNIZED_HOSTS: &[&str] = &["codecanyon.net", "codelist.cc"];

// Scraped sites gate on user agent; plain reqwest/x.y gets blocked.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported source host: {0}")]
    UnsupportedHost(String),
    #[error("invalid source url: {0}")]
    InvalidUrl(String),
    #[error("the site refused the request (403); paste the page text into quick fill instead")]
    Forbidden,
    #[error("upstream returned http {0}")]
    Upstream(u16),
    #[error("network error: {0}")]
    Transport(String),
}

/// Whatever could be extracted. All fields independent; any may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
pub struct ImportedProduct {
    pub name: String,
    pub description: String,
    pub price: String,
    pub images: Vec<String>,
    pub features: Vec<String>,
}

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<h1[^>]*>\s*([^<]+?)\s*</h1>").unwrap());
static OG_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<meta\s+property="og:title"\s+content="([^"]+)""#).unwrap()
});
static META_DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<meta\s+name="description"\s+content="([^"]+)""#).unwrap()
});
static PRICE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\s?(\d+(?:\.\d{2})?)").unwrap());
static IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<img[^>]+src="(https?://[^"]+\.(?:png|jpe?g|webp))""#).unwrap()
});
static FEATURE_LI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<li[^>]*>([^<]{3,120})</li>").unwrap());
static BULLET_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*[-*•]\s+(.{3,120})$").unwrap());

#[derive(Debug, Clone)]
pub struct ImporterService {
    http: Client,
}

impl ImporterService {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

    pub fn new() -> Result<Self, ImportError> {
        let http = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(|e| ImportError::Transport(e.to_string()))?;
        Ok(Self { http })
    }

    /// Fetch `source_url` and extract whatever the heuristics find.
    pub async fn import(&self, source_url: &str) -> Result<ImportedProduct, ImportError> {
        let url =
            Url::parse(source_url).map_err(|_| ImportError::InvalidUrl(source_url.to_string()))?;
        let host = url.host_str().unwrap_or_default();
        if !is_recognized_host(host) {
            return Err(ImportError::UnsupportedHost(host.to_string()));
        }

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ImportError::Transport(e.to_string()))?;

        match res.status() {
            s if s.is_success() => {
                let html = res
                    .text()
                    .await
                    .map_err(|e| ImportError::Transport(e.to_string()))?;
                Ok(extract_from_html(&html))
            }
            StatusCode::FORBIDDEN => {
                warn!(source_url, "marketplace blocked the import request");
                Err(ImportError::Forbidden)
            }
            s => Err(ImportError::Upstream(s.as_u16())),
        }
    }

    /// Apply the same heuristics to text the user pasted from the listing.
    pub fn quick_fill(&self, text: &str) -> ImportedProduct {
        quick_fill(text)
    }
}

fn is_recognized_host(host: &str) -> bool {
    RECOGNIZED_HOSTS
        .iter()
        .any(|known| host == *known || host.ends_with(&format!(".{known}")))
}

fn extract_from_html(html: &str) -> ImportedProduct {
    let name = TITLE_RE
        .captures(html)
        .or_else(|| OG_TITLE_RE.captures(html))
        .map(|c| decode_entities(c[1].trim()))
        .unwrap_or_default();

    let description = META_DESCRIPTION_RE
        .captures(html)
        .map(|c| decode_entities(c[1].trim()))
        .unwrap_or_default();

    let price = PRICE_RE
        .captures(html)
        .map(|c| format!("${}", &c[1]))
        .unwrap_or_default();

    let mut images: Vec<String> = IMAGE_RE
        .captures_iter(html)
        .map(|c| c[1].to_string())
        .collect();
    images.dedup();
    images.truncate(10);

    let features: Vec<String> = FEATURE_LI_RE
        .captures_iter(html)
        .map(|c| decode_entities(c[1].trim()))
        .filter(|f| !f.is_empty())
        .take(20)
        .collect();

    ImportedProduct {
        name,
        description,
        price,
        images,
        features,
    }
}

fn quick_fill(text: &str) -> ImportedProduct {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let name_index = lines.iter().position(|l| !l.is_empty());
    let name = name_index
        .map(|i| lines[i].to_string())
        .unwrap_or_default();

    let price = PRICE_RE
        .captures(text)
        .map(|c| format!("${}", &c[1]))
        .unwrap_or_default();

    let features: Vec<String> = BULLET_LINE_RE
        .captures_iter(text)
        .map(|c| c[1].trim().to_string())
        .take(20)
        .collect();

    // First non-bullet paragraph after the title line, if any.
    let description = name_index
        .map(|i| &lines[i + 1..])
        .unwrap_or_default()
        .iter()
        .find(|l| l.len() > 40 && !l.starts_with(['-', '*', '•']))
        .copied()
        .unwrap_or_default()
        .to_string();

    ImportedProduct {
        name,
        description,
        price,
        images: Vec::new(),
        features,
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><head>
        <meta name="description" content="A sleek SaaS starter kit &amp; admin panel">
        <meta property="og:title" content="Fallback Title">
        </head><body>
        <h1 class="item-title"> SaaS Starter Kit </h1>
        <span class="price">$49.00</span>
        <img src="https://cdn.example.com/shot1.png" alt="">
        <img src="https://cdn.example.com/shot1.png" alt="">
        <img src="https://cdn.example.com/shot2.jpg" alt="">
        <ul class="features">
          <li>Multi-tenant auth</li>
          <li>Stripe billing</li>
        </ul>
        </body></html>"#;

    #[test]
    fn extracts_all_fields_from_listing_html() {
        let product = extract_from_html(LISTING);
        assert_eq!(product.name, "SaaS Starter Kit");
        assert_eq!(product.description, "A sleek SaaS starter kit & admin panel");
        assert_eq!(product.price, "$49.00");
        assert_eq!(
            product.images,
            vec![
                "https://cdn.example.com/shot1.png",
                "https://cdn.example.com/shot2.jpg"
            ]
        );
        assert_eq!(product.features, vec!["Multi-tenant auth", "Stripe billing"]);
    }

    #[test]
    fn each_extraction_degrades_independently() {
        let product = extract_from_html("<html><body>nothing useful</body></html>");
        assert_eq!(product, ImportedProduct::default());

        // Price alone still comes through.
        let product = extract_from_html("<p>now only $12</p>");
        assert_eq!(product.price, "$12");
        assert!(product.name.is_empty());
    }

    #[test]
    fn og_title_is_the_fallback() {
        let html = r#"<meta property="og:title" content="From OG">"#;
        assert_eq!(extract_from_html(html).name, "From OG");
    }

    #[test]
    fn host_recognition() {
        assert!(is_recognized_host("codecanyon.net"));
        assert!(is_recognized_host("www.codelist.cc"));
        assert!(!is_recognized_host("example.com"));
        assert!(!is_recognized_host("notcodecanyon.net"));
    }

    #[test]
    fn quick_fill_heuristics() {
        let text = "Invoice Ninja Clone\n\nA complete invoicing platform for freelancers and agencies.\n- PDF export\n- Recurring billing\nPrice: $29";
        let product = quick_fill(text);
        assert_eq!(product.name, "Invoice Ninja Clone");
        assert!(product.description.starts_with("A complete invoicing"));
        assert_eq!(product.price, "$29");
        assert_eq!(product.features, vec!["PDF export", "Recurring billing"]);
    }

    #[test]
    fn quick_fill_of_empty_text_is_empty() {
        assert_eq!(quick_fill(""), ImportedProduct::default());
    }

    #[test]
    fn quick_fill_never_reuses_the_title_as_description() {
        // Leading blank lines push the title past index 0; a long title
        // must still not double as the description.
        let text = "\n\nAn Unusually Long Product Title That Runs Past Forty Characters\nShort tag\n- One feature";
        let product = quick_fill(text);
        assert_eq!(
            product.name,
            "An Unusually Long Product Title That Runs Past Forty Characters"
        );
        assert!(product.description.is_empty());
        assert_eq!(product.features, vec!["One feature"]);
    }
}

// src/core/scanner/html_extractor.rs

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

use crate::core::models::{PageFeatures, HEADING_LEVELS, NO_META_DESCRIPTION, NO_TITLE};

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("valid title selector"));
static META_DESCRIPTION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[name='description']").expect("valid meta selector"));
static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img").expect("valid img selector"));
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("valid anchor selector"));
static HEADING_SELECTORS: Lazy<Vec<(&'static str, Selector)>> = Lazy::new(|| {
    HEADING_LEVELS
        .iter()
        .map(|level| (*level, Selector::parse(level).expect("valid heading selector")))
        .collect()
});

/// Extracts the SEO and structural signals of a fetched page.
///
/// The body may be anything: invalid UTF-8 is decoded lossily and the HTML parser is
/// error-tolerant, so malformed input only ever yields sentinel or zero values.
/// A missing body (failed fetch) returns `PageFeatures::default()`.
///
/// # Arguments
/// * `body` - The raw response body, if the fetch succeeded.
/// * `host` - The audited host, used to split links into internal and external.
pub fn extract_features(body: Option<&[u8]>, host: &str) -> PageFeatures {
    let Some(bytes) = body else {
        debug!("No body to extract from, using default page features.");
        return PageFeatures::default();
    };

    let text = String::from_utf8_lossy(bytes);
    let document = Html::parse_document(&text);

    let (internal_links, external_links) = count_links(&document, host);
    let (total_images, images_without_alt) = count_images(&document);

    let features = PageFeatures {
        title: extract_title(&document),
        meta_description: extract_meta_description(&document),
        heading_counts: HEADING_SELECTORS
            .iter()
            .map(|(level, selector)| (level.to_string(), document.select(selector).count()))
            .collect(),
        total_images,
        images_without_alt,
        internal_links,
        external_links,
    };

    debug!(
        title_len = features.title_length(),
        images = features.total_images,
        internal = features.internal_links,
        external = features.external_links,
        "Extracted page features."
    );
    features
}

fn extract_title(document: &Html) -> String {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

// `content` is kept verbatim, surrounding whitespace included, since it counts toward the
// classified length. Only a missing tag or attribute is a sentinel.
fn extract_meta_description(document: &Html) -> String {
    document
        .select(&META_DESCRIPTION_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
        .unwrap_or_else(|| NO_META_DESCRIPTION.to_string())
}

fn count_images(document: &Html) -> (usize, usize) {
    let mut total = 0;
    let mut without_alt = 0;
    for img in document.select(&IMG_SELECTOR) {
        total += 1;
        if img.value().attr("alt").is_none_or(str::is_empty) {
            without_alt += 1;
        }
    }
    (total, without_alt)
}

// Substring containment, not host equality: "example.com" also matches
// "https://notexample.com". Kept for compatibility with existing reports.
fn count_links(document: &Html, host: &str) -> (usize, usize) {
    let mut internal = 0;
    let mut external = 0;
    for href in document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| !href.is_empty())
    {
        if href.contains(host) {
            internal += 1;
        } else {
            external += 1;
        }
    }
    (internal, external)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> PageFeatures {
        extract_features(Some(html.as_bytes()), "example.com")
    }

    #[test]
    fn reads_title_and_meta_description() {
        let features = extract(
            r#"<html><head><title>  Example Domain  </title>
            <meta name="description" content="An example page."></head></html>"#,
        );
        assert_eq!(features.title, "Example Domain");
        assert_eq!(features.meta_description, "An example page.");
    }

    #[test]
    fn missing_elements_fall_back_to_sentinels() {
        let features = extract("<html><body><p>no head at all</p></body></html>");
        assert_eq!(features.title, NO_TITLE);
        assert_eq!(features.meta_description, NO_META_DESCRIPTION);
        assert_eq!(features.title_length(), 0);
    }

    #[test]
    fn meta_content_is_not_trimmed() {
        let content = format!("  {}  ", "d".repeat(117));
        let features = extract(&format!(r#"<meta name="description" content="{content}">"#));
        assert_eq!(features.meta_description, content);
        assert_eq!(features.meta_description_length(), 121);
    }

    #[test]
    fn meta_without_content_is_a_sentinel() {
        let features = extract(r#"<meta name="description">"#);
        assert_eq!(features.meta_description, NO_META_DESCRIPTION);
    }

    #[test]
    fn counts_headings_regardless_of_nesting() {
        let features = extract(
            "<h1>a</h1><div><h2>b</h2><section><h2>c</h2><h6>d</h6></section></div><h1>e</h1>",
        );
        assert_eq!(features.heading_counts["h1"], 2);
        assert_eq!(features.heading_counts["h2"], 2);
        assert_eq!(features.heading_counts["h3"], 0);
        assert_eq!(features.heading_counts["h6"], 1);
        assert_eq!(features.heading_counts.len(), 6);
    }

    #[test]
    fn counts_images_missing_alt_text() {
        let features = extract(r#"<img src="a.png" alt="A"><img src="b.png" alt=""><img src="c.png">"#);
        assert_eq!(features.total_images, 3);
        assert_eq!(features.images_without_alt, 2);
    }

    #[test]
    fn classifies_links_by_host() {
        let features = extract(
            r#"<a href="https://example.com/a">a</a>
               <a href="https://other.com/b">b</a>
               <a>no href</a>
               <a href="">empty</a>"#,
        );
        assert_eq!(features.internal_links, 1);
        assert_eq!(features.external_links, 1);
    }

    #[test]
    fn link_matching_is_substring_based() {
        let features = extract(r#"<a href="https://notexample.com.evil.tld/">x</a><a href="/relative">y</a>"#);
        assert_eq!(features.internal_links, 1);
        assert_eq!(features.external_links, 1);
    }

    #[test]
    fn tolerates_garbage_input() {
        let features = extract_features(Some(&[0xff, 0xfe, b'<', b't', b'i', 0x00, b'>']), "example.com");
        assert_eq!(features.title, NO_TITLE);
        assert_eq!(features.total_images, 0);

        let features = extract("<title>Unclosed <b>title<img src=x");
        assert!(features.title_length() > 0);
    }

    #[test]
    fn absent_body_gives_defaults() {
        assert_eq!(extract_features(None, "example.com"), PageFeatures::default());
    }
}

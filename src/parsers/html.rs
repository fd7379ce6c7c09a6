use crate::parsers::text::{self, TextNormalizer};
use crate::results::PageFeatures;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Elements whose text never reaches the reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Phrasing elements that continue the surrounding word instead of breaking it
const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "data", "dfn", "em", "font", "i", "kbd",
    "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u", "var",
];

/// Elements whose content is raw text and never holds tags
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "textarea", "title", "noscript", "xmp", "iframe", "noembed", "noframes",
];

/// A comment, or a start/end tag with its attributes (quoted values may hold `>`)
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<!--.*?(?:-->|\z)|<(/?)([A-Za-z][^\s/>]*)(?:=\s*"[^"]*"|=\s*'[^']*'|[^>])*>"#)
        .unwrap()
});

/// A fetched document, parsed once and queried by every structural check
pub struct ParsedPage {
    markup: String,
    document: Html,
}

/// Parses HTML markup; never fails, malformed input just yields fewer elements
pub fn parse(markup: &str) -> ParsedPage {
    ParsedPage {
        markup: markup.to_string(),
        document: Html::parse_document(markup),
    }
}

/// Parses markup and extracts its feature set in one step
pub fn extract(markup: &str, normalizer: &TextNormalizer) -> PageFeatures {
    parse(markup).features(normalizer)
}

impl ParsedPage {
    pub fn document(&self) -> &Html {
        &self.document
    }

    /// Text of the first `<title>`, or an empty string
    pub fn title(&self) -> String {
        let selector = Selector::parse("title").unwrap();
        self.document
            .select(&selector)
            .next()
            .map(|title| text::join_fragments(title.text()))
            .unwrap_or_default()
    }

    /// `content` of `<meta name="description">`, or an empty string
    pub fn meta_description(&self) -> String {
        let selector = Selector::parse("meta[name]").unwrap();
        self.document
            .select(&selector)
            .find(|meta| {
                meta.value()
                    .attr("name")
                    .is_some_and(|name| name.trim().eq_ignore_ascii_case("description"))
            })
            .and_then(|meta| meta.value().attr("content"))
            .map(|content| content.trim().to_string())
            .unwrap_or_default()
    }

    /// Text of every `<h1>` in document order
    pub fn headings(&self) -> Vec<String> {
        let selector = Selector::parse("h1").unwrap();
        self.document
            .select(&selector)
            .map(rendered_text)
            .collect()
    }

    /// All visible body text, whitespace-collapsed
    pub fn visible_text(&self) -> String {
        let selector = Selector::parse("body").unwrap();
        self.document
            .select(&selector)
            .next()
            .map(rendered_text)
            .unwrap_or_default()
    }

    /// Number of `<html>` start tags in the markup
    ///
    /// Counted on the source rather than the tree: the HTML5 parser always
    /// synthesizes exactly one root element. Comments, attribute values and
    /// the content of raw-text elements such as `<script>` are not tags.
    pub fn html_element_count(&self) -> usize {
        let markup = self.markup.as_str();
        let lowercase = markup.to_ascii_lowercase();
        let mut count = 0;
        let mut position = 0;

        while let Some(tag) = TAG.captures_at(markup, position) {
            position = tag.get(0).map_or(markup.len(), |m| m.end());

            let Some(name) = tag.get(2) else {
                continue; // comment
            };
            if tag.get(1).is_some_and(|slash| !slash.is_empty()) {
                continue;
            }

            let name = name.as_str().to_ascii_lowercase();
            if name == "html" {
                count += 1;
            } else if name == "plaintext" {
                break;
            } else if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                let closing = format!("</{}", name);
                position = lowercase[position..]
                    .find(&closing)
                    .map_or(markup.len(), |offset| position + offset);
            }
        }

        count
    }

    /// Builds the page's feature set, normalizing the visible text
    pub fn features(&self, normalizer: &TextNormalizer) -> PageFeatures {
        let features = PageFeatures::new(
            self.title(),
            self.meta_description(),
            self.headings(),
            self.visible_text(),
            normalizer,
        );

        ::log::debug!(
            "Extracted title {:?}, {} headings, {} words of text",
            features.title,
            features.headings.len(),
            features.raw_text.split_whitespace().count()
        );

        features
    }
}

/// Text of `element` as a reader sees it, whitespace-collapsed
///
/// Hidden elements are skipped. Block boundaries separate words, inline
/// elements do not: `Pric<span>ing</span>` reads as `Pricing`.
fn rendered_text(element: ElementRef) -> String {
    let mut out = String::new();
    push_rendered_text(element, &mut out);
    text::collapse_whitespace(&out)
}

fn push_rendered_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let name = child.value().name();
            if HIDDEN_ELEMENTS.contains(&name) {
                continue;
            }
            let inline = INLINE_ELEMENTS.contains(&name);
            if !inline {
                out.push(' ');
            }
            push_rendered_text(child, out);
            if !inline {
                out.push(' ');
            }
        }
    }
}

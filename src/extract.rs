//! Markup tree queries and per-item field extraction.
//!
//! The catalog page is one `<ul>` of `li.item` nodes. Lookups walk the
//! tree through typed (tag, class) path steps and return `Option`; a
//! missing node is handled at the call site, it never surfaces as a
//! generic traversal error. No tree node is ever mutated.

use scraper::{ElementRef, Html};

use crate::error::{ScrapeError, ScrapeResult};
use crate::models::RawItem;

/// Class marking one catalog listing item.
const ITEM_CLASS: &str = "item";
/// Class carried by items in the bundle category.
const BUNDLE_CATEGORY_CLASS: &str = "category_ids-12";
/// This item is miscategorised upstream on uaudio.com; it is always a
/// bundle no matter what its class attributes say.
const BUNDLE_NAME_OVERRIDE: &str = "UAD Custom 2 Bundle";

/// One step of a descendant path: a tag name plus an optional class
/// marker the node must carry.
#[derive(Debug, Clone, Copy)]
pub struct PathStep<'a> {
    pub tag: &'a str,
    pub class_marker: Option<&'a str>,
}

impl<'a> PathStep<'a> {
    pub fn new(tag: &'a str, class_marker: Option<&'a str>) -> Self {
        Self { tag, class_marker }
    }
}

fn step_matches(el: &ElementRef<'_>, step: &PathStep<'_>) -> bool {
    el.value().name() == step.tag
        && step
            .class_marker
            .map_or(true, |marker| el.value().classes().any(|c| c == marker))
}

/// First descendant of `node` matching `step`, in document order.
fn first_descendant<'a>(node: ElementRef<'a>, step: &PathStep<'_>) -> Option<ElementRef<'a>> {
    // descendants() yields the node itself first; skip it.
    node.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| step_matches(el, step))
}

/// Walks `path` step by step, narrowing to the first matching descendant
/// each time, and returns the final node's trimmed text. `None` as soon
/// as any step has no match.
pub fn find_first_text(node: ElementRef<'_>, path: &[PathStep<'_>]) -> Option<String> {
    let mut current = node;
    for step in path {
        current = first_descendant(current, step)?;
    }
    Some(text_of(current))
}

/// All descendants of `node` matching (tag, class marker), in document
/// order.
pub fn find_all<'a>(
    node: ElementRef<'a>,
    tag: &str,
    class_marker: Option<&str>,
) -> Vec<ElementRef<'a>> {
    let step = PathStep::new(tag, class_marker);
    node.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|el| step_matches(el, &step))
        .collect()
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// All listing items of a parsed catalog page, in document order.
pub fn catalog_items(doc: &Html) -> Vec<ElementRef<'_>> {
    find_all(doc.root_element(), "li", Some(ITEM_CLASS))
}

/// Price text under `wrapper`. The catalog nests price spans; when
/// several `span.price` candidates exist, the last one carries the
/// displayed value.
fn price_text(wrapper: ElementRef<'_>) -> Option<String> {
    find_all(wrapper, "span", Some("price"))
        .last()
        .map(|el| text_of(*el))
}

fn missing(item: &str, node: &'static str) -> ScrapeError {
    ScrapeError::MissingNode {
        item: item.to_string(),
        node,
    }
}

/// Label used in errors raised before the item name is known.
fn item_label(item: ElementRef<'_>) -> String {
    item.value()
        .attr("data-name")
        .unwrap_or("<unnamed item>")
        .to_string()
}

/// Field extraction for one product family's listing markup.
pub trait ItemExtractor {
    fn extract(&self, item: ElementRef<'_>) -> ScrapeResult<RawItem>;
}

/// Extractor for the uaudio.com plugin catalog.
pub struct UadItemExtractor;

impl ItemExtractor for UadItemExtractor {
    fn extract(&self, item: ElementRef<'_>) -> ScrapeResult<RawItem> {
        let heading = first_descendant(item, &PathStep::new("h2", Some("product-name")))
            .ok_or_else(|| missing(&item_label(item), "h2.product-name"))?;
        let link = first_descendant(heading, &PathStep::new("a", None))
            .ok_or_else(|| missing(&item_label(item), "h2.product-name a"))?;
        let name = text_of(link);
        if name.is_empty() {
            return Err(missing(&item_label(item), "product name text"));
        }
        let url = link.value().attr("href").map(str::to_string);

        let bundle = name == BUNDLE_NAME_OVERRIDE
            || item
                .value()
                .classes()
                .any(|c| c == BUNDLE_CATEGORY_CLASS);

        // Probe the sale marker once; the node doubles as the wrapper of
        // the sale price below.
        let special = first_descendant(item, &PathStep::new("p", Some("special-price")));
        let on_sale = special.is_some();

        let (regular_price_text, sale_price_text) = match special {
            Some(special_node) => {
                let old = first_descendant(item, &PathStep::new("p", Some("old-price")))
                    .ok_or_else(|| missing(&name, "p.old-price"))?;
                let regular =
                    price_text(old).ok_or_else(|| missing(&name, "p.old-price span.price"))?;
                let sale = price_text(special_node)
                    .ok_or_else(|| missing(&name, "p.special-price span.price"))?;
                (regular, Some(sale))
            }
            None => {
                let wrapper =
                    first_descendant(item, &PathStep::new("span", Some("regular-price")))
                        .ok_or_else(|| missing(&name, "span.regular-price"))?;
                let regular = price_text(wrapper)
                    .ok_or_else(|| missing(&name, "span.regular-price span.price"))?;
                (regular, None)
            }
        };

        Ok(RawItem {
            name,
            url,
            bundle,
            on_sale,
            regular_price_text,
            sale_price_text,
        })
    }
}

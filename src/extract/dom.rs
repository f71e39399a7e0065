//! Small lookups over scraper's DOM shared by the extractors

use crate::extract::ExtractError;
use scraper::{ElementRef, Selector};

/// Builds a compound class selector: `class_selector("div", "a b")` is `div.a.b`
pub(crate) fn class_selector(tag: &str, classes: &str) -> String {
    let mut selector = tag.to_string();
    for class in classes.split_whitespace() {
        selector.push('.');
        selector.push_str(class);
    }
    selector
}

pub(crate) fn parse_selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|_| ExtractError::InvalidSelector(css.to_string()))
}

/// First descendant of `scope` matching `css`
pub(crate) fn find<'a>(scope: ElementRef<'a>, css: &str) -> Result<ElementRef<'a>, ExtractError> {
    let selector = parse_selector(css)?;
    scope
        .select(&selector)
        .next()
        .ok_or_else(|| ExtractError::Missing(css.to_string()))
}

/// Every descendant of `scope` matching `css`, in document order
pub(crate) fn find_all<'a>(
    scope: ElementRef<'a>,
    css: &str,
) -> Result<Vec<ElementRef<'a>>, ExtractError> {
    let selector = parse_selector(css)?;
    Ok(scope.select(&selector).collect())
}

/// Concatenated text of an element and its descendants, untouched
pub(crate) fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Concatenated text, trimmed
pub(crate) fn text(element: ElementRef<'_>) -> String {
    raw_text(element).trim().to_string()
}

/// Text with line breaks removed, trimmed
pub(crate) fn single_line(element: ElementRef<'_>) -> String {
    raw_text(element).replace('\n', "").trim().to_string()
}

/// Turns line breaks into `", "` and collapses every whitespace run to one space
pub(crate) fn flatten_lines(value: &str) -> String {
    value
        .trim()
        .replace('\n', ", ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn attr<'a>(element: ElementRef<'a>, name: &str) -> Result<&'a str, ExtractError> {
    element
        .value()
        .attr(name)
        .ok_or_else(|| ExtractError::MissingAttribute(name.to_string()))
}

/// Rejects blank values, naming `what` in the error
pub(crate) fn non_empty(value: String, what: &str) -> Result<String, ExtractError> {
    if value.trim().is_empty() {
        Err(ExtractError::Empty(what.to_string()))
    } else {
        Ok(value)
    }
}

/// First element following `element` among its siblings
pub(crate) fn next_element<'a>(element: ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// True when a row embeds a script, which is how sponsored rows render
pub fn is_advertisement(row: ElementRef<'_>) -> bool {
    row.descendants()
        .filter_map(ElementRef::wrap)
        .any(|e| e.value().name() == "script")
}

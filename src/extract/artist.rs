use crate::config::ArtistMarkers;
use crate::extract::dom::{class_selector, find, find_all, non_empty, text};
use crate::extract::{ExtractError, Record};
use scraper::{ElementRef, Html, Node};

/// Extracts an artist page
///
/// Fields, in order: `Name`, one field per info header (minus `Share`), then
/// `Followers`.
pub fn extract_artist(document: &Html, markers: &ArtistMarkers) -> Record {
    let root = document.root_element();
    let mut record = Record::new();

    record.field("Name", || {
        let selector = class_selector("h1", &markers.name);
        non_empty(text(find(root, &selector)?), &selector)
    });

    match info_pairs(root, markers) {
        Ok(pairs) => {
            for (key, value) in pairs {
                record.insert(key, value);
            }
        }
        Err(e) => tracing::warn!("Error when fetching artist info: {}", e),
    }
    record.remove("Share");

    record.field("Followers", || {
        let selector = class_selector("span", &markers.followers);
        let count = text(find(root, &selector)?)
            .replace(" followers", "")
            .replace(',', "");
        non_empty(count.trim().to_string(), &selector)
    });
    record
}

/// Pairs each info header with the element that follows it
///
/// Headers followed by bare text rather than an element carry no value block
/// and are skipped.
fn info_pairs(
    root: ElementRef<'_>,
    markers: &ArtistMarkers,
) -> Result<Vec<(String, String)>, ExtractError> {
    let info = find(root, &class_selector("div", &markers.info))?;
    let mut pairs = Vec::new();

    for header in find_all(info, &class_selector("div", &markers.info_header))? {
        let key = text(header);
        if key.is_empty() {
            continue;
        }
        let following = header.next_siblings().find(|node| match node.value() {
            Node::Text(t) => !t.trim().is_empty(),
            _ => true,
        });
        if let Some(value) = following.and_then(ElementRef::wrap) {
            pairs.push((key, text(value)));
        }
    }
    Ok(pairs)
}

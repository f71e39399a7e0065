use crate::config::DiscographyMarkers;
use crate::extract::dom::{attr, class_selector, find, find_all, non_empty, text};
use crate::extract::{ExtractError, FieldValue, Record};
use crate::url::absolutize;
use scraper::{ElementRef, Html};
use url::Url;

/// A release as listed on an artist page: display text and absolute URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseLine {
    pub name: String,
    pub url: String,
}

/// Extracts every release of an artist page's discography
///
/// Each entry carries `Artist`, `Category`, `Name`, `URL`, `Date`, `Year`,
/// `Average Rating`, `Ratings` and `Reviews`, grouped by section in page order.
/// Fails only when the discography block itself is missing.
pub fn extract_discography(
    document: &Html,
    markers: &DiscographyMarkers,
    base: &Url,
) -> Result<Vec<Record>, ExtractError> {
    let root = document.root_element();
    let artist = match find(root, &class_selector("h1", &markers.artist_name)) {
        Ok(heading) => FieldValue::Text(text(heading)),
        Err(e) => {
            tracing::warn!("Error when fetching Artist: {}", e);
            FieldValue::not_available()
        }
    };
    tracing::debug!("Extracting discography for {}", artist.to_cell());

    let disco = find(root, &format!("div#{}", markers.container))?;
    let mut entries = Vec::new();

    for section in find_all(disco, &class_selector("div", &markers.section))? {
        let category = find(section, "h3")
            .map(|h| FieldValue::Text(text(h)))
            .unwrap_or_else(|_| FieldValue::not_available());

        let Some(list) = section_list(section, &markers.section_prefix) else {
            tracing::warn!("No release list after section {}", category.to_cell());
            continue;
        };

        for release in find_all(list, &class_selector("div", &markers.release))? {
            let mut entry = Record::new();
            entry.insert("Artist", artist.clone());
            entry.insert("Category", category.clone());
            extract_release(&mut entry, release, markers, base);
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Display text and URL of every release line on an artist page
pub fn extract_release_lines(
    document: &Html,
    markers: &DiscographyMarkers,
    base: &Url,
) -> Vec<ReleaseLine> {
    let Ok(lines) = find_all(
        document.root_element(),
        &class_selector("div", &markers.mainline),
    ) else {
        return Vec::new();
    };

    lines
        .into_iter()
        .filter_map(|line| {
            let href = find(line, "a").ok()?.value().attr("href")?;
            Some(ReleaseLine {
                name: text(line),
                url: absolutize(base, href)?,
            })
        })
        .collect()
}

/// First following sibling whose id starts with `prefix`
fn section_list<'a>(section: ElementRef<'a>, prefix: &str) -> Option<ElementRef<'a>> {
    section
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| {
            sibling.value().name() == "div"
                && sibling
                    .value()
                    .id()
                    .is_some_and(|id| id.starts_with(prefix))
        })
}

fn extract_release(
    entry: &mut Record,
    release: ElementRef<'_>,
    markers: &DiscographyMarkers,
    base: &Url,
) {
    let link = class_selector("a", &markers.release_link);
    let date = format!("span[class*=\"{}\"]", markers.year_prefix);

    entry.field("Name", || non_empty(text(find(release, &link)?), &link));
    entry.field("URL", || {
        let href = attr(find(release, &link)?, "href")?;
        absolutize(base, href).ok_or_else(|| ExtractError::Malformed(format!("bad link '{}'", href)))
    });
    entry.field("Date", || {
        Ok(attr(find(release, &date)?, "title")?.trim().to_string())
    });
    entry.field("Year", || non_empty(text(find(release, &date)?), &date));
    entry.field("Average Rating", || {
        Ok(text(find(release, &class_selector("div", &markers.average_rating))?))
    });
    entry.field("Ratings", || counter(release, &markers.ratings));
    entry.field("Reviews", || counter(release, &markers.reviews));

    tracing::debug!(
        "Got information for disc {} - {}",
        entry.get("Name").map(FieldValue::to_cell).unwrap_or_default(),
        entry.get("Year").map(FieldValue::to_cell).unwrap_or_default()
    );
}

fn counter(release: ElementRef<'_>, class: &str) -> Result<String, ExtractError> {
    Ok(text(find(release, &class_selector("div", class))?).replace(',', ""))
}

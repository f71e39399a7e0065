use crate::config::ChartMarkers;
use crate::extract::dom::{attr, class_selector, find, find_all, non_empty, single_line, text};
use crate::extract::{ExtractError, Record};
use scraper::{ElementRef, Html};

/// Rows of a chart page, or None when the results container is absent
///
/// A missing container is how the site renders a page past the end of a chart.
/// Advertisement rows are included; callers filter them with
/// [`is_advertisement`](crate::extract::is_advertisement).
pub fn chart_rows<'a>(document: &'a Html, markers: &ChartMarkers) -> Option<Vec<ElementRef<'a>>> {
    let container = find(
        document.root_element(),
        &class_selector("div", &markers.container),
    )
    .ok()?;
    find_all(container, &class_selector("div", &markers.row)).ok()
}

/// True when the page offers a link to the following chart page
pub fn has_next_page(document: &Html, markers: &ChartMarkers) -> bool {
    find(
        document.root_element(),
        &class_selector("a", &markers.next_page),
    )
    .is_ok()
}

/// Extracts one chart row
///
/// Fields, in order: `Rank`, `Artist`, `Album`, `Date`, `Genres`,
/// `Secondary Genres`, `RYM Rating`, `Ratings`, `Reviews`.
pub fn extract_chart_row(row: ElementRef<'_>, markers: &ChartMarkers) -> Record {
    let mut record = Record::new();

    record.field("Rank", || {
        let id = attr(row, "id")?;
        let rank = id.strip_prefix(markers.rank_prefix.as_str()).unwrap_or(id);
        non_empty(rank.to_string(), "rank")
    });
    record.field("Artist", || credited_artist(row, markers));
    record.field("Album", || {
        let selector = class_selector("div", &markers.title);
        non_empty(single_line(find(row, &selector)?), &selector)
    });
    record.field("Date", || {
        let date = find(row, &class_selector("div", &markers.date))?;
        let date = single_line(find(date, "span")?)
            .replace(['(', ')'], "")
            .trim()
            .to_string();
        non_empty(date, "date")
    });
    record.field("Genres", || genres(row, &markers.primary_genres, markers));
    record.field("Secondary Genres", || {
        genres(row, &markers.secondary_genres, markers)
    });
    record.field("RYM Rating", || {
        let selector = class_selector("span", &markers.rating);
        non_empty(text(find(row, &selector)?), &selector)
    });
    record.field("Ratings", || stat(row, markers, 0));
    record.field("Reviews", || stat(row, markers, 1));
    record
}

/// Credited artist, with the original script appended in brackets when the
/// site shows a romanized name
fn credited_artist(row: ElementRef<'_>, markers: &ChartMarkers) -> Result<String, ExtractError> {
    let credits = find(row, &class_selector("div", &markers.artist))?;
    let romanized = find(credits, &class_selector("span", &markers.romanized_name));
    let original = find(credits, &class_selector("span", &markers.original_name));

    let artist = match (romanized, original) {
        (Ok(romanized), Ok(original)) => {
            format!("{} [{}]", single_line(romanized), single_line(original))
        }
        (Ok(romanized), Err(_)) => single_line(romanized),
        (Err(_), Ok(original)) => single_line(original),
        (Err(_), Err(_)) => single_line(credits),
    };
    non_empty(artist, "artist")
}

fn genres(
    row: ElementRef<'_>,
    class: &str,
    markers: &ChartMarkers,
) -> Result<String, ExtractError> {
    let block = find(row, &class_selector("div", class))?;
    let names: Vec<String> = find_all(block, &class_selector("a", &markers.genre_link))?
        .into_iter()
        .map(text)
        .filter(|name| !name.is_empty())
        .collect();
    non_empty(names.join(", "), class)
}

/// Ratings (index 0) or reviews (index 1) counter, digits only
fn stat(row: ElementRef<'_>, markers: &ChartMarkers, index: usize) -> Result<String, ExtractError> {
    let selector = class_selector("span", &markers.stat);
    let counters = find_all(row, &selector)?;
    let counter = counters
        .get(index)
        .ok_or_else(|| ExtractError::Missing(format!("{}[{}]", selector, index)))?;
    let value: String = text(*counter)
        .chars()
        .filter(|c| !matches!(c, '\n' | ' ' | ','))
        .collect();
    non_empty(value, &selector)
}

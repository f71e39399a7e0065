use crate::config::AlbumMarkers;
use crate::extract::dom::{
    attr, class_selector, find, find_all, flatten_lines, raw_text, text,
};
use crate::extract::{ExtractError, Record};
use scraper::{ElementRef, Html};

/// Extracts an album page
///
/// Fields, in order: `Name`, `Artist`, one field per row of the info table
/// (minus `Share`), `Track listing` and `Colorscheme`.
pub fn extract_album(document: &Html, markers: &AlbumMarkers) -> Record {
    let root = document.root_element();
    let title = class_selector("div", &markers.title);
    let mut record = Record::new();

    record.field("Name", || {
        let heading = raw_text(find(root, &title)?);
        heading
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ExtractError::Empty(title.clone()))
    });
    record.field("Artist", || {
        let heading = raw_text(find(root, &title)?);
        credited_artist(&heading)
            .ok_or_else(|| ExtractError::Malformed("album title has no 'by' line".to_string()))
    });

    match info_table(root, &markers.info_table) {
        Ok(rows) => {
            for (key, value) in rows {
                record.insert(key, value.trim());
            }
        }
        Err(e) => tracing::warn!("Error when fetching album info table: {}", e),
    }
    record.remove("Share");

    record.field("Track listing", || track_listing(root, markers));
    record.field("Colorscheme", || colorscheme(root, markers));
    record
}

/// Extracts the details of a release page, with values flattened to one line
///
/// Unlike [`extract_album`] this fails as a whole when the info table is
/// missing, since the table is all it reads. `Rank Overall` and `Rank Year`
/// are parsed from the `Ranked` row; `year` selects the yearly clause.
pub fn extract_release_details(
    document: &Html,
    markers: &AlbumMarkers,
    year: Option<&str>,
) -> Result<Record, ExtractError> {
    let mut record = Record::new();
    for (key, value) in info_table(document.root_element(), &markers.info_table)? {
        record.insert(key, flatten_lines(&value));
    }
    record.remove("Share");

    let ranked = record.text("Ranked").map(str::to_string);
    if let Some(ranked) = ranked {
        if let Some(rank) = parse_rank(&ranked, "overall") {
            record.insert("Rank Overall", rank);
        }
        if let Some(rank) = year.and_then(|y| parse_rank(&ranked, y)) {
            record.insert("Rank Year", rank);
        }
    }
    Ok(record)
}

/// Pulls a rank out of a `Ranked` value such as `#5 for 2015, #1,234 overall`
///
/// The first clause containing `needle` is used; its leading `#n` token is
/// returned without `#` and thousands separators.
///
/// ```
/// use rym_scraper::extract::parse_rank;
///
/// let ranked = "#5 for 2015, #1,234 overall";
/// assert_eq!(parse_rank(ranked, "overall").as_deref(), Some("1234"));
/// assert_eq!(parse_rank(ranked, "2015").as_deref(), Some("5"));
/// assert_eq!(parse_rank(ranked, "2016"), None);
/// ```
pub fn parse_rank(ranked: &str, needle: &str) -> Option<String> {
    if needle.is_empty() {
        return None;
    }
    let clause = ranked.split(", ").find(|clause| clause.contains(needle))?;
    let rank: String = clause
        .split_whitespace()
        .next()?
        .chars()
        .filter(|c| *c != '#' && *c != ',')
        .collect();
    (!rank.is_empty()).then_some(rank)
}

/// The line of the title block that starts with `by `, without the prefix
fn credited_artist(heading: &str) -> Option<String> {
    heading
        .lines()
        .skip(1)
        .map(str::trim)
        .find_map(|line| line.strip_prefix("by "))
        .map(|artist| artist.trim().to_string())
        .filter(|artist| !artist.is_empty())
}

/// Header/value pairs of the info table, values as rendered
fn info_table(root: ElementRef<'_>, class: &str) -> Result<Vec<(String, String)>, ExtractError> {
    let table = find(root, &class_selector("table", class))?;
    let mut rows = Vec::new();
    for row in find_all(table, "tr")? {
        let (Ok(header), Ok(value)) = (find(row, "th"), find(row, "td")) else {
            continue;
        };
        let key = text(header);
        if key.is_empty() {
            continue;
        }
        rows.push((key, raw_text(value)));
    }
    Ok(rows)
}

fn track_listing(root: ElementRef<'_>, markers: &AlbumMarkers) -> Result<Vec<String>, ExtractError> {
    let list = find(root, &format!("ul#{}", markers.tracks))?;
    let title = class_selector("span", &markers.track_title);
    let rendered = class_selector("span", &markers.rendered_text);

    let mut tracks = Vec::new();
    for item in find_all(list, "li")? {
        let Ok(title) = find(item, &title) else {
            continue;
        };
        let name = match find(title, &rendered) {
            Ok(rendered) => text(rendered),
            Err(_) => text(title),
        };
        if !name.is_empty() {
            tracks.push(name);
        }
    }
    Ok(tracks)
}

fn colorscheme(root: ElementRef<'_>, markers: &AlbumMarkers) -> Result<Vec<String>, ExtractError> {
    let bar = find(root, &class_selector("table", &markers.color_bar))?;
    let mut colors = Vec::new();
    for cell in find_all(bar, "td")? {
        let Ok(style) = attr(cell, "style") else {
            continue;
        };
        if let Some(color) = style.split([';', ':']).nth(1) {
            colors.push(color.trim().to_string());
        }
    }
    Ok(colors)
}

use crate::config::TimelineMarkers;
use crate::extract::dom::{class_selector, find, find_all, non_empty, text};
use crate::extract::Record;
use scraper::{ElementRef, Html};

/// Rating lines of a timeline page, or None when the catalog list is absent
pub fn timeline_lines<'a>(
    document: &'a Html,
    markers: &TimelineMarkers,
) -> Option<Vec<ElementRef<'a>>> {
    let list = format!("{}#{}", class_selector("div", &markers.list), markers.list);
    let list = find(document.root_element(), &list).ok()?;
    find_all(list, &class_selector("div", &markers.line)).ok()
}

/// Extracts one rating line: `Date` and `User`
pub fn extract_timeline_entry(line: ElementRef<'_>, markers: &TimelineMarkers) -> Record {
    let mut record = Record::new();
    record.field("Date", || {
        let selector = class_selector("div", &markers.date);
        non_empty(text(find(line, &selector)?), &selector)
    });
    record.field("User", || {
        let selector = class_selector("span", &markers.user);
        non_empty(text(find(line, &selector)?), &selector)
    });
    record
}

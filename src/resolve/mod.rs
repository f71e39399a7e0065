//! Name Resolver
//!
//! Maps a free-text artist name, or an `Artist - Album` name, to page URLs
//! through the site search and the artist's discography. A lookup that finds
//! nothing is a normal outcome (empty list or None), never an error.

mod fuzzy;

pub use fuzzy::{best_match, similarity, MATCH_THRESHOLD};

use crate::config::Config;
use crate::extract::dom::{class_selector, find_all};
use crate::extract::{extract_release_lines, ReleaseLine};
use crate::session::{Launcher, Session};
use crate::url::{absolutize, artist_search_url};
use crate::{Result, RymError};

/// Separator between the artist and the album in an album name
pub const NAME_SEPARATOR: &str = " - ";

/// Splits `Artist - Album` at the first separator, trimming both halves
///
/// ```
/// use rym_scraper::resolve::split_album_name;
///
/// assert_eq!(
///     split_album_name(" Everything Everything - Get to Heaven ").unwrap(),
///     ("Everything Everything", "Get to Heaven")
/// );
/// assert_eq!(
///     split_album_name("Godspeed You! Black Emperor - Lift Your Skinny Fists - Deluxe").unwrap().1,
///     "Lift Your Skinny Fists - Deluxe"
/// );
/// assert!(split_album_name("Get to Heaven").is_err());
/// ```
pub fn split_album_name(name: &str) -> Result<(&str, &str)> {
    let (artist, album) = name
        .split_once(NAME_SEPARATOR)
        .ok_or_else(|| RymError::InvalidName(name.to_string()))?;
    let (artist, album) = (artist.trim(), album.trim());
    if artist.is_empty() || album.is_empty() {
        return Err(RymError::InvalidName(name.to_string()));
    }
    Ok((artist, album))
}

/// Searches the site for `name` and returns every artist result URL in page order
pub fn resolve_artist<L: Launcher>(
    session: &mut Session<L>,
    config: &Config,
    name: &str,
) -> Result<Vec<String>> {
    let base = config.site.base_url()?;
    let search = artist_search_url(&base, name)?;
    tracing::debug!("Searching {} in url {}", name, search);
    session.navigate(search.as_str())?;

    let document = session.current_document()?;
    let selector = class_selector("a", &config.markers.search.result_link);
    let links = match find_all(document.root_element(), &selector) {
        Ok(links) => links,
        Err(e) => {
            tracing::warn!("Search results not read: {}", e);
            return Ok(Vec::new());
        }
    };
    let urls: Vec<String> = links
        .into_iter()
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| absolutize(&base, href))
        .collect();

    tracing::debug!("URLs for {} found: {:?}", name, urls);
    Ok(urls)
}

/// Finds the URL of the album named by `Artist - Album`
///
/// Each artist returned by the search is tried in order; the first one whose
/// discography holds a release scoring at least [`MATCH_THRESHOLD`] wins.
pub fn resolve_album<L: Launcher>(
    session: &mut Session<L>,
    config: &Config,
    name: &str,
) -> Result<Option<String>> {
    let (artist, album) = split_album_name(name)?;
    let base = config.site.base_url()?;

    for artist_url in resolve_artist(session, config, artist)? {
        tracing::debug!("Searching for {} at {}", album, artist_url);
        session.navigate(&artist_url)?;
        let document = session.current_document()?;
        let releases = extract_release_lines(&document, &config.markers.discography, &base);

        if let Some(line) = pick_release(album, &releases) {
            tracing::debug!("Best match: {}", line.url);
            return Ok(Some(line.url.clone()));
        }
    }

    tracing::error!(
        "Could not find a match for album '{}' from artist '{}'",
        album,
        artist
    );
    Ok(None)
}

fn pick_release<'a>(album: &str, releases: &'a [ReleaseLine]) -> Option<&'a ReleaseLine> {
    let names: Vec<&str> = releases.iter().map(|r| r.name.as_str()).collect();
    best_match(album, &names).map(|(index, _)| &releases[index])
}

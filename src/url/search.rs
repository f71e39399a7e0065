use url::Url;

/// Builds the artist search URL for a free-text name
///
/// Whitespace runs collapse to a single separator, which the query encoder
/// writes as `+`, the site's search-term convention.
///
/// # Examples
///
/// ```
/// use rym_scraper::url::artist_search_url;
/// use url::Url;
///
/// let base = Url::parse("https://rateyourmusic.com").unwrap();
/// let url = artist_search_url(&base, " Everything  Everything ").unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://rateyourmusic.com/search?searchtype=a&searchterm=Everything+Everything"
/// );
/// ```
pub fn artist_search_url(base: &Url, name: &str) -> Result<Url, url::ParseError> {
    let term = name.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut url = base.join("/search")?;
    url.query_pairs_mut()
        .append_pair("searchtype", "a")
        .append_pair("searchterm", &term);
    Ok(url)
}

use crate::config::DEFAULT_BASE_URL;
use crate::url::slug;
use crate::{Result, RymError};
use std::fmt;
use url::Url;

/// A chart listing: fixed filters plus a mutable page counter
///
/// The filters are set once through the builder methods. Walking the chart only
/// ever moves the page counter, so the same query can be inspected afterwards to
/// see how far the walk went.
///
/// # Examples
///
/// ```
/// use rym_scraper::ChartQuery;
///
/// let query = ChartQuery::new()
///     .with_year("2010s")
///     .with_genres(["Ambient", "Dark Ambient"])
///     .with_countries(["France"]);
/// assert_eq!(
///     query.to_string(),
///     "https://rateyourmusic.com/charts/top/album/2010s/g:ambient,dark-ambient/loc:france/1/"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartQuery {
    base_url: String,
    kind: Vec<String>,
    year: Option<String>,
    genres: Vec<String>,
    countries: Vec<String>,
    language: Option<String>,
    descriptors: Vec<String>,
    page: u32,
}

impl ChartQuery {
    /// Top albums of all time, first page
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            kind: vec!["album".to_string()],
            year: None,
            genres: Vec::new(),
            countries: Vec::new(),
            language: None,
            descriptors: Vec::new(),
            page: 1,
        }
    }

    /// Reads a chart URL copied from the site back into a query
    ///
    /// The trailing number is the page, except when it is the only segment
    /// after the kind and has four digits: `/charts/top/album/2015/` is a year.
    ///
    /// ```
    /// use rym_scraper::ChartQuery;
    ///
    /// let query = ChartQuery::from_url("https://rateyourmusic.com/charts/top/album/2010s/g:ambient/3/").unwrap();
    /// assert_eq!(query.page(), 3);
    /// assert_eq!(query.label(), "album_2010s_ambient");
    /// ```
    pub fn from_url(url: &str) -> Result<Self> {
        let invalid = || RymError::InvalidChartUrl(url.to_string());
        let parsed = Url::parse(url.trim())?;
        let segments: Vec<&str> = parsed
            .path_segments()
            .ok_or_else(invalid)?
            .filter(|segment| !segment.is_empty())
            .collect();

        let (kind, mut facets) = match segments.as_slice() {
            ["charts", "top", kind, rest @ ..] => (*kind, rest),
            _ => return Err(invalid()),
        };

        let mut page = 1;
        if let Some((last, rest)) = facets.split_last() {
            let numeric = last.chars().all(|c| c.is_ascii_digit());
            let bare_year = rest.is_empty() && last.len() == 4;
            if numeric && !bare_year {
                page = last.parse().map_err(|_| invalid())?;
                facets = rest;
            }
        }

        let mut root = parsed.clone();
        root.set_path("");
        root.set_query(None);
        root.set_fragment(None);

        let mut query = Self::new()
            .with_base_url(root.as_str().trim_end_matches('/'))
            .with_kinds(kind.split(','))
            .starting_at(page);
        for facet in facets {
            if let Some(genres) = facet.strip_prefix("g:") {
                query = query.with_genres(genres.split(','));
            } else if let Some(countries) = facet.strip_prefix("loc:") {
                query = query.with_countries(countries.split(','));
            } else if let Some(language) = facet.strip_prefix("l:") {
                query = query.with_language(language);
            } else if let Some(descriptors) = facet.strip_prefix("d:") {
                query = query.with_descriptors(descriptors.split(','));
            } else if query.year.is_none() && !facet.contains(':') {
                query = query.with_year(facet);
            } else {
                return Err(invalid());
            }
        }
        Ok(query)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Release kinds, e.g. `album`, `ep`, or `release` for everything
    pub fn with_kinds<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let kinds = collect_slugs(kinds);
        if !kinds.is_empty() {
            self.kind = kinds;
        }
        self
    }

    /// A year (`1997`), a range (`1984-2002`) or a decade (`2010s`)
    pub fn with_year(mut self, year: impl AsRef<str>) -> Self {
        self.year = Some(slug(year.as_ref())).filter(|y| !y.is_empty());
        self
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.genres = collect_slugs(genres);
        self
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.countries = collect_slugs(countries);
        self
    }

    pub fn with_language(mut self, language: impl AsRef<str>) -> Self {
        self.language = Some(slug(language.as_ref())).filter(|l| !l.is_empty());
        self
    }

    pub fn with_descriptors<I, S>(mut self, descriptors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.descriptors = collect_slugs(descriptors);
        self
    }

    /// Page the walk starts from (pages are 1-based; 0 is read as 1)
    pub fn starting_at(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Moves to the following page
    pub(crate) fn advance(&mut self) {
        self.page += 1;
    }

    /// Short label of the filters, used to name export files
    ///
    /// ```
    /// use rym_scraper::ChartQuery;
    ///
    /// let query = ChartQuery::new().with_year("2015").with_genres(["Rock"]);
    /// assert_eq!(query.label(), "album_2015_rock");
    /// ```
    pub fn label(&self) -> String {
        let mut parts = vec![self.kind.join("-")];
        parts.extend(self.year.iter().cloned());
        parts.extend(self.genres.iter().cloned());
        parts.extend(self.countries.iter().cloned());
        parts.extend(self.language.iter().cloned());
        parts.extend(self.descriptors.iter().cloned());
        parts.join("_")
    }
}

impl Default for ChartQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChartQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/charts/top/{}",
            self.base_url.trim_end_matches('/'),
            self.kind.join(",")
        )?;
        if let Some(year) = &self.year {
            write!(f, "/{}", year)?;
        }
        if !self.genres.is_empty() {
            write!(f, "/g:{}", self.genres.join(","))?;
        }
        if !self.countries.is_empty() {
            write!(f, "/loc:{}", self.countries.join(","))?;
        }
        if let Some(language) = &self.language {
            write!(f, "/l:{}", language)?;
        }
        if !self.descriptors.is_empty() {
            write!(f, "/d:{}", self.descriptors.join(","))?;
        }
        write!(f, "/{}/", self.page)
    }
}

fn collect_slugs<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| slug(v.as_ref()))
        .filter(|v| !v.is_empty())
        .collect()
}

//! Marker tables: every class name, id and title string the scraper keys on
//!
//! The site renames its markup from time to time. Keeping the markers here,
//! overridable from the `[markers.*]` tables of the config file, means a markup
//! change is a config edit rather than a code change.

use serde::Deserialize;

/// All marker tables, one per page type
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub session: SessionMarkers,
    pub search: SearchMarkers,
    pub album: AlbumMarkers,
    pub artist: ArtistMarkers,
    pub chart: ChartMarkers,
    pub discography: DiscographyMarkers,
    pub timeline: TimelineMarkers,
}

impl Markers {
    /// Iterates over every single-valued marker with a `table.key` label
    pub(crate) fn labelled(&self) -> Vec<(&'static str, &str)> {
        let s = &self.session;
        let a = &self.album;
        let r = &self.artist;
        let c = &self.chart;
        let d = &self.discography;
        let t = &self.timeline;
        vec![
            ("session.expand-link", s.expand_link.as_str()),
            ("session.ban-title", s.ban_title.as_str()),
            ("session.rate-limit-form", s.rate_limit_form.as_str()),
            ("search.result-link", self.search.result_link.as_str()),
            ("album.title", a.title.as_str()),
            ("album.info-table", a.info_table.as_str()),
            ("album.tracks", a.tracks.as_str()),
            ("album.track-title", a.track_title.as_str()),
            ("album.rendered-text", a.rendered_text.as_str()),
            ("album.color-bar", a.color_bar.as_str()),
            ("artist.name", r.name.as_str()),
            ("artist.info", r.info.as_str()),
            ("artist.info-header", r.info_header.as_str()),
            ("artist.followers", r.followers.as_str()),
            ("chart.container", c.container.as_str()),
            ("chart.row", c.row.as_str()),
            ("chart.rank-prefix", c.rank_prefix.as_str()),
            ("chart.artist", c.artist.as_str()),
            ("chart.romanized-name", c.romanized_name.as_str()),
            ("chart.original-name", c.original_name.as_str()),
            ("chart.title", c.title.as_str()),
            ("chart.date", c.date.as_str()),
            ("chart.primary-genres", c.primary_genres.as_str()),
            ("chart.secondary-genres", c.secondary_genres.as_str()),
            ("chart.genre-link", c.genre_link.as_str()),
            ("chart.rating", c.rating.as_str()),
            ("chart.stat", c.stat.as_str()),
            ("chart.next-page", c.next_page.as_str()),
            ("discography.artist-name", d.artist_name.as_str()),
            ("discography.container", d.container.as_str()),
            ("discography.section", d.section.as_str()),
            ("discography.section-prefix", d.section_prefix.as_str()),
            ("discography.release", d.release.as_str()),
            ("discography.release-link", d.release_link.as_str()),
            ("discography.year-prefix", d.year_prefix.as_str()),
            ("discography.average-rating", d.average_rating.as_str()),
            ("discography.ratings", d.ratings.as_str()),
            ("discography.reviews", d.reviews.as_str()),
            ("discography.mainline", d.mainline.as_str()),
            ("timeline.list", t.list.as_str()),
            ("timeline.line", t.line.as_str()),
            ("timeline.date", t.date.as_str()),
            ("timeline.user", t.user.as_str()),
            ("timeline.section", t.section.as_str()),
            ("timeline.next-page", t.next_page.as_str()),
        ]
    }
}

/// Interstitials and block detection
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SessionMarkers {
    /// Classes of cookie/consent buttons clicked away after each load
    pub consent_buttons: Vec<String>,
    /// Class of the "show all" disclosure links
    pub expand_link: String,
    /// Exact page title served to blocked addresses
    pub ban_title: String,
    /// Id of the verification form served to rate-limited sessions
    pub rate_limit_form: String,
}

impl Default for SessionMarkers {
    fn default() -> Self {
        Self {
            consent_buttons: vec!["as-oil__btn-optin".to_string(), "fc-cta-consent".to_string()],
            expand_link: "disco_expand_section_link".to_string(),
            ban_title: "IP blocked".to_string(),
            rate_limit_form: "sec_verify".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SearchMarkers {
    pub result_link: String,
}

impl Default for SearchMarkers {
    fn default() -> Self {
        Self {
            result_link: "searchpage".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AlbumMarkers {
    pub title: String,
    pub info_table: String,
    /// Id of the track list
    pub tracks: String,
    pub track_title: String,
    pub rendered_text: String,
    pub color_bar: String,
}

impl Default for AlbumMarkers {
    fn default() -> Self {
        Self {
            title: "album_title".to_string(),
            info_table: "album_info".to_string(),
            tracks: "tracks".to_string(),
            track_title: "tracklist_title".to_string(),
            rendered_text: "rendered_text".to_string(),
            color_bar: "color_bar".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ArtistMarkers {
    pub name: String,
    pub info: String,
    pub info_header: String,
    pub followers: String,
}

impl Default for ArtistMarkers {
    fn default() -> Self {
        Self {
            name: "artist_name_hdr".to_string(),
            info: "artist_info".to_string(),
            info_header: "info_hdr".to_string(),
            followers: "label_num_followers".to_string(),
        }
    }
}

/// Chart listing markers. Class values may hold several space-separated classes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ChartMarkers {
    pub container: String,
    pub row: String,
    /// Prefix of the row id carrying the rank (`pos12`)
    pub rank_prefix: String,
    pub artist: String,
    pub romanized_name: String,
    pub original_name: String,
    pub title: String,
    pub date: String,
    pub primary_genres: String,
    pub secondary_genres: String,
    pub genre_link: String,
    pub rating: String,
    /// Class of the ratings/reviews counters, in that order
    pub stat: String,
    pub next_page: String,
}

impl Default for ChartMarkers {
    fn default() -> Self {
        Self {
            container: "chart_results chart_results_ charts_page".to_string(),
            row: "topcharts_itembox chart_item_release".to_string(),
            rank_prefix: "pos".to_string(),
            artist: "page_charts_section_charts_item_credited_links_primary".to_string(),
            romanized_name: "ui_name_locale_language".to_string(),
            original_name: "ui_name_locale_original".to_string(),
            title: "page_charts_section_charts_item_title".to_string(),
            date: "page_charts_section_charts_item_date".to_string(),
            primary_genres: "page_charts_section_charts_item_genres_primary".to_string(),
            secondary_genres: "page_charts_section_charts_item_genres_secondary".to_string(),
            genre_link: "genre".to_string(),
            rating: "page_charts_section_charts_item_details_average_num".to_string(),
            stat: "full".to_string(),
            next_page: "ui_pagination_next".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DiscographyMarkers {
    pub artist_name: String,
    /// Id of the discography block
    pub container: String,
    pub section: String,
    /// Prefix of the id of the release list following each section header
    pub section_prefix: String,
    pub release: String,
    pub release_link: String,
    /// Prefix of the class of the release date span (`disco_year_ymd`)
    pub year_prefix: String,
    pub average_rating: String,
    pub ratings: String,
    pub reviews: String,
    /// One-line release entries used for album lookup
    pub mainline: String,
}

impl Default for DiscographyMarkers {
    fn default() -> Self {
        Self {
            artist_name: "artist_name_hdr".to_string(),
            container: "discography".to_string(),
            section: "disco_header_top".to_string(),
            section_prefix: "disco_type_".to_string(),
            release: "disco_release".to_string(),
            release_link: "album".to_string(),
            year_prefix: "disco_year_".to_string(),
            average_rating: "disco_avg_rating".to_string(),
            ratings: "disco_ratings".to_string(),
            reviews: "disco_reviews".to_string(),
            mainline: "disco_mainline".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TimelineMarkers {
    /// Class (and id) of the catalog list
    pub list: String,
    pub line: String,
    pub date: String,
    pub user: String,
    pub section: String,
    pub next_page: String,
}

impl Default for TimelineMarkers {
    fn default() -> Self {
        Self {
            list: "catalog_list".to_string(),
            line: "catalog_line".to_string(),
            date: "catalog_date".to_string(),
            user: "catalog_user".to_string(),
            section: "catalog_section".to_string(),
            next_page: "navlinknext".to_string(),
        }
    }
}

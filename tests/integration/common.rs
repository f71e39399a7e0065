//! Scripted fake browser and fixture pages

use rym_scraper::config::Config;
use rym_scraper::{Launcher, PageRenderer, RenderError};
use scraper::{Html, Selector};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

pub const NOT_FOUND: &str = "<html><head><title>Not Found</title></head><body></body></html>";

/// The fake site and a log of everything the browser did to it
#[derive(Default)]
pub struct Site {
    /// Responses per URL; the last one is served again once the others are used up
    pages: HashMap<String, VecDeque<String>>,
    /// Pages shown after clicking a selector, in order
    clicks: HashMap<String, VecDeque<String>>,
    pub loads: Vec<String>,
    pub clicked: Vec<String>,
    /// Text of each clicked element
    pub clicked_text: Vec<String>,
    /// Clicked elements are removed from the page, like expanded disclosure links
    pub drop_clicked: bool,
    pub scripts: Vec<String>,
    pub launches: usize,
    pub quits: usize,
}

pub type SharedSite = Rc<RefCell<Site>>;

pub fn site() -> SharedSite {
    Rc::new(RefCell::new(Site::default()))
}

impl Site {
    pub fn serve(&mut self, url: impl Into<String>, html: impl Into<String>) {
        self.pages.entry(url.into()).or_default().push_back(html.into());
    }

    pub fn on_click(&mut self, selector: impl Into<String>, html: impl Into<String>) {
        self.clicks
            .entry(selector.into())
            .or_default()
            .push_back(html.into());
    }

    pub fn loads_of(&self, url: &str) -> usize {
        self.loads.iter().filter(|u| *u == url).count()
    }

    fn respond(&mut self, url: &str) -> String {
        match self.pages.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
            Some(queue) => queue.front().cloned().unwrap_or_default(),
            None => NOT_FOUND.to_string(),
        }
    }
}

pub struct FakeLauncher {
    pub site: SharedSite,
}

impl FakeLauncher {
    pub fn new(site: &SharedSite) -> Self {
        Self { site: Rc::clone(site) }
    }
}

impl Launcher for FakeLauncher {
    type Renderer = FakeRenderer;

    fn launch(&self) -> Result<FakeRenderer, RenderError> {
        self.site.borrow_mut().launches += 1;
        Ok(FakeRenderer {
            site: Rc::clone(&self.site),
            current: RefCell::new(String::new()),
            open: true,
        })
    }
}

pub struct FakeRenderer {
    site: SharedSite,
    current: RefCell<String>,
    open: bool,
}

impl FakeRenderer {
    fn ensure_open(&self) -> Result<(), RenderError> {
        if self.open {
            Ok(())
        } else {
            Err(RenderError::Closed)
        }
    }

    fn matches(&self, selector: &str) -> Result<usize, RenderError> {
        let parsed = parse(selector)?;
        let document = Html::parse_document(&self.current.borrow());
        let count = document.select(&parsed).count();
        Ok(count)
    }

    /// Text and markup of the `index`-th match
    fn nth(&self, selector: &str, index: usize) -> Result<(String, String), RenderError> {
        let parsed = parse(selector)?;
        let document = Html::parse_document(&self.current.borrow());
        let element = document
            .select(&parsed)
            .nth(index)
            .ok_or_else(|| RenderError::Element {
                selector: selector.to_string(),
                message: format!("no element at index {}", index),
            })?;
        Ok((element.text().collect(), element.html()))
    }
}

fn parse(selector: &str) -> Result<Selector, RenderError> {
    Selector::parse(selector).map_err(|_| RenderError::Element {
        selector: selector.to_string(),
        message: "invalid selector".to_string(),
    })
}

impl PageRenderer for FakeRenderer {
    fn load(&mut self, url: &str) -> Result<(), RenderError> {
        self.ensure_open()?;
        let mut site = self.site.borrow_mut();
        site.loads.push(url.to_string());
        *self.current.borrow_mut() = site.respond(url);
        Ok(())
    }

    fn page_source(&self) -> Result<String, RenderError> {
        self.ensure_open()?;
        Ok(self.current.borrow().clone())
    }

    fn count(&self, selector: &str) -> Result<usize, RenderError> {
        self.ensure_open()?;
        self.matches(selector)
    }

    fn click(&self, selector: &str, index: usize) -> Result<(), RenderError> {
        self.ensure_open()?;
        let (text, markup) = self.nth(selector, index)?;
        let mut site = self.site.borrow_mut();
        site.clicked.push(selector.to_string());
        site.clicked_text.push(text);
        if site.drop_clicked {
            let remaining = self.current.borrow().replacen(&markup, "", 1);
            *self.current.borrow_mut() = remaining;
        }
        if let Some(next) = site.clicks.get_mut(selector).and_then(VecDeque::pop_front) {
            *self.current.borrow_mut() = next;
        }
        Ok(())
    }

    fn scroll_into_view(&self, selector: &str, index: usize) -> Result<(), RenderError> {
        self.ensure_open()?;
        if self.matches(selector)? <= index {
            return Err(RenderError::Element {
                selector: selector.to_string(),
                message: format!("no element at index {}", index),
            });
        }
        Ok(())
    }

    fn execute_script(&self, script: &str) -> Result<serde_json::Value, RenderError> {
        self.ensure_open()?;
        self.site.borrow_mut().scripts.push(script.to_string());
        Ok(serde_json::Value::Bool(true))
    }

    fn quit(&mut self) {
        if self.open {
            self.open = false;
            self.site.borrow_mut().quits += 1;
        }
    }
}

/// Default configuration without pauses
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.browser.expand_pause_ms = 0;
    config.browser.next_page_pause_ms = 0;
    config
}

pub fn page(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, body
    )
}

pub fn rate_limited_page() -> String {
    page(
        "Verification",
        r#"<form id="sec_verify" method="post"><input type="submit"></form>"#,
    )
}

pub fn banned_page() -> String {
    page(
        "IP blocked",
        r#"<p>Your IP has been blocked.</p><form id="sec_verify"></form>"#,
    )
}

pub fn chart_row(rank: u32) -> String {
    format!(
        r#"<div class="topcharts_itembox chart_item_release" id="pos{rank}">
<div class="page_charts_section_charts_item_credited_links_primary"><a class="artist">Artist {rank}</a></div>
<div class="page_charts_section_charts_item_title"><a>Album {rank}</a></div>
<div class="page_charts_section_charts_item_date"><span>(1 January 2000)</span></div>
<div class="page_charts_section_charts_item_genres_primary"><a class="genre">Rock</a></div>
<span class="page_charts_section_charts_item_details_average_num">3.90</span>
<span class="full">1,000</span><span class="full">10</span>
</div>"#
    )
}

pub fn ad_row() -> String {
    r#"<div class="topcharts_itembox chart_item_release"><script>render_ad()</script></div>"#
        .to_string()
}

/// A chart page with the given rows, optionally linking to the next page
pub fn chart_page(rows: &[String], has_next: bool) -> String {
    let next = if has_next {
        r##"<a class="ui_pagination_next" href="#">Next</a>"##
    } else {
        ""
    };
    page(
        "Top albums",
        &format!(
            r#"<div class="chart_results chart_results_ charts_page">{}</div>{}"#,
            rows.concat(),
            next
        ),
    )
}

pub fn ranked_rows(first: u32, count: u32) -> Vec<String> {
    (first..first + count).map(chart_row).collect()
}

pub fn timeline_page(entries: &[(&str, &str)], has_next: bool) -> String {
    let lines: String = entries
        .iter()
        .map(|(date, user)| {
            format!(
                r#"<div class="catalog_line"><div class="catalog_date">{}</div><span class="catalog_user">{}</span></div>"#,
                date, user
            )
        })
        .collect();
    let next = if has_next {
        r#"<div class="catalog_section"><a class="navlinknext" href="javascript:void(0)">next</a></div>"#
    } else {
        r#"<div class="catalog_section"></div>"#
    };
    page(
        "Get to Heaven",
        &format!(
            r#"<div class="catalog_list" id="catalog_list">{}</div>{}"#,
            lines, next
        ),
    )
}

pub fn album_page() -> String {
    page(
        "Get to Heaven",
        r#"<div class="album_title">Get to Heaven
 <span></span>
 by Everything Everything
</div>
<table class="album_info">
<tr><th>Type</th><td>Album</td></tr>
<tr><th>Released</th><td>19 June 2015</td></tr>
<tr><th>Ranked</th><td>#12 for 2015, #1,234 overall</td></tr>
</table>
<ul id="tracks"><li><span class="tracklist_title"><span class="rendered_text">To the Blade</span></span></li></ul>
<table class="color_bar"><tr><td style="background:#e03d2a"></td></tr></table>"#,
    )
}

/// An artist page listing `(name, path)` releases in the Album section
pub fn artist_page(artist: &str, releases: &[(&str, &str, &str)]) -> String {
    let entries: String = releases
        .iter()
        .map(|(name, path, year)| {
            format!(
                r#"<div class="disco_release"><div class="disco_mainline"><a class="album" href="{path}">{name}</a></div>
<span class="disco_year_ymd" title="1 May {year}">{year}</span>
<div class="disco_avg_rating">3.50</div><div class="disco_ratings">1,500</div><div class="disco_reviews">20</div></div>"#
            )
        })
        .collect();
    page(
        artist,
        &format!(
            r#"<h1 class="artist_name_hdr">{artist}</h1>
<div class="artist_info"><div class="info_hdr">Formed</div><div class="info_content">2007, Manchester</div></div>
<span class="label_num_followers">9,876 followers</span>
<div id="discography"><div class="disco_header_top"><h3>Album</h3></div>
<div class="disco_expand_section_link">Show all</div>
<div id="disco_type_s">{entries}</div></div>"#
        ),
    )
}

pub fn search_page(links: &[&str]) -> String {
    let results: String = links
        .iter()
        .map(|href| format!(r#"<a class="searchpage" href="{}">result</a>"#, href))
        .collect();
    page("Search", &results)
}

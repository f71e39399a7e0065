//! Pagination walker over chart and timeline listings

use crate::common::*;
use rym_scraper::crawler::{walk, ChartCursor, TimelineCursor};
use rym_scraper::{ChartQuery, RymError, Session};

fn chart_url(page: u32) -> String {
    ChartQuery::new().starting_at(page).to_string()
}

#[test]
fn test_two_pages_with_cap() {
    let site = site();
    {
        let mut s = site.borrow_mut();
        s.serve(chart_url(1), chart_page(&ranked_rows(1, 40), true));
        s.serve(chart_url(2), chart_page(&ranked_rows(41, 40), true));
        s.serve(chart_url(3), chart_page(&ranked_rows(81, 40), true));
    }
    let config = test_config();
    let mut session = Session::start(FakeLauncher::new(&site), &config).unwrap();
    let mut query = ChartQuery::new();

    let records = {
        let mut cursor = ChartCursor::new(&mut query, config.markers.chart.clone());
        walk(&mut session, &mut cursor, Some(2)).unwrap()
    };

    assert_eq!(records.len(), 80);
    assert_eq!(records[0].text("Rank"), Some("1"));
    assert_eq!(records[40].text("Rank"), Some("41"));
    assert_eq!(records[79].text("Album"), Some("Album 80"));
    assert_eq!(site.borrow().loads_of(&chart_url(3)), 0);
    assert_eq!(query.page(), 2);
}

#[test]
fn test_zero_cap_reads_every_page() {
    let site = site();
    {
        let mut s = site.borrow_mut();
        s.serve(chart_url(1), chart_page(&ranked_rows(1, 3), true));
        s.serve(chart_url(2), chart_page(&ranked_rows(4, 3), false));
    }
    let config = test_config();
    let mut session = Session::start(FakeLauncher::new(&site), &config).unwrap();
    let mut query = ChartQuery::new();

    let mut cursor = ChartCursor::new(&mut query, config.markers.chart.clone());
    let records = walk(&mut session, &mut cursor, Some(0)).unwrap();

    assert_eq!(records.len(), 6);
    assert_eq!(records[5].text("Rank"), Some("6"));
}

#[test]
fn test_walk_stops_without_next_control() {
    let site = site();
    site.borrow_mut()
        .serve(chart_url(1), chart_page(&ranked_rows(1, 5), false));
    let config = test_config();
    let mut session = Session::start(FakeLauncher::new(&site), &config).unwrap();
    let mut query = ChartQuery::new();

    let mut cursor = ChartCursor::new(&mut query, config.markers.chart.clone());
    let records = walk(&mut session, &mut cursor, None).unwrap();

    assert_eq!(records.len(), 5);
    assert_eq!(site.borrow().loads.len(), 1);
}

#[test]
fn test_advertisement_rows_are_skipped() {
    let site = site();
    let mut rows = ranked_rows(1, 2);
    rows.insert(1, ad_row());
    rows.push(ad_row());
    site.borrow_mut().serve(chart_url(1), chart_page(&rows, false));

    let config = test_config();
    let mut session = Session::start(FakeLauncher::new(&site), &config).unwrap();
    let mut query = ChartQuery::new();
    let mut cursor = ChartCursor::new(&mut query, config.markers.chart.clone());
    let records = walk(&mut session, &mut cursor, None).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].text("Rank"), Some("2"));
}

#[test]
fn test_missing_container_keeps_earlier_pages() {
    let site = site();
    site.borrow_mut()
        .serve(chart_url(1), chart_page(&ranked_rows(1, 3), true));
    let dump = tempfile::tempdir().unwrap();

    let mut config = test_config();
    config.browser.dump_dir = Some(dump.path().to_string_lossy().into_owned());
    let mut session = Session::start(FakeLauncher::new(&site), &config).unwrap();
    let mut query = ChartQuery::new();
    let mut cursor = ChartCursor::new(&mut query, config.markers.chart.clone());
    let records = walk(&mut session, &mut cursor, None).unwrap();

    assert_eq!(records.len(), 3);
    assert!(dump.path().join("chart_album_page2.html").exists());
}

#[test]
fn test_empty_page_ends_walk() {
    let site = site();
    {
        let mut s = site.borrow_mut();
        s.serve(chart_url(1), chart_page(&ranked_rows(1, 3), true));
        s.serve(chart_url(2), chart_page(&[], true));
    }
    let config = test_config();
    let mut session = Session::start(FakeLauncher::new(&site), &config).unwrap();
    let mut query = ChartQuery::new();
    let mut cursor = ChartCursor::new(&mut query, config.markers.chart.clone());

    let records = walk(&mut session, &mut cursor, None).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(site.borrow().loads_of(&chart_url(3)), 0);
}

#[test]
fn test_ban_mid_walk_is_fatal() {
    let site = site();
    {
        let mut s = site.borrow_mut();
        s.serve(chart_url(1), chart_page(&ranked_rows(1, 3), true));
        s.serve(chart_url(2), banned_page());
    }
    let config = test_config();
    let mut session = Session::start(FakeLauncher::new(&site), &config).unwrap();
    let mut query = ChartQuery::new();
    let mut cursor = ChartCursor::new(&mut query, config.markers.chart.clone());

    let err = walk(&mut session, &mut cursor, None).unwrap_err();
    assert!(matches!(err, RymError::IpBanned { .. }));
}

#[test]
fn test_timeline_follows_next_control() {
    let url = "https://rateyourmusic.com/release/album/everything-everything/get-to-heaven/";
    let site = site();
    {
        let mut s = site.borrow_mut();
        s.serve(
            url,
            timeline_page(&[("3 Jan 2021", "alice"), ("2 Jan 2021", "bob")], true),
        );
        s.on_click(
            ".catalog_section .navlinknext",
            timeline_page(&[("1 Jan 2021", "carol")], false),
        );
    }
    let config = test_config();
    let mut session = Session::start(FakeLauncher::new(&site), &config).unwrap();
    let mut cursor = TimelineCursor::new(url, config.markers.timeline.clone());

    let records = walk(&mut session, &mut cursor, None).unwrap();

    let users: Vec<_> = records.iter().filter_map(|r| r.text("User")).collect();
    assert_eq!(users, vec!["alice", "bob", "carol"]);
    assert_eq!(site.borrow().loads_of(url), 1);
    assert_eq!(site.borrow().clicked, vec![".catalog_section .navlinknext".to_string()]);
}

#[test]
fn test_timeline_page_cap() {
    let url = "https://rateyourmusic.com/release/album/x/y/";
    let site = site();
    site.borrow_mut()
        .serve(url, timeline_page(&[("3 Jan 2021", "alice")], true));
    let config = test_config();
    let mut session = Session::start(FakeLauncher::new(&site), &config).unwrap();
    let mut cursor = TimelineCursor::new(url, config.markers.timeline.clone());

    let records = walk(&mut session, &mut cursor, Some(1)).unwrap();
    assert_eq!(records.len(), 1);
    assert!(site.borrow().clicked.is_empty());
}

//! Name resolution through site search and discography matching

use crate::common::*;
use rym_scraper::resolve::{resolve_album, resolve_artist};
use rym_scraper::url::artist_search_url;
use rym_scraper::{RymError, Session};
use url::Url;

const BASE: &str = "https://rateyourmusic.com";

fn search_url(name: &str) -> String {
    artist_search_url(&Url::parse(BASE).unwrap(), name)
        .unwrap()
        .to_string()
}

fn everything_everything() -> String {
    artist_page(
        "Everything Everything",
        &[
            ("Man Alive", "/release/album/everything-everything/man-alive/", "2010"),
            ("Arc", "/release/album/everything-everything/arc/", "2013"),
            ("Get to Heaven", "/release/album/everything-everything/get-to-heaven/", "2015"),
        ],
    )
}

#[test]
fn test_artist_results_in_page_order() {
    let site = site();
    site.borrow_mut().serve(
        search_url("Everything Everything"),
        search_page(&["/artist/everything-everything", "/artist/everything-everything-2"]),
    );
    let config = test_config();
    let mut session = Session::start(FakeLauncher::new(&site), &config).unwrap();

    let urls = resolve_artist(&mut session, &config, "Everything   Everything").unwrap();
    assert_eq!(
        urls,
        vec![
            "https://rateyourmusic.com/artist/everything-everything".to_string(),
            "https://rateyourmusic.com/artist/everything-everything-2".to_string(),
        ]
    );
}

#[test]
fn test_no_search_results_is_empty() {
    let site = site();
    site.borrow_mut()
        .serve(search_url("Zzzzqx"), search_page(&[]));
    let config = test_config();
    let mut session = Session::start(FakeLauncher::new(&site), &config).unwrap();

    assert!(resolve_artist(&mut session, &config, "Zzzzqx").unwrap().is_empty());
}

#[test]
fn test_album_matched_case_insensitively() {
    let site = site();
    {
        let mut s = site.borrow_mut();
        s.serve(
            search_url("Everything Everything"),
            search_page(&["/artist/everything-everything"]),
        );
        s.serve(
            "https://rateyourmusic.com/artist/everything-everything",
            everything_everything(),
        );
    }
    let config = test_config();
    let mut session = Session::start(FakeLauncher::new(&site), &config).unwrap();

    let url = resolve_album(&mut session, &config, "Everything Everything - get to heaven").unwrap();
    assert_eq!(
        url.as_deref(),
        Some("https://rateyourmusic.com/release/album/everything-everything/get-to-heaven/")
    );
}

#[test]
fn test_album_falls_back_to_later_artists() {
    let site = site();
    {
        let mut s = site.borrow_mut();
        s.serve(
            search_url("Everything Everything"),
            search_page(&["/artist/everything-everything-2", "/artist/everything-everything"]),
        );
        s.serve(
            "https://rateyourmusic.com/artist/everything-everything-2",
            artist_page(
                "Everything Everything",
                &[("Live at the Barrowland", "/release/album/ee2/live/", "1999")],
            ),
        );
        s.serve(
            "https://rateyourmusic.com/artist/everything-everything",
            everything_everything(),
        );
    }
    let config = test_config();
    let mut session = Session::start(FakeLauncher::new(&site), &config).unwrap();

    let url = resolve_album(&mut session, &config, "Everything Everything - Arc").unwrap();
    assert_eq!(
        url.as_deref(),
        Some("https://rateyourmusic.com/release/album/everything-everything/arc/")
    );
    assert_eq!(
        site.borrow()
            .loads_of("https://rateyourmusic.com/artist/everything-everything-2"),
        1
    );
}

#[test]
fn test_unrelated_album_is_not_guessed() {
    let site = site();
    {
        let mut s = site.borrow_mut();
        s.serve(
            search_url("Everything Everything"),
            search_page(&["/artist/everything-everything"]),
        );
        s.serve(
            "https://rateyourmusic.com/artist/everything-everything",
            everything_everything(),
        );
    }
    let config = test_config();
    let mut session = Session::start(FakeLauncher::new(&site), &config).unwrap();

    let url = resolve_album(&mut session, &config, "Everything Everything - Zzzzqx Unrelated").unwrap();
    assert_eq!(url, None);
}

#[test]
fn test_album_name_needs_separator() {
    let site = site();
    let config = test_config();
    let mut session = Session::start(FakeLauncher::new(&site), &config).unwrap();

    let err = resolve_album(&mut session, &config, "Get to Heaven").unwrap_err();
    assert!(matches!(err, RymError::InvalidName(_)));
    assert!(site.borrow().loads.is_empty());
}

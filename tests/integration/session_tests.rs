//! Session controller: ban, rate-limit and overlay handling

use crate::common::*;
use rym_scraper::{RymError, Session};

const URL: &str = "https://rateyourmusic.com/release/album/everything-everything/get-to-heaven/";

#[test]
fn test_rate_limit_retries_until_clean() {
    let site = site();
    {
        let mut s = site.borrow_mut();
        s.serve(URL, rate_limited_page());
        s.serve(URL, rate_limited_page());
        s.serve(URL, album_page());
    }

    let mut session = Session::start(FakeLauncher::new(&site), &test_config()).unwrap();
    session.navigate(URL).unwrap();

    assert_eq!(session.restarts(), 2);
    assert_eq!(site.borrow().launches, 3);
    assert_eq!(site.borrow().loads_of(URL), 3);

    let document = session.current_document().unwrap();
    assert!(document.html().contains("album_title"));
    assert!(!document.html().contains("sec_verify"));
}

#[test]
fn test_ban_preempts_rate_limit() {
    let site = site();
    site.borrow_mut().serve(URL, banned_page());

    let mut session = Session::start(FakeLauncher::new(&site), &test_config()).unwrap();
    let err = session.navigate(URL).unwrap_err();

    assert!(matches!(err, RymError::IpBanned { ref url } if url == URL));
    assert!(err.is_fatal());
    assert_eq!(session.restarts(), 0);
    assert_eq!(site.borrow().launches, 1);
    assert_eq!(site.borrow().quits, 1);
    assert!(!session.is_open());
    assert!(matches!(
        session.navigate(URL),
        Err(RymError::Render(rym_scraper::RenderError::Closed))
    ));
}

#[test]
fn test_restart_cap_when_configured() {
    let site = site();
    site.borrow_mut().serve(URL, rate_limited_page());

    let mut config = test_config();
    config.browser.max_restarts = Some(2);
    let mut session = Session::start(FakeLauncher::new(&site), &config).unwrap();

    let err = session.navigate(URL).unwrap_err();
    assert!(matches!(err, RymError::RateLimited { restarts: 2, .. }));
    assert!(!err.is_fatal());
    assert_eq!(site.borrow().loads_of(URL), 3);
}

#[test]
fn test_consent_dialog_is_clicked() {
    let site = site();
    site.borrow_mut().serve(
        URL,
        page("Album", r#"<button class="fc-cta-consent">Consent</button><p>content</p>"#),
    );

    let mut session = Session::start(FakeLauncher::new(&site), &test_config()).unwrap();
    session.navigate(URL).unwrap();

    assert_eq!(site.borrow().clicked, vec![".fc-cta-consent".to_string()]);
}

#[test]
fn test_show_all_links_are_expanded() {
    let site = site();
    site.borrow_mut().serve(
        URL,
        page(
            "Artist",
            r#"<div class="disco_expand_section_link">Show all</div><div class="disco_expand_section_link">Show all</div>"#,
        ),
    );

    let mut session = Session::start(FakeLauncher::new(&site), &test_config()).unwrap();
    session.navigate(URL).unwrap();

    assert_eq!(site.borrow().clicked.len(), 2);
}

#[test]
fn test_show_all_links_leaving_the_page_are_all_expanded() {
    let site = site();
    {
        let mut s = site.borrow_mut();
        s.drop_clicked = true;
        s.serve(
            URL,
            page(
                "Artist",
                r#"<div class="disco_expand_section_link">a</div><div class="disco_expand_section_link">b</div><div class="disco_expand_section_link">c</div>"#,
            ),
        );
    }

    let mut session = Session::start(FakeLauncher::new(&site), &test_config()).unwrap();
    session.navigate(URL).unwrap();

    let mut expanded = site.borrow().clicked_text.clone();
    expanded.sort();
    assert_eq!(expanded, vec!["a", "b", "c"]);
    assert_eq!(session.count(".disco_expand_section_link").unwrap(), 0);
}

#[test]
fn test_page_without_overlays() {
    let site = site();
    site.borrow_mut().serve(URL, album_page());

    let mut session = Session::start(FakeLauncher::new(&site), &test_config()).unwrap();
    session.navigate(URL).unwrap();

    assert!(site.borrow().clicked.is_empty());
    assert_eq!(session.count("ul#tracks li").unwrap(), 1);
    assert_eq!(session.restarts(), 0);
}

#[test]
fn test_dump_source_and_scripts() {
    let site = site();
    site.borrow_mut().serve(URL, album_page());
    let dir = tempfile::tempdir().unwrap();

    let mut session = Session::start(FakeLauncher::new(&site), &test_config()).unwrap();
    session.navigate(URL).unwrap();

    let path = dir.path().join("album.html");
    session.dump_source(&path).unwrap();
    assert!(std::fs::read_to_string(&path)
        .unwrap()
        .contains("Everything Everything"));

    let result = session.execute_script("window.scrollTo(0, 0)").unwrap();
    assert_eq!(result, serde_json::Value::Bool(true));
    assert_eq!(site.borrow().scripts.len(), 1);
}

#[test]
fn test_quit_is_idempotent() {
    let site = site();
    let mut session = Session::start(FakeLauncher::new(&site), &test_config()).unwrap();
    session.quit();
    session.quit();
    drop(session);

    assert_eq!(site.borrow().quits, 1);
}

// Host-side tests for the track catalog and asset URLs.

use sinbound_core::{asset_url, catalog_url, Catalog, CatalogQuery, TrackId};

const CATALOG: &str = r#"[
  {"id": 1, "artist": "nyx", "title": "Orbit", "description": "", "coverimage": "orbit.png", "link": "orbit.mp3"},
  {"id": "2b", "artist": "halo", "title": "Tidal", "coverimage": "", "link": "mixes/tidal.mp3"},
  {"id": 3, "title": "Remote", "coverimage": "https://cdn.example.net/r.jpg", "link": "https://cdn.example.net/r.mp3"}
]"#;

fn catalog() -> Catalog {
    Catalog::from_json(CATALOG).expect("catalog parses")
}

#[test]
fn ids_may_be_numbers_or_strings() {
    let c = catalog();
    assert_eq!(c.len(), 3);
    assert_eq!(c.tracks()[0].id, TrackId::Number(1));
    assert_eq!(c.tracks()[1].id, TrackId::Text("2b".into()));
    assert_eq!(c.tracks()[1].id.to_string(), "2b");
    // missing fields default to empty
    assert_eq!(c.tracks()[2].artist, "");
}

#[test]
fn malformed_catalog_is_an_error() {
    assert!(Catalog::from_json("{not json").is_err());
    assert!(Catalog::from_json(r#"[{"title": "no id"}]"#).is_err());
    assert!(Catalog::from_json("[]").expect("empty").is_empty());
}

#[test]
fn query_params_pick_the_selection() {
    assert_eq!(CatalogQuery::from_params(None, None), CatalogQuery::All);
    assert_eq!(CatalogQuery::from_params(Some("3"), Some("x.mp3")), CatalogQuery::Mix("3".into()));
    assert_eq!(CatalogQuery::from_params(Some("  "), Some("x.mp3")), CatalogQuery::Track("x.mp3".into()));
    assert_eq!(CatalogQuery::from_params(Some(""), Some("")), CatalogQuery::All);
}

#[test]
fn select_filters_by_mix_id() {
    let c = catalog();
    assert_eq!(c.select(&CatalogQuery::All).len(), 3);
    let mix = c.select(&CatalogQuery::Mix("1".into()));
    assert_eq!(mix.len(), 1);
    assert_eq!(mix[0].title, "Orbit");
    assert_eq!(c.select(&CatalogQuery::Mix("2b".into()))[0].title, "Tidal");
    assert!(c.select(&CatalogQuery::Mix("42".into())).is_empty());
}

#[test]
fn bare_track_param_builds_an_ad_hoc_entry() {
    let picked = catalog().select(&CatalogQuery::Track("live/set one.mp3".into()));
    assert_eq!(picked.len(), 1);
    assert_eq!(picked[0].title, "set one");
    assert_eq!(picked[0].cover_url(), None);
    assert!(picked[0].track_url().ends_with("/live/set one.mp3"));
}

#[test]
fn urls_resolve_against_the_asset_prefix() {
    let c = catalog();
    let orbit = &c.tracks()[0];
    assert!(orbit.cover_url().expect("cover").ends_with("/mix-coverimage/orbit.png"));
    assert!(orbit.track_url().ends_with("/mix-tracks/orbit.mp3"));
    assert_eq!(orbit.player_link(), "/trackplayer?mix=1");

    let tidal = &c.tracks()[1];
    assert_eq!(tidal.cover_url(), None);
    assert!(tidal.track_url().ends_with("/mixes/tidal.mp3"));
    assert!(!tidal.track_url().contains("mix-tracks"));

    let remote = &c.tracks()[2];
    assert_eq!(remote.track_url(), "https://cdn.example.net/r.mp3");
    assert_eq!(remote.cover_url().as_deref(), Some("https://cdn.example.net/r.jpg"));

    assert!(catalog_url().ends_with("/songdatabase.json"));
    assert_eq!(asset_url("/a.wav"), asset_url("a.wav"));
}

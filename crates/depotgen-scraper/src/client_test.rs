use super::*;

fn client(base_url: &str) -> SteamDbClient {
    SteamDbClient::new(base_url, 5, "depotgen-test/0.1").unwrap()
}

#[test]
fn depots_url_templates_app_id() {
    let url = client("https://steamdb.info").depots_url("730").unwrap();
    assert_eq!(url, "https://steamdb.info/app/730/depots/");
}

#[test]
fn depots_url_strips_trailing_slash() {
    let url = client("https://steamdb.info/").depots_url("440").unwrap();
    assert_eq!(url, "https://steamdb.info/app/440/depots/");
}

#[test]
fn depots_url_keeps_base_path_prefix() {
    let url = client("http://127.0.0.1:9000/mirror").depots_url("570").unwrap();
    assert_eq!(url, "http://127.0.0.1:9000/mirror/app/570/depots/");
}

#[test]
fn depots_url_encodes_app_id_as_single_segment() {
    let url = client("https://steamdb.info").depots_url("7 30").unwrap();
    assert_eq!(url, "https://steamdb.info/app/7%2030/depots/");
}

#[test]
fn depots_url_rejects_invalid_base() {
    let result = client("not-a-url").depots_url("730");
    assert!(
        matches!(result, Err(ScraperError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl, got: {result:?}"
    );
}

#[test]
fn invalid_base_is_a_fetch_failure() {
    let err = client("not-a-url").depots_url("730").unwrap_err();
    assert!(err.is_fetch_failure());
    assert!(!err.is_parse_failure());
}

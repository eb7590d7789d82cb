use super::*;
use crate::config::{ClientConfig, FetchOptions, HttpConfig};
use crate::error::Error;

#[tokio::test]
async fn test_builder_normalizes_language() {
    let client = test_client_with_language(
        Arc::new(ScriptedFetcher::succeeding()),
        Arc::new(InlineDispatcher),
        "fr_FR.UTF-8",
    );
    assert_eq!(client.language(), "fr");
}

#[tokio::test]
async fn test_builder_keeps_fetch_options() {
    let client = Client::builder()
        .use_cheat(true)
        .fetcher(Arc::new(ScriptedFetcher::succeeding()))
        .dispatcher(Arc::new(InlineDispatcher))
        .build()
        .unwrap();

    assert_eq!(client.fetch_options(), FetchOptions { use_cheat: true });
}

#[tokio::test]
async fn test_builder_defaults_to_http_fetcher() {
    let client = Client::builder()
        .language("en")
        .dispatcher(Arc::new(InlineDispatcher))
        .build()
        .unwrap();

    assert_eq!(client.fetcher.name(), "http");
    assert_eq!(client.dispatcher.name(), "inline");
}

#[tokio::test]
async fn test_from_config_applies_settings() {
    let config = ClientConfig {
        language: Some("de".to_string()),
        fetch: FetchOptions { use_cheat: true },
        http: HttpConfig::default(),
    };

    let client = Client::from_config(&config).unwrap();
    assert_eq!(client.language(), "de");
    assert!(client.fetch_options().use_cheat);
}

#[test]
fn test_from_config_rejects_invalid_language() {
    let config = ClientConfig {
        language: Some("not a language".to_string()),
        ..Default::default()
    };

    match Client::from_config(&config) {
        Err(Error::Config { key, .. }) => assert_eq!(key.as_deref(), Some("language")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_from_config_rejects_invalid_endpoint() {
    let config = ClientConfig {
        http: HttpConfig {
            endpoint: "ftp://example.com/oembed".to_string(),
            ..Default::default()
        },
        ..Default::default()
    };

    assert!(matches!(
        Client::from_config(&config),
        Err(Error::Config { .. })
    ));
}

#[test]
fn test_default_client_is_shared() {
    let first = Client::default_client().unwrap();
    let second = Client::default_client().unwrap();

    assert!(Arc::ptr_eq(&first.fetcher, &second.fetcher));
    assert!(Arc::ptr_eq(&first.dispatcher, &second.dispatcher));
    assert_eq!(first.language(), second.language());
}

#[test]
fn test_with_locale_outside_runtime() {
    let client = Client::with_locale(Some("ja")).unwrap();
    assert_eq!(client.language(), "ja");
}

#[tokio::test]
async fn test_debug_names_collaborators() {
    let client = test_client(
        Arc::new(ScriptedFetcher::succeeding()),
        Arc::new(InlineDispatcher),
    );
    let debug = format!("{:?}", client);
    assert!(debug.contains("scripted"));
    assert!(debug.contains("inline"));
}

#[tokio::test]
async fn test_noop_fetcher_reports_unexpected_response() {
    let client = Client::builder()
        .fetcher(Arc::new(crate::fetcher::NoOpFetcher))
        .dispatcher(Arc::new(InlineDispatcher))
        .build()
        .unwrap();

    let failure = client.video(VALID_ID).await.unwrap_err();
    assert_eq!(failure.kind(), ErrorKind::UnexpectedResponse);
}

/// Spawn a trivial task on the client's runtime and wait for it
fn runtime_is_alive(client: &Client) -> bool {
    let task = client.runtime.spawn(async { 7 });
    matches!(client.runtime.block_on(task), Ok(7))
}

#[test]
fn test_with_locale_does_not_capture_caller_runtime() {
    let caller = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let client = caller.block_on(async { Client::with_locale(Some("fr")).unwrap() });
    drop(caller);

    assert!(runtime_is_alive(&client));
}

#[test]
fn test_from_config_does_not_capture_caller_runtime() {
    let caller = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let client = caller.block_on(async { Client::from_config(&ClientConfig::default()).unwrap() });
    drop(caller);

    assert!(runtime_is_alive(&client));
}

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use swapi_finder::dataset::{DirectoryDataset, EmbeddedDataset};
use swapi_finder::{
    Category, ClientConfig, DetailProvider, DetailRecord, LookupEngine, LookupError,
    SearchOptions, Selection, SwapiClient, TransportKind,
};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SwapiClient {
    SwapiClient::new(ClientConfig {
        base_url: server.uri(),
        timeout: Duration::from_millis(300),
        connect_timeout: Duration::from_secs(2),
    })
    .unwrap()
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_person() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/people/1",
        ResponseTemplate::new(200).set_body_json(json!({
            "name": "Luke Skywalker",
            "height": "172",
            "mass": "77",
            "films": ["https://swapi.dev/api/films/1/"],
            "homeworld": "https://swapi.dev/api/planets/1/",
            "extra": 1
        })),
    )
    .await;

    let client = client_for(&server);
    let record = client.fetch(Category::People, 1).await.unwrap();

    match record {
        DetailRecord::Person(person) => {
            assert_eq!(person.name, "Luke Skywalker");
            assert_eq!(person.mass, "77");
            assert_eq!(person.films.len(), 1);
            assert!(person.species.is_empty());
        }
        other => panic!("expected a person, got {:?}", other),
    }
}

#[tokio::test]
async fn test_typed_fetch_starship() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/starships/10",
        ResponseTemplate::new(200).set_body_json(json!({
            "name": "Millennium Falcon",
            "MGLT": "75",
            "pilots": ["https://swapi.dev/api/people/14/"]
        })),
    )
    .await;

    let falcon = client_for(&server).starship(10).await.unwrap();
    assert_eq!(falcon.name, "Millennium Falcon");
    assert_eq!(falcon.mglt, "75");
    assert_eq!(falcon.pilots.len(), 1);
}

#[tokio::test]
async fn test_not_found_references_endpoint() {
    let server = MockServer::start().await;
    mount(&server, "/people/1", ResponseTemplate::new(404)).await;

    let err = client_for(&server)
        .fetch(Category::People, 1)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.endpoint().unwrap().ends_with("people/1"));
}

#[tokio::test]
async fn test_server_errors() {
    let server = MockServer::start().await;
    mount(&server, "/planets/1", ResponseTemplate::new(500)).await;
    mount(&server, "/planets/2", ResponseTemplate::new(503)).await;

    let client = client_for(&server);
    for (id, expected) in [(1, 500), (2, 503)] {
        match client.fetch(Category::Planets, id).await {
            Err(LookupError::RemoteServer { status, endpoint }) => {
                assert_eq!(status, expected);
                assert!(endpoint.ends_with(&format!("planets/{}", id)));
            }
            other => panic!("expected RemoteServer, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_other_status_is_protocol_error() {
    let server = MockServer::start().await;
    mount(&server, "/starships/2", ResponseTemplate::new(429)).await;
    mount(&server, "/starships/3", ResponseTemplate::new(204)).await;

    let client = client_for(&server);
    assert!(matches!(
        client.fetch(Category::Starships, 2).await,
        Err(LookupError::Protocol { status: 429, .. })
    ));
    assert!(matches!(
        client.fetch(Category::Starships, 3).await,
        Err(LookupError::Protocol { status: 204, .. })
    ));
}

#[tokio::test]
async fn test_decode_error_carries_category_and_id() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/planets/7",
        ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
    )
    .await;
    mount(
        &server,
        "/planets/8",
        ResponseTemplate::new(200).set_body_json(json!({"name": ["not", "a", "string"]})),
    )
    .await;

    let client = client_for(&server);
    for id in [7, 8] {
        match client.fetch(Category::Planets, id).await {
            Err(LookupError::Decode {
                category,
                id: got,
                endpoint,
                ..
            }) => {
                assert_eq!(category, Category::Planets);
                assert_eq!(got, id);
                assert!(endpoint.ends_with(&format!("planets/{}", id)));
            }
            other => panic!("expected Decode, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_timeout_is_transport_timeout() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/people/4",
        ResponseTemplate::new(200)
            .set_body_json(json!({"name": "Darth Vader"}))
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let err = client_for(&server)
        .fetch(Category::People, 4)
        .await
        .unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {:?}", err);
}

#[tokio::test]
async fn test_connection_refused_is_transport_io() {
    // Grab a free port, then release it so nothing listens there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = SwapiClient::new(ClientConfig {
        base_url: uri,
        ..ClientConfig::default()
    })
    .unwrap();

    match client.fetch(Category::People, 1).await {
        Err(LookupError::Transport { kind, .. }) => assert_eq!(kind, TransportKind::Io),
        other => panic!("expected Transport, got {:?}", other),
    }
}

#[tokio::test]
async fn test_cancelled_fetch_never_succeeds() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/people/1",
        ResponseTemplate::new(200)
            .set_body_json(json!({"name": "Luke Skywalker"}))
            .set_delay(Duration::from_millis(250)),
    )
    .await;

    let client = SwapiClient::new(ClientConfig {
        base_url: server.uri(),
        ..ClientConfig::default()
    })
    .unwrap();
    let token = CancellationToken::new();
    let canceller = token.clone();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    match client.fetch_until(Category::People, 1, &token).await {
        Err(LookupError::Cancelled { endpoint }) => assert!(endpoint.ends_with("people/1")),
        other => panic!("expected Cancelled, got {:?}", other),
    }
}

#[tokio::test]
async fn test_engine_isolates_failures_across_categories() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/people/1",
        ResponseTemplate::new(200).set_body_json(json!({"name": "Luke Skywalker"})),
    )
    .await;
    mount(&server, "/planets/99", ResponseTemplate::new(404)).await;
    mount(&server, "/starships/10", ResponseTemplate::new(502)).await;
    mount(
        &server,
        "/starships/12",
        ResponseTemplate::new(200).set_body_json(json!({"name": "X-wing"})),
    )
    .await;

    let engine = LookupEngine::new(
        Arc::new(EmbeddedDataset::new()),
        Arc::new(client_for(&server)),
    )
    .with_options(SearchOptions {
        max_results: 5,
        concurrency: 2,
    });

    let selections = [
        Selection::new(Category::People, 1),
        Selection::new(Category::Planets, 99),
        Selection::new(Category::Starships, 10),
        Selection::new(Category::Starships, 12),
    ];
    let outcomes = engine.open_selected(&selections).await;

    assert_eq!(outcomes.len(), 4);
    assert_eq!(outcomes[0].result.as_ref().unwrap().name(), "Luke Skywalker");
    assert!(outcomes[1].result.as_ref().unwrap_err().is_not_found());
    assert!(matches!(
        outcomes[2].result,
        Err(LookupError::RemoteServer { status: 502, .. })
    ));
    assert_eq!(outcomes[3].result.as_ref().unwrap().name(), "X-wing");
    for (outcome, selection) in outcomes.iter().zip(selections) {
        assert_eq!(outcome.selection, selection);
    }
}

#[test]
fn test_search_bundled_datasets() {
    let engine = LookupEngine::new(
        Arc::new(EmbeddedDataset::new()),
        Arc::new(SwapiClient::with_client(reqwest::Client::new(), "http://unused")),
    );

    let response = engine.search("Luke Skywalker").unwrap();
    let people = response.entries(Category::People);
    assert_eq!(people[0].id, 1);
    assert_eq!(people[0].score, 0);
    assert_eq!(people.len(), 5);

    // Whole-name distance favours short names for short queries
    let response = engine.search("luke").unwrap();
    let people = response.entries(Category::People);
    assert!(people[0].score < 10);
    assert!(people.windows(2).all(|w| w[0].score <= w[1].score));

    let response = engine.search("tatoine").unwrap();
    assert_eq!(response.entries(Category::Planets)[0].id, 1);
    assert_eq!(response.entries(Category::Planets)[0].score, 1);

    let response = engine.search("millennium falcon").unwrap();
    assert_eq!(response.entries(Category::Starships)[0].id, 10);
    assert_eq!(response.entries(Category::Starships)[0].score, 0);
}

#[test]
fn test_directory_dataset_skips_bad_ids() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("PeopleQueries.json"),
        json!([
            {"id": 1, "strings": ["Luke Skywalker"]},
            {"id": "two", "strings": ["Leia Organa"]},
            {"id": "3", "strings": null},
            {"id": 4, "strings": ["Darth Vader", null]}
        ])
        .to_string(),
    )
    .unwrap();

    let source = DirectoryDataset::new(dir.path());
    let matcher = swapi_finder::FuzzyMatcher::new(Arc::new(source));

    let listed = matcher.list_all(Category::People).unwrap();
    let ids: Vec<i64> = listed.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 3, 4]);
    assert_eq!(listed[1].name, "Unnamed");
    assert_eq!(listed[2].name, "Darth Vader");

    let ranked = matcher.search(Category::People, "vader").unwrap();
    let ids: Vec<i64> = ranked.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![4, 1]);

    // Planets file was never written
    assert!(matches!(
        matcher.search(Category::Planets, "hoth"),
        Err(LookupError::DatasetLoad { .. })
    ));
}

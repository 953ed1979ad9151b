mod support;

use gpp_client::graphql::TransportError;
use gpp_client::models::{Existence, PosAngleConstraintMode, ScienceBand};
use gpp_client::{ClientConfig, ClientError, GppClient};
use serde_json::json;
use support::{fixture_path, fixture_schema, RecordingTransport};

#[test]
fn fetches_and_maps_an_observation() {
    let body = std::fs::read_to_string(fixture_path("observation_response.json")).unwrap();
    let client = GppClient::with_transport(RecordingTransport::with_body(&body), fixture_schema());

    let observation = client.get_observation("o-123").unwrap();
    assert_eq!(observation.observation_id, "o-123");
    assert_eq!(observation.title.as_deref(), Some("Test"));
    assert_eq!(observation.subtitle, None);
    assert_eq!(observation.science_band, Some(ScienceBand::Band1));
    assert_eq!(observation.existence, Some(Existence::Present));
    assert_eq!(
        observation.pos_angle_constraint.and_then(|c| c.mode),
        Some(PosAngleConstraintMode::AverageParallactic)
    );
    // Not selected by the query.
    assert_eq!(observation.index, None);
}

#[test]
fn sends_the_expected_query() {
    let transport = RecordingTransport::with_data(json!({"observation": {"id": "o-7"}}));
    let client = GppClient::with_transport(transport, fixture_schema());
    client.get_observation("o-7").unwrap();

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].query,
        r#"query { observation(observationId: "o-7") { id subtitle title scienceBand existence posAngleConstraint { mode } } }"#
    );
    assert!(requests[0].variables.is_empty());
}

#[test]
fn one_session_per_fetch_closed_on_success_and_failure() {
    let transport = RecordingTransport::new(|request| {
        if request.query.contains("o-bad") {
            Err(TransportError::GraphQl(vec!["boom".to_string()]))
        } else {
            Ok(json!({"observation": {"id": "o-1"}}))
        }
    });
    let client = GppClient::with_transport(transport, fixture_schema());

    client.get_observation("o-1").unwrap();
    assert!(client.get_observation("o-bad").is_err());

    assert_eq!(client.transport().opened(), 2);
    assert_eq!(client.transport().closed(), 2);
}

#[test]
fn null_or_missing_observation_is_not_found() {
    for data in [json!({"observation": null}), json!({})] {
        let client =
            GppClient::with_transport(RecordingTransport::with_data(data), fixture_schema());
        let err = client.get_observation("o-404").unwrap_err();
        assert!(matches!(err, ClientError::NotFound(id) if id == "o-404"));
        assert_eq!(client.transport().closed(), 1);
    }
}

#[test]
fn graphql_errors_surface_as_transport_errors() {
    let client = GppClient::with_transport(
        RecordingTransport::with_body(r#"{"data": null, "errors": [{"message": "No such observation"}]}"#),
        fixture_schema(),
    );
    let err = client.get_observation("o-1").unwrap_err();
    match err {
        ClientError::Transport(TransportError::GraphQl(messages)) => {
            assert_eq!(messages, ["No such observation"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn connection_failure_opens_no_session() {
    let client = GppClient::with_transport(RecordingTransport::unreachable(), fixture_schema());
    let err = client.get_observation("o-1").unwrap_err();
    assert!(matches!(
        err,
        ClientError::Transport(TransportError::Status { status: 503, .. })
    ));
    assert_eq!(client.transport().opened(), 0);
    assert_eq!(client.transport().closed(), 0);
}

#[test]
fn invalid_payload_is_a_validation_error() {
    let client = GppClient::with_transport(
        RecordingTransport::with_data(json!({
            "observation": {"id": "o-1", "scienceBand": "BAND_5", "title": null}
        })),
        fixture_schema(),
    );
    match client.get_observation("o-1").unwrap_err() {
        ClientError::Validation(errors) => {
            assert!(errors.has("scienceBand", "invalid_enum_value"));
            assert!(errors.has("title", "null_not_allowed"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn schema_without_observation_field_rejects_the_query() {
    let schema =
        gpp_client::graphql::SchemaDocument::parse("type Query { program(id: ID!): String }")
            .unwrap();
    let client = GppClient::with_transport(RecordingTransport::with_data(json!({})), schema);
    let err = client.get_observation("o-1").unwrap_err();
    assert!(matches!(err, ClientError::Query(_)));
    assert_eq!(client.transport().opened(), 0);
}

#[test]
fn new_fails_on_missing_schema_file() {
    let config = ClientConfig::new(
        "https://gpp.example.org/odb",
        "secret",
        "/definitely/missing/schema.graphql",
    );
    assert!(matches!(GppClient::new(&config), Err(ClientError::Schema(_))));
}

#[test]
fn new_validates_configuration() {
    let config = ClientConfig::new("gpp.example.org", "secret", fixture_path("schema.graphql"));
    assert!(matches!(
        GppClient::new(&config),
        Err(ClientError::Configuration(_))
    ));
}

#[test]
fn new_builds_http_client() {
    let config = ClientConfig::new(
        "https://gpp.example.org/odb",
        "secret",
        fixture_path("schema.graphql"),
    );
    let client = GppClient::new(&config).unwrap();
    assert_eq!(client.transport().url(), "https://gpp.example.org/odb");
    assert_eq!(client.schema().query_type(), "Query");
}

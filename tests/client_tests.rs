use async_trait::async_trait;
use bbbx::bbb::build_client_with_rest;
use bbbx::core::errors::BbbError;
use bbbx::core::kernel::{Attachment, ParamValue, Params, ResponseFormat, RestClient};
use bbbx::{BbbClient, CreateMeetingOptions, GetRecordingsOptions, JoinOptions, Role};
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct RecordedCall {
    method: Method,
    endpoint: String,
    params: Params,
    attachment: Option<(String, Vec<u8>)>,
    format: ResponseFormat,
}

/// Transport double: records every call and pops pre-programmed results.
struct MockRest {
    calls: Mutex<Vec<RecordedCall>>,
    results: Mutex<Vec<Result<Value, BbbError>>>,
}

impl MockRest {
    fn with_results(mut results: Vec<Result<Value, BbbError>>) -> Arc<Self> {
        results.reverse();
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            results: Mutex::new(results),
        })
    }

    fn success(payload: Value) -> Arc<Self> {
        Self::with_results(vec![Ok(payload)])
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RestClient for MockRest {
    async fn call(
        &self,
        method: Method,
        endpoint: &str,
        params: &Params,
        attachment: Option<Attachment>,
        format: ResponseFormat,
    ) -> Result<Value, BbbError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            endpoint: endpoint.to_string(),
            params: params.clone(),
            attachment: attachment.map(|a| (a.file_name, a.content)),
            format,
        });
        self.results
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Ok(json!({"returncode": "SUCCESS"})))
    }
}

fn client(mock: &Arc<MockRest>) -> BbbClient<Arc<MockRest>> {
    build_client_with_rest(Arc::clone(mock))
}

fn keys(params: &Params) -> Vec<&str> {
    params.iter().map(|(key, _)| key.as_str()).collect()
}

fn find<'a>(params: &'a Params, key: &str) -> Option<&'a ParamValue> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, value)| value)
}

#[tokio::test]
async fn get_api_version_calls_the_bare_api_path() {
    let mock = MockRest::success(json!({"returncode": "SUCCESS", "version": "2.0"}));

    let version = client(&mock).get_api_version().await.unwrap();

    assert_eq!(version["version"], "2.0");
    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].endpoint, "");
    assert_eq!(calls[0].method, Method::GET);
    assert_eq!(calls[0].format, ResponseFormat::Xml);
}

#[tokio::test]
async fn create_sends_only_present_parameters() {
    let mock = MockRest::success(json!({"returncode": "SUCCESS", "meetingID": "demo-1"}));
    let options = CreateMeetingOptions {
        record: Some(true),
        max_participants: Some(25),
        ..Default::default()
    };

    client(&mock).create("Demo", "demo-1", &options).await.unwrap();

    let calls = mock.calls();
    assert_eq!(calls[0].endpoint, "create");
    assert_eq!(
        keys(&calls[0].params),
        vec!["name", "meetingID", "maxParticipants", "record"]
    );
    assert_eq!(
        find(&calls[0].params, "record"),
        Some(&ParamValue::Bool(true))
    );
}

#[tokio::test]
async fn create_passes_meta_entries_through() {
    let mock = MockRest::success(json!({"returncode": "SUCCESS"}));
    let options = CreateMeetingOptions {
        meta: Some(vec![("origin".to_string(), "greenlight".to_string())]),
        ..Default::default()
    };

    client(&mock).create("Demo", "demo-1", &options).await.unwrap();

    let calls = mock.calls();
    assert_eq!(
        find(&calls[0].params, "meta"),
        Some(&ParamValue::Meta(vec![(
            "origin".to_string(),
            "greenlight".to_string()
        )]))
    );
}

#[tokio::test]
async fn join_sends_the_role_wire_string() {
    let mock = MockRest::success(json!({"returncode": "SUCCESS"}));

    client(&mock)
        .join("Ada", "demo-1", Role::Moderator, &JoinOptions::default())
        .await
        .unwrap();

    let calls = mock.calls();
    assert_eq!(calls[0].endpoint, "join");
    assert_eq!(
        find(&calls[0].params, "role"),
        Some(&ParamValue::Str("MODERATOR".to_string()))
    );
    assert_eq!(keys(&calls[0].params), vec!["fullName", "meetingID", "role"]);
}

#[tokio::test]
async fn get_recordings_projects_mapping_values_in_order() {
    let mock = MockRest::success(json!({
        "returncode": "SUCCESS",
        "recordings": {
            "id1": {"recordID": "r1"},
            "id2": {"recordID": "r2"}
        }
    }));

    let recordings = client(&mock)
        .get_recordings(&GetRecordingsOptions::default())
        .await
        .unwrap();

    assert_eq!(recordings.len(), 2);
    assert_eq!(recordings[0]["recordID"], "r1");
    assert_eq!(recordings[1]["recordID"], "r2");
}

#[tokio::test]
async fn get_recordings_without_payload_yields_empty_list() {
    // An empty <recordings/> element decodes to an empty string.
    let mock = MockRest::success(json!({"returncode": "SUCCESS", "recordings": ""}));

    let recordings = client(&mock)
        .get_recordings(&GetRecordingsOptions::default())
        .await
        .unwrap();

    assert!(recordings.is_empty());
}

#[tokio::test]
async fn get_recordings_forwards_record_id_list() {
    let mock = MockRest::success(json!({"returncode": "SUCCESS", "recordings": ""}));
    let options = GetRecordingsOptions {
        record_id: Some(vec!["a".to_string(), "b".to_string()].into()),
        ..Default::default()
    };

    client(&mock).get_recordings(&options).await.unwrap();

    let calls = mock.calls();
    assert_eq!(
        find(&calls[0].params, "recordID"),
        Some(&ParamValue::List(vec!["a".to_string(), "b".to_string()]))
    );
}

#[tokio::test]
async fn publish_recordings_goes_through_the_get_recordings_endpoint() {
    let mock = MockRest::success(json!({"returncode": "SUCCESS", "published": "true"}));

    client(&mock).publish_recordings("r1", true).await.unwrap();

    let calls = mock.calls();
    assert_eq!(calls[0].endpoint, "getRecordings");
    assert_eq!(
        find(&calls[0].params, "publish"),
        Some(&ParamValue::Bool(true))
    );
}

#[tokio::test]
async fn update_recordings_sends_ids_and_meta() {
    let mock = MockRest::success(json!({"returncode": "SUCCESS", "updated": "true"}));

    client(&mock)
        .update_recordings(
            "r1",
            vec![("presenter".to_string(), "Ada".to_string())],
        )
        .await
        .unwrap();

    let calls = mock.calls();
    assert_eq!(calls[0].endpoint, "updateRecordings");
    assert_eq!(
        find(&calls[0].params, "recordID"),
        Some(&ParamValue::Str("r1".to_string()))
    );
    assert_eq!(
        find(&calls[0].params, "meta"),
        Some(&ParamValue::Meta(vec![(
            "presenter".to_string(),
            "Ada".to_string()
        )]))
    );
}

#[tokio::test]
async fn get_recording_text_tracks_expects_json_and_projects_tracks() {
    let mock = MockRest::success(json!({
        "returncode": "SUCCESS",
        "tracks": [
            {"kind": "subtitles", "lang": "en"},
            {"kind": "captions", "lang": "de"}
        ]
    }));

    let tracks = client(&mock).get_recording_text_tracks("r1").await.unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0]["lang"], "en");
    let calls = mock.calls();
    assert_eq!(calls[0].format, ResponseFormat::Json);
    assert_eq!(calls[0].endpoint, "getRecordingTextTracks");
}

#[tokio::test]
async fn put_recording_text_track_requires_the_file_to_exist() {
    let mock = MockRest::success(json!({"returncode": "SUCCESS"}));

    let err = client(&mock)
        .put_recording_text_track(
            "r1",
            "subtitles",
            "en",
            "English",
            std::path::Path::new("/definitely/not/here.vtt"),
        )
        .await
        .unwrap_err();

    assert_eq!(err.code(), "fileDoesNotExist");
    assert!(mock.calls().is_empty(), "no network call may happen");
}

#[tokio::test]
async fn put_recording_text_track_uploads_the_file_content() {
    let mock = MockRest::success(json!({"returncode": "SUCCESS", "recordID": "r1"}));
    let path = std::env::temp_dir().join(format!("bbbx-track-{}.vtt", std::process::id()));
    std::fs::write(&path, b"WEBVTT\n").unwrap();

    let result = client(&mock)
        .put_recording_text_track("r1", "subtitles", "en", "English", &path)
        .await;
    std::fs::remove_file(&path).unwrap();
    result.unwrap();

    let calls = mock.calls();
    assert_eq!(calls[0].method, Method::POST);
    assert_eq!(calls[0].endpoint, "putRecordingTextTrack");
    assert_eq!(calls[0].format, ResponseFormat::Json);
    let (_, content) = calls[0].attachment.as_ref().unwrap();
    assert_eq!(content, b"WEBVTT\n");
    assert_eq!(
        keys(&calls[0].params),
        vec!["recordID", "kind", "lang", "label"]
    );
}

#[tokio::test]
async fn insert_document_is_a_stub_and_never_calls_out() {
    let mock = MockRest::success(json!({"returncode": "SUCCESS"}));

    let err = client(&mock).insert_document().await.unwrap_err();

    assert_eq!(err.code(), "notYetImplemented");
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn server_failures_surface_code_and_message() {
    let mock = MockRest::with_results(vec![Err(BbbError::Api {
        code: "notFound".to_string(),
        message: "Meeting not found".to_string(),
    })]);

    let err = client(&mock).get_meeting_info("missing").await.unwrap_err();

    assert_eq!(err.code(), "notFound");
    assert_eq!(err.message(), "Meeting not found");
}

#[tokio::test]
async fn concurrent_calls_share_one_client() {
    let mock = MockRest::with_results(vec![
        Ok(json!({"returncode": "SUCCESS", "ended": "a"})),
        Ok(json!({"returncode": "SUCCESS", "ended": "b"})),
    ]);
    let client = client(&mock);

    let (first, second) = futures::join!(client.end("a"), client.end("b"));

    first.unwrap();
    second.unwrap();
    assert_eq!(mock.calls().len(), 2);
}

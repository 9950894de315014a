mod support;

use support::http::{CannedResponse, FakeServer};

use uda_client::{
    backend::{Backend, HttpBackend},
    config::BackendSettings,
    error::{ClientError, TransportError},
    prediction::PredictedLabel,
    uploads::{CsvFile, UploadSet, UploadSlot},
};

const PROCESS_OK: &str = r#"{
    "metrics": {
        "accuracy": 0.9123, "f1_score": 0.88, "precision": 0.9, "recall": 0.85,
        "processing_time": 12.345,
        "class_wise": {"0": {"precision": 0.8, "recall": 0.7, "f1-score": 0.75, "support": 100}}
    },
    "csv": "Label\r\n0\r\n1\r\n"
}"#;

fn backend_for(server: &FakeServer) -> HttpBackend {
    let settings = BackendSettings {
        base_url: server.base_url.clone(),
        ..BackendSettings::default()
    };
    HttpBackend::new(&settings).unwrap()
}

fn uploads() -> UploadSet {
    let mut set = UploadSet::default();
    set.set(UploadSlot::Source, CsvFile::from_bytes("source.csv", "f1,Label\n1,0\n"));
    set.set(UploadSlot::Target, CsvFile::from_bytes("target.csv", "f1\n2\n"));
    set.set(UploadSlot::Columns, CsvFile::from_bytes("cols.csv", "column\nf1\nLabel\n"));
    set
}

#[test]
fn process_data_posts_three_named_parts_and_parses_response() {
    let server = FakeServer::start(vec![CannedResponse::json(200, PROCESS_OK)]);
    let backend = backend_for(&server);

    let outcome = backend.process_data(&uploads().complete().unwrap()).unwrap();

    assert_eq!(outcome.metrics.accuracy, 0.9123);
    assert_eq!(outcome.metrics.class_wise.get("0").unwrap().support, 100.0);
    assert_eq!(outcome.predictions.as_str(), "Label\r\n0\r\n1\r\n");

    let request = server.next_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/process-data");
    let content_type = request.header("content-type").unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));
    let body = request.body_text();
    for (field, file, contents) in [
        ("source_file", "source.csv", "f1,Label\n1,0\n"),
        ("target_file", "target.csv", "f1\n2\n"),
        ("columns_file", "cols.csv", "column\nf1\nLabel\n"),
    ] {
        assert!(body.contains(&format!("name=\"{field}\"; filename=\"{file}\"")));
        assert!(body.contains(contents));
    }
}

#[test]
fn backend_detail_becomes_error_message() {
    let server = FakeServer::start(vec![CannedResponse::json(
        400,
        r#"{"detail": "The 'Label' column must be present in the useful columns file."}"#,
    )]);
    let backend = backend_for(&server);

    let err = backend.process_data(&uploads().complete().unwrap()).unwrap_err();

    assert_eq!(
        err,
        ClientError::Backend {
            status: 400,
            message: "The 'Label' column must be present in the useful columns file.".into(),
        }
    );
}

#[test]
fn error_without_json_detail_reports_status() {
    let server = FakeServer::start(vec![CannedResponse::text(500, "Internal Server Error")]);
    let backend = backend_for(&server);

    let err = backend.process_data(&uploads().complete().unwrap()).unwrap_err();

    assert_eq!(err.to_string(), "HTTP error! status: 500");
}

#[test]
fn structured_detail_is_rendered_as_json() {
    let server = FakeServer::start(vec![CannedResponse::json(
        422,
        r#"{"detail": [{"loc": ["body", "single_file"], "msg": "field required"}]}"#,
    )]);
    let backend = backend_for(&server);

    let err = backend
        .predict_single(&CsvFile::from_bytes("row.csv", "f1\n1\n"))
        .unwrap_err();

    let ClientError::Backend { status, message } = err else {
        panic!("expected backend error, got {err:?}");
    };
    assert_eq!(status, 422);
    assert!(message.contains("field required"));
}

#[test]
fn malformed_success_body_is_a_transport_error() {
    let server = FakeServer::start(vec![
        CannedResponse::json(200, "not json"),
        CannedResponse::json(200, r#"{"metrics": {"accuracy": 1}}"#),
    ]);
    let backend = backend_for(&server);

    for _ in 0..2 {
        let err = backend.process_data(&uploads().complete().unwrap()).unwrap_err();
        assert!(
            matches!(err, ClientError::Transport(TransportError::MalformedBody(_))),
            "unexpected error: {err:?}"
        );
    }
}

#[test]
fn predict_single_sends_one_part_and_keeps_label_verbatim() {
    let server = FakeServer::start(vec![
        CannedResponse::json(200, r#"{"prediction": 3}"#),
        CannedResponse::json(200, r#"{"prediction": "DDoS"}"#),
        CannedResponse::json(200, r#"{"prediction": null}"#),
    ]);
    let backend = backend_for(&server);
    let row = CsvFile::from_bytes("row.csv", "Protocol,Flow Duration\n6,120\n");

    let label = backend.predict_single(&row).unwrap();
    assert_eq!(label, PredictedLabel::Number(serde_json::Number::from(3u64)));
    assert_eq!(label.to_string(), "3");
    let request = server.next_request();
    assert_eq!(request.path, "/predict-single");
    let body = request.body_text();
    assert!(body.contains("name=\"single_file\"; filename=\"row.csv\""));
    assert!(!body.contains("source_file"));

    assert_eq!(backend.predict_single(&row).unwrap().to_string(), "DDoS");
    assert!(matches!(
        backend.predict_single(&row).unwrap_err(),
        ClientError::Transport(TransportError::MalformedBody(_))
    ));
}

#[test]
fn unreachable_backend_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let settings = BackendSettings {
        base_url: format!("http://{addr}"),
        ..BackendSettings::default()
    };
    let backend = HttpBackend::new(&settings).unwrap();

    let err = backend
        .predict_single(&CsvFile::from_bytes("row.csv", "f1\n1\n"))
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Transport(TransportError::Network(_))
    ));
}

#[test]
fn base_url_path_prefix_is_preserved() {
    let settings = BackendSettings {
        base_url: "https://ml.example.org/uda".into(),
        ..BackendSettings::default()
    };
    let backend = HttpBackend::new(&settings).unwrap();
    assert_eq!(backend.base_url().as_str(), "https://ml.example.org/uda/");

    let settings = BackendSettings {
        base_url: "ftp://ml.example.org".into(),
        ..BackendSettings::default()
    };
    assert!(matches!(
        HttpBackend::new(&settings).unwrap_err(),
        TransportError::InvalidUrl(_)
    ));
}

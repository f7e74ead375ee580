/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! End-to-end tests: the client against a live case-api server.

#[cfg(not(target_arch = "wasm32"))]
mod tests {
    use case_api::config::VideoSdkConfig;
    use case_api::{routes, state::AppState, storage::CaseStore};
    use case_api_client::{ApiError, CaseApiClient};
    use evidence_collector::platform::NativePlatform;
    use evidence_collector::{CollectError, CollectOptions};
    use meeting_evidence_types::requests::StartCaseRequest;
    use tempfile::TempDir;

    struct Server {
        base_url: String,
        store: CaseStore,
        _dir: TempDir,
    }

    async fn spawn_server() -> Server {
        let dir = tempfile::tempdir().unwrap();
        let store = CaseStore::new(dir.path());
        let state = AppState {
            store: store.clone(),
            videosdk: Some(VideoSdkConfig {
                api_key: "key".to_string(),
                secret: "secret".to_string(),
            }),
            videosdk_api_url: "http://127.0.0.1:1".to_string(),
            token_ttl_secs: 600,
            http: reqwest::Client::new(),
        };
        let app = routes::router().with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Server {
            base_url: format!("http://{addr}"),
            store,
            _dir: dir,
        }
    }

    fn request() -> StartCaseRequest {
        StartCaseRequest {
            meeting_id: Some("abcd-efgh-ijkl".to_string()),
            participant_name: Some("Ana".to_string()),
            role: Some("creator".to_string()),
            mode: None,
        }
    }

    fn platform() -> NativePlatform {
        NativePlatform::with_vars([("LANG", "pt_BR.UTF-8"), ("TZ", "America/Sao_Paulo")])
            .with_user_agent("join-bot/1.0")
    }

    #[tokio::test]
    async fn test_collect_and_submit_stores_evidence() {
        let server = spawn_server().await;
        let client = CaseApiClient::new(&server.base_url);

        let case_id = client
            .collect_and_submit(&platform(), &request(), CollectOptions::default())
            .await
            .expect("flow succeeds");

        let case = server.store.load(&case_id).await.unwrap();
        assert_eq!(case.server_evidence.meeting_id, "abcd-efgh-ijkl");
        assert_eq!(case.server_evidence.mode, "create");
        assert_eq!(case.client_evidence.len(), 1);

        let data = &case.client_evidence[0].data;
        assert_eq!(data["userAgent"], "join-bot/1.0");
        assert_eq!(data["language"], "pt-BR");
        assert_eq!(data["timezone"], "America/Sao_Paulo");
        assert_eq!(data["permissions"]["supported"], false);
        assert_eq!(data["geo"]["supported"], false);
    }

    #[tokio::test]
    async fn test_require_geo_failure_keeps_the_case() {
        let server = spawn_server().await;
        let client = CaseApiClient::new(&server.base_url);

        let err = client
            .collect_and_submit(
                &platform(),
                &request(),
                CollectOptions::default().require_geo(true),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Evidence(CollectError::GeolocationRequired { .. })
        ));

        let mut entries = tokio::fs::read_dir(server.store.dir()).await.unwrap();
        let file = entries.next_entry().await.unwrap().expect("case file written");
        let case_id = file
            .file_name()
            .to_string_lossy()
            .trim_end_matches(".json")
            .to_string();
        let case = server.store.load(&case_id).await.unwrap();
        assert!(case.client_evidence.is_empty());
    }

    #[tokio::test]
    async fn test_start_case_without_meeting_is_bad_request() {
        let server = spawn_server().await;
        let client = CaseApiClient::new(&server.base_url);

        let err = client
            .start_case(&StartCaseRequest::default())
            .await
            .unwrap_err();
        match err {
            ApiError::BadRequest(message) => assert!(message.contains("MISSING_MEETING_ID")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_submit_to_unknown_case_is_not_found() {
        let server = spawn_server().await;
        let client = CaseApiClient::new(&server.base_url);
        let record = evidence_collector::collect(&platform(), CollectOptions::default())
            .await
            .unwrap();

        let err = client
            .submit_evidence("0b9d2a52-0000-4000-8000-000000000000", &record)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_fetch_videosdk_token() {
        let server = spawn_server().await;
        let client = CaseApiClient::new(&server.base_url);

        let token = client.fetch_videosdk_token().await.unwrap();
        assert_eq!(token.split('.').count(), 3, "token is a JWT: {token}");
    }

    #[tokio::test]
    async fn test_create_room_with_unreachable_provider_is_server_error() {
        let server = spawn_server().await;
        let client = CaseApiClient::new(&server.base_url);

        let err = client.create_room("token").await.unwrap_err();
        assert!(matches!(err, ApiError::ServerError { status: 502, .. }));
    }
}

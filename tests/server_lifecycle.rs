mod common;

use common::{complete_at, create_project_workspace, create_test_backend, inserted_text, labels};
use tower_lsp::LanguageServer;
use tower_lsp::lsp_types::*;

#[tokio::test]
async fn initialize_reports_server_info_and_triggers() {
    let backend = create_test_backend();
    let result = backend
        .initialize(InitializeParams::default())
        .await
        .unwrap();

    let info = result.server_info.expect("server info");
    assert_eq!(info.name, "RequiemLSP");
    assert!(info.version.is_some());

    let completion = result
        .capabilities
        .completion_provider
        .expect("completion capability");
    let triggers = completion.trigger_characters.expect("trigger characters");
    for expected in ["(", "'", "\"", "/"] {
        assert!(triggers.contains(&expected.to_string()), "missing {expected}");
    }
}

#[tokio::test]
async fn workspace_config_changes_the_quote_style() {
    let (backend, dir) =
        create_project_workspace(&[("app.js", ""), ("requiem.toml", "quote = \"double\"\n")]);

    let root_uri = Url::from_file_path(dir.path()).unwrap();
    backend
        .initialize(InitializeParams {
            root_uri: Some(root_uri),
            ..InitializeParams::default()
        })
        .await
        .unwrap();

    let uri = Url::from_file_path(dir.path().join("app.js")).unwrap();
    let items = complete_at(&backend, &uri, "require(", 0, 8).await;
    let http = items.iter().find(|i| i.label == "http").unwrap();
    assert_eq!(inserted_text(http), "\"http\"");
}

#[tokio::test]
async fn did_change_replaces_the_snapshot() {
    let backend = create_test_backend();
    let uri = Url::parse("file:///proj/app.js").unwrap();

    // Open with text that does not trigger, then edit into one that does.
    let items = complete_at(&backend, &uri, "var x = 1;", 0, 10).await;
    assert!(items.is_empty());

    backend
        .did_change(DidChangeTextDocumentParams {
            text_document: VersionedTextDocumentIdentifier {
                uri: uri.clone(),
                version: 2,
            },
            content_changes: vec![TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: "var x = require(".to_string(),
            }],
        })
        .await;

    let result = backend
        .completion(CompletionParams {
            text_document_position: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier { uri: uri.clone() },
                position: Position { line: 0, character: 16 },
            },
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
            context: None,
        })
        .await
        .unwrap();

    let Some(CompletionResponse::Array(items)) = result else {
        panic!("expected completions after the edit");
    };
    assert!(labels(&items).contains(&"http".to_string()));
}

#[tokio::test]
async fn closed_documents_stop_completing() {
    let backend = create_test_backend();
    let uri = Url::parse("file:///proj/app.js").unwrap();

    let items = complete_at(&backend, &uri, "require(", 0, 8).await;
    assert!(!items.is_empty());

    backend
        .did_close(DidCloseTextDocumentParams {
            text_document: TextDocumentIdentifier { uri: uri.clone() },
        })
        .await;

    let result = backend
        .completion(CompletionParams {
            text_document_position: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier { uri },
                position: Position { line: 0, character: 8 },
            },
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
            context: None,
        })
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn watched_file_events_drop_the_candidate_cache() {
    let (backend, dir) = create_project_workspace(&[("app.js", ""), ("util.js", "")]);
    let uri = Url::from_file_path(dir.path().join("app.js")).unwrap();

    let first = complete_at(&backend, &uri, "require(", 0, 8).await;
    assert!(labels(&first).contains(&"./util".to_string()));

    // A new dependency lands on disk; the watcher tells us about it.
    std::fs::create_dir_all(dir.path().join("node_modules/left-pad")).unwrap();
    std::fs::write(dir.path().join("node_modules/left-pad/index.js"), "").unwrap();
    backend
        .did_change_watched_files(DidChangeWatchedFilesParams {
            changes: vec![FileEvent {
                uri: Url::from_file_path(dir.path().join("node_modules/left-pad/index.js"))
                    .unwrap(),
                typ: FileChangeType::CREATED,
            }],
        })
        .await;

    let second = complete_at(&backend, &uri, "require(", 0, 8).await;
    assert!(labels(&second).contains(&"left-pad".to_string()), "got {:?}", labels(&second));
}

#[tokio::test]
async fn shutdown_succeeds() {
    let backend = create_test_backend();
    assert!(backend.shutdown().await.is_ok());
}

// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup from a config pointing at a knowledge base on disk.

use std::io::Write;
use std::sync::Arc;

use sova_agent::{bootstrap, APOLOGY_MESSAGE};
use sova_config::SovaConfig;
use sova_core::{ChatMessage, SovaError};
use sova_test_utils::{MockChatModel, MockEmbedder};

fn config_for(kb_path: &std::path::Path) -> SovaConfig {
    let mut config = SovaConfig::default();
    config.knowledge.path = kb_path.display().to_string();
    config.agent.system_prompt = Some("Отвечай кратко.".into());
    config
}

fn write_kb(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn bootstrapped_processor_grounds_answer_in_knowledge_base() {
    let kb = write_kb(
        "Первая пара начинается в 9:00\\\\Вторая пара начинается в 10:30\\\\Курить на территории запрещено",
    );
    let model = Arc::new(MockChatModel::with_responses(vec![
        "Вторая пара начинается в 10:30.".into(),
    ]));
    let embedder = Arc::new(MockEmbedder::new());

    let processor = bootstrap(&config_for(kb.path()), model.clone(), embedder)
        .await
        .unwrap();

    let reply = processor
        .answer("student", "Во сколько начинается вторая пара?")
        .await;
    assert_eq!(reply, "Вторая пара начинается в 10:30.");

    let request = model.last_request().await.unwrap();
    assert_eq!(request[0], ChatMessage::System("Отвечай кратко.".into()));
    let context = request.last().unwrap().content();
    assert!(context.contains("Вторая пара начинается в 10:30"));
}

#[tokio::test]
#[tracing_test::traced_test]
async fn startup_log_names_the_adapters() {
    let kb = write_kb("Библиотека открыта до 20:00");
    bootstrap(
        &config_for(kb.path()),
        Arc::new(MockChatModel::new()),
        Arc::new(MockEmbedder::new()),
    )
    .await
    .unwrap();

    assert!(logs_contain("query processor ready"));
    assert!(logs_contain("mock-chat"));
    assert!(logs_contain("mock-embedder"));
}

#[tokio::test]
async fn missing_knowledge_base_aborts_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir.path().join("absent.txt"));

    let result = bootstrap(
        &config,
        Arc::new(MockChatModel::new()),
        Arc::new(MockEmbedder::new()),
    )
    .await;
    assert!(matches!(result, Err(SovaError::Load { .. })));
}

#[tokio::test]
async fn embedding_failure_during_index_build_aborts_startup() {
    let kb = write_kb("один\\\\два");
    let embedder = MockEmbedder::new();
    embedder.set_failing(true);

    let result = bootstrap(
        &config_for(kb.path()),
        Arc::new(MockChatModel::new()),
        Arc::new(embedder),
    )
    .await;
    assert!(matches!(result, Err(SovaError::Embedding { .. })));
}

#[tokio::test]
async fn concurrent_users_are_isolated() {
    let kb = write_kb("факт");
    let processor = Arc::new(
        bootstrap(
            &config_for(kb.path()),
            Arc::new(MockChatModel::new()),
            Arc::new(MockEmbedder::new()),
        )
        .await
        .unwrap(),
    );

    let tasks: Vec<_> = (0..4)
        .map(|i| {
            let processor = Arc::clone(&processor);
            tokio::spawn(async move { processor.answer(&format!("user-{i}"), "вопрос").await })
        })
        .collect();
    for task in tasks {
        assert_ne!(task.await.unwrap(), APOLOGY_MESSAGE);
    }

    for i in 0..4 {
        assert_eq!(processor.memory().history(&format!("user-{i}")).len(), 3);
    }
}

// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History store behavior through the `HistoryStore` trait.

use helpdesk_config::model::StorageConfig;
use helpdesk_core::types::DEFAULT_HISTORY_LIMIT;
use helpdesk_core::{HistoryStore, NewExchange};
use helpdesk_storage::SqliteHistory;
use tempfile::TempDir;

async fn open_store() -> (SqliteHistory, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteHistory::new(StorageConfig {
        database_path: dir.path().join("history.db").display().to_string(),
        wal_mode: true,
    });
    store.initialize().await.unwrap();
    (store, dir)
}

#[tokio::test]
async fn user_without_history_gets_empty_list() {
    let (store, _dir) = open_store().await;
    let history = store.recent(42, DEFAULT_HISTORY_LIMIT).await.unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn appended_exchanges_come_back_newest_first() {
    let (store, _dir) = open_store().await;

    for i in 0..5 {
        store
            .append(&NewExchange::new(
                42,
                Some("ivan"),
                format!("question {i}"),
                format!("answer {i}"),
            ))
            .await
            .unwrap();
    }

    let history = store.recent(42, DEFAULT_HISTORY_LIMIT).await.unwrap();
    assert_eq!(history.len(), 5);
    for (pos, exchange) in history.iter().enumerate() {
        let i = 4 - pos;
        assert_eq!(exchange.user_id, 42);
        assert_eq!(exchange.username, "ivan");
        assert_eq!(exchange.message, format!("question {i}"));
        assert_eq!(exchange.response, format!("answer {i}"));
    }
    assert!(
        history
            .windows(2)
            .all(|pair| pair[0].timestamp >= pair[1].timestamp)
    );
    // Rows written in the same millisecond still come back in reverse insertion order.
    assert!(history.windows(2).all(|pair| pair[0].id > pair[1].id));
}

#[tokio::test]
async fn only_the_most_recent_twenty_are_returned() {
    let (store, _dir) = open_store().await;

    for i in 0..25 {
        store
            .append(&NewExchange::new(9, None, format!("m{i}"), format!("r{i}")))
            .await
            .unwrap();
    }

    let history = store.recent(9, DEFAULT_HISTORY_LIMIT).await.unwrap();
    assert_eq!(history.len(), 20);
    assert_eq!(history.first().unwrap().message, "m24");
    assert_eq!(history.last().unwrap().message, "m5");
}

#[tokio::test]
async fn users_do_not_see_each_other() {
    let (store, _dir) = open_store().await;

    store
        .append(&NewExchange::new(1, Some("a"), "from one", "r"))
        .await
        .unwrap();
    store
        .append(&NewExchange::new(2, Some("b"), "from two", "r"))
        .await
        .unwrap();

    let one = store.recent(1, DEFAULT_HISTORY_LIMIT).await.unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].message, "from one");
    assert!(one.iter().all(|e| e.user_id == 1));

    assert!(
        store
            .recent(3, DEFAULT_HISTORY_LIMIT)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn history_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        database_path: dir.path().join("persist.db").display().to_string(),
        wal_mode: true,
    };

    let store = SqliteHistory::new(config.clone());
    store.initialize().await.unwrap();
    store
        .append(&NewExchange::new(42, Some("ivan"), "Сколько стоит неделя?", "2900 рублей за неделю"))
        .await
        .unwrap();
    store.close().await.unwrap();
    drop(store);

    let reopened = SqliteHistory::new(config);
    reopened.initialize().await.unwrap();
    let history = reopened.recent(42, DEFAULT_HISTORY_LIMIT).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].response, "2900 рублей за неделю");
}

#[cfg(test)]
mod tests {
    use crate::utils::{
        CURRENT_VERSION, LEGACY_VERSION, STATEMENT_DURATION, TableServer, ids, table_row,
    };
    use connectors::sql::base::error::DbError;
    use engine_config::settings::{CursorSettings, env::EnvVars};
    use futures::TryStreamExt;
    use model::core::value::Value;
    use std::{collections::HashMap, num::NonZeroUsize, sync::Arc};
    use tracing_test::traced_test;

    fn batch(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_select_is_paginated_in_batch_size_steps() {
        let server = Arc::new(TableServer::with_rows(10));
        let mut cursor = server
            .connect(CURRENT_VERSION)
            .cursor_with_batch_size(batch(3));

        cursor.execute("SELECT * FROM t;", None, None).await.unwrap();
        let rows = cursor.fetch_all().await.unwrap();

        assert_eq!(ids(&rows), (1..=10).collect::<Vec<_>>());
        assert_eq!(
            server.statements(),
            vec![
                "SELECT * FROM t limit 1",
                "SELECT * FROM t limit 3 offset 0",
                "SELECT * FROM t limit 3 offset 3",
                "SELECT * FROM t limit 3 offset 6",
                "SELECT * FROM t limit 3 offset 9",
                "SELECT * FROM t limit 3 offset 10",
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_many_recovers_same_rows_as_fetch_all() {
        let server = Arc::new(TableServer::with_rows(7));
        let conn = server.connect(CURRENT_VERSION);

        let mut all = conn.cursor_with_batch_size(batch(2));
        all.execute("select * from t", None, None).await.unwrap();
        let expected = all.fetch_all().await.unwrap();

        let mut chunked = conn.cursor_with_batch_size(batch(2));
        chunked.execute("select * from t", None, None).await.unwrap();
        let mut collected = Vec::new();
        loop {
            let chunk = chunked.fetch_many(Some(3)).await.unwrap();
            assert!(chunk.len() <= 3);
            if chunk.is_empty() {
                break;
            }
            collected.extend(chunk);
        }

        assert_eq!(collected, expected);
        assert_eq!(collected.len(), 7);
    }

    #[tokio::test]
    async fn test_statement_with_limit_is_not_rewritten() {
        let server = Arc::new(TableServer::with_rows(10));
        let mut cursor = server.connect(CURRENT_VERSION).cursor();

        cursor
            .execute("select * from t limit 4", None, None)
            .await
            .unwrap();

        assert_eq!(server.statements(), vec!["select * from t limit 4"]);
        assert_eq!(cursor.fetch_all().await.unwrap().len(), 4);
        assert_eq!(cursor.rowcount(), 4);
        assert_eq!(cursor.duration(), STATEMENT_DURATION);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_rejected_probe_runs_statement_directly() {
        let server = Arc::new(TableServer::with_rows(3).rejecting_probes());
        let mut cursor = server.connect(CURRENT_VERSION).cursor();

        cursor.execute("select * from t", None, None).await.unwrap();

        assert_eq!(
            server.statements(),
            vec!["select * from t limit 1", "select * from t"]
        );
        assert_eq!(
            cursor.fetch_all().await.unwrap(),
            vec![table_row(1), table_row(2), table_row(3)]
        );
        assert!(logs_contain("Probe rejected"));
    }

    #[tokio::test]
    async fn test_transport_error_mid_pagination_passes_through() {
        // calls: probe, page 0, page 2 (fails)
        let server = Arc::new(TableServer::with_rows(5).failing_on_call(2));
        let mut cursor = server
            .connect(CURRENT_VERSION)
            .cursor_with_batch_size(batch(2));

        cursor.execute("select * from t", None, None).await.unwrap();
        assert_eq!(ids(&cursor.fetch_many(Some(2)).await.unwrap()), vec![1, 2]);

        let err = cursor.fetch_one().await.unwrap_err();
        assert!(matches!(err, DbError::Transport(_)));

        // the failed page is requested again on the next pull
        assert_eq!(ids(&cursor.fetch_all().await.unwrap()), vec![3, 4, 5]);
    }

    #[tokio::test]
    async fn test_closing_cursor_mid_stream() {
        let server = Arc::new(TableServer::with_rows(4));
        let mut cursor = server
            .connect(CURRENT_VERSION)
            .cursor_with_batch_size(batch(2));

        cursor.execute("select * from t", None, None).await.unwrap();
        assert!(cursor.fetch_one().await.unwrap().is_some());
        cursor.close();

        assert!(cursor.fetch_one().await.unwrap_err().is_programming());
        assert_eq!(cursor.rowcount(), -1);
        assert!(cursor.description().is_none());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_row_stream_warns_and_drains() {
        let server = Arc::new(TableServer::with_rows(5));
        let mut cursor = server
            .connect(CURRENT_VERSION)
            .cursor_with_batch_size(batch(2));

        cursor.execute("select * from t", None, None).await.unwrap();
        let rows: Vec<_> = cursor.rows().try_collect().await.unwrap();

        assert_eq!(ids(&rows), vec![1, 2, 3, 4, 5]);
        assert!(logs_contain("shares its position"));
    }

    #[tokio::test]
    async fn test_execute_many_bulk() {
        let server = Arc::new(TableServer::with_rows(0));
        let mut cursor = server.connect(CURRENT_VERSION).cursor();

        let results = cursor
            .execute_many(
                "insert into t values (?)",
                vec![vec![1.into()], vec![2.into()], vec![3.into()]],
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(server.requests().len(), 1);
        assert_eq!(cursor.rowcount(), 3);
        assert_eq!(cursor.duration(), STATEMENT_DURATION);
    }

    #[tokio::test]
    async fn test_execute_many_legacy() {
        let server = Arc::new(TableServer::with_rows(0));
        let mut cursor = server.connect(LEGACY_VERSION).cursor();

        let results = cursor
            .execute_many(
                "insert into t values (?)",
                vec![vec![1.into()], vec![2.into()], vec![3.into()]],
            )
            .await
            .unwrap();

        assert!(results.is_none());
        let requests = server.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[2].args, Some(vec![Value::Int(3)]));
        assert_eq!(cursor.rowcount(), 3);
        assert_eq!(cursor.duration(), 3.0 * STATEMENT_DURATION);
    }

    #[tokio::test]
    async fn test_cursor_from_env_settings() {
        let env = EnvVars::from_map(HashMap::from([
            ("CURSOR_BATCH_SIZE".to_string(), "4".to_string()),
            ("CURSOR_ARRAY_SIZE".to_string(), "3".to_string()),
        ]));
        let settings = CursorSettings::from_env(&env).unwrap().validate().unwrap();

        let server = Arc::new(TableServer::with_rows(6));
        let mut cursor = settings.open_cursor(&server.connect(CURRENT_VERSION));
        cursor.execute("select * from t", None, None).await.unwrap();

        assert_eq!(ids(&cursor.fetch_many(None).await.unwrap()), vec![1, 2, 3]);
        assert_eq!(ids(&cursor.fetch_many(None).await.unwrap()), vec![4, 5, 6]);
        let statements = server.statements();
        assert!(statements.contains(&"select * from t limit 4 offset 4".to_string()));
    }

    #[tokio::test]
    async fn test_cursor_from_json_settings() {
        let document = serde_json::json!({ "batch_size": 100, "array_size": 2 }).to_string();
        let settings = CursorSettings::from_json(&document)
            .unwrap()
            .validate()
            .unwrap();

        let server = Arc::new(TableServer::with_rows(3));
        let mut cursor = settings.open_cursor(&server.connect(LEGACY_VERSION));
        cursor.execute("select * from t", None, None).await.unwrap();

        assert_eq!(cursor.batch_size().get(), 100);
        assert_eq!(ids(&cursor.fetch_many(None).await.unwrap()), vec![1, 2]);
        assert_eq!(
            server.statements(),
            vec!["select * from t limit 1", "select * from t limit 100 offset 0"]
        );
    }
}

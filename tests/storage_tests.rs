use studio_portal::storage::{MockStorageService, S3StorageClient, StorageService, sanitize_key};

mod mock_tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_uploads() {
        let mock = MockStorageService::new();
        let result = mock
            .put_object("user/proj/1-0.png", b"png".to_vec(), "image/png")
            .await;
        assert!(result.is_ok());

        let uploads = mock.uploads.lock().unwrap();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].0, "user/proj/1-0.png");
        assert_eq!(uploads[0].1, "image/png");
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let mock = MockStorageService::new_failing();
        let result = mock.put_object("a.png", b"x".to_vec(), "image/png").await;
        assert!(result.is_err());
        assert!(mock.uploaded_keys().is_empty());
    }

    #[tokio::test]
    async fn test_mock_records_removals() {
        let mock = MockStorageService::new();
        mock.remove_object("user/proj/1-0.png").await.unwrap();
        assert_eq!(mock.removed_keys(), vec!["user/proj/1-0.png".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_removal_sanitization() {
        let mock = MockStorageService::new();
        mock.remove_object("../user/./proj/1-0.png").await.unwrap();
        assert_eq!(mock.removed_keys(), vec!["user/proj/1-0.png".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_sanitization() {
        let mock = MockStorageService::new();
        mock.put_object("../../etc/passwd", b"x".to_vec(), "text/plain")
            .await
            .unwrap();

        let keys = mock.uploaded_keys();
        assert!(!keys[0].contains(".."));
    }

    #[test]
    fn test_mock_public_url_embeds_key() {
        let mock = MockStorageService::new();
        let url = mock.public_url("user/proj/1-0.png");
        assert!(url.contains("user/proj/1-0.png"));
    }

    #[test]
    fn test_sanitize_key_strips_traversal() {
        assert_eq!(sanitize_key("../a/./b//c.png"), "a/b/c.png");
    }
}

mod s3_tests {
    use super::*;

    #[tokio::test]
    async fn test_s3_client_creation() {
        let _client = S3StorageClient::new(
            "http://localhost:9000",
            "us-east-1",
            "admin",
            "password",
            "portfolio-test",
            "http://localhost:9000",
        )
        .await;
        // Just testing that construction doesn't panic
    }

    #[tokio::test]
    async fn test_s3_public_url_format() {
        let client = S3StorageClient::new(
            "http://localhost:9000",
            "us-east-1",
            "admin",
            "password",
            "portfolio-test",
            "http://localhost:9000/",
        )
        .await;

        // URL resolution is local computation: {base}/{bucket}/{key}.
        let url = client.public_url("user/proj/1-0.png");
        assert_eq!(
            url,
            "http://localhost:9000/portfolio-test/user/proj/1-0.png"
        );
    }

    #[tokio::test]
    async fn test_s3_key_sanitization_matches_mock() {
        let client = S3StorageClient::new(
            "http://localhost:9000",
            "us-east-1",
            "admin",
            "password",
            "portfolio-test",
            "http://localhost:9000",
        )
        .await;
        let mock = MockStorageService::new();

        // Both implementations strip traversal segments the same way, so the
        // keys the tests observe are the keys production would write.
        let url = client.public_url("../user/./proj/1-0.png");
        assert_eq!(
            url,
            "http://localhost:9000/portfolio-test/user/proj/1-0.png"
        );
        assert!(mock.public_url("../user/./proj/1-0.png").ends_with("user/proj/1-0.png"));
    }
}

//! Object storage flows over the in-memory bucket.

use addon_cli::adapter::inbound::cli::s3::{perform, S3Request};
use addon_cli::application::ObjectService;
use addon_cli::domain::object::{demo_files, DEFAULT_PRESIGN_EXPIRES};
use addon_cli::domain::Upload;
use addon_cli::testkit::object::MemoryBucket;
use addon_cli::testkit::prompt::{Answer, ScriptedPrompter};
use chrono::Utc;

#[tokio::test]
async fn uploaded_json_reads_back_pretty() {
    let bucket = MemoryBucket::new("photos");
    let service = ObjectService::new(&bucket);

    for upload in demo_files(Utc::now()) {
        service.upload(upload).await.unwrap();
    }

    let object = service.read("data.json").await.unwrap();
    assert!(object.is_json());
    let text = object.render().unwrap();
    assert!(text.contains("\n  \"version\": \"1.0\""));
}

#[tokio::test]
async fn listing_reports_every_key() {
    let bucket = MemoryBucket::new("photos")
        .with_object("b.txt", b"bb", "text/plain")
        .with_object("a.txt", &[0u8; 2048], "application/octet-stream");

    let listing = ObjectService::new(&bucket).list().await.unwrap();
    assert_eq!(listing.key_count, 2);
    let lines: Vec<String> = listing
        .objects
        .iter()
        .map(|o| o.describe())
        .collect();
    assert!(lines[0].starts_with("a.txt (2.0KB, "));
    assert!(lines[1].starts_with("b.txt (2B, "));
}

#[tokio::test]
async fn info_requires_an_existing_object() {
    let bucket = MemoryBucket::new("photos");
    let err = ObjectService::new(&bucket).info("nope").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "File \"nope\" does not exist in bucket \"photos\""
    );
}

#[tokio::test]
async fn presign_uses_requested_lifetime() {
    let bucket = MemoryBucket::new("photos").with_object("demo.txt", b"hi", "text/plain");
    let url = ObjectService::new(&bucket)
        .presign("demo.txt", 60)
        .await
        .unwrap();
    assert!(url.contains("X-Amz-Expires=60"));
}

#[tokio::test]
async fn confirmed_delete_removes_object() {
    let bucket = MemoryBucket::new("photos")
        .with_object("a.txt", b"a", "text/plain")
        .with_object("b.txt", b"b", "text/plain");
    let prompter = ScriptedPrompter::new([Answer::Confirm(true)]);

    let request = S3Request::Delete {
        key: "a.txt".into(),
        yes: false,
    };
    perform(&bucket, &request, &prompter, DEFAULT_PRESIGN_EXPIRES)
        .await
        .unwrap();

    assert_eq!(bucket.keys(), ["b.txt"]);
    assert_eq!(prompter.asked().len(), 1);
    assert!(prompter.asked()[0].contains("\"a.txt\" from bucket \"photos\""));
}

#[tokio::test]
async fn upload_request_stores_content_type() {
    let bucket = MemoryBucket::new("photos");
    let prompter = ScriptedPrompter::non_interactive();

    let request = S3Request::Upload(Upload::new("notes.md", "# notes", "text/markdown"));
    perform(&bucket, &request, &prompter, DEFAULT_PRESIGN_EXPIRES)
        .await
        .unwrap();

    let object = ObjectService::new(&bucket).read("notes.md").await.unwrap();
    assert_eq!(object.content_type.as_deref(), Some("text/markdown"));
}

#[tokio::test]
async fn confirmed_demo_runs_to_completion() {
    let bucket = MemoryBucket::new("photos");
    let prompter = ScriptedPrompter::new([Answer::Confirm(true)]);

    perform(
        &bucket,
        &S3Request::Demo { yes: false },
        &prompter,
        DEFAULT_PRESIGN_EXPIRES,
    )
    .await
    .unwrap();

    assert_eq!(bucket.keys(), ["demo.txt"]);
    assert_eq!(prompter.remaining(), 0);
}

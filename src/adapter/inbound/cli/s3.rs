//! Handler for the `s3` command.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde_json::json;

use crate::adapter::inbound::cli::command::{S3Action, S3Args};
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::s3::S3Bucket;
use crate::application::ObjectService;
use crate::domain::object::{demo_files, guess_content_type, validate_expiry};
use crate::domain::{Listing, Upload};
use crate::error::{Error, Result};
use crate::infrastructure::config::resolver::S3Overrides;
use crate::infrastructure::config::Resolver;
use crate::port::{ObjectStore, Prompter};

/// A bucket action with its arguments already checked.
#[derive(Debug, Clone, PartialEq)]
pub enum S3Request {
    List,
    Upload(Upload),
    Delete { key: String, yes: bool },
    /// `None` uses the configured default lifetime.
    Presign { key: String, seconds: Option<u64> },
    Print { key: String },
    Info { key: String },
    Demo { yes: bool },
}

impl S3Request {
    /// Validate arguments and read upload sources before any connection.
    pub fn prepare(action: Option<&S3Action>) -> Result<Self> {
        let Some(action) = action else {
            return Ok(Self::Demo { yes: false });
        };

        Ok(match action {
            S3Action::List => Self::List,
            S3Action::Upload {
                file,
                key,
                content_type,
            } => Self::Upload(read_upload(file, key.as_deref(), content_type.as_deref())?),
            S3Action::Delete { key, yes } => Self::Delete {
                key: key.clone(),
                yes: *yes,
            },
            S3Action::Presign { key, seconds } => Self::Presign {
                key: key.clone(),
                seconds: seconds.map(validate_expiry).transpose()?,
            },
            S3Action::Print { key } => Self::Print { key: key.clone() },
            S3Action::Info { key } => Self::Info { key: key.clone() },
            S3Action::Demo { yes } => Self::Demo { yes: *yes },
        })
    }
}

fn read_upload(file: &Path, key: Option<&str>, content_type: Option<&str>) -> Result<Upload> {
    let body = std::fs::read(file).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("cannot read {}: {e}", file.display()),
        ))
    })?;
    let key = key
        .map(str::to_string)
        .unwrap_or_else(|| file.to_string_lossy().into_owned());
    let content_type = content_type.unwrap_or_else(|| guess_content_type(file));
    Ok(Upload::new(key, body, content_type))
}

/// Execute the s3 command.
pub async fn execute(args: &S3Args, resolver: &Resolver<'_>, prompter: &dyn Prompter) -> Result<()> {
    let request = S3Request::prepare(args.action.as_ref())?;
    let settings = resolver.s3(S3Overrides {
        endpoint: args.endpoint.clone(),
        bucket: args.bucket.clone(),
    })?;

    let bucket = output::with_spinner(
        "Configuring object storage client",
        &format!("Using bucket \"{}\" at {}", settings.bucket, settings.endpoint),
        S3Bucket::connect(&settings),
    )
    .await?;

    perform(&bucket, &request, prompter, settings.presign_expires).await
}

/// Run one request against `store`.
pub async fn perform<S>(
    store: &S,
    request: &S3Request,
    prompter: &dyn Prompter,
    default_expiry: u64,
) -> Result<()>
where
    S: ObjectStore + ?Sized,
{
    let service = ObjectService::new(store);
    match request {
        S3Request::List => list(&service).await,
        S3Request::Upload(upload) => upload_one(&service, upload.clone()).await,
        S3Request::Delete { key, yes } => delete(&service, prompter, key, *yes).await,
        S3Request::Presign { key, seconds } => {
            presign(&service, key, seconds.unwrap_or(default_expiry)).await
        }
        S3Request::Print { key } => print(&service, key).await,
        S3Request::Info { key } => info(&service, key).await,
        S3Request::Demo { yes } => demo(&service, prompter, *yes, default_expiry).await,
    }
}

/// Ask a yes/no question, or fail when nobody can answer it.
fn confirm(prompter: &dyn Prompter, question: &str) -> Result<bool> {
    if !prompter.is_interactive() {
        return Err(Error::NotInteractive {
            what: "confirmation".into(),
            hint: "--yes".into(),
        });
    }
    prompter.confirm(question, false)
}

async fn list<S: ObjectStore + ?Sized>(service: &ObjectService<'_, S>) -> Result<()> {
    let listing = service.list().await?;
    show_listing(service.bucket(), &listing);
    Ok(())
}

fn show_listing(bucket: &str, listing: &Listing) {
    if listing.is_empty() {
        output::item(
            "listing",
            &format!("Bucket \"{bucket}\" is empty"),
            json!({ "bucket": bucket, "count": 0 }),
        );
        output::hint(&format!(
            "upload sample files with `addon s3 --bucket {bucket} demo`"
        ));
        return;
    }

    output::item(
        "listing",
        &format!(
            "Objects in bucket \"{bucket}\" ({} objects):",
            listing.key_count
        ),
        json!({ "bucket": bucket, "count": listing.key_count }),
    );
    for object in &listing.objects {
        output::item(
            "object",
            &format!("  {}", object.describe()),
            json!({
                "key": object.key,
                "size": object.size,
                "last_modified": object.last_modified.map(|ts| ts.to_rfc3339()),
            }),
        );
    }
}

async fn upload_one<S: ObjectStore + ?Sized>(
    service: &ObjectService<'_, S>,
    upload: Upload,
) -> Result<()> {
    let key = upload.key.clone();
    service.upload(upload).await?;
    output::success(&format!(
        "Uploaded {} to bucket \"{}\"",
        output::highlight(&key),
        service.bucket()
    ));
    Ok(())
}

async fn print<S: ObjectStore + ?Sized>(service: &ObjectService<'_, S>, key: &str) -> Result<()> {
    let object = service.read(key).await?;
    let content = object.render()?;
    output::result(
        "object_content",
        Some(&format!("Content of \"{key}\":")),
        &content,
        json!({
            "key": key,
            "content_type": object.content_type,
            "content": content,
        }),
    );
    Ok(())
}

async fn info<S: ObjectStore + ?Sized>(service: &ObjectService<'_, S>, key: &str) -> Result<()> {
    let info = service.info(key).await?;
    let unknown = || "unknown".to_string();

    output::field("Key", &info.key);
    output::field("Size", format!("{} bytes", info.size));
    output::field(
        "Content-Type",
        info.content_type.clone().unwrap_or_else(unknown),
    );
    output::field("ETag", info.etag.clone().unwrap_or_else(unknown));
    output::field(
        "Last-Modified",
        info.last_modified
            .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_else(unknown),
    );
    Ok(())
}

async fn delete<S: ObjectStore + ?Sized>(
    service: &ObjectService<'_, S>,
    prompter: &dyn Prompter,
    key: &str,
    yes: bool,
) -> Result<()> {
    service.require(key).await?;

    if !yes {
        let question = format!(
            "Are you sure you want to delete \"{key}\" from bucket \"{}\"?",
            service.bucket()
        );
        if !confirm(prompter, &question)? {
            output::warning("Delete cancelled");
            return Ok(());
        }
    }

    service.delete(key).await?;
    output::success(&format!(
        "Deleted {} from bucket \"{}\"",
        output::highlight(key),
        service.bucket()
    ));
    Ok(())
}

async fn presign<S: ObjectStore + ?Sized>(
    service: &ObjectService<'_, S>,
    key: &str,
    seconds: u64,
) -> Result<()> {
    let url = service.presign(key, seconds).await?;
    output::result(
        "presigned_url",
        Some(&format!(
            "Generated presigned URL for {key} (expires in {seconds} seconds):"
        )),
        &url,
        json!({
            "key": key,
            "expires_in": seconds,
            "url": url,
        }),
    );
    Ok(())
}

/// Files the demo removes again; `demo.txt` stays for the presign step.
const DEMO_CLEANUP: [&str; 2] = ["data.json", "readme.md"];

async fn demo<S: ObjectStore + ?Sized>(
    service: &ObjectService<'_, S>,
    prompter: &dyn Prompter,
    yes: bool,
    expiry: u64,
) -> Result<()> {
    let bucket = service.bucket().to_string();

    if !yes {
        let question = format!(
            "The demo uploads three files to bucket \"{bucket}\" and deletes two of them. Continue?"
        );
        if !confirm(prompter, &question)? {
            output::warning("Demo cancelled");
            return Ok(());
        }
    }

    output::section("1. Current bucket contents");
    list(service).await?;

    output::section("2. Uploading demo files");
    for upload in demo_files(Utc::now()) {
        upload_one(service, upload).await?;
    }

    output::section("3. Bucket contents after upload");
    list(service).await?;

    output::section("4. Reading data.json");
    print(service, "data.json").await?;

    output::section("5. Metadata of data.json");
    info(service, "data.json").await?;

    output::section("6. Cleaning up");
    for key in DEMO_CLEANUP {
        delete(service, prompter, key, true).await?;
    }

    output::section("7. Final bucket contents");
    list(service).await?;

    output::section("8. Sharing demo.txt");
    presign(service, "demo.txt", expiry).await?;

    output::section("Done");
    output::success(&format!("Demo completed on bucket \"{bucket}\""));
    output::hint(&format!(
        "remove the remaining file with `addon s3 --bucket {bucket} delete demo.txt`"
    ));
    Ok(())
}

//! Reference document storage.
//!
//! Uploads a caller-supplied reference document to the configured bucket and
//! returns a presigned download URL. The pipeline never fetches or parses the
//! resulting URL — it is stringified into the generation prompt only.

use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use tracing::info;

use crate::errors::AppError;

/// Presigned download URLs stay valid for 7 days.
const SIGNED_URL_TTL: Duration = Duration::from_secs(3600 * 24 * 7);

pub struct UploadedDocument {
    pub file_url: String,
    pub file_name: String,
}

/// Builds the bucket key: timestamp prefix keeps same-named uploads distinct.
fn make_object_key(timestamp_millis: i64, file_name: &str) -> String {
    format!("{timestamp_millis}-{file_name}")
}

/// Decodes the base64 payload, uploads it, and presigns a GET for it.
pub async fn upload_reference_document(
    s3: &S3Client,
    bucket: &str,
    file_name: &str,
    file_data: &str,
    content_type: &str,
) -> Result<UploadedDocument, AppError> {
    let bytes = BASE64
        .decode(file_data)
        .map_err(|e| AppError::Validation(format!("fileData is not valid base64: {e}")))?;

    let key = make_object_key(Utc::now().timestamp_millis(), file_name);

    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(bytes))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("put_object failed: {e}")))?;

    let presigning = PresigningConfig::expires_in(SIGNED_URL_TTL)
        .map_err(|e| AppError::Storage(format!("invalid presigning config: {e}")))?;

    let presigned = s3
        .get_object()
        .bucket(bucket)
        .key(&key)
        .presigned(presigning)
        .await
        .map_err(|e| AppError::Storage(format!("presigning failed: {e}")))?;

    info!("Uploaded reference document as {key}");

    Ok(UploadedDocument {
        file_url: presigned.uri().to_string(),
        file_name: key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_is_timestamp_prefixed() {
        let key = make_object_key(1_700_000_000_000, "sources.pdf");
        assert_eq!(key, "1700000000000-sources.pdf");
    }

    #[test]
    fn test_ttl_is_seven_days() {
        assert_eq!(SIGNED_URL_TTL, Duration::from_secs(604_800));
    }
}

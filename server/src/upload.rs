//! Multipart upload handler
//!
//! Receives one image per request, runs the transformation pipeline on a
//! blocking worker, persists the artifacts and answers with a plain-text
//! report of per-stage timings. A pipeline failure fails only its own
//! request; the specific reason goes back to the client.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use pixmill::pipeline::{self, PipelineOutput};
use pixmill::{PipelineConfig, PipelineError};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Immutable per-process state shared by all requests
pub struct AppState {
    pub out_dir: PathBuf,
    pub config: PipelineConfig,
}

type UploadRejection = (StatusCode, String);

/// Handle `POST /upload`
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<String, UploadRejection> {
    let (filename, bytes) = next_file_field(&mut multipart).await?;
    let size = bytes.len();
    log::info!("received upload {filename} ({size} bytes)");

    // The pipeline is pure CPU work; keep it off the async executor.
    let config = state.config.clone();
    let output = tokio::task::spawn_blocking(move || pipeline::run(&bytes, &config))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| {
            log::warn!("pipeline failed for {filename}: {e}");
            (status_for(&e), e.to_string())
        })?;

    write_artifacts(&state.out_dir, &filename, &output)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    // The ASCII rendering is logged rather than persisted.
    log::info!("ascii rendering of {filename}:\n{}", output.ascii.value);

    Ok(report(&filename, size, &output))
}

/// Pull the first file field out of the multipart form
async fn next_file_field(
    multipart: &mut Multipart,
) -> Result<(String, Vec<u8>), UploadRejection> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if let Some(name) = field.file_name() {
            let name = name.to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
            return Ok((name, bytes.to_vec()));
        }
    }
    Err((
        StatusCode::BAD_REQUEST,
        "no file field in multipart form".to_string(),
    ))
}

/// Persist the encoded artifacts into the output directory
async fn write_artifacts(
    out_dir: &Path,
    upload_name: &str,
    output: &PipelineOutput,
) -> std::io::Result<()> {
    tokio::fs::write(out_dir.join("centercrop.jpg"), &output.crops.value.center).await?;
    tokio::fs::write(out_dir.join("rectcrop.jpg"), &output.crops.value.rect).await?;
    tokio::fs::write(out_dir.join("smallpicture.jpg"), &output.thumbnail.value).await?;
    tokio::fs::write(
        out_dir.join(gray_artifact_name(upload_name)),
        &output.grayscale.value,
    )
    .await?;
    Ok(())
}

/// Name of the grayscale artifact, derived from the uploaded file name
///
/// `photo.jpg` becomes `photo_gray.jpg`. The extension is carried over from
/// the upload even though the artifact itself is always JPEG-encoded, so
/// `photo.png` would yield `photo_gray.png`.
fn gray_artifact_name(upload_name: &str) -> String {
    let path = Path::new(upload_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("upload");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("jpg");
    format!("{stem}_gray.{ext}")
}

/// Map a pipeline error to a response status
///
/// Everything the client can fix (bad bytes, wrong format, undersized image)
/// is a 400; an internal encoder failure is a 500.
fn status_for(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::EncodeFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

/// Build the plain-text per-stage timing report
fn report(filename: &str, size: usize, output: &PipelineOutput) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "Successfully Uploaded File");
    let _ = writeln!(body, "Uploaded File: {filename}");
    let _ = writeln!(body, "File Size: {size} bytes");
    let _ = writeln!(body);
    let _ = writeln!(body, "Running Image Function Stats:");
    let _ = writeln!(body, "Cropping took {:?}", output.crops.elapsed);
    let _ = writeln!(body, "Greyscale took {:?}", output.grayscale.elapsed);
    let _ = writeln!(body, "Resize took {:?}", output.thumbnail.elapsed);
    let _ = writeln!(body, "ASCII Conversion took {:?}", output.ascii.elapsed);
    let _ = writeln!(body, "Program took {:?}", output.total);
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use pixmill::codec::{self, EncodeFormat};

    fn sample_output() -> PipelineOutput {
        let img = RgbaImage::from_pixel(700, 700, Rgba([120, 80, 40, 255]));
        let bytes = codec::encode(&img, EncodeFormat::Jpeg).unwrap();
        pipeline::run(&bytes, &PipelineConfig::default()).unwrap()
    }

    #[test]
    fn test_gray_artifact_name() {
        assert_eq!(gray_artifact_name("photo.jpg"), "photo_gray.jpg");
        assert_eq!(gray_artifact_name("scan.png"), "scan_gray.png");
        assert_eq!(gray_artifact_name("noext"), "noext_gray.jpg");
    }

    #[test]
    fn test_status_mapping() {
        let err = PipelineError::CorruptInput("bad".into());
        assert_eq!(status_for(&err), StatusCode::BAD_REQUEST);

        let err = PipelineError::EncodeFailure("oops".into());
        assert_eq!(status_for(&err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_report_lists_every_stage() {
        let output = sample_output();
        let body = report("photo.jpg", 1234, &output);

        assert!(body.contains("Uploaded File: photo.jpg"));
        assert!(body.contains("File Size: 1234 bytes"));
        assert!(body.contains("Cropping took"));
        assert!(body.contains("Greyscale took"));
        assert!(body.contains("Resize took"));
        assert!(body.contains("ASCII Conversion took"));
        assert!(body.contains("Program took"));
    }

    #[tokio::test]
    async fn test_write_artifacts_produces_expected_files() {
        let output = sample_output();
        let dir = tempfile::tempdir().unwrap();

        write_artifacts(dir.path(), "photo.jpg", &output)
            .await
            .unwrap();

        for name in [
            "centercrop.jpg",
            "rectcrop.jpg",
            "smallpicture.jpg",
            "photo_gray.jpg",
        ] {
            assert!(dir.path().join(name).is_file(), "missing {name}");
        }
    }
}

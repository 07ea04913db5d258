//! Axum route handler for resume analysis.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract_text, DocumentKind, ExtractionError};
use crate::scoring::AnalysisResult;
use crate::state::AppState;
use crate::upload::stage_upload;

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "jobDescription";

struct ResumeUpload {
    filename: String,
    data: Vec<u8>,
}

#[derive(Default)]
struct AnalyzeForm {
    resume: Option<ResumeUpload>,
    job_description: Option<String>,
}

/// Collects the form fields the endpoint reads. Parts without a filename are
/// not files; unknown fields are skipped. The first occurrence of a field wins.
async fn read_form(multipart: &mut Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            RESUME_FIELD if form.resume.is_none() => {
                let Some(filename) = field.file_name().map(str::to_owned) else {
                    continue;
                };
                let data = field.bytes().await?.to_vec();
                form.resume = Some(ResumeUpload { filename, data });
            }
            JOB_DESCRIPTION_FIELD if form.job_description.is_none() => {
                form.job_description = Some(field.text().await?);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// POST /analyze
///
/// Multipart form with a `resume` file (PDF or DOCX) and a `jobDescription`
/// text field. Returns the similarity score, missing keywords, summary and suggestion.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let form = read_form(&mut multipart).await?;

    let upload = form
        .resume
        .ok_or_else(|| AppError::Validation("No resume file uploaded".to_string()))?;
    let job_description = form
        .job_description
        .filter(|jd| !jd.is_empty())
        .ok_or_else(|| AppError::Validation("No job description provided".to_string()))?;
    if upload.filename.is_empty() {
        return Err(AppError::Validation("No selected file".to_string()));
    }
    let kind = DocumentKind::from_filename(&upload.filename)
        .ok_or_else(|| AppError::Validation("Invalid file type".to_string()))?;

    info!(
        "Analyzing {:?} resume ({} bytes) against a {}-char job description",
        kind,
        upload.data.len(),
        job_description.len()
    );

    let upload_dir = state.config.upload_dir.clone();
    let scorer = state.scorer.clone();
    let result = tokio::task::spawn_blocking(move || -> Result<AnalysisResult, AppError> {
        let staged = stage_upload(&upload_dir, &upload.filename, kind, &upload.data)
            .map_err(ExtractionError::from)?;
        let resume_text = extract_text(kind, staged.path())?;
        drop(staged);

        tracing::debug!("Extracted {} chars of resume text", resume_text.len());
        Ok(scorer.analyze(&resume_text, &job_description)?)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Analysis task failed: {e}")))??;

    info!(
        "Resume scored {}% with {} missing keywords",
        result.similarity_score,
        result.missing_keywords.len()
    );

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::extraction::fixtures;
    use crate::routes::build_router;
    use crate::scoring::TfidfScorer;
    use crate::state::AppState;

    const BOUNDARY: &str = "resume-match-test-boundary";

    const JOB_DESCRIPTION: &str = "Backend engineer with Rust, PostgreSQL and Kubernetes \
        experience. Build reliable distributed services.";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a [u8]),
    }

    fn multipart_body(parts: &[Part]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(name, filename, data) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(data);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn app(upload_dir: &Path, max_upload_bytes: usize) -> Router {
        build_router(AppState {
            config: Config {
                port: 0,
                rust_log: "debug".to_string(),
                upload_dir: upload_dir.to_path_buf(),
                max_upload_bytes,
            },
            scorer: Arc::new(TfidfScorer::default()),
        })
    }

    async fn post_analyze(app: Router, parts: &[Part<'_>]) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_docx_matching_job_description_scores_near_100() {
        let dir = tempfile::tempdir().unwrap();
        let docx = fixtures::docx_bytes(&[JOB_DESCRIPTION]);

        let (status, body) = post_analyze(
            app(dir.path(), 1 << 20),
            &[
                Part::File("resume", "resume.docx", &docx),
                Part::Text("jobDescription", JOB_DESCRIPTION),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK, "body: {body}");
        assert!(body["similarity_score"].as_f64().unwrap() >= 99.99);
        assert_eq!(body["missing_keywords"], serde_json::json!([]));
        assert_eq!(body["suggestion"], "Excellent keyword match!");
    }

    #[tokio::test]
    async fn test_pdf_resume_scores_within_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = fixtures::pdf_bytes(&["Backend engineer", "Rust and PostgreSQL"]);

        let (status, body) = post_analyze(
            app(dir.path(), 1 << 20),
            &[
                Part::Text("jobDescription", JOB_DESCRIPTION),
                Part::File("resume", "Resume.PDF", &pdf),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK, "body: {body}");
        let score = body["similarity_score"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&score));
        assert!(score > 0.0);
        let missing: Vec<&str> = body["missing_keywords"]
            .as_array()
            .unwrap()
            .iter()
            .map(|k| k.as_str().unwrap())
            .collect();
        assert!(missing.contains(&"kubernetes"));
        assert!(!missing.contains(&"rust"));
        assert!(body["summary"]
            .as_str()
            .unwrap()
            .starts_with("Resume matches "));
    }

    #[tokio::test]
    async fn test_staged_upload_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let docx = fixtures::docx_bytes(&["Rust engineer"]);

        let (status, _) = post_analyze(
            app(dir.path(), 1 << 20),
            &[
                Part::File("resume", "resume.docx", &docx),
                Part::Text("jobDescription", "Rust engineer"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = post_analyze(
            app(dir.path(), 1 << 20),
            &[Part::Text("jobDescription", JOB_DESCRIPTION)],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No resume file uploaded");
    }

    #[tokio::test]
    async fn test_resume_sent_as_text_field_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = post_analyze(
            app(dir.path(), 1 << 20),
            &[
                Part::Text("resume", "plain text resume"),
                Part::Text("jobDescription", JOB_DESCRIPTION),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No resume file uploaded");
    }

    #[tokio::test]
    async fn test_missing_job_description_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let docx = fixtures::docx_bytes(&["Rust engineer"]);
        let (status, body) = post_analyze(
            app(dir.path(), 1 << 20),
            &[Part::File("resume", "resume.docx", &docx)],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No job description provided");
    }

    #[tokio::test]
    async fn test_empty_job_description_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let docx = fixtures::docx_bytes(&["Rust engineer"]);
        let (status, body) = post_analyze(
            app(dir.path(), 1 << 20),
            &[
                Part::File("resume", "resume.docx", &docx),
                Part::Text("jobDescription", ""),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No job description provided");
    }

    #[tokio::test]
    async fn test_whitespace_job_description_scores_zero() {
        let dir = tempfile::tempdir().unwrap();
        let docx = fixtures::docx_bytes(&["Rust engineer"]);
        let (status, body) = post_analyze(
            app(dir.path(), 1 << 20),
            &[
                Part::File("resume", "resume.docx", &docx),
                Part::Text("jobDescription", "  \n "),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["similarity_score"], 0.0);
        assert_eq!(body["missing_keywords"], serde_json::json!([]));
        assert_eq!(body["summary"], "Resume matches 0.0% with job description.");
    }

    #[tokio::test]
    async fn test_empty_filename_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = post_analyze(
            app(dir.path(), 1 << 20),
            &[
                Part::File("resume", "", b""),
                Part::Text("jobDescription", JOB_DESCRIPTION),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No selected file");
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = post_analyze(
            app(dir.path(), 1 << 20),
            &[
                Part::File("resume", "resume.txt", b"Rust engineer"),
                Part::Text("jobDescription", JOB_DESCRIPTION),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid file type");
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_server_error_with_message() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = post_analyze(
            app(dir.path(), 1 << 20),
            &[
                Part::File("resume", "resume.pdf", b"definitely not a pdf"),
                Part::Text("jobDescription", JOB_DESCRIPTION),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to read PDF"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_stop_word_only_documents_are_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let docx = fixtures::docx_bytes(&["the and of"]);
        let (status, body) = post_analyze(
            app(dir.path(), 1 << 20),
            &[
                Part::File("resume", "resume.docx", &docx),
                Part::Text("jobDescription", "with a an"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "empty vocabulary; perhaps the documents only contain stop words"
        );
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let big = vec![b'x'; 4096];
        let (status, _) = post_analyze(
            app(dir.path(), 256),
            &[
                Part::File("resume", "resume.pdf", &big),
                Part::Text("jobDescription", JOB_DESCRIPTION),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path(), 1 << 20)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
    }
}

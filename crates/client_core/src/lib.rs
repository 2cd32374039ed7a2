//! HTTP client for the replay analysis endpoint.

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::{
    domain::SelectedFile,
    protocol::{AnalysisRequest, AnalyzeResponse, ANALYZE_PATH},
};
use tracing::{debug, info, warn};
use url::Url;

mod error;
mod files;

pub use error::AnalyzeError;
pub use files::{guess_mime_type, selected_file_from_path};

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Something that can run one analysis round trip.
///
/// Implementations post both files once and report exactly one outcome; they
/// never retry.
#[async_trait]
pub trait AnalyzeApi: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalyzeResponse, AnalyzeError>;
}

#[derive(Debug, Clone)]
pub struct AnalyzeClient {
    http: Client,
    endpoint: Url,
}

impl AnalyzeClient {
    pub fn new(server_url: &str) -> Result<Self, AnalyzeError> {
        Self::with_http_client(Client::new(), server_url)
    }

    pub fn with_http_client(http: Client, server_url: &str) -> Result<Self, AnalyzeError> {
        Ok(Self {
            http,
            endpoint: analyze_endpoint(server_url)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Resolves the analysis endpoint against the server origin.
///
/// The path is absolute, so any path on `server_url` is replaced rather than
/// extended.
pub fn analyze_endpoint(server_url: &str) -> Result<Url, AnalyzeError> {
    let trimmed = server_url.trim().trim_end_matches('/');
    let invalid = |source| AnalyzeError::InvalidServerUrl {
        url: server_url.to_string(),
        source,
    };
    let base = Url::parse(trimmed).map_err(invalid)?;
    base.join(ANALYZE_PATH).map_err(invalid)
}

fn file_part(field: &'static str, file: SelectedFile) -> Result<Part, AnalyzeError> {
    let mime_type = match file.mime_type.as_deref() {
        Some(raw) if raw.parse::<mime_guess::Mime>().is_ok() => raw.to_string(),
        Some(raw) => {
            warn!(
                field,
                mime_type = raw,
                "ignoring unparseable mime type on selected file"
            );
            FALLBACK_MIME_TYPE.to_string()
        }
        None => guess_mime_type(&file.name),
    };
    debug!(
        field,
        file_name = %file.name,
        size_bytes = file.size_bytes(),
        mime_type = %mime_type,
        "adding multipart file part"
    );
    Ok(Part::bytes(file.bytes)
        .file_name(file.name)
        .mime_str(&mime_type)?)
}

fn multipart_form(request: AnalysisRequest) -> Result<Form, AnalyzeError> {
    let mut form = Form::new();
    for (field, file) in request.into_parts() {
        form = form.part(field, file_part(field, file)?);
    }
    Ok(form)
}

#[async_trait]
impl AnalyzeApi for AnalyzeClient {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalyzeResponse, AnalyzeError> {
        info!(
            endpoint = %self.endpoint,
            replay = %request.replay.name,
            beatmap = %request.beatmap.name,
            "posting files for analysis"
        );
        let form = multipart_form(request)?;
        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzeError::HttpStatus { status });
        }

        let body = response.bytes().await?;
        let decoded: AnalyzeResponse = serde_json::from_slice(&body)?;
        debug!(
            failed = matches!(decoded, AnalyzeResponse::Failure(_)),
            "analysis response decoded"
        );
        Ok(decoded)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

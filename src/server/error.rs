//! Error responses for page and API handlers.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use cineshelf_common::Error;

use crate::i18n::Labels;
use crate::views::{self, LayoutParams};

/// An [`Error`] together with how to present it.
#[derive(Debug)]
pub struct AppError {
    error: Error,
    format: ErrorFormat,
}

#[derive(Debug)]
enum ErrorFormat {
    Json,
    Page { labels: Labels, base_path: String },
}

impl AppError {
    /// Error body as `{"error": .., "status": ..}`.
    pub fn json(error: Error) -> Self {
        Self {
            error,
            format: ErrorFormat::Json,
        }
    }

    /// Error body as a full HTML document showing the error placeholder.
    pub fn page<S: Into<String>>(error: Error, labels: Labels, base_path: S) -> Self {
        Self {
            error,
            format: ErrorFormat::Page {
                labels,
                base_path: base_path.into(),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn error(&self) -> &Error {
        &self.error
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.error, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self.error, "Request rejected");
        }

        match self.format {
            ErrorFormat::Json => (
                status,
                Json(serde_json::json!({
                    "error": self.error.to_string(),
                    "status": status.as_u16(),
                })),
            )
                .into_response(),
            ErrorFormat::Page { labels, base_path } => match error_page(&labels, &base_path) {
                Ok(html) => (status, Html(html)).into_response(),
                Err(e) => {
                    tracing::error!("Failed to render error page: {}", e);
                    (status, self.error.to_string()).into_response()
                }
            },
        }
    }
}

fn error_page(labels: &Labels, base_path: &str) -> cineshelf_common::Result<String> {
    let body = views::error_placeholder(labels)?;
    views::layout(&LayoutParams {
        title: labels.get("error.title"),
        head: "",
        body: &body,
        loading: false,
        base_path,
        labels,
    })
}

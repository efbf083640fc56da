//! Minimal web front end: one form, one classify action, three result
//! states (warning / spam / not spam). Everything here is presentation over
//! [`Classifier::predict`]; no state is kept between requests.

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer, Responder, ResponseError};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::{Classifier, ClassifierError, Label, Prediction};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Classifier(ClassifierError::EmptyInput) => StatusCode::BAD_REQUEST,
            AppError::Classifier(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyForm {
    pub message: String,
}

pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page(""))
}

pub async fn classify(
    classifier: web::Data<Classifier>,
    form: web::Form<ClassifyForm>,
) -> Result<HttpResponse, AppError> {
    let body = match classifier.predict(&form.message) {
        Ok(prediction) => page(&result_panel(&form.message, &prediction)),
        // Nothing classifiable survived normalization: render the warning
        // state. The classifier guarantees no inference ran.
        Err(ClassifierError::EmptyInput) => page(&warning_panel()),
        Err(err) => return Err(err.into()),
    };
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

/// Starts the web interface on `addr`, sharing one classifier across all
/// workers.
pub async fn serve(classifier: Classifier, addr: &str) -> std::io::Result<()> {
    info!("Serving web interface on http://{}", addr);
    let classifier = web::Data::new(classifier);
    HttpServer::new(move || {
        App::new()
            .app_data(classifier.clone())
            .route("/", web::get().to(index))
            .route("/classify", web::post().to(classify))
    })
    .bind(addr)?
    .run()
    .await
}

fn warning_panel() -> String {
    r#"<div class="panel warning">Please enter a message before classifying.</div>"#.to_string()
}

fn result_panel(message: &str, prediction: &Prediction) -> String {
    let confidence = prediction
        .confidence
        .map(|c| format!(" ({:.1}% confidence)", c * 100.0))
        .unwrap_or_default();
    let (class, verdict) = match prediction.label {
        Label::Spam => ("spam", "Spam detected"),
        Label::Ham => ("ham", "Not spam"),
    };
    format!(
        r#"<div class="panel {class}"><strong>{verdict}</strong>{confidence}</div>
<p class="echo">{}</p>"#,
        escape_html(message)
    )
}

fn page(result: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>mailsift</title>
<style>
body {{ font-family: sans-serif; max-width: 40rem; margin: 3rem auto; }}
textarea {{ width: 100%; min-height: 6rem; }}
.panel {{ padding: 1rem; border-radius: 6px; margin-top: 1rem; color: #fff; }}
.panel.spam {{ background: #c0392b; }}
.panel.ham {{ background: #27ae60; }}
.panel.warning {{ background: #e67e22; }}
.echo {{ color: #666; font-style: italic; }}
</style>
</head>
<body>
<h1>mailsift</h1>
<p>Classify a message as spam or not spam.</p>
<form method="post" action="/classify">
<textarea name="message" placeholder="Enter your message"></textarea>
<p><button type="submit">Classify</button></p>
</form>
{result}
</body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

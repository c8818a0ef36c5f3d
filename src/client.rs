//! Endpoint wrappers for the gate API. These helpers centralize paths,
//! spans, and body handling, and they must never log the access code.

use crate::{
    error::Error,
    gate_error_message,
    transport::GateTransport,
    types::{AuthStatusResponse, VerifyResponse},
};
use reqwest::Method;
use serde_json::json;
use tracing::{Instrument, info_span};

pub const AUTH_STATUS_PATH: &str = "/api/auth/status";
pub const AUTH_VERIFY_PATH: &str = "/api/auth/verify";
pub const AUTH_LOGOUT_PATH: &str = "/api/auth/logout";

/// The only status value the gate recognizes as a granted code.
const VERIFY_SUCCESS: &str = "success";

/// Maximum number of error body characters surfaced in messages.
const MAX_ERROR_CHARS: usize = 200;

/// Verdict of a verification exchange that completed at the HTTP level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// The gate accepted the code and opened the session.
    Granted,
    /// The gate rejected the code; `message` is the server-provided reason.
    Denied { message: Option<String> },
}

/// Probe whether the current session is already authenticated.
/// # Errors
/// Returns an error if the request fails, the gate answers a non-2xx status,
/// or the body does not carry the expected `authenticated` field.
pub async fn fetch_auth_status(transport: &GateTransport) -> Result<bool, Error> {
    let span = info_span!(
        "gate.auth_status",
        http.method = "GET",
        path = AUTH_STATUS_PATH
    );
    let response = transport
        .request_json(Method::GET, AUTH_STATUS_PATH, None)
        .instrument(span)
        .await?;

    if !response.status.is_success() {
        return Err(Error::Http {
            url: response.url,
            status: response.status,
            message: sanitize_message(gate_error_message(&response.body)),
        });
    }

    let status: AuthStatusResponse = serde_json::from_value(response.body)
        .map_err(|err| Error::Parse(format!("unexpected auth status body: {err}")))?;

    Ok(status.authenticated)
}

/// Submit an access code for verification.
///
/// The gate pairs rejections with a non-2xx status and a JSON verdict body;
/// the body decides the outcome either way, so a rejection is a
/// [`VerifyOutcome::Denied`], not an error.
/// # Errors
/// Returns an error if the request fails or the body carries no verdict.
pub async fn verify_access_code(
    transport: &GateTransport,
    code: &str,
) -> Result<VerifyOutcome, Error> {
    let payload = json!({ "code": code });

    let span = info_span!("gate.verify", http.method = "POST", path = AUTH_VERIFY_PATH);
    let response = transport
        .request_json(Method::POST, AUTH_VERIFY_PATH, Some(&payload))
        .instrument(span)
        .await?;

    let verdict: VerifyResponse = serde_json::from_value(response.body)
        .map_err(|err| Error::Parse(format!("unexpected verify body: {err}")))?;

    if verdict.status == VERIFY_SUCCESS {
        Ok(VerifyOutcome::Granted)
    } else {
        Ok(VerifyOutcome::Denied {
            message: verdict.message,
        })
    }
}

/// Clear the gate session on the server.
/// # Errors
/// Returns an error if the request fails or the gate answers a non-2xx status.
pub async fn log_out(transport: &GateTransport) -> Result<(), Error> {
    let span = info_span!("gate.logout", http.method = "POST", path = AUTH_LOGOUT_PATH);
    let response = transport
        .request_json(Method::POST, AUTH_LOGOUT_PATH, None)
        .instrument(span)
        .await?;

    if !response.status.is_success() {
        return Err(Error::Http {
            url: response.url,
            status: response.status,
            message: sanitize_message(gate_error_message(&response.body)),
        });
    }

    Ok(())
}

/// Trims and truncates server messages before they reach logs or state.
fn sanitize_message(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        "request failed".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GateConfig;
    use anyhow::{Result, anyhow};
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn transport(base_url: &str) -> Result<GateTransport> {
        Ok(GateTransport::new(&GateConfig::new(base_url))?)
    }

    #[tokio::test]
    async fn fetch_auth_status_reads_authenticated_flag() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/auth/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "authenticated": true
            })))
            .mount(&server)
            .await;

        let authenticated = fetch_auth_status(&transport(&server.uri())?).await?;
        assert!(authenticated);
        Ok(())
    }

    #[tokio::test]
    async fn fetch_auth_status_errors_on_failure_status() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/auth/status"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "detail": "gate unavailable"
            })))
            .mount(&server)
            .await;

        let result = fetch_auth_status(&transport(&server.uri())?).await;
        let err = result.err().ok_or_else(|| anyhow!("expected error"))?;
        assert!(err.to_string().contains("gate unavailable"));
        Ok(())
    }

    #[tokio::test]
    async fn fetch_auth_status_errors_on_missing_field() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/auth/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let result = fetch_auth_status(&transport(&server.uri())?).await;
        let err = result.err().ok_or_else(|| anyhow!("expected error"))?;
        assert!(err.to_string().contains("unexpected auth status body"));
        Ok(())
    }

    #[tokio::test]
    async fn verify_access_code_grants_on_success_status() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/verify"))
            .and(body_json(json!({ "code": "open-sesame" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success"
            })))
            .mount(&server)
            .await;

        let outcome = verify_access_code(&transport(&server.uri())?, "open-sesame").await?;
        assert_eq!(outcome, VerifyOutcome::Granted);
        Ok(())
    }

    #[tokio::test]
    async fn verify_access_code_denies_on_rejection_body() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        // The gate pairs a 401 with a JSON verdict; the body wins.
        Mock::given(method("POST"))
            .and(path("/api/auth/verify"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "status": "error",
                "message": "Invalid access code"
            })))
            .mount(&server)
            .await;

        let outcome = verify_access_code(&transport(&server.uri())?, "wrong").await?;
        assert_eq!(
            outcome,
            VerifyOutcome::Denied {
                message: Some("Invalid access code".to_string())
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn verify_access_code_errors_on_missing_verdict() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/verify"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let result = verify_access_code(&transport(&server.uri())?, "whatever").await;
        let err = result.err().ok_or_else(|| anyhow!("expected error"))?;
        assert!(err.to_string().contains("unexpected verify body"));
        Ok(())
    }

    #[tokio::test]
    async fn log_out_accepts_success_status() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success"
            })))
            .mount(&server)
            .await;

        log_out(&transport(&server.uri())?).await?;
        Ok(())
    }

    #[tokio::test]
    async fn log_out_errors_on_failure_status() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "detail": "session store down"
            })))
            .mount(&server)
            .await;

        let result = log_out(&transport(&server.uri())?).await;
        let err = result.err().ok_or_else(|| anyhow!("expected error"))?;
        assert!(err.to_string().contains("session store down"));
        Ok(())
    }

    #[test]
    fn sanitize_message_trims_and_defaults() {
        assert_eq!(sanitize_message("  "), "request failed");
        assert_eq!(sanitize_message(" nope "), "nope");
    }
}

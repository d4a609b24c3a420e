use crate::errors::AppError;
use crate::structs::identity_toolkit::{AccountLookupRequest, AccountLookupResponse};
use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{BoxFuture, FutureExt, LocalBoxFuture};
use reqwest::{Client, StatusCode};
use std::fmt;
use tracing::{error, warn};

pub const IDENTITY_TOOLKIT_BASE: &str = "https://identitytoolkit.googleapis.com";

#[derive(Debug, PartialEq)]
pub enum AuthError {
    MissingToken,
    Rejected(String),
    Unavailable(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "no bearer token provided"),
            AuthError::Rejected(reason) => write!(f, "token rejected: {}", reason),
            AuthError::Unavailable(reason) => write!(f, "identity provider unavailable: {}", reason),
        }
    }
}

impl std::error::Error for AuthError {}

/// Resolves a bearer token to the subject it was issued for.
pub trait IdentityVerifier: Send + Sync {
    fn verify<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<String, AuthError>>;
}

/// Verifies Firebase ID tokens through the Identity Toolkit account lookup.
#[derive(Clone)]
pub struct FirebaseVerifier {
    client: Client,
    api_key: String,
}

impl FirebaseVerifier {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    async fn lookup(&self, token: &str) -> Result<String, AuthError> {
        let response = self
            .client
            .post(format!("{}/v1/accounts:lookup", IDENTITY_TOOLKIT_BASE))
            .query(&[("key", self.api_key.as_str())])
            .json(&AccountLookupRequest { id_token: token })
            .send()
            .await
            .map_err(|err| AuthError::Unavailable(err.to_string()))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::BAD_REQUEST => {
                let body = response.text().await.unwrap_or_default();
                return Err(AuthError::Rejected(body));
            }
            status => return Err(AuthError::Unavailable(format!("status {}", status))),
        }

        let lookup = response
            .json::<AccountLookupResponse>()
            .await
            .map_err(|err| AuthError::Unavailable(err.to_string()))?;

        match lookup.users.into_iter().next() {
            Some(account) if account.disabled => Err(AuthError::Rejected("account disabled".to_string())),
            Some(account) => Ok(account.local_id),
            None => Err(AuthError::Rejected("no account for token".to_string())),
        }
    }
}

impl IdentityVerifier for FirebaseVerifier {
    fn verify<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<String, AuthError>> {
        self.lookup(token).boxed()
    }
}

pub fn bearer_token(req: &HttpRequest) -> Result<String, AuthError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    match header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(AuthError::MissingToken),
    }
}

/// The verified subject of the request's bearer token.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthenticatedUser {
    pub subject: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let verifier = req.app_data::<web::Data<dyn IdentityVerifier>>().cloned();
        authenticate(verifier, bearer_token(req)).boxed_local()
    }
}

async fn authenticate(
    verifier: Option<web::Data<dyn IdentityVerifier>>,
    token: Result<String, AuthError>,
) -> Result<AuthenticatedUser, AppError> {
    let verifier = verifier.ok_or_else(|| {
        error!("No identity verifier registered");
        AppError::Internal("identity verifier missing from app data".to_string())
    })?;
    let token = token?;

    match verifier.verify(&token).await {
        Ok(subject) => Ok(AuthenticatedUser { subject }),
        Err(err) => {
            warn!("Token verification failed: {}", err);
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn reads_bearer_token() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc.def"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Ok("abc.def".to_string()));
    }

    #[test]
    fn missing_or_malformed_header_is_missing_token() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(bearer_token(&req), Err(AuthError::MissingToken));

        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic abc"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Err(AuthError::MissingToken));

        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer  "))
            .to_http_request();
        assert_eq!(bearer_token(&req), Err(AuthError::MissingToken));
    }
}

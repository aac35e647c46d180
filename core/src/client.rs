//! Stateless HTTP request builder and response parser for the Duolingo API.
//!
//! # Design
//! `ApiClient` holds only the two base URLs and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Session-dependent builders take the `Session` as an
//! argument, so the client never owns credentials. The `Duolingo` facade
//! pairs the two halves with a `Transport`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::mapping::{align_translations, map_language, map_skill, map_user};
use crate::schema::{RawHints, RawLoginResponse, RawSkill, RawUser};
use crate::session::Session;
use crate::types::{Language, Skill, Translations, User};

/// Characters left as-is by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}

/// Credentials and the identity the login endpoint returned for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    pub token: String,
    pub user_id: u64,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    login: &'a str,
    password: &'a str,
}

/// Synchronous, stateless client for the Duolingo API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    api_base_url: String,
    dictionary_base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            dictionary_base_url: config.dictionary_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_login(&self, username: &str, password: &str) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&LoginBody {
            login: username,
            password,
        })
        .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/login", self.api_base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_get_user(&self, username: &str, session: Option<&Session>) -> HttpRequest {
        let req = HttpRequest::get(format!(
            "{}/users/{}",
            self.api_base_url,
            encode_component(username)
        ));
        authorize(req, session)
    }

    /// Language data is only exposed on a learner's profile, so this hits
    /// the same endpoint as `build_get_user`.
    pub fn build_get_language(&self, username: &str, session: Option<&Session>) -> HttpRequest {
        self.build_get_user(username, session)
    }

    pub fn build_get_skill(&self, skill_id: &str, session: &Session) -> HttpRequest {
        let req = HttpRequest::get(format!(
            "{}/api/1/skills/show?id={}",
            self.api_base_url,
            encode_component(skill_id)
        ));
        authorize(req, Some(session))
    }

    pub fn build_translate<S: AsRef<str> + Serialize>(
        &self,
        from: &str,
        to: &str,
        words: &[S],
    ) -> Result<HttpRequest, ApiError> {
        let tokens = serde_json::to_string(words).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest::get(format!(
            "{}/api/1/dictionary/hints/{}/{}?tokens={}",
            self.dictionary_base_url,
            encode_component(to),
            encode_component(from),
            encode_component(&tokens)
        )))
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<LoginResult, ApiError> {
        check_status(&response, 200)?;
        let token = response.header("jwt").map(str::to_string);
        let raw: RawLoginResponse = parse_body(&response)?;

        if let Some(failure) = raw.failure {
            return Err(ApiError::LoginFailed(raw.message.unwrap_or(failure)));
        }
        let user_id = raw
            .user_id
            .ok_or_else(|| ApiError::LoginFailed("response carried no user_id".to_string()))?;
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::LoginFailed("response carried no jwt header".to_string()))?;

        Ok(LoginResult { token, user_id })
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response, 200)?;
        let raw: RawUser = parse_body(&response)?;
        Ok(map_user(raw))
    }

    pub fn parse_get_language(
        &self,
        response: HttpResponse,
        language_id: &str,
        username: &str,
    ) -> Result<Language, ApiError> {
        check_status(&response, 200)?;
        let raw: RawUser = parse_body(&response)?;
        map_language(raw, language_id, username)
    }

    pub fn parse_get_skill(&self, response: HttpResponse) -> Result<Skill, ApiError> {
        check_status(&response, 200)?;
        let raw: RawSkill = parse_body(&response)?;
        Ok(map_skill(raw))
    }

    pub fn parse_translate<S: AsRef<str>>(
        &self,
        response: HttpResponse,
        words: &[S],
    ) -> Result<Translations, ApiError> {
        check_status(&response, 200)?;
        let hints: RawHints = parse_body(&response)?;
        Ok(align_translations(words, &hints))
    }
}

fn authorize(req: HttpRequest, session: Option<&Session>) -> HttpRequest {
    match session {
        Some(session) => {
            let (name, value) = session.authorization_header();
            req.with_header(name, value)
        }
        None => req,
    }
}

/// Map non-success status codes to `ApiError::HttpError`.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn parse_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

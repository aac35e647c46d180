//! Session-owning client that executes requests through a `Transport`.
//!
//! # Design
//! `Duolingo` pairs an `ApiClient` with a transport and the current
//! `Session`. Fetchers borrow `&self`; only `login` and `logout` borrow
//! `&mut self`, so a fetch can never observe a session being swapped out
//! underneath it. Every public operation issues at most one request.

use log::debug;
use serde::Serialize;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::session::Session;
use crate::types::{Language, Skill, Translations, User};

pub struct Duolingo<T: Transport = UreqTransport> {
    api: ApiClient,
    transport: T,
    session: Option<Session>,
}

impl Duolingo<UreqTransport> {
    /// Client for the public Duolingo hosts.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl Default for Duolingo<UreqTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Duolingo<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            api: ApiClient::new(&config),
            transport,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// Logs in and replaces any existing session, even one for the same
    /// user. If the login fails the previous session is kept.
    pub fn login(&mut self, username: &str, password: &str) -> Result<&Session, ApiError> {
        let req = self.api.build_login(username, password)?;
        let login = self.api.parse_login(self.send(req)?)?;
        debug!("logged in as {username} (user id {})", login.user_id);
        let session = Session::new(username.to_string(), login.user_id, login.token);
        Ok(&*self.session.insert(session))
    }

    pub fn logout(&mut self) {
        if let Some(old) = self.session.take() {
            debug!("logged out {}", old.username());
        }
    }

    /// Works without a session; the API returns more fields when the session
    /// belongs to `username`.
    pub fn get_user(&self, username: &str) -> Result<User, ApiError> {
        let req = self.api.build_get_user(username, self.session.as_ref());
        self.api.parse_get_user(self.send(req)?)
    }

    /// `username` must be someone currently learning `language_id`; the API
    /// only exposes skill trees on learners' profiles.
    pub fn get_language(&self, language_id: &str, username: &str) -> Result<Language, ApiError> {
        let req = self.api.build_get_language(username, self.session.as_ref());
        self.api
            .parse_get_language(self.send(req)?, language_id, username)
    }

    pub fn get_skill(&self, skill_id: &str) -> Result<Skill, ApiError> {
        let session = self.session.as_ref().ok_or(ApiError::AuthenticationRequired)?;
        let req = self.api.build_get_skill(skill_id, session);
        self.api.parse_get_skill(self.send(req)?)
    }

    pub fn translate<S: AsRef<str> + Serialize>(
        &self,
        from: &str,
        to: &str,
        words: &[S],
    ) -> Result<Translations, ApiError> {
        let req = self.api.build_translate(from, to, words)?;
        self.api.parse_translate(self.send(req)?, words)
    }

    fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!("{} {}", req.method.as_str(), req.path);
        self.transport.execute(req)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::http::HttpMethod;

    /// Replays queued responses and records every request it sees.
    #[derive(Default)]
    struct FakeTransport {
        responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
        requests: RefCell<Vec<HttpRequest>>,
    }

    impl FakeTransport {
        fn reply(&self, status: u16, headers: &[(&str, &str)], body: &str) {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                body: body.to_string(),
            }));
        }

        fn fail(&self, msg: &str) {
            self.responses
                .borrow_mut()
                .push_back(Err(ApiError::Transport(msg.to_string())));
        }

        fn sent(&self) -> Vec<HttpRequest> {
            self.requests.borrow().clone()
        }
    }

    impl Transport for FakeTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .expect("no response queued")
        }
    }

    fn config() -> ClientConfig {
        ClientConfig::default()
            .with_api_base_url("http://api.test")
            .with_dictionary_base_url("http://dict.test")
    }

    fn logged_in(transport: &FakeTransport) -> Duolingo<&FakeTransport> {
        let mut client = Duolingo::with_transport(config(), transport);
        transport.reply(200, &[("jwt", "tok-1")], r#"{"response":"OK","user_id":42}"#);
        client.login("alice", "pw").unwrap();
        client
    }

    #[test]
    fn login_stores_session() {
        let transport = FakeTransport::default();
        let client = logged_in(&transport);
        let session = client.session().unwrap();
        assert_eq!(session.username(), "alice");
        assert_eq!(session.user_id(), 42);
        assert_eq!(transport.sent()[0].method, HttpMethod::Post);
        assert_eq!(transport.sent()[0].path, "http://api.test/login");
    }

    #[test]
    fn second_login_replaces_session() {
        let transport = FakeTransport::default();
        let mut client = logged_in(&transport);
        transport.reply(200, &[("jwt", "tok-2")], r#"{"response":"OK","user_id":42}"#);
        client.login("alice", "pw").unwrap();
        assert_eq!(
            client.session().unwrap().authorization_header().1,
            "Bearer tok-2"
        );
    }

    #[test]
    fn failed_login_keeps_previous_session() {
        let transport = FakeTransport::default();
        let mut client = logged_in(&transport);
        transport.reply(200, &[], r#"{"failure":"invalid_password"}"#);
        let err = client.login("bob", "nope").unwrap_err();
        assert!(matches!(err, ApiError::LoginFailed(_)));
        assert_eq!(client.session().unwrap().username(), "alice");
    }

    #[test]
    fn login_propagates_transport_failure() {
        let transport = FakeTransport::default();
        let mut client = Duolingo::with_transport(config(), &transport);
        transport.fail("connection refused");
        let err = client.login("alice", "pw").unwrap_err();
        assert!(matches!(err, ApiError::Transport(ref m) if m == "connection refused"));
        assert!(!client.is_logged_in());
    }

    #[test]
    fn logout_is_idempotent() {
        let transport = FakeTransport::default();
        let mut client = logged_in(&transport);
        client.logout();
        client.logout();
        assert!(client.session().is_none());
    }

    #[test]
    fn get_skill_without_session_makes_no_request() {
        let transport = FakeTransport::default();
        let client = Duolingo::with_transport(config(), &transport);
        for id in ["", "abc", "does-not-exist"] {
            let err = client.get_skill(id).unwrap_err();
            assert!(matches!(err, ApiError::AuthenticationRequired));
        }
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn get_skill_after_logout_requires_auth() {
        let transport = FakeTransport::default();
        let mut client = logged_in(&transport);
        client.logout();
        let err = client.get_skill("abc").unwrap_err();
        assert!(matches!(err, ApiError::AuthenticationRequired));
        assert_eq!(transport.sent().len(), 1);
    }

    #[test]
    fn get_skill_sends_bearer_token() {
        let transport = FakeTransport::default();
        let client = logged_in(&transport);
        transport.reply(
            200,
            &[],
            r#"{"id":"abc","language":"es","title":"Basics","path":[{"words":["el","la"]},{},{"words":["un"]}]}"#,
        );
        let skill = client.get_skill("abc").unwrap();
        assert_eq!(skill.words, vec!["el", "la", "un"]);

        let req = &transport.sent()[1];
        assert_eq!(req.path, "http://api.test/api/1/skills/show?id=abc");
        assert_eq!(
            req.headers,
            vec![("Authorization".to_string(), "Bearer tok-1".to_string())]
        );
    }

    #[test]
    fn get_user_anonymous_sends_no_auth() {
        let transport = FakeTransport::default();
        let client = Duolingo::with_transport(config(), &transport);
        transport.reply(200, &[], r#"{"id":7,"username":"bob"}"#);
        let user = client.get_user("bob").unwrap();
        assert_eq!(user.display_name, "bob");
        assert!(transport.sent()[0].headers.is_empty());
    }

    #[test]
    fn get_user_does_not_touch_session() {
        let transport = FakeTransport::default();
        let client = logged_in(&transport);
        transport.reply(404, &[], "");
        let err = client.get_user("ghost").unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 404, .. }));
        assert_eq!(client.session().unwrap().username(), "alice");
    }

    #[test]
    fn get_language_not_learned() {
        let transport = FakeTransport::default();
        let client = Duolingo::with_transport(config(), &transport);
        transport.reply(
            200,
            &[],
            r#"{"id":7,"username":"bob","language_data":{"de":{"language_string":"German","skills":[]}}}"#,
        );
        let err = client.get_language("es", "bob").unwrap_err();
        assert!(matches!(err, ApiError::LanguageNotActive { .. }));
    }

    #[test]
    fn translate_aligns_duplicates() {
        let transport = FakeTransport::default();
        let client = Duolingo::with_transport(config(), &transport);
        transport.reply(200, &[], r#"{"dog":["perro"],"cat":["gato"]}"#);
        let out = client.translate("en", "es", &["dog", "cat", "dog"]).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], out[2]);
        assert_eq!(out[0], Some(vec!["perro".to_string()]));
        assert!(transport.sent()[0]
            .path
            .starts_with("http://dict.test/api/1/dictionary/hints/es/en?tokens="));
    }

    #[test]
    fn translate_never_sends_auth() {
        let transport = FakeTransport::default();
        let client = logged_in(&transport);
        transport.reply(200, &[], "{}");
        let out = client.translate("en", "es", &["zzz"]).unwrap();
        assert_eq!(out, vec![None]);
        assert!(transport.sent()[1].headers.is_empty());
    }
}

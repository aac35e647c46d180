use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Language {
    pub language: String,
    pub language_string: String,
    pub learning: bool,
    pub level: u32,
    pub points: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SkillRef {
    pub id: String,
    pub title: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LanguageData {
    pub language_string: String,
    pub skills: Vec<SkillRef>,
}

#[derive(Clone, Debug)]
pub struct Account {
    pub id: u64,
    pub username: String,
    pub password: String,
    pub fullname: Option<String>,
    pub site_streak: u32,
    pub streak_extended_today: bool,
    pub streak_freeze: Option<String>,
    pub learning_language: Option<String>,
    pub languages: Vec<Language>,
    pub language_data: HashMap<String, LanguageData>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<String>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub language: String,
    pub title: String,
    pub path: Vec<Lesson>,
}

#[derive(Deserialize)]
pub struct LoginInput {
    pub login: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SkillQuery {
    pub id: String,
}

#[derive(Deserialize)]
pub struct HintsQuery {
    pub tokens: String,
}

/// In-memory stand-in for the Duolingo backend.
#[derive(Debug, Default)]
pub struct Store {
    pub accounts: HashMap<String, Account>,
    pub skills: HashMap<String, Skill>,
    /// Keyed by (from, to), then by word.
    pub hints: HashMap<(String, String), HashMap<String, Vec<String>>>,
    /// Bearer token -> username.
    pub sessions: HashMap<String, String>,
}

pub type Db = Arc<RwLock<Store>>;

fn language(id: &str, name: &str, learning: bool, level: u32, points: u64) -> Language {
    Language {
        language: id.to_string(),
        language_string: name.to_string(),
        learning,
        level,
        points,
    }
}

fn words(list: &[&str]) -> Option<Vec<String>> {
    Some(list.iter().map(|w| w.to_string()).collect())
}

impl Store {
    /// Fixture data used by the tests of both crates.
    ///
    /// - `alice` / `wonderland`: learns es (1200 pts) and fr (300 pts), used
    ///   to learn de (not learning). Has a streak freeze.
    /// - `bob` / `builder`: no full name, learns de only.
    /// - skill `animals-es` mixes lessons with and without words.
    /// - hints for en -> es.
    pub fn seeded() -> Self {
        let mut store = Store::default();

        let alice = Account {
            id: 1001,
            username: "alice".to_string(),
            password: "wonderland".to_string(),
            fullname: Some("Alice Liddell".to_string()),
            site_streak: 12,
            streak_extended_today: true,
            streak_freeze: Some("2026-10-01 08:00:00".to_string()),
            learning_language: Some("es".to_string()),
            languages: vec![
                language("fr", "French", true, 3, 300),
                language("de", "German", false, 9, 5000),
                language("es", "Spanish", true, 7, 1200),
            ],
            language_data: HashMap::from([(
                "es".to_string(),
                LanguageData {
                    language_string: "Spanish".to_string(),
                    skills: vec![
                        SkillRef {
                            id: "basics-es".to_string(),
                            title: "Basics 1".to_string(),
                        },
                        SkillRef {
                            id: "animals-es".to_string(),
                            title: "Animals".to_string(),
                        },
                    ],
                },
            )]),
        };

        let bob = Account {
            id: 1002,
            username: "bob".to_string(),
            password: "builder".to_string(),
            fullname: None,
            site_streak: 0,
            streak_extended_today: false,
            streak_freeze: None,
            learning_language: Some("de".to_string()),
            languages: vec![language("de", "German", true, 1, 40)],
            language_data: HashMap::from([(
                "de".to_string(),
                LanguageData {
                    language_string: "German".to_string(),
                    skills: vec![SkillRef {
                        id: "basics-de".to_string(),
                        title: "Basics 1".to_string(),
                    }],
                },
            )]),
        };

        for account in [alice, bob] {
            store.accounts.insert(account.username.clone(), account);
        }

        let animals = Skill {
            id: "animals-es".to_string(),
            language: "es".to_string(),
            title: "Animals".to_string(),
            path: vec![
                Lesson {
                    words: words(&["perro", "gato"]),
                },
                Lesson { words: None },
                Lesson {
                    words: words(&["gato", "pato", "oso"]),
                },
            ],
        };
        let basics = Skill {
            id: "basics-es".to_string(),
            language: "es".to_string(),
            title: "Basics 1".to_string(),
            path: vec![Lesson {
                words: words(&["el", "la", "hombre", "mujer"]),
            }],
        };
        for skill in [animals, basics] {
            store.skills.insert(skill.id.clone(), skill);
        }

        store.hints.insert(
            ("en".to_string(), "es".to_string()),
            HashMap::from([
                ("dog".to_string(), vec!["perro".to_string()]),
                ("cat".to_string(), vec!["gato".to_string(), "gata".to_string()]),
                ("the".to_string(), vec!["el".to_string(), "la".to_string()]),
            ]),
        );

        store
    }
}

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/login", post(login))
        .route("/users/{username}", get(get_user))
        .route("/api/1/skills/show", get(show_skill))
        .route("/api/1/dictionary/hints/{to}/{from}", get(hints))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Mirrors the real endpoint: a rejected login is still a 200.
async fn login(State(db): State<Db>, Json(input): Json<LoginInput>) -> Response {
    let mut store = db.write().await;
    let user_id = match store.accounts.get(&input.login) {
        None => {
            return Json(json!({"failure": "invalid_user", "message": "No such user"})).into_response();
        }
        Some(account) if account.password != input.password => {
            return Json(json!({"failure": "invalid_password", "message": "Wrong password"}))
                .into_response();
        }
        Some(account) => account.id,
    };

    let token = Uuid::new_v4().to_string();
    store.sessions.insert(token.clone(), input.login.clone());
    (
        StatusCode::OK,
        [("jwt", token)],
        Json(json!({"response": "OK", "user_id": user_id, "username": input.login})),
    )
        .into_response()
}

async fn get_user(
    State(db): State<Db>,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    let store = db.read().await;
    let account = store.accounts.get(&username).ok_or(StatusCode::NOT_FOUND)?;

    let mut body = json!({
        "id": account.id,
        "username": account.username,
        "fullname": account.fullname,
        "site_streak": account.site_streak,
        "streak_extended_today": account.streak_extended_today,
        "learning_language": account.learning_language,
        "languages": account.languages,
        "language_data": account.language_data,
    });

    let own_profile = bearer(&headers)
        .and_then(|token| store.sessions.get(token))
        .is_some_and(|owner| *owner == username);
    if own_profile {
        body["inventory"] = json!({"streak_freeze": account.streak_freeze});
    }

    Ok(Json(body))
}

async fn show_skill(
    State(db): State<Db>,
    Query(query): Query<SkillQuery>,
    headers: HeaderMap,
) -> Result<Json<Skill>, StatusCode> {
    let store = db.read().await;
    let authenticated = bearer(&headers).is_some_and(|token| store.sessions.contains_key(token));
    if !authenticated {
        return Err(StatusCode::UNAUTHORIZED);
    }
    store
        .skills
        .get(&query.id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn hints(
    State(db): State<Db>,
    Path((to, from)): Path<(String, String)>,
    Query(query): Query<HintsQuery>,
) -> Result<Json<HashMap<String, Vec<String>>>, StatusCode> {
    let tokens: Vec<String> = serde_json::from_str(&query.tokens).map_err(|_| StatusCode::BAD_REQUEST)?;
    let store = db.read().await;
    let found = match store.hints.get(&(from, to)) {
        Some(dictionary) => tokens
            .into_iter()
            .filter_map(|word| dictionary.get(&word).map(|t| (word, t.clone())))
            .collect(),
        None => HashMap::new(),
    };
    Ok(Json(found))
}

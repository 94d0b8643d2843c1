use crate::clients::http_client;
use crate::ledger::Ledger;
use crate::models::{CoachStyle, DogImage, Weather};
use chrono::NaiveDate;
use reqwest::Client;
use std::{env, sync::Arc};
use tokio::sync::Mutex;

pub const DEFAULT_CITY: &str = "Seoul";

/// Everything scoped to one user session: the ledger plus the most recent
/// external fetch results and picker selections. Seeded with demo history on
/// first access and dropped with the process; nothing persists.
pub struct Session {
    pub ledger: Ledger,
    pub city: String,
    pub coach_style: CoachStyle,
    pub last_weather: Option<Weather>,
    pub last_dog: Option<DogImage>,
    pub last_report: Option<String>,
}

impl Session {
    pub fn init(today: NaiveDate) -> Self {
        Self {
            ledger: Ledger::seed_demo_history(today),
            city: DEFAULT_CITY.to_string(),
            coach_style: CoachStyle::Spartan,
            last_weather: None,
            last_dog: None,
            last_report: None,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub http: Client,
    pub openai_api_key: Option<String>,
    pub weather_api_key: Option<String>,
}

impl AppState {
    pub fn new(today: NaiveDate) -> reqwest::Result<Self> {
        Ok(Self {
            session: Arc::new(Mutex::new(Session::init(today))),
            http: http_client()?,
            openai_api_key: env_key("OPENAI_API_KEY"),
            weather_api_key: env_key("OPENWEATHER_API_KEY"),
        })
    }
}

fn env_key(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

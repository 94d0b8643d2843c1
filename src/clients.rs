use crate::models::{CoachStyle, DogImage, Weather};
use crate::report::system_prompt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

const WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const DOG_URL: &str = "https://dog.ceo/api/breeds/image/random";
const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_MODEL: &str = "gpt-5-mini";

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Why an external fetch produced no data. Serialized into API responses so
/// the page can tell a missing key from a network problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FetchError {
    MissingApiKey,
    Network { detail: String },
    Status { code: u16 },
    Malformed,
}

/// Present-or-absent result of an external fetch, tagged for the UI.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchOutcome<T> {
    Ok {
        data: T,
    },
    Failed {
        #[serde(flatten)]
        error: FetchError,
    },
}

impl<T> FetchOutcome<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            FetchOutcome::Ok { data } => Some(data),
            FetchOutcome::Failed { .. } => None,
        }
    }
}

impl<T> From<Result<T, FetchError>> for FetchOutcome<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(data) => FetchOutcome::Ok { data },
            Err(error) => FetchOutcome::Failed { error },
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return FetchError::Status { code: status.as_u16() };
        }
        if err.is_decode() {
            return FetchError::Malformed;
        }
        FetchError::Network { detail: err.to_string() }
    }
}

/// Shared outbound client; every call carries the fetch timeout.
pub fn http_client() -> reqwest::Result<Client> {
    Client::builder().timeout(FETCH_TIMEOUT).build()
}

#[derive(Debug, Deserialize)]
struct OwmResponse {
    weather: Vec<OwmCondition>,
    main: OwmMain,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    humidity: u32,
}

/// Current weather for `city` from OpenWeatherMap, metric units.
pub async fn fetch_weather(
    client: &Client,
    city: &str,
    api_key: Option<&str>,
) -> Result<Weather, FetchError> {
    let Some(api_key) = api_key.filter(|key| !key.is_empty()) else {
        return Err(FetchError::MissingApiKey);
    };

    let response = client
        .get(WEATHER_URL)
        .query(&[("q", city), ("appid", api_key), ("units", "metric"), ("lang", "en")])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        warn!("weather fetch for {city} returned {status}");
        return Err(FetchError::Status { code: status.as_u16() });
    }

    let body: OwmResponse = response.json().await.map_err(|_| FetchError::Malformed)?;
    let condition = body.weather.into_iter().next().ok_or(FetchError::Malformed)?;

    Ok(Weather {
        city: city.to_string(),
        description: condition.description,
        temp_c: body.main.temp,
        feels_like_c: body.main.feels_like,
        humidity: body.main.humidity,
    })
}

#[derive(Debug, Deserialize)]
struct DogResponse {
    message: String,
    status: String,
}

/// Random dog image from Dog CEO; no key required.
pub async fn fetch_dog(client: &Client) -> Result<DogImage, FetchError> {
    let response = client.get(DOG_URL).send().await?;

    let status = response.status();
    if !status.is_success() {
        warn!("dog image fetch returned {status}");
        return Err(FetchError::Status { code: status.as_u16() });
    }

    let body: DogResponse = response.json().await.map_err(|_| FetchError::Malformed)?;
    if body.status != "success" {
        return Err(FetchError::Malformed);
    }

    let breed = breed_from_url(&body.message).ok_or(FetchError::Malformed)?;
    Ok(DogImage { url: body.message, breed })
}

/// Dog CEO encodes the breed as the path segment after `/breeds/`, e.g.
/// `.../breeds/hound-afghan/n02088094_1003.jpg` -> "Hound Afghan".
fn breed_from_url(url: &str) -> Option<String> {
    let segment = url.split("/breeds/").nth(1)?.split('/').next()?;
    if segment.is_empty() {
        return None;
    }
    let spaced = segment.replace(['-', '_'], " ");
    let breed = spaced
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    Some(breed)
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: &'static str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Coaching report from the language model: the style picks the system
/// prompt, the payload rides along as JSON in the user message.
pub async fn generate_report(
    client: &Client,
    api_key: Option<&str>,
    style: CoachStyle,
    payload: &Value,
) -> Result<String, FetchError> {
    let Some(api_key) = api_key.filter(|key| !key.is_empty()) else {
        return Err(FetchError::MissingApiKey);
    };

    let user_input = format!(
        "Below is the user's data for today. Write the coaching report from it.\n\nData (JSON):\n{}",
        serde_json::to_string_pretty(payload).unwrap_or_default()
    );
    let request = ChatRequest {
        model: OPENAI_MODEL,
        messages: vec![
            ChatMessage { role: "system", content: system_prompt(style) },
            ChatMessage { role: "user", content: user_input },
        ],
    };

    let response = client
        .post(OPENAI_URL)
        .bearer_auth(api_key)
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        warn!("report generation returned {status}");
        return Err(FetchError::Status { code: status.as_u16() });
    }

    let body: ChatResponse = response.json().await.map_err(|_| FetchError::Malformed)?;
    let content = body
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(FetchError::Malformed)?;

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(FetchError::Malformed);
    }
    Ok(trimmed.to_string())
}

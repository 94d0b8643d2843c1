use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One habit tracked per day. The set is fixed for the process lifetime.
pub struct HabitDef {
    pub key: &'static str,
    pub emoji: &'static str,
    pub label: &'static str,
}

pub const HABITS: [HabitDef; 5] = [
    HabitDef { key: "wake", emoji: "🌅", label: "Wake up on time" },
    HabitDef { key: "water", emoji: "💧", label: "Drink water" },
    HabitDef { key: "study", emoji: "📚", label: "Study / read" },
    HabitDef { key: "workout", emoji: "🏃", label: "Work out" },
    HabitDef { key: "sleep", emoji: "😴", label: "Sleep well" },
];

pub const TOTAL_HABITS: usize = HABITS.len();

pub const CITIES: [&str; 10] = [
    "Seoul", "Busan", "Incheon", "Daegu", "Daejeon", "Gwangju", "Ulsan", "Suwon", "Jeju", "Gimhae",
];

pub const DEFAULT_MOOD: u8 = 6;

/// Checkbox states for the fixed habit set. One field per habit key keeps
/// every entry exactly this shape; `#[serde(default)]` maps a key missing
/// from partial input to unchecked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HabitChecks {
    #[serde(default)]
    pub wake: bool,
    #[serde(default)]
    pub water: bool,
    #[serde(default)]
    pub study: bool,
    #[serde(default)]
    pub workout: bool,
    #[serde(default)]
    pub sleep: bool,
}

impl HabitChecks {
    pub fn get(&self, key: &str) -> bool {
        match key {
            "wake" => self.wake,
            "water" => self.water,
            "study" => self.study,
            "workout" => self.workout,
            "sleep" => self.sleep,
            _ => false,
        }
    }

    pub fn checked_count(&self) -> usize {
        HABITS.iter().filter(|habit| self.get(habit.key)).count()
    }

    /// Labels of checked habits, in definition order.
    pub fn checked_labels(&self) -> Vec<&'static str> {
        HABITS
            .iter()
            .filter(|habit| self.get(habit.key))
            .map(|habit| habit.label)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub mood: u8,
    pub checks: HabitChecks,
}

impl LedgerEntry {
    /// All-unchecked entry with the default mood, used for fresh days.
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            date,
            mood: DEFAULT_MOOD,
            checks: HabitChecks::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoachStyle {
    #[serde(rename = "spartan")]
    Spartan,
    #[serde(rename = "mentor")]
    Mentor,
    #[serde(rename = "game_master")]
    GameMaster,
}

impl CoachStyle {
    pub const ALL: [CoachStyle; 3] =
        [CoachStyle::Spartan, CoachStyle::Mentor, CoachStyle::GameMaster];

    pub fn id(self) -> &'static str {
        match self {
            CoachStyle::Spartan => "spartan",
            CoachStyle::Mentor => "mentor",
            CoachStyle::GameMaster => "game_master",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CoachStyle::Spartan => "Spartan coach",
            CoachStyle::Mentor => "Warm mentor",
            CoachStyle::GameMaster => "Game master",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weather {
    pub city: String,
    pub description: String,
    pub temp_c: f64,
    pub feels_like_c: f64,
    pub humidity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DogImage {
    pub url: String,
    pub breed: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckinRequest {
    pub habits: HabitChecks,
    pub mood: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodaySummaryResponse {
    pub date: String,
    pub checked_count: usize,
    pub total_habits: usize,
    pub achievement_pct: u8,
    pub mood: u8,
    /// Saved checkbox states, so a reloaded page can restore them.
    pub habits: HabitChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeriesPointResponse {
    pub date: String,
    pub achievement_pct: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeriesResponse {
    pub points: Vec<SeriesPointResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub city: String,
    pub coach_style: CoachStyle,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub weather_api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HabitMeta {
    pub key: &'static str,
    pub emoji: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CoachStyleMeta {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MetaResponse {
    pub habits: Vec<HabitMeta>,
    pub cities: Vec<&'static str>,
    pub coach_styles: Vec<CoachStyleMeta>,
}

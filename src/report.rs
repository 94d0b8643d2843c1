use crate::metrics::TodaySummary;
use crate::models::{CoachStyle, DogImage, HabitChecks, Weather, HABITS};
use serde_json::{json, Value};

const PROMPT_BASE: &str = "You are the coach of the 'AI Habit Tracker'. Using the user's habits, \
mood, weather and dog breed for today, coach them briefly but with impact. No exaggerated medical \
or mental-health diagnoses; suggest actionable steps.\n\n\
The output must keep exactly these five sections, each starting with a bold heading:\n\
1) **Condition grade (S-D)**: one line\n\
2) **Habit analysis**: 3-6 lines\n\
3) **Weather comment**: 1-3 lines\n\
4) **Tomorrow's missions**: a checklist of 3 items\n\
5) **One-liner of the day**: one line\n";

/// Fixed base prompt plus a tone suffix per coach style.
pub fn system_prompt(style: CoachStyle) -> String {
    let tone = match style {
        CoachStyle::Spartan => {
            "Style: strict and firm. Cut off excuses, lead with numbers and facts. Short and hard."
        }
        CoachStyle::Mentor => {
            "Style: warm and empathetic. Acknowledge small wins and gently point to the next action."
        }
        CoachStyle::GameMaster => {
            "Style: RPG game-master tone. Use quests, XP and level-ups, but keep the framing light."
        }
    };
    format!("{PROMPT_BASE}\n{tone}")
}

/// JSON payload handed to the report generator. Weather and dog results are
/// passed through opaquely; absent fetches become null.
pub fn build_payload(
    summary: &TodaySummary,
    checks: &HabitChecks,
    city: &str,
    style: CoachStyle,
    weather: Option<&Weather>,
    dog: Option<&DogImage>,
) -> Value {
    let habits: Value = HABITS
        .iter()
        .map(|habit| (habit.label.to_string(), Value::Bool(checks.get(habit.key))))
        .collect::<serde_json::Map<String, Value>>()
        .into();

    json!({
        "date": summary.date.to_string(),
        "city": city,
        "coach_style": style.display_name(),
        "mood": summary.mood,
        "habits": habits,
        "achievement_pct": summary.achievement_pct,
        "weather": weather,
        "dog": dog,
    })
}

/// Fixed-format text block for copy-paste sharing.
pub fn share_text(
    summary: &TodaySummary,
    checks: &HabitChecks,
    city: &str,
    style: CoachStyle,
    report: Option<&str>,
) -> String {
    let checked = HABITS
        .iter()
        .filter(|habit| checks.get(habit.key))
        .map(|habit| format!("{}{}", habit.emoji, habit.label))
        .collect::<Vec<_>>()
        .join(", ");
    let report_block = match report {
        Some(report) => report.trim().to_string(),
        None => "(not generated yet)".to_string(),
    };

    format!(
        "📊 AI Habit Tracker ({date})\n\
- City: {city}\n\
- Coach: {coach}\n\
- Achievement: {pct}% ({checked_count}/{total})\n\
- Mood: {mood}/10\n\
- Checked: {checked}\n\n\
📝 Report\n{report_block}",
        date = summary.date,
        coach = style.display_name(),
        pct = summary.achievement_pct,
        checked_count = summary.checked_count,
        total = summary.total_habits,
        mood = summary.mood,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn summary() -> TodaySummary {
        TodaySummary {
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            checked_count: 3,
            total_habits: 5,
            achievement_pct: 60,
            mood: 8,
        }
    }

    fn checks() -> HabitChecks {
        HabitChecks {
            wake: true,
            water: true,
            study: false,
            workout: false,
            sleep: true,
        }
    }

    #[test]
    fn prompt_keeps_base_and_varies_tone() {
        for style in CoachStyle::ALL {
            let prompt = system_prompt(style);
            assert!(prompt.starts_with(PROMPT_BASE));
        }
        assert_ne!(system_prompt(CoachStyle::Spartan), system_prompt(CoachStyle::Mentor));
        assert_ne!(system_prompt(CoachStyle::Mentor), system_prompt(CoachStyle::GameMaster));
    }

    #[test]
    fn payload_maps_labels_and_passes_nulls_through() {
        let payload = build_payload(&summary(), &checks(), "Seoul", CoachStyle::Spartan, None, None);

        assert_eq!(payload["date"], "2024-06-10");
        assert_eq!(payload["city"], "Seoul");
        assert_eq!(payload["coach_style"], "Spartan coach");
        assert_eq!(payload["mood"], 8);
        assert_eq!(payload["achievement_pct"], 60);
        assert_eq!(payload["habits"]["Wake up on time"], true);
        assert_eq!(payload["habits"]["Work out"], false);
        assert_eq!(payload["habits"].as_object().unwrap().len(), 5);
        assert!(payload["weather"].is_null());
        assert!(payload["dog"].is_null());
    }

    #[test]
    fn payload_embeds_weather_when_present() {
        let weather = Weather {
            city: "Seoul".to_string(),
            description: "light rain".to_string(),
            temp_c: 21.3,
            feels_like_c: 22.0,
            humidity: 78,
        };
        let payload = build_payload(
            &summary(),
            &checks(),
            "Seoul",
            CoachStyle::Mentor,
            Some(&weather),
            None,
        );
        assert_eq!(payload["weather"]["description"], "light rain");
        assert_eq!(payload["weather"]["humidity"], 78);
    }

    #[test]
    fn share_text_lists_checked_habits_and_placeholder() {
        let text = share_text(&summary(), &checks(), "Seoul", CoachStyle::GameMaster, None);

        assert!(text.starts_with("📊 AI Habit Tracker (2024-06-10)"));
        assert!(text.contains("- Achievement: 60% (3/5)"));
        assert!(text.contains("- Mood: 8/10"));
        assert!(text.contains("🌅Wake up on time, 💧Drink water, 😴Sleep well"));
        assert!(text.ends_with("📝 Report\n(not generated yet)"));
    }

    #[test]
    fn share_text_includes_report_body() {
        let text = share_text(
            &summary(),
            &checks(),
            "Busan",
            CoachStyle::Mentor,
            Some("**Condition grade (S-D)**: A\n"),
        );
        assert!(text.ends_with("📝 Report\n**Condition grade (S-D)**: A"));
    }
}

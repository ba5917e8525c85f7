use chrono::{Duration, NaiveDate, Utc};
use diesel::prelude::*;
use std::collections::BTreeMap;

use crate::error::ApiError;
use crate::models::models::{
    AppState, DailyMood, MoodEntry, MoodEntryDto, MoodRequest, MoodStats,
};
use crate::repositories::mood_repository::MoodRepository;

/// Entries returned by a mood-history fetch.
pub const MOOD_HISTORY_LIMIT: i64 = 30;

pub struct MoodSubmission {
    pub entry_id: i32,
    pub ai_insight: String,
}

pub struct MoodService;

impl MoodService {
    /// Stores the entry together with an insight from Luna. The range check
    /// runs before any remote call, so an invalid mood never burns an
    /// attempt against the API.
    pub async fn submit(
        state: &AppState,
        user_id: i32,
        payload: &MoodRequest,
    ) -> Result<MoodSubmission, ApiError> {
        if !(1..=5).contains(&payload.mood) {
            return Err(ApiError::BadRequest(
                "Выбери настроение от 1 до 5".to_string(),
            ));
        }

        let note = payload
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        let resolution = state.resolver.resolve_mood_insight(payload.mood, note).await;

        let mut conn = state.db.get()?;
        let entry = MoodRepository::insert(
            &mut conn,
            user_id,
            payload.mood,
            note,
            Some(&resolution.text),
        )?;

        Ok(MoodSubmission {
            entry_id: entry.id,
            ai_insight: resolution.text,
        })
    }

    pub fn history(
        conn: &mut SqliteConnection,
        user_id: i32,
    ) -> Result<Vec<MoodEntryDto>, ApiError> {
        Ok(
            MoodRepository::list_for_user(conn, user_id, MOOD_HISTORY_LIMIT)?
                .into_iter()
                .map(MoodEntryDto::from)
                .collect(),
        )
    }

    pub fn stats(conn: &mut SqliteConnection, user_id: i32) -> Result<MoodStats, ApiError> {
        let all = MoodRepository::all_for_user(conn, user_id)?;
        let since = (Utc::now() - Duration::days(7)).naive_utc();
        let recent = MoodRepository::entries_since(conn, user_id, since)?;
        Ok(compute_stats(&all, &recent))
    }
}

/// Pure computation over loaded rows: mean rounded to 2 decimals (0 when
/// empty), value distribution, and per-day averages for the trailing week
/// ordered oldest to newest.
pub fn compute_stats(all: &[MoodEntry], recent: &[MoodEntry]) -> MoodStats {
    let total = all.len() as i64;
    let average = if all.is_empty() {
        0.0
    } else {
        let sum: i64 = all.iter().map(|e| e.mood as i64).sum();
        round2(sum as f64 / total as f64)
    };

    let mut distribution: BTreeMap<i32, i64> = BTreeMap::new();
    for entry in all {
        *distribution.entry(entry.mood).or_insert(0) += 1;
    }

    let mut per_day: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();
    for entry in recent {
        let day = entry.created_at.date();
        let slot = per_day.entry(day).or_insert((0, 0));
        slot.0 += entry.mood as i64;
        slot.1 += 1;
    }
    let weekly = per_day
        .into_iter()
        .map(|(date, (sum, count))| DailyMood {
            date,
            avg_mood: round2(sum as f64 / count as f64),
        })
        .collect();

    MoodStats {
        average,
        total,
        distribution,
        weekly,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn entry(id: i32, mood: i32, created_at: &str) -> MoodEntry {
        MoodEntry {
            id,
            user_id: 1,
            mood,
            note: None,
            ai_insight: None,
            created_at: NaiveDateTime::parse_from_str(created_at, "%Y-%m-%d %H:%M:%S")
                .expect("timestamp"),
        }
    }

    #[test]
    fn empty_history_gives_zero_stats() {
        let stats = compute_stats(&[], &[]);
        assert_eq!(stats.average, 0.0);
        assert_eq!(stats.total, 0);
        assert!(stats.distribution.is_empty());
        assert!(stats.weekly.is_empty());
    }

    #[test]
    fn average_is_the_rounded_mean() {
        let all = vec![
            entry(1, 2, "2026-08-01 10:00:00"),
            entry(2, 3, "2026-08-02 10:00:00"),
            entry(3, 5, "2026-08-03 10:00:00"),
        ];
        let stats = compute_stats(&all, &[]);
        // 10 / 3 = 3.333... -> 3.33
        assert_eq!(stats.average, 3.33);
        assert_eq!(stats.total, 3);
    }

    #[test]
    fn distribution_counts_each_value() {
        let all = vec![
            entry(1, 2, "2026-08-01 10:00:00"),
            entry(2, 2, "2026-08-02 10:00:00"),
            entry(3, 5, "2026-08-03 10:00:00"),
        ];
        let stats = compute_stats(&all, &[]);
        assert_eq!(stats.distribution.get(&2), Some(&2));
        assert_eq!(stats.distribution.get(&5), Some(&1));
        assert_eq!(stats.distribution.get(&1), None);
    }

    #[test]
    fn weekly_averages_group_by_day_oldest_first() {
        let recent = vec![
            entry(1, 4, "2026-08-25 09:00:00"),
            entry(2, 2, "2026-08-25 21:00:00"),
            entry(3, 5, "2026-08-27 12:00:00"),
        ];
        let stats = compute_stats(&recent, &recent);
        assert_eq!(stats.weekly.len(), 2);
        assert_eq!(
            stats.weekly[0],
            DailyMood {
                date: NaiveDate::from_ymd_opt(2026, 8, 25).expect("date"),
                avg_mood: 3.0,
            }
        );
        assert_eq!(
            stats.weekly[1],
            DailyMood {
                date: NaiveDate::from_ymd_opt(2026, 8, 27).expect("date"),
                avg_mood: 5.0,
            }
        );
    }
}

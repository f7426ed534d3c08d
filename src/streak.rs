use crate::models::{AppData, ContributionDay, StreakSnapshot};
use chrono::{Duration, Local, NaiveDate};
use tracing::warn;

pub fn snapshot_for(data: &AppData) -> StreakSnapshot {
    compute_snapshot_at(Local::now().date_naive(), &calendar_days(data))
}

/// Stored calendar keys are written as `YYYY-MM-DD`; anything else in the
/// state file is skipped rather than poisoning the whole calendar.
pub fn calendar_days(data: &AppData) -> Vec<ContributionDay> {
    let mut days = Vec::with_capacity(data.days.len());
    for (key, &count) in &data.days {
        match NaiveDate::parse_from_str(key, "%Y-%m-%d") {
            Ok(date) => days.push(ContributionDay { date, count }),
            Err(err) => warn!("skipping malformed calendar key {key}: {err}"),
        }
    }
    days
}

/// Derive streak statistics from an unordered day collection, evaluated
/// as of `today`. Pure; never reads the clock and never fails.
pub fn compute_snapshot_at(today: NaiveDate, days: &[ContributionDay]) -> StreakSnapshot {
    if days.is_empty() {
        return StreakSnapshot::default();
    }

    let total_count = days.iter().map(|day| day.count).sum();

    let mut ordered: Vec<&ContributionDay> = days.iter().collect();
    ordered.sort_by_key(|day| day.date);

    let current_streak = current_streak(today, &ordered);
    let longest_streak = longest_streak(&ordered).max(current_streak);

    StreakSnapshot {
        current_streak,
        longest_streak,
        total_count,
    }
}

fn current_streak(today: NaiveDate, ordered: &[&ContributionDay]) -> u32 {
    let Some(anchor) = ordered.last() else {
        return 0;
    };

    // A calendar whose newest day is older than yesterday has no live streak.
    if (today - anchor.date).num_days() > 1 {
        return 0;
    }

    // A zero-count "today" does not break a streak that ended yesterday.
    let mut remaining = ordered;
    let mut expected = anchor.date;
    if anchor.date == today && anchor.count == 0 {
        remaining = &ordered[..ordered.len() - 1];
        expected = today - Duration::days(1);
    }

    let mut streak = 0;
    for day in remaining.iter().rev() {
        if day.count == 0 || day.date != expected {
            break;
        }
        streak += 1;
        expected = day.date - Duration::days(1);
    }
    streak
}

fn longest_streak(ordered: &[&ContributionDay]) -> u32 {
    let mut longest = 0;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for day in ordered {
        run = if day.count == 0 {
            0
        } else if prev.is_some_and(|date| (day.date - date).num_days() == 1) {
            run + 1
        } else {
            1
        };
        longest = longest.max(run);
        prev = Some(day.date);
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: NaiveDate, count: u64) -> ContributionDay {
        ContributionDay { date, count }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_calendar_is_all_zero() {
        let today = date(2026, 8, 6);
        let snapshot = compute_snapshot_at(today, &[]);
        assert_eq!(snapshot, StreakSnapshot::default());
    }

    #[test]
    fn run_ending_today_counts_as_current() {
        let today = date(2026, 8, 6);
        let days = [
            day(today, 3),
            day(today - Duration::days(1), 2),
            day(today - Duration::days(2), 0),
        ];
        let snapshot = compute_snapshot_at(today, &days);
        assert_eq!(snapshot.current_streak, 2);
        assert_eq!(snapshot.longest_streak, 2);
        assert_eq!(snapshot.total_count, 5);
    }

    #[test]
    fn quiet_today_does_not_break_yesterdays_streak() {
        let today = date(2026, 8, 6);
        let days = [
            day(today, 0),
            day(today - Duration::days(1), 4),
            day(today - Duration::days(2), 4),
            day(today - Duration::days(3), 0),
        ];
        let snapshot = compute_snapshot_at(today, &days);
        assert_eq!(snapshot.current_streak, 2);
        assert_eq!(snapshot.longest_streak, 2);
    }

    #[test]
    fn stale_calendar_has_no_current_streak() {
        let today = date(2026, 8, 6);
        let days = [day(today - Duration::days(3), 5)];
        let snapshot = compute_snapshot_at(today, &days);
        assert_eq!(snapshot.current_streak, 0);
        assert_eq!(snapshot.longest_streak, 1);
        assert_eq!(snapshot.total_count, 5);
    }

    #[test]
    fn stale_calendar_still_reports_longest_run() {
        let today = date(2026, 8, 6);
        let days: Vec<ContributionDay> = (5..11)
            .map(|offset| day(today - Duration::days(offset), 1))
            .collect();
        let snapshot = compute_snapshot_at(today, &days);
        assert_eq!(snapshot.current_streak, 0);
        assert_eq!(snapshot.longest_streak, 6);
    }

    #[test]
    fn single_active_day_today() {
        let today = date(2026, 8, 6);
        let snapshot = compute_snapshot_at(today, &[day(today, 1)]);
        assert_eq!(snapshot.current_streak, 1);
        assert_eq!(snapshot.longest_streak, 1);
    }

    #[test]
    fn all_zero_counts_yield_zero_everything() {
        let today = date(2026, 8, 6);
        let days = [
            day(today, 0),
            day(today - Duration::days(1), 0),
            day(today - Duration::days(2), 0),
        ];
        let snapshot = compute_snapshot_at(today, &days);
        assert_eq!(snapshot, StreakSnapshot::default());
    }

    #[test]
    fn quiet_yesterday_anchor_gives_zero_current() {
        let today = date(2026, 8, 6);
        let days = [day(today - Duration::days(1), 0), day(today - Duration::days(2), 7)];
        let snapshot = compute_snapshot_at(today, &days);
        assert_eq!(snapshot.current_streak, 0);
        assert_eq!(snapshot.longest_streak, 1);
    }

    #[test]
    fn skipped_quiet_today_requires_yesterday_next() {
        // Newest real activity five days back: skipping today's zero must
        // not let the walk jump the hole.
        let today = date(2026, 8, 6);
        let days = [day(today, 0), day(today - Duration::days(5), 9)];
        let snapshot = compute_snapshot_at(today, &days);
        assert_eq!(snapshot.current_streak, 0);
        assert_eq!(snapshot.longest_streak, 1);
    }

    #[test]
    fn date_hole_splits_runs() {
        let today = date(2026, 8, 6);
        let days = [
            day(today, 1),
            day(today - Duration::days(1), 1),
            day(today - Duration::days(4), 1),
            day(today - Duration::days(5), 1),
            day(today - Duration::days(6), 1),
        ];
        let snapshot = compute_snapshot_at(today, &days);
        assert_eq!(snapshot.current_streak, 2);
        assert_eq!(snapshot.longest_streak, 3);
    }

    #[test]
    fn input_order_does_not_matter() {
        let today = date(2026, 8, 6);
        let mut days = vec![
            day(today - Duration::days(2), 2),
            day(today, 1),
            day(today - Duration::days(1), 3),
        ];
        let forward = compute_snapshot_at(today, &days);
        days.reverse();
        let backward = compute_snapshot_at(today, &days);
        assert_eq!(forward, backward);
        assert_eq!(forward.current_streak, 3);
        assert_eq!(forward.total_count, 6);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let today = date(2026, 8, 6);
        let days = [day(today, 2), day(today - Duration::days(1), 1)];
        let first = compute_snapshot_at(today, &days);
        let second = compute_snapshot_at(today, &days);
        assert_eq!(first, second);
    }

    #[test]
    fn longest_never_below_current() {
        let today = date(2026, 8, 6);
        let days = [
            day(today, 1),
            day(today - Duration::days(1), 1),
            day(today - Duration::days(2), 1),
            day(today - Duration::days(4), 1),
        ];
        let snapshot = compute_snapshot_at(today, &days);
        assert_eq!(snapshot.current_streak, 3);
        assert!(snapshot.longest_streak >= snapshot.current_streak);
    }

    #[test]
    fn calendar_days_skips_malformed_keys() {
        let mut data = AppData::default();
        data.days.insert("2026-08-05".to_string(), 4);
        data.days.insert("not-a-date".to_string(), 9);

        let days = calendar_days(&data);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, date(2026, 8, 5));
        assert_eq!(days[0].count, 4);
    }
}

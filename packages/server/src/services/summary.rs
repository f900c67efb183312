//! Qualification status aggregation.
//!
//! Everything derived from a participant's workshop registrations is
//! recomputed here at read time: result percentages, verdicts, the
//! sorted outcome breakdown and the per-participation counts. Nothing
//! in this module writes to the database.

use chrono::NaiveDate;
use sea_orm::*;
use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::{camp, camp_participation, solution, user_profile, workshop, workshop_participant};
use crate::error::AppError;

/// Display priority of a single workshop registration within a summary.
///
/// Graded outcomes carry their percentage; the three non-numeric states
/// sort below any percentage, worst last.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// The workshop does not require qualification.
    NotQualifying,
    /// Uploads are expected but no solution was sent.
    MissingSolution,
    /// A solution awaits grading.
    Ungraded,
    /// Graded, with the result as a percentage of the denominator.
    Graded(f64),
}

impl Outcome {
    /// Sort key. Percentages sort by value, the sentinel states below zero.
    pub fn priority(self) -> f64 {
        match self {
            Outcome::NotQualifying => -3.0,
            Outcome::MissingSolution => -2.0,
            Outcome::Ungraded => -1.0,
            Outcome::Graded(percent) => percent,
        }
    }
}

/// Classify one workshop registration.
pub fn classify_outcome(
    workshop: &workshop::Model,
    result: Option<f64>,
    has_solution: bool,
    max_entered: Option<f64>,
    cap: f64,
) -> Outcome {
    if !workshop.is_qualifying {
        Outcome::NotQualifying
    } else if workshop.solution_uploads_enabled && !has_solution {
        Outcome::MissingSolution
    } else {
        match result_in_percent(workshop, result, max_entered, cap) {
            Some(percent) => Outcome::Graded(percent),
            None => Outcome::Ungraded,
        }
    }
}

/// Result as a percentage of the workshop's denominator, clamped to
/// `[0, cap]`. The denominator is `max_points` when set, otherwise the
/// highest result entered for the workshop. `None` when the workshop is
/// not qualifying or the registration is ungraded.
pub fn result_in_percent(
    workshop: &workshop::Model,
    result: Option<f64>,
    max_entered: Option<f64>,
    cap: f64,
) -> Option<f64> {
    if !workshop.is_qualifying {
        return None;
    }
    let result = result?;
    let denominator = workshop.max_points.or(max_entered)?;
    if denominator == 0.0 {
        return None;
    }
    Some((result / denominator * 100.0).clamp(0.0, cap))
}

/// Qualified/not-qualified verdict. `None` when the workshop is not
/// qualifying, has no threshold, or the registration is ungraded.
pub fn is_qualified(workshop: &workshop::Model, result: Option<f64>) -> Option<bool> {
    if !workshop.is_qualifying {
        return None;
    }
    let threshold = workshop.qualification_threshold?;
    result.map(|r| r >= threshold)
}

/// One workshop registration, resolved for display.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct WorkshopOutcome {
    pub workshop_id: i32,
    pub workshop_name: String,
    pub workshop_title: String,
    pub workshop_status: Option<String>,
    pub is_qualifying: bool,
    pub solution_uploads_enabled: bool,
    pub has_solution: bool,
    pub qualification_result: Option<f64>,
    pub result_in_percent: Option<f64>,
    pub is_qualified: Option<bool>,
    pub comment: String,
    #[serde(skip)]
    pub priority: f64,
    #[serde(skip)]
    pub publicly_visible: bool,
}

/// Counts derived from a participation's workshop registrations.
///
/// Only registrations to accepted workshops count towards grading
/// expectations. `checked_solution_percentage` is `-1` when nothing is
/// expected to be graded.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, ToSchema)]
pub struct ParticipationCounts {
    pub workshop_count: u32,
    pub accepted_workshop_count: u32,
    pub solution_count: u32,
    pub checked_solution_count: u32,
    pub to_be_checked_solution_count: u32,
    pub checked_solution_percentage: f64,
}

impl ParticipationCounts {
    pub fn zero() -> Self {
        Self {
            workshop_count: 0,
            accepted_workshop_count: 0,
            solution_count: 0,
            checked_solution_count: 0,
            to_be_checked_solution_count: 0,
            checked_solution_percentage: -1.0,
        }
    }
}

/// Recompute counts from the resolved outcome set.
pub fn derive_counts(outcomes: &[WorkshopOutcome]) -> ParticipationCounts {
    let mut counts = ParticipationCounts::zero();
    for outcome in outcomes {
        counts.workshop_count += 1;
        let accepted = outcome.workshop_status.as_deref() == Some(workshop::STATUS_ACCEPTED);
        if accepted {
            counts.accepted_workshop_count += 1;
        }
        if !(accepted && outcome.is_qualifying) {
            continue;
        }
        if outcome.solution_uploads_enabled {
            if outcome.has_solution {
                counts.solution_count += 1;
                counts.to_be_checked_solution_count += 1;
            }
        } else {
            counts.to_be_checked_solution_count += 1;
        }
        if outcome.qualification_result.is_some() {
            counts.checked_solution_count += 1;
        }
    }
    counts.checked_solution_percentage = if counts.to_be_checked_solution_count > 0 {
        f64::from(counts.checked_solution_count) / f64::from(counts.to_be_checked_solution_count)
            * 100.0
    } else {
        -1.0
    };
    counts
}

/// Sort outcomes by display priority, best first. Ties keep their
/// original (registration) order.
pub fn sort_outcomes(outcomes: &mut [WorkshopOutcome]) {
    outcomes.sort_by(|a, b| b.priority.total_cmp(&a.priority));
}

/// Aggregate result percentage across a participation's qualifying
/// accepted workshops: the mean of graded percentages, or `None` when
/// nothing is graded.
pub fn aggregate_result_percent(outcomes: &[WorkshopOutcome]) -> Option<f64> {
    let graded: Vec<f64> = outcomes
        .iter()
        .filter(|o| {
            o.workshop_status.as_deref() == Some(workshop::STATUS_ACCEPTED) && o.is_qualifying
        })
        .filter_map(|o| o.result_in_percent)
        .collect();
    if graded.is_empty() {
        None
    } else {
        Some(graded.iter().sum::<f64>() / graded.len() as f64)
    }
}

/// One camp year of a participant's history.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct YearSummary {
    pub year: i32,
    pub camp_start_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub has_cover_letter: bool,
    /// Outcomes sorted by display priority, best first. Filtered to
    /// publicly visible workshops unless the caller may see all.
    pub workshops: Vec<WorkshopOutcome>,
    /// Always derived from the full registration set, never from the
    /// filtered breakdown above.
    pub counts: ParticipationCounts,
    pub result_in_percent: Option<f64>,
}

/// A participant's full qualification summary.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct ProfileSummary {
    pub user_profile_id: i32,
    pub has_completed_profile: bool,
    /// Newest year first. At most one entry per year.
    pub years: Vec<YearSummary>,
}

fn resolve_outcomes(
    participations: &[workshop_participant::Model],
    workshops: &[workshop::Model],
    solutions: &HashSetLike,
    max_entered: &std::collections::HashMap<i32, f64>,
    cap: f64,
) -> Vec<WorkshopOutcome> {
    let mut outcomes = Vec::with_capacity(participations.len());
    for wp in participations {
        let Some(workshop) = workshops.iter().find(|w| w.id == wp.workshop_id) else {
            continue;
        };
        let has_solution = solutions.contains(&wp.id);
        let max = max_entered.get(&workshop.id).copied();
        let outcome = classify_outcome(workshop, wp.qualification_result, has_solution, max, cap);
        outcomes.push(WorkshopOutcome {
            workshop_id: workshop.id,
            workshop_name: workshop.name.clone(),
            workshop_title: workshop.title.clone(),
            workshop_status: workshop.status.clone(),
            is_qualifying: workshop.is_qualifying,
            solution_uploads_enabled: workshop.solution_uploads_enabled,
            has_solution,
            qualification_result: wp.qualification_result,
            result_in_percent: result_in_percent(workshop, wp.qualification_result, max, cap),
            is_qualified: is_qualified(workshop, wp.qualification_result),
            comment: wp.comment.clone(),
            priority: outcome.priority(),
            publicly_visible: workshop.is_publicly_visible(),
        });
    }
    outcomes
}

type HashSetLike = std::collections::HashSet<i32>;

/// Everything fetched for one camp year of a profile's history.
#[derive(Clone, Debug)]
pub struct YearRecords {
    pub participation: camp_participation::Model,
    pub camp_start_date: Option<NaiveDate>,
    pub registrations: Vec<workshop_participant::Model>,
    pub workshops: Vec<workshop::Model>,
    pub solutions: HashSetLike,
    pub max_entered: std::collections::HashMap<i32, f64>,
}

/// Assemble the summary from already-fetched records.
///
/// A `year` keeps only that edition. When `see_all_workshops` is false,
/// non-public workshops are dropped from the displayed breakdown. Counts
/// are always derived from the unfiltered set.
pub fn summarize_years(
    profile: &user_profile::Model,
    records: &[YearRecords],
    year: Option<i32>,
    cover_letter_min_length: usize,
    profile_page_min_length: usize,
    max_result_percent: f64,
    see_all_workshops: bool,
) -> ProfileSummary {
    let mut years = Vec::with_capacity(records.len());
    for rec in records {
        let cp = &rec.participation;
        if year.is_some_and(|y| y != cp.year) {
            continue;
        }

        let mut outcomes = resolve_outcomes(
            &rec.registrations,
            &rec.workshops,
            &rec.solutions,
            &rec.max_entered,
            max_result_percent,
        );
        let counts = derive_counts(&outcomes);
        let result = aggregate_result_percent(&outcomes);
        if !see_all_workshops {
            outcomes.retain(|o| o.publicly_visible);
        }
        sort_outcomes(&mut outcomes);

        years.push(YearSummary {
            year: cp.year,
            camp_start_date: rec.camp_start_date,
            status: cp.status.clone(),
            has_cover_letter: cp.cover_letter.len() >= cover_letter_min_length,
            workshops: outcomes,
            counts,
            result_in_percent: result,
        });
    }

    ProfileSummary {
        user_profile_id: profile.id,
        has_completed_profile: profile.profile_page.len() > profile_page_min_length,
        years,
    }
}

/// Build the year-by-year summary for one profile, across all of its
/// participations or a single `year`.
pub async fn summarize_profile(
    db: &DatabaseConnection,
    profile: &user_profile::Model,
    year: Option<i32>,
    cover_letter_min_length: usize,
    profile_page_min_length: usize,
    max_result_percent: f64,
    see_all_workshops: bool,
) -> Result<ProfileSummary, AppError> {
    let mut query = camp_participation::Entity::find()
        .filter(camp_participation::Column::UserProfileId.eq(profile.id))
        .order_by_desc(camp_participation::Column::Year);
    if let Some(year) = year {
        query = query.filter(camp_participation::Column::Year.eq(year));
    }
    let participations = query.all(db).await?;

    let mut records = Vec::with_capacity(participations.len());
    for cp in participations {
        let camp = camp::Entity::find_by_id(cp.year)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Camp {} not found", cp.year)))?;

        let registrations = workshop_participant::Entity::find()
            .filter(workshop_participant::Column::CampParticipationId.eq(cp.id))
            .all(db)
            .await?;

        let workshop_ids: Vec<i32> = registrations.iter().map(|wp| wp.workshop_id).collect();
        let workshops = workshop::Entity::find()
            .filter(workshop::Column::Id.is_in(workshop_ids.clone()))
            .all(db)
            .await?;

        let wp_ids: Vec<i32> = registrations.iter().map(|wp| wp.id).collect();
        let solutions: HashSetLike = solution::Entity::find()
            .filter(solution::Column::WorkshopParticipantId.is_in(wp_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|s| s.workshop_participant_id)
            .collect();

        let max_entered = max_entered_results(db, &workshop_ids).await?;

        records.push(YearRecords {
            participation: cp,
            camp_start_date: camp.start_date,
            registrations,
            workshops,
            solutions,
            max_entered,
        });
    }

    Ok(summarize_years(
        profile,
        &records,
        year,
        cover_letter_min_length,
        profile_page_min_length,
        max_result_percent,
        see_all_workshops,
    ))
}

/// The active camp year: an explicitly configured year wins, otherwise
/// the most recently started edition. `None` when nothing is configured
/// and no edition has started.
pub fn select_current_year(
    camps: &[camp::Model],
    configured: Option<i32>,
    today: NaiveDate,
) -> Option<i32> {
    if configured.is_some() {
        return configured;
    }
    camps
        .iter()
        .filter(|c| c.has_started(today))
        .max_by_key(|c| c.start_date)
        .map(|c| c.year)
}

/// Highest entered result per workshop, the fallback denominator when a
/// workshop declares no `max_points`.
pub async fn max_entered_results(
    db: &DatabaseConnection,
    workshop_ids: &[i32],
) -> Result<std::collections::HashMap<i32, f64>, AppError> {
    let all = workshop_participant::Entity::find()
        .filter(workshop_participant::Column::WorkshopId.is_in(workshop_ids.to_vec()))
        .all(db)
        .await?;
    let mut max: std::collections::HashMap<i32, f64> = std::collections::HashMap::new();
    for wp in all {
        if let Some(result) = wp.qualification_result {
            max.entry(wp.workshop_id)
                .and_modify(|m| {
                    if result > *m {
                        *m = result;
                    }
                })
                .or_insert(result);
        }
    }
    Ok(max)
}

/// Counts for one workshop's participant set, shown on workshop listings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, ToSchema)]
pub struct WorkshopCounts {
    pub registered_count: u32,
    /// `None` when the workshop does not collect uploads.
    pub solution_count: Option<u32>,
    /// `None` when the workshop is not qualifying.
    pub checked_solution_count: Option<u32>,
    pub to_be_checked_solution_count: Option<u32>,
    pub qualified_count: Option<u32>,
    pub checked_solution_percentage: f64,
}

/// Recompute a workshop's counts from its participant set.
pub fn derive_workshop_counts(
    workshop: &workshop::Model,
    participants: &[workshop_participant::Model],
    solutions: &HashSetLike,
) -> WorkshopCounts {
    let registered = participants.len() as u32;
    if !workshop.is_qualifying {
        return WorkshopCounts {
            registered_count: registered,
            solution_count: None,
            checked_solution_count: None,
            to_be_checked_solution_count: None,
            qualified_count: None,
            checked_solution_percentage: -1.0,
        };
    }
    let solution_count = workshop
        .solution_uploads_enabled
        .then(|| participants.iter().filter(|p| solutions.contains(&p.id)).count() as u32);
    let checked = participants
        .iter()
        .filter(|p| p.qualification_result.is_some())
        .count() as u32;
    let to_be_checked = solution_count.unwrap_or(registered);
    let qualified = participants
        .iter()
        .filter(|p| is_qualified(workshop, p.qualification_result) == Some(true))
        .count() as u32;
    WorkshopCounts {
        registered_count: registered,
        solution_count,
        checked_solution_count: Some(checked),
        to_be_checked_solution_count: Some(to_be_checked),
        qualified_count: Some(qualified),
        checked_solution_percentage: if to_be_checked > 0 {
            f64::from(checked) / f64::from(to_be_checked) * 100.0
        } else {
            -1.0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_workshop(
        is_qualifying: bool,
        uploads: bool,
        max_points: Option<f64>,
        threshold: Option<f64>,
    ) -> workshop::Model {
        workshop::Model {
            id: 1,
            year: 2024,
            name: "algo".into(),
            title: "Algorytmy".into(),
            status: Some(workshop::STATUS_ACCEPTED.into()),
            proposition_description: String::new(),
            page_content: String::new(),
            page_content_is_public: true,
            is_qualifying,
            solution_uploads_enabled: uploads,
            max_points,
            qualification_threshold: threshold,
            created_at: Utc::now(),
        }
    }

    fn outcome(
        id: i32,
        status: Option<&str>,
        is_qualifying: bool,
        uploads: bool,
        has_solution: bool,
        result: Option<f64>,
        percent: Option<f64>,
        priority: f64,
        visible: bool,
    ) -> WorkshopOutcome {
        WorkshopOutcome {
            workshop_id: id,
            workshop_name: format!("w{id}"),
            workshop_title: format!("W{id}"),
            workshop_status: status.map(Into::into),
            is_qualifying,
            solution_uploads_enabled: uploads,
            has_solution,
            qualification_result: result,
            result_in_percent: percent,
            is_qualified: None,
            comment: String::new(),
            priority,
            publicly_visible: visible,
        }
    }

    #[test]
    fn percent_uses_max_points_denominator() {
        let w = test_workshop(true, true, Some(20.0), Some(10.0));
        assert_eq!(result_in_percent(&w, Some(15.0), Some(15.0), 100.0), Some(75.0));
        assert_eq!(result_in_percent(&w, Some(5.0), Some(15.0), 100.0), Some(25.0));
    }

    #[test]
    fn percent_falls_back_to_max_entered() {
        let w = test_workshop(true, true, None, Some(10.0));
        assert_eq!(result_in_percent(&w, Some(15.0), Some(15.0), 100.0), Some(100.0));
        let third = result_in_percent(&w, Some(5.0), Some(15.0), 100.0);
        assert!((third.unwrap() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn percent_none_for_ungraded_or_not_qualifying() {
        let qualifying = test_workshop(true, true, Some(20.0), Some(10.0));
        assert_eq!(result_in_percent(&qualifying, None, None, 100.0), None);
        let casual = test_workshop(false, false, Some(20.0), Some(10.0));
        assert_eq!(result_in_percent(&casual, Some(15.0), Some(15.0), 100.0), None);
    }

    #[test]
    fn percent_clamps_to_configured_cap() {
        let w = test_workshop(true, false, Some(10.0), Some(5.0));
        assert_eq!(result_in_percent(&w, Some(2137.0), Some(2137.0), 200.0), Some(200.0));
        assert_eq!(result_in_percent(&w, Some(-2137.0), Some(2137.0), 200.0), Some(0.0));
        assert_eq!(result_in_percent(&w, Some(150.0), None, 100.0), Some(100.0));
    }

    #[test]
    fn verdict_requires_threshold_and_grade() {
        let with_threshold = test_workshop(true, true, Some(20.0), Some(10.0));
        assert_eq!(is_qualified(&with_threshold, Some(10.0)), Some(true));
        assert_eq!(is_qualified(&with_threshold, Some(9.99)), Some(false));
        assert_eq!(is_qualified(&with_threshold, None), None);

        let no_threshold = test_workshop(true, true, Some(20.0), None);
        assert_eq!(is_qualified(&no_threshold, Some(20.0)), None);

        let casual = test_workshop(false, false, None, Some(10.0));
        assert_eq!(is_qualified(&casual, Some(20.0)), None);
    }

    #[test]
    fn outcome_priorities_are_ordered() {
        assert!(Outcome::NotQualifying.priority() < Outcome::MissingSolution.priority());
        assert!(Outcome::MissingSolution.priority() < Outcome::Ungraded.priority());
        assert!(Outcome::Ungraded.priority() < Outcome::Graded(0.0).priority());
    }

    #[test]
    fn classify_missing_solution_only_when_uploads_expected() {
        let uploads = test_workshop(true, true, Some(10.0), Some(5.0));
        assert_eq!(
            classify_outcome(&uploads, None, false, None, 100.0),
            Outcome::MissingSolution
        );
        assert_eq!(classify_outcome(&uploads, None, true, None, 100.0), Outcome::Ungraded);

        let no_uploads = test_workshop(true, false, Some(10.0), Some(5.0));
        assert_eq!(classify_outcome(&no_uploads, None, false, None, 100.0), Outcome::Ungraded);
        assert_eq!(
            classify_outcome(&no_uploads, Some(8.0), false, None, 100.0),
            Outcome::Graded(80.0)
        );
    }

    #[test]
    fn outcomes_sort_descending_with_sentinels_last() {
        let mut outcomes = vec![
            outcome(1, Some("Accepted"), false, false, false, None, None, -3.0, true),
            outcome(2, Some("Accepted"), true, true, true, Some(5.0), Some(50.0), 50.0, true),
            outcome(3, Some("Accepted"), true, true, true, None, None, -1.0, true),
            outcome(4, Some("Accepted"), true, true, false, None, None, -2.0, true),
            outcome(5, Some("Accepted"), true, true, true, Some(9.0), Some(90.0), 90.0, true),
        ];
        sort_outcomes(&mut outcomes);
        let ids: Vec<i32> = outcomes.iter().map(|o| o.workshop_id).collect();
        assert_eq!(ids, vec![5, 2, 3, 4, 1]);
    }

    #[test]
    fn counts_track_only_accepted_qualifying_workshops() {
        let outcomes = vec![
            // accepted, qualifying, uploads, solution sent, graded
            outcome(1, Some("Accepted"), true, true, true, Some(5.0), Some(50.0), 50.0, true),
            // accepted, qualifying, uploads, no solution
            outcome(2, Some("Accepted"), true, true, false, None, None, -2.0, true),
            // accepted, qualifying, no uploads, ungraded
            outcome(3, Some("Accepted"), true, false, false, None, None, -1.0, true),
            // accepted but not qualifying
            outcome(4, Some("Accepted"), false, false, false, None, None, -3.0, true),
            // qualifying but still proposed
            outcome(5, None, true, true, true, Some(5.0), Some(50.0), 50.0, false),
        ];
        let counts = derive_counts(&outcomes);
        assert_eq!(counts.workshop_count, 5);
        assert_eq!(counts.accepted_workshop_count, 4);
        assert_eq!(counts.solution_count, 1);
        assert_eq!(counts.to_be_checked_solution_count, 2);
        assert_eq!(counts.checked_solution_count, 1);
        assert!((counts.checked_solution_percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn counts_percentage_is_sentinel_when_nothing_expected() {
        assert_eq!(derive_counts(&[]).checked_solution_percentage, -1.0);
        let only_casual = vec![outcome(1, Some("Accepted"), false, false, false, None, None, -3.0, true)];
        assert_eq!(derive_counts(&only_casual).checked_solution_percentage, -1.0);
    }

    #[test]
    fn counts_ignore_visibility_filtering() {
        // A hidden (proposed) workshop still participates in workshop_count
        // even though the displayed breakdown drops it.
        let outcomes = vec![
            outcome(1, Some("Accepted"), true, false, false, Some(5.0), Some(50.0), 50.0, true),
            outcome(2, None, true, false, false, None, None, -1.0, false),
        ];
        let counts = derive_counts(&outcomes);
        assert_eq!(counts.workshop_count, 2);
        let visible: Vec<&WorkshopOutcome> =
            outcomes.iter().filter(|o| o.publicly_visible).collect();
        assert_eq!(visible.len(), 1);
    }

    #[test]
    fn aggregate_percent_averages_graded_accepted() {
        let outcomes = vec![
            outcome(1, Some("Accepted"), true, false, false, Some(5.0), Some(50.0), 50.0, true),
            outcome(2, Some("Accepted"), true, false, false, Some(9.0), Some(90.0), 90.0, true),
            outcome(3, Some("Accepted"), true, false, false, None, None, -1.0, true),
            outcome(4, None, true, false, false, Some(9.0), Some(90.0), 90.0, false),
        ];
        assert_eq!(aggregate_result_percent(&outcomes), Some(70.0));
        assert_eq!(aggregate_result_percent(&[]), None);
    }

    #[test]
    fn workshop_counts_with_uploads() {
        let w = test_workshop(true, true, Some(10.0), Some(5.0));
        let now = Utc::now();
        let wp = |id: i32, result: Option<f64>| workshop_participant::Model {
            id,
            camp_participation_id: id,
            workshop_id: 1,
            qualification_result: result,
            comment: String::new(),
            created_at: now,
        };
        let participants = vec![wp(1, Some(7.0)), wp(2, Some(3.0)), wp(3, None), wp(4, None)];
        let solutions: std::collections::HashSet<i32> = [1, 2, 3].into();
        let counts = derive_workshop_counts(&w, &participants, &solutions);
        assert_eq!(counts.registered_count, 4);
        assert_eq!(counts.solution_count, Some(3));
        assert_eq!(counts.checked_solution_count, Some(2));
        assert_eq!(counts.to_be_checked_solution_count, Some(3));
        assert_eq!(counts.qualified_count, Some(1));
        assert!((counts.checked_solution_percentage - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn workshop_counts_without_uploads_expect_everyone() {
        let w = test_workshop(true, false, Some(10.0), Some(5.0));
        let now = Utc::now();
        let wp = |id: i32, result: Option<f64>| workshop_participant::Model {
            id,
            camp_participation_id: id,
            workshop_id: 1,
            qualification_result: result,
            comment: String::new(),
            created_at: now,
        };
        let participants = vec![wp(1, Some(7.0)), wp(2, Some(3.0)), wp(3, None)];
        let counts = derive_workshop_counts(&w, &participants, &Default::default());
        assert_eq!(counts.solution_count, None);
        assert_eq!(counts.to_be_checked_solution_count, Some(3));
        assert!((counts.checked_solution_percentage - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn workshop_counts_for_casual_workshop() {
        let w = test_workshop(false, false, None, None);
        let counts = derive_workshop_counts(&w, &[], &Default::default());
        assert_eq!(counts.solution_count, None);
        assert_eq!(counts.checked_solution_count, None);
        assert_eq!(counts.qualified_count, None);
        assert_eq!(counts.checked_solution_percentage, -1.0);
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_camp(year: i32, start: Option<NaiveDate>) -> camp::Model {
        camp::Model {
            year,
            start_date: start,
            end_date: None,
            proposal_end_date: None,
            program_finalized: false,
            form_question_birth_date_id: None,
            form_question_arrival_date_id: None,
            form_question_departure_date_id: None,
        }
    }

    fn test_profile() -> user_profile::Model {
        user_profile::Model {
            id: 7,
            user_id: 7,
            gender: None,
            school: String::new(),
            matura_exam_year: None,
            how_do_you_know_about: String::new(),
            profile_page: String::new(),
        }
    }

    fn records_for(year: i32) -> YearRecords {
        let mut workshop = test_workshop(true, false, Some(10.0), Some(5.0));
        workshop.id = year;
        workshop.year = year;
        let registration = workshop_participant::Model {
            id: year,
            camp_participation_id: year,
            workshop_id: workshop.id,
            qualification_result: Some(7.0),
            comment: String::new(),
            created_at: Utc::now(),
        };
        YearRecords {
            participation: camp_participation::Model {
                id: year,
                user_profile_id: 7,
                year,
                status: None,
                cover_letter: String::new(),
                created_at: Utc::now(),
            },
            camp_start_date: None,
            registrations: vec![registration],
            workshops: vec![workshop],
            solutions: HashSetLike::new(),
            max_entered: std::collections::HashMap::new(),
        }
    }

    #[test]
    fn year_filter_yields_at_most_one_summary() {
        let profile = test_profile();
        let records = vec![records_for(2024), records_for(2023)];
        let all = summarize_years(&profile, &records, None, 50, 50, 100.0, true);
        assert_eq!(all.years.len(), 2);
        let filtered = summarize_years(&profile, &records, Some(2023), 50, 50, 100.0, true);
        assert_eq!(filtered.years.len(), 1);
        assert_eq!(filtered.years[0].year, 2023);
        assert_eq!(filtered.years[0].result_in_percent, Some(70.0));
    }

    #[test]
    fn recomputation_yields_identical_summaries() {
        let profile = test_profile();
        let records = vec![records_for(2024), records_for(2023)];
        let first = summarize_years(&profile, &records, None, 50, 50, 100.0, false);
        let second = summarize_years(&profile, &records, None, 50, 50, 100.0, false);
        assert_eq!(first, second);
    }

    #[test]
    fn configured_year_overrides_started_editions() {
        let camps = vec![
            test_camp(2023, Some(day(2023, 7, 1))),
            test_camp(2024, Some(day(2024, 7, 1))),
        ];
        assert_eq!(select_current_year(&camps, Some(2023), day(2024, 8, 1)), Some(2023));
    }

    #[test]
    fn most_recently_started_edition_is_current() {
        let camps = vec![
            test_camp(2023, Some(day(2023, 7, 1))),
            test_camp(2024, Some(day(2024, 7, 1))),
            test_camp(2025, Some(day(2025, 7, 1))),
        ];
        assert_eq!(select_current_year(&camps, None, day(2024, 12, 1)), Some(2024));
        assert_eq!(select_current_year(&camps, None, day(2025, 7, 1)), Some(2025));
    }

    #[test]
    fn no_started_edition_means_no_current_year() {
        let camps = vec![
            test_camp(2026, None),
            test_camp(2027, Some(day(2027, 7, 1))),
        ];
        assert_eq!(select_current_year(&camps, None, day(2026, 8, 1)), None);
    }
}

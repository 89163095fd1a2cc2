//! Fixture generation engine: the preview and commit entry points, and the
//! materializer that turns abstract assignments into fixture records.
//!
//! Both entry points share the same pure pipeline (pairings -> slots ->
//! assignment -> validation); they differ only in whether the persistence
//! branch runs. All data is loaded up front, so the core computation never
//! blocks on I/O.

use chrono::Utc;

use crate::logic;
use crate::models::{
    Assignment, Fixture, Schedule, ScheduleError, Season, SeasonId, TeamId, TeamRegistration,
};
use crate::store::{FixtureStore, SeasonStore, TeamStore};

/// The result of a generation run: the fixture set and how many matchdays
/// it spans.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenerationOutcome {
    pub fixtures: Vec<Fixture>,
    pub matchday_count: u32,
}

impl GenerationOutcome {
    fn from_fixtures(fixtures: Vec<Fixture>) -> Self {
        let matchday_count = fixtures
            .iter()
            .map(|f| f.matchday_number)
            .max()
            .unwrap_or(0);
        Self {
            fixtures,
            matchday_count,
        }
    }
}

/// The pure pipeline: team pool -> pairings -> calendar slots -> assigned
/// schedule, with the validator run as a self-check on the result.
fn compute_schedule(
    season: &Season,
    pool: &[TeamRegistration],
) -> Result<Schedule, ScheduleError> {
    let config = &season.scheduling;
    config.validate()?;

    if pool.len() < 2 {
        return Err(ScheduleError::InsufficientTeams { found: pool.len() });
    }

    let available_dates = logic::count_playable_dates(config);
    if available_dates == 0 {
        return Err(ScheduleError::NoAvailableSlots {
            start: config.start_date,
            end: config.end_date,
        });
    }

    let team_ids: Vec<TeamId> = pool.iter().map(|reg| reg.team.id).collect();
    let pairings = logic::generate_pairings(&team_ids, config.double_round_robin);
    let schedule = logic::assign_pairings(
        &pairings,
        logic::slots(config),
        config.min_rest_days,
        available_dates,
    )?;

    let violations =
        logic::validate_schedule(&schedule, config.double_round_robin, config.min_rest_days);
    if !violations.is_empty() {
        log::error!(
            "schedule for season {} failed self-validation: {:?}",
            season.id,
            violations
        );
        debug_assert!(violations.is_empty());
    }

    Ok(schedule)
}

/// Map the abstract schedule onto concrete fixture records for a season.
pub fn materialize(schedule: &[Assignment], season_id: SeasonId) -> Vec<Fixture> {
    schedule
        .iter()
        .map(|assignment| Fixture::from_assignment(assignment, season_id))
        .collect()
}

/// Compute a season's fixtures without persisting anything.
///
/// Read-only: never touches the fixtures marker, so previews may run
/// concurrently with anything, including a commit-mode run.
pub fn preview_fixtures<S>(
    store: &S,
    season_id: SeasonId,
) -> Result<GenerationOutcome, ScheduleError>
where
    S: SeasonStore + TeamStore + ?Sized,
{
    let season = store.season(season_id)?;
    if !season.status.allows_fixture_changes() {
        return Err(ScheduleError::SeasonNotSchedulable {
            status: season.status,
        });
    }
    let pool = store.eligible_teams(season_id)?;
    let schedule = compute_schedule(&season, &pool)?;
    Ok(GenerationOutcome::from_fixtures(materialize(
        &schedule, season.id,
    )))
}

/// Compute a season's fixtures and persist them atomically.
///
/// The season must be in a status that still allows fixture changes, and
/// only one commit-mode run per season may be in flight: the fixtures
/// marker is flipped to `generating` with a conditional write before any
/// computation starts, and a concurrent run observing that marker fails
/// fast with `ConcurrentGenerationConflict`. Existing fixtures are
/// replaced in one all-or-nothing store operation; on any failure the
/// marker is set to `error` and nothing is persisted.
pub fn generate_fixtures<S>(
    store: &S,
    season_id: SeasonId,
) -> Result<GenerationOutcome, ScheduleError>
where
    S: SeasonStore + TeamStore + FixtureStore + ?Sized,
{
    let season = store.season(season_id)?;
    if !season.status.allows_fixture_changes() {
        return Err(ScheduleError::SeasonNotSchedulable {
            status: season.status,
        });
    }

    store.try_begin_generation(season_id)?;
    log::info!(
        "generating fixtures for season {} ({})",
        season.name,
        season_id
    );

    match commit(store, &season) {
        Ok(outcome) => Ok(outcome),
        Err(err) => {
            if let Err(mark_err) = store.fail_generation(season_id) {
                log::error!(
                    "could not mark generation failure for season {}: {}",
                    season_id,
                    mark_err
                );
            }
            Err(err)
        }
    }
}

fn commit<S>(store: &S, season: &Season) -> Result<GenerationOutcome, ScheduleError>
where
    S: SeasonStore + TeamStore + FixtureStore + ?Sized,
{
    let pool = store.eligible_teams(season.id)?;
    let schedule = compute_schedule(season, &pool)?;
    let fixtures = materialize(&schedule, season.id);

    store.replace_fixtures(season.id, fixtures.clone())?;
    store.finish_generation(
        season.id,
        fixtures.len() as u32,
        Utc::now().naive_utc(),
    )?;

    let outcome = GenerationOutcome::from_fixtures(fixtures);
    log::info!(
        "generated {} fixtures across {} matchdays for season {}",
        outcome.fixtures.len(),
        outcome.matchday_count,
        season.id
    );
    Ok(outcome)
}

/// Delete a season's fixtures (draft/registration seasons only) and reset
/// the fixtures marker to `pending`.
pub fn clear_fixtures<S>(store: &S, season_id: SeasonId) -> Result<usize, ScheduleError>
where
    S: SeasonStore + FixtureStore + ?Sized,
{
    let season = store.season(season_id)?;
    if !season.status.allows_fixture_changes() {
        return Err(ScheduleError::SeasonNotSchedulable {
            status: season.status,
        });
    }
    let removed = store.delete_fixtures(season_id)?;
    store.reset_fixtures_status(season_id)?;
    log::info!(
        "cleared {} fixtures for season {}",
        removed,
        season_id
    );
    Ok(removed)
}

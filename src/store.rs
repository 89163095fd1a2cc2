//! Repository traits for the engine's external collaborators, and the
//! in-memory implementation backing the web binary and the tests.
//!
//! The traits take and return plain data; no scheduling logic lives here.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDateTime;

use crate::models::{
    Fixture, FixturesStatus, RegistrationStatus, ScheduleError, SchedulingConfig, Season,
    SeasonId, SeasonStatus, Team, TeamId, TeamRegistration,
};

/// Season rows: window fields, lifecycle status, and the fixtures marker.
pub trait SeasonStore {
    fn season(&self, id: SeasonId) -> Result<Season, ScheduleError>;
    fn insert_season(&self, season: Season) -> Result<(), ScheduleError>;
    fn update_status(&self, id: SeasonId, status: SeasonStatus) -> Result<Season, ScheduleError>;
    /// Window updates are only allowed while fixtures may still change.
    fn update_scheduling(
        &self,
        id: SeasonId,
        config: SchedulingConfig,
    ) -> Result<Season, ScheduleError>;
    /// Commit-mode critical section: conditionally flip the fixtures marker
    /// to `Generating`. Fails with `ConcurrentGenerationConflict` when a
    /// generation is already running for the season.
    fn try_begin_generation(&self, id: SeasonId) -> Result<(), ScheduleError>;
    /// `Generating` -> `Completed`, stamping the generation time and the
    /// planned match count.
    fn finish_generation(
        &self,
        id: SeasonId,
        total_matches: u32,
        at: NaiveDateTime,
    ) -> Result<(), ScheduleError>;
    /// `Generating` -> `Error`, releasing the critical section.
    fn fail_generation(&self, id: SeasonId) -> Result<(), ScheduleError>;
    /// Back to `Pending` after fixtures are cleared.
    fn reset_fixtures_status(&self, id: SeasonId) -> Result<(), ScheduleError>;
}

/// Team membership per season.
pub trait TeamStore {
    /// Registered/confirmed teams in registration order (then team id, so
    /// the order is a stable total order and scheduling stays
    /// deterministic).
    fn eligible_teams(&self, season_id: SeasonId) -> Result<Vec<TeamRegistration>, ScheduleError>;
    fn register_team(
        &self,
        season_id: SeasonId,
        team: Team,
        registered_at: NaiveDateTime,
    ) -> Result<TeamRegistration, ScheduleError>;
    fn confirm_team(
        &self,
        season_id: SeasonId,
        team_id: TeamId,
    ) -> Result<TeamRegistration, ScheduleError>;
    fn withdraw_team(&self, season_id: SeasonId, team_id: TeamId) -> Result<(), ScheduleError>;
}

/// Persisted fixture rows, keyed by season.
pub trait FixtureStore {
    /// Delete whatever fixtures the season has and insert the new set, as
    /// one all-or-nothing operation.
    fn replace_fixtures(
        &self,
        season_id: SeasonId,
        fixtures: Vec<Fixture>,
    ) -> Result<(), ScheduleError>;
    /// Fixtures ordered by (matchday, date, time, court).
    fn fixtures(&self, season_id: SeasonId) -> Result<Vec<Fixture>, ScheduleError>;
    /// Remove all fixtures of a season, returning how many were deleted.
    fn delete_fixtures(&self, season_id: SeasonId) -> Result<usize, ScheduleError>;
}

#[derive(Default)]
struct MemoryInner {
    seasons: HashMap<SeasonId, Season>,
    registrations: HashMap<SeasonId, Vec<TeamRegistration>>,
    fixtures: HashMap<SeasonId, Vec<Fixture>>,
}

/// In-memory store behind one RwLock. The conditional fixtures-marker
/// transition runs under the write lock, so two commit-mode requests can
/// never both observe a non-generating marker.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, MemoryInner>, ScheduleError> {
        self.inner.read().map_err(|_| ScheduleError::StorePoisoned)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, MemoryInner>, ScheduleError> {
        self.inner.write().map_err(|_| ScheduleError::StorePoisoned)
    }
}

fn season_mut(
    inner: &mut MemoryInner,
    id: SeasonId,
) -> Result<&mut Season, ScheduleError> {
    inner
        .seasons
        .get_mut(&id)
        .ok_or(ScheduleError::SeasonNotFound(id))
}

impl SeasonStore for MemoryStore {
    fn season(&self, id: SeasonId) -> Result<Season, ScheduleError> {
        let inner = self.read()?;
        inner
            .seasons
            .get(&id)
            .cloned()
            .ok_or(ScheduleError::SeasonNotFound(id))
    }

    fn insert_season(&self, season: Season) -> Result<(), ScheduleError> {
        let mut inner = self.write()?;
        inner.seasons.insert(season.id, season);
        Ok(())
    }

    fn update_status(&self, id: SeasonId, status: SeasonStatus) -> Result<Season, ScheduleError> {
        let mut inner = self.write()?;
        let season = season_mut(&mut inner, id)?;
        season.status = status;
        Ok(season.clone())
    }

    fn update_scheduling(
        &self,
        id: SeasonId,
        config: SchedulingConfig,
    ) -> Result<Season, ScheduleError> {
        config.validate()?;
        let mut inner = self.write()?;
        let season = season_mut(&mut inner, id)?;
        if !season.status.allows_fixture_changes() {
            return Err(ScheduleError::SeasonNotSchedulable {
                status: season.status,
            });
        }
        season.scheduling = config;
        Ok(season.clone())
    }

    fn try_begin_generation(&self, id: SeasonId) -> Result<(), ScheduleError> {
        let mut inner = self.write()?;
        let season = season_mut(&mut inner, id)?;
        if season.fixtures_status == FixturesStatus::Generating {
            return Err(ScheduleError::ConcurrentGenerationConflict);
        }
        season.fixtures_status = FixturesStatus::Generating;
        Ok(())
    }

    fn finish_generation(
        &self,
        id: SeasonId,
        total_matches: u32,
        at: NaiveDateTime,
    ) -> Result<(), ScheduleError> {
        let mut inner = self.write()?;
        let season = season_mut(&mut inner, id)?;
        season.fixtures_status = FixturesStatus::Completed;
        season.fixtures_generated_at = Some(at);
        season.total_matches_planned = Some(total_matches);
        Ok(())
    }

    fn fail_generation(&self, id: SeasonId) -> Result<(), ScheduleError> {
        let mut inner = self.write()?;
        let season = season_mut(&mut inner, id)?;
        season.fixtures_status = FixturesStatus::Error;
        Ok(())
    }

    fn reset_fixtures_status(&self, id: SeasonId) -> Result<(), ScheduleError> {
        let mut inner = self.write()?;
        let season = season_mut(&mut inner, id)?;
        season.fixtures_status = FixturesStatus::Pending;
        season.fixtures_generated_at = None;
        season.total_matches_planned = None;
        Ok(())
    }
}

impl TeamStore for MemoryStore {
    fn eligible_teams(&self, season_id: SeasonId) -> Result<Vec<TeamRegistration>, ScheduleError> {
        let inner = self.read()?;
        if !inner.seasons.contains_key(&season_id) {
            return Err(ScheduleError::SeasonNotFound(season_id));
        }
        let mut pool: Vec<TeamRegistration> = inner
            .registrations
            .get(&season_id)
            .map(|r| r.iter().filter(|reg| reg.is_eligible()).cloned().collect())
            .unwrap_or_default();
        pool.sort_by_key(|reg| (reg.registered_at, reg.team.id));
        Ok(pool)
    }

    fn register_team(
        &self,
        season_id: SeasonId,
        team: Team,
        registered_at: NaiveDateTime,
    ) -> Result<TeamRegistration, ScheduleError> {
        let mut inner = self.write()?;
        let season = inner
            .seasons
            .get(&season_id)
            .ok_or(ScheduleError::SeasonNotFound(season_id))?;
        if !season.status.allows_fixture_changes() {
            return Err(ScheduleError::SeasonNotSchedulable {
                status: season.status,
            });
        }
        let max_teams = season.max_teams;

        let registrations = inner.registrations.entry(season_id).or_default();
        let duplicate = registrations.iter().any(|reg| {
            reg.is_eligible() && reg.team.name.eq_ignore_ascii_case(&team.name)
        });
        if duplicate {
            return Err(ScheduleError::TeamAlreadyRegistered);
        }
        if let Some(max) = max_teams {
            let eligible = registrations.iter().filter(|r| r.is_eligible()).count();
            if eligible as u32 >= max {
                return Err(ScheduleError::SeasonFull { max_teams: max });
            }
        }
        let registration = TeamRegistration::new(team, registered_at);
        registrations.push(registration.clone());
        Ok(registration)
    }

    fn confirm_team(
        &self,
        season_id: SeasonId,
        team_id: TeamId,
    ) -> Result<TeamRegistration, ScheduleError> {
        let mut inner = self.write()?;
        let registrations = inner
            .registrations
            .get_mut(&season_id)
            .ok_or(ScheduleError::SeasonNotFound(season_id))?;
        let reg = registrations
            .iter_mut()
            .find(|reg| reg.team.id == team_id)
            .ok_or(ScheduleError::TeamNotFound(team_id))?;
        reg.status = RegistrationStatus::Confirmed;
        Ok(reg.clone())
    }

    fn withdraw_team(&self, season_id: SeasonId, team_id: TeamId) -> Result<(), ScheduleError> {
        let mut inner = self.write()?;
        let registrations = inner
            .registrations
            .get_mut(&season_id)
            .ok_or(ScheduleError::SeasonNotFound(season_id))?;
        let reg = registrations
            .iter_mut()
            .find(|reg| reg.team.id == team_id)
            .ok_or(ScheduleError::TeamNotFound(team_id))?;
        reg.status = RegistrationStatus::Withdrawn;
        Ok(())
    }
}

impl FixtureStore for MemoryStore {
    fn replace_fixtures(
        &self,
        season_id: SeasonId,
        fixtures: Vec<Fixture>,
    ) -> Result<(), ScheduleError> {
        let mut inner = self.write()?;
        if !inner.seasons.contains_key(&season_id) {
            return Err(ScheduleError::SeasonNotFound(season_id));
        }
        inner.fixtures.insert(season_id, fixtures);
        Ok(())
    }

    fn fixtures(&self, season_id: SeasonId) -> Result<Vec<Fixture>, ScheduleError> {
        let inner = self.read()?;
        if !inner.seasons.contains_key(&season_id) {
            return Err(ScheduleError::SeasonNotFound(season_id));
        }
        let mut rows = inner.fixtures.get(&season_id).cloned().unwrap_or_default();
        rows.sort_by_key(|f| {
            (
                f.matchday_number,
                f.match_date,
                f.match_time,
                f.court_number,
            )
        });
        Ok(rows)
    }

    fn delete_fixtures(&self, season_id: SeasonId) -> Result<usize, ScheduleError> {
        let mut inner = self.write()?;
        if !inner.seasons.contains_key(&season_id) {
            return Err(ScheduleError::SeasonNotFound(season_id));
        }
        Ok(inner.fixtures.remove(&season_id).map_or(0, |f| f.len()))
    }
}

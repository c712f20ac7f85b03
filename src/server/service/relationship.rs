//! Relationship engine keeping both sides of a cross reference in agreement.
//!
//! The store has no multi-document transactions, so every attach and detach is carried
//! out as two single-document writes in a fixed order: the container side first
//! (`course.races`, `race.athletes`), then the member side (`race.course`,
//! `athlete.races`). Each write is an atomic read-modify-write of its document, and
//! conflict checks run inside it against the fresh copy. When an attach is refused at
//! the member side, or its container disappears meanwhile, the side already written is
//! reverted. When a write fails with a store error instead, the first write is left in
//! place, a warning names the side already written and the caller receives
//! `InternalError::HalfApplied`.
//!
//! Cascading deletes detach every reference held by the document being removed. The
//! detachments target distinct documents and are issued concurrently. The document is
//! then deleted only if it was not written since it was read, otherwise the cascade
//! starts over from a fresh copy. A last pass after the delete catches attaches whose
//! member side landed while the cascade ran.

use futures::future::join_all;
use sea_orm::DatabaseConnection;
use std::{fmt, future::Future};

use crate::server::{
    data::document::{DocumentRepository, Modified},
    error::{internal::InternalError, relationship::RelationshipError, AppError},
    model::{
        athlete::Athlete,
        course::Course,
        document::{Document, Kind, Stored},
        link::Links,
        race::Race,
        reference::Reference,
    },
};

/// Attempts a cascading delete makes before giving up on a document that keeps changing.
const DELETE_ATTEMPTS: usize = 8;

/// Named two-sided relationship change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AttachCourseRace,
    DetachCourseRace,
    AttachRaceAthlete,
    DetachRaceAthlete,
}

impl Operation {
    /// Error reported when an attach finds one of its documents gone; detaches have none.
    fn missing_target(self) -> Option<RelationshipError> {
        match self {
            Self::AttachCourseRace => Some(RelationshipError::CourseOrRaceNotFound),
            Self::AttachRaceAthlete => Some(RelationshipError::RaceOrAthleteNotFound),
            Self::DetachCourseRace | Self::DetachRaceAthlete => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AttachCourseRace => "attach course/race",
            Self::DetachCourseRace => "detach course/race",
            Self::AttachRaceAthlete => "attach race/athlete",
            Self::DetachRaceAthlete => "detach race/athlete",
        })
    }
}

/// One single-document write of a relationship change.
///
/// Every step is idempotent: adding a reference that is already listed, or removing one
/// that is not, leaves the document untouched.
#[derive(Debug, Clone, PartialEq)]
enum Step {
    AddRaceToCourse { course_id: i32, race: Reference },
    /// Refuses with `RaceHasCourse` if the race already names another course.
    SetCourseOnRace { race_id: i32, course: Reference },
    RemoveRaceFromCourse { course_id: i32, race_id: i32 },
    /// Only clears `race.course` while it still points at `course_id`.
    ClearCourseOnRace { race_id: i32, course_id: i32 },
    AddAthleteToRace { race_id: i32, athlete: Reference },
    AddRaceToAthlete { athlete_id: i32, race: Reference },
    RemoveAthleteFromRace { race_id: i32, athlete_id: i32 },
    RemoveRaceFromAthlete { athlete_id: i32, race_id: i32 },
}

impl Step {
    async fn apply(&self, repo: &DocumentRepository<'_>) -> Result<Modified, AppError> {
        let outcome = match self {
            Self::AddRaceToCourse { course_id, race } => {
                repo.modify::<Course, _>(*course_id, |course| course.races.insert(race.clone()))
                    .await?
            }
            Self::SetCourseOnRace { race_id, course } => {
                let mut assigned = None;
                let outcome = repo
                    .modify::<Race, _>(*race_id, |race| {
                        assigned = None;
                        match race.course.as_ref().map(|current| current.id) {
                            Some(current) if current == course.id => false,
                            Some(current) => {
                                assigned = Some(current);
                                false
                            }
                            None => {
                                race.course = Some(course.clone());
                                true
                            }
                        }
                    })
                    .await?;

                if let Some(course_id) = assigned {
                    return Err(RelationshipError::RaceHasCourse {
                        race_id: *race_id,
                        course_id,
                    }
                    .into());
                }
                outcome
            }
            Self::RemoveRaceFromCourse { course_id, race_id } => {
                repo.modify::<Course, _>(*course_id, |course| {
                    course.races.remove(*race_id).is_some()
                })
                .await?
            }
            Self::ClearCourseOnRace { race_id, course_id } => {
                repo.modify::<Race, _>(*race_id, |race| match race.course.as_ref() {
                    Some(course) if course.id == *course_id => {
                        race.course = None;
                        true
                    }
                    _ => false,
                })
                .await?
            }
            Self::AddAthleteToRace { race_id, athlete } => {
                repo.modify::<Race, _>(*race_id, |race| race.athletes.insert(athlete.clone()))
                    .await?
            }
            Self::AddRaceToAthlete { athlete_id, race } => {
                repo.modify::<Athlete, _>(*athlete_id, |athlete| {
                    athlete.races.insert(race.clone())
                })
                .await?
            }
            Self::RemoveAthleteFromRace {
                race_id,
                athlete_id,
            } => {
                repo.modify::<Race, _>(*race_id, |race| {
                    race.athletes.remove(*athlete_id).is_some()
                })
                .await?
            }
            Self::RemoveRaceFromAthlete {
                athlete_id,
                race_id,
            } => {
                repo.modify::<Athlete, _>(*athlete_id, |athlete| {
                    athlete.races.remove(*race_id).is_some()
                })
                .await?
            }
        };

        Ok(outcome)
    }

    /// Step taking back the reference this one adds.
    fn undo(&self) -> Option<Step> {
        match self {
            Self::AddRaceToCourse { course_id, race } => Some(Self::RemoveRaceFromCourse {
                course_id: *course_id,
                race_id: race.id,
            }),
            Self::SetCourseOnRace { race_id, course } => Some(Self::ClearCourseOnRace {
                race_id: *race_id,
                course_id: course.id,
            }),
            Self::AddAthleteToRace { race_id, athlete } => Some(Self::RemoveAthleteFromRace {
                race_id: *race_id,
                athlete_id: athlete.id,
            }),
            Self::AddRaceToAthlete { athlete_id, race } => Some(Self::RemoveRaceFromAthlete {
                athlete_id: *athlete_id,
                race_id: race.id,
            }),
            _ => None,
        }
    }

    /// Whether the reference this step added is still listed by an existing document.
    async fn holds(&self, repo: &DocumentRepository<'_>) -> Result<bool, AppError> {
        Ok(match self {
            Self::AddRaceToCourse { course_id, race } => repo
                .get::<Course>(*course_id)
                .await?
                .is_some_and(|course| course.document.races.contains(race.id)),
            Self::AddAthleteToRace { race_id, athlete } => repo
                .get::<Race>(*race_id)
                .await?
                .is_some_and(|race| race.document.athletes.contains(athlete.id)),
            _ => true,
        })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddRaceToCourse { course_id, race } => {
                write!(f, "race {} added to course {}", race.id, course_id)
            }
            Self::SetCourseOnRace { race_id, course } => {
                write!(f, "course {} set on race {}", course.id, race_id)
            }
            Self::RemoveRaceFromCourse { course_id, race_id } => {
                write!(f, "race {} removed from course {}", race_id, course_id)
            }
            Self::ClearCourseOnRace { race_id, course_id } => {
                write!(f, "course {} cleared from race {}", course_id, race_id)
            }
            Self::AddAthleteToRace { race_id, athlete } => {
                write!(f, "athlete {} added to race {}", athlete.id, race_id)
            }
            Self::AddRaceToAthlete { athlete_id, race } => {
                write!(f, "race {} added to athlete {}", race.id, athlete_id)
            }
            Self::RemoveAthleteFromRace {
                race_id,
                athlete_id,
            } => write!(f, "athlete {} removed from race {}", athlete_id, race_id),
            Self::RemoveRaceFromAthlete {
                athlete_id,
                race_id,
            } => write!(f, "race {} removed from athlete {}", race_id, athlete_id),
        }
    }
}

pub struct RelationshipService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RelationshipService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Assigns a race to a course
    ///
    /// Appends the race to `course.races`, then sets `race.course`.
    ///
    /// # Returns
    /// - `Ok(())` - Both sides written
    /// - `Err(RelationshipError::CourseOrRaceNotFound)` - Course or race does not exist, or
    ///   was deleted during the attach; the other side is left as it was
    /// - `Err(RelationshipError::RaceHasCourse)` - Race already has a course; the course
    ///   is left as it was
    /// - `Err(InternalError::HalfApplied)` - Course written, race write failed
    pub async fn attach_course_race(
        &self,
        course_id: i32,
        race_id: i32,
        links: &Links,
    ) -> Result<(), AppError> {
        let repo = DocumentRepository::new(self.db);

        let (Some(_), Some(race)) = (
            repo.get::<Course>(course_id).await?,
            repo.get::<Race>(race_id).await?,
        ) else {
            return Err(RelationshipError::CourseOrRaceNotFound.into());
        };

        if let Some(existing) = &race.document.course {
            return Err(RelationshipError::RaceHasCourse {
                race_id,
                course_id: existing.id,
            }
            .into());
        }

        self.apply_pair(
            Operation::AttachCourseRace,
            Step::AddRaceToCourse {
                course_id,
                race: links.reference(Kind::Race, race_id),
            },
            Step::SetCourseOnRace {
                race_id,
                course: links.reference(Kind::Course, course_id),
            },
        )
        .await
    }

    /// Removes a race from its course
    ///
    /// # Returns
    /// - `Ok(())` - Both sides written
    /// - `Err(RelationshipError::CourseNotAssigned)` - Either document is missing or the
    ///   race does not reference this course
    /// - `Err(InternalError::HalfApplied)` - Course written, race write failed
    pub async fn detach_course_race(&self, course_id: i32, race_id: i32) -> Result<(), AppError> {
        let repo = DocumentRepository::new(self.db);

        let (Some(_), Some(race)) = (
            repo.get::<Course>(course_id).await?,
            repo.get::<Race>(race_id).await?,
        ) else {
            return Err(RelationshipError::CourseNotAssigned.into());
        };

        if race.document.course.as_ref().map(|course| course.id) != Some(course_id) {
            return Err(RelationshipError::CourseNotAssigned.into());
        }

        self.apply_pair(
            Operation::DetachCourseRace,
            Step::RemoveRaceFromCourse { course_id, race_id },
            Step::ClearCourseOnRace { race_id, course_id },
        )
        .await
    }

    /// Enters an athlete in a race
    ///
    /// The athlete's own `races` list decides whether the athlete is already entered.
    /// Appends to `race.athletes`, then to `athlete.races`.
    ///
    /// # Returns
    /// - `Ok(())` - Both sides written
    /// - `Err(RelationshipError::AlreadyEntered)` - Athlete already lists the race
    /// - `Err(RelationshipError::RaceOrAthleteNotFound)` - Race or athlete was deleted
    ///   during the attach; the other side is left as it was
    /// - `Err(InternalError::HalfApplied)` - Race written, athlete write failed
    pub async fn attach_race_athlete(
        &self,
        race: &Stored<Race>,
        athlete: &Stored<Athlete>,
        links: &Links,
    ) -> Result<(), AppError> {
        if athlete.document.races.contains(race.id) {
            return Err(RelationshipError::AlreadyEntered {
                race_id: race.id,
                athlete_id: athlete.id,
            }
            .into());
        }

        self.apply_pair(
            Operation::AttachRaceAthlete,
            Step::AddAthleteToRace {
                race_id: race.id,
                athlete: links.reference(Kind::Athlete, athlete.id),
            },
            Step::AddRaceToAthlete {
                athlete_id: athlete.id,
                race: links.reference(Kind::Race, race.id),
            },
        )
        .await
    }

    /// Withdraws an athlete from a race
    ///
    /// # Returns
    /// - `Ok(())` - Both sides written
    /// - `Err(RelationshipError::NotEntered)` - Athlete does not list the race
    /// - `Err(InternalError::HalfApplied)` - Race written, athlete write failed
    pub async fn detach_race_athlete(
        &self,
        race: &Stored<Race>,
        athlete: &Stored<Athlete>,
    ) -> Result<(), AppError> {
        if !athlete.document.races.contains(race.id) {
            return Err(RelationshipError::NotEntered.into());
        }

        self.apply_pair(
            Operation::DetachRaceAthlete,
            Step::RemoveAthleteFromRace {
                race_id: race.id,
                athlete_id: athlete.id,
            },
            Step::RemoveRaceFromAthlete {
                athlete_id: athlete.id,
                race_id: race.id,
            },
        )
        .await
    }

    /// Severs and deletes a race
    ///
    /// # Returns
    /// - `Ok(true)` - Race deleted and no document references it
    /// - `Ok(false)` - No such race
    /// - `Err(InternalError)` - A detachment failed and the race was kept, or the race
    ///   kept changing
    pub async fn delete_race(&self, race_id: i32) -> Result<bool, AppError> {
        self.delete_severed::<Race, _, _>(race_id, |race| async move {
            self.sever_race(&race).await
        })
        .await
    }

    /// Severs and deletes a course
    ///
    /// # Returns
    /// - `Ok(true)` - Course deleted and no race references it
    /// - `Ok(false)` - No such course
    /// - `Err(InternalError)` - A detachment failed and the course was kept, or the
    ///   course kept changing
    pub async fn delete_course(&self, course_id: i32) -> Result<bool, AppError> {
        self.delete_severed::<Course, _, _>(course_id, |course| async move {
            self.sever_course(&course).await
        })
        .await
    }

    /// Severs and deletes an athlete; see [`Self::delete_race`].
    pub async fn delete_athlete(&self, athlete_id: i32) -> Result<bool, AppError> {
        self.delete_severed::<Athlete, _, _>(athlete_id, |athlete| async move {
            self.sever_athlete(&athlete).await
        })
        .await
    }

    /// Runs `sever` on a fresh copy of the document, then deletes it at that revision
    ///
    /// A document written while it was severed is severed again from the new copy. After
    /// the delete, `sever` runs once more on the final copy so that a member side written
    /// during the cascade is cleared as well.
    async fn delete_severed<D, F, Fut>(&self, id: i32, sever: F) -> Result<bool, AppError>
    where
        D: Document + Clone,
        F: Fn(Stored<D>) -> Fut,
        Fut: Future<Output = Result<(), AppError>>,
    {
        let repo = DocumentRepository::new(self.db);

        for _ in 0..DELETE_ATTEMPTS {
            let Some((document, revision)) = repo.get_with_revision::<D>(id).await? else {
                return Ok(false);
            };

            sever(document.clone()).await?;

            if repo.delete::<D>(id, revision).await? {
                sever(document).await?;
                return Ok(true);
            }

            tracing::debug!("{} {} changed while being severed, starting over", D::KIND, id);
        }

        Err(InternalError::Contended {
            kind: D::KIND,
            id,
            attempts: DELETE_ATTEMPTS,
        }
        .into())
    }

    /// Detaches a race from its course and from every athlete entered in it
    ///
    /// The course is detached first; the athletes are then updated concurrently. The race
    /// document itself is not written.
    async fn sever_race(&self, race: &Stored<Race>) -> Result<(), AppError> {
        if let Some(course) = &race.document.course {
            let step = Step::RemoveRaceFromCourse {
                course_id: course.id,
                race_id: race.id,
            };
            self.apply_all(Kind::Race, race.id, vec![step]).await?;
        }

        let steps = race
            .document
            .athletes
            .ids()
            .map(|athlete_id| Step::RemoveRaceFromAthlete {
                athlete_id,
                race_id: race.id,
            })
            .collect();

        self.apply_all(Kind::Race, race.id, steps).await
    }

    /// Clears the course reference of every race assigned to a course, concurrently
    ///
    /// Races that have since moved to another course are left alone.
    async fn sever_course(&self, course: &Stored<Course>) -> Result<(), AppError> {
        let steps = course
            .document
            .races
            .ids()
            .map(|race_id| Step::ClearCourseOnRace {
                race_id,
                course_id: course.id,
            })
            .collect();

        self.apply_all(Kind::Course, course.id, steps).await
    }

    /// Removes an athlete from every race it is entered in, concurrently.
    async fn sever_athlete(&self, athlete: &Stored<Athlete>) -> Result<(), AppError> {
        let steps = athlete
            .document
            .races
            .ids()
            .map(|race_id| Step::RemoveAthleteFromRace {
                race_id,
                athlete_id: athlete.id,
            })
            .collect();

        self.apply_all(Kind::Athlete, athlete.id, steps).await
    }

    /// Applies two dependent writes in order.
    ///
    /// A detach treats a missing document as already detached. An attach is refused
    /// instead, and a refused attach reverts whatever of it was written.
    async fn apply_pair(
        &self,
        operation: Operation,
        first: Step,
        second: Step,
    ) -> Result<(), AppError> {
        let repo = DocumentRepository::new(self.db);

        let outcome = first.apply(&repo).await?;
        if outcome == Modified::Missing {
            match operation.missing_target() {
                Some(refusal) => return Err(refusal.into()),
                None => tracing::debug!("{}: target of '{}' no longer exists", operation, first),
            }
        }

        let second_outcome = match second.apply(&repo).await {
            Ok(second_outcome) => second_outcome,
            Err(AppError::RelationshipErr(refusal)) => {
                self.revert(&repo, operation, &first, outcome).await?;
                return Err(refusal.into());
            }
            Err(err) => {
                tracing::warn!(
                    "{} half-applied: {} but {} failed: {}",
                    operation,
                    first,
                    second,
                    err
                );

                return Err(InternalError::HalfApplied {
                    operation: operation.to_string(),
                    applied: first.to_string(),
                    source: Box::new(err),
                }
                .into());
            }
        };

        let Some(refusal) = operation.missing_target() else {
            if second_outcome == Modified::Missing {
                tracing::debug!("{}: target of '{}' no longer exists", operation, second);
            }
            return Ok(());
        };

        if second_outcome == Modified::Missing {
            self.revert(&repo, operation, &first, outcome).await?;
            return Err(refusal.into());
        }

        // The container may have been deleted or detached after the first write
        if !first.holds(&repo).await? {
            self.revert(&repo, operation, &second, second_outcome).await?;
            return Err(refusal.into());
        }

        Ok(())
    }

    /// Takes back `step` if it was written by the refused operation.
    async fn revert(
        &self,
        repo: &DocumentRepository<'_>,
        operation: Operation,
        step: &Step,
        outcome: Modified,
    ) -> Result<(), AppError> {
        let Some(undo) = step.undo().filter(|_| outcome == Modified::Written) else {
            return Ok(());
        };

        if let Err(err) = undo.apply(repo).await {
            tracing::warn!(
                "{} half-applied: {} but reverting it failed: {}",
                operation,
                step,
                err
            );

            return Err(InternalError::HalfApplied {
                operation: operation.to_string(),
                applied: step.to_string(),
                source: Box::new(err),
            }
            .into());
        }

        tracing::debug!("{}: reverted '{}'", operation, step);
        Ok(())
    }

    /// Applies independent writes concurrently and waits for all of them.
    async fn apply_all(&self, kind: Kind, id: i32, steps: Vec<Step>) -> Result<(), AppError> {
        let repo = DocumentRepository::new(self.db);
        let total = steps.len();

        let results = join_all(steps.iter().map(|step| {
            let repo = &repo;
            async move { step.apply(repo).await.map_err(|err| (step, err)) }
        }))
        .await;

        let mut failed = 0;
        for (step, err) in results.into_iter().filter_map(Result::err) {
            tracing::warn!("Detaching {} {} failed: {} ({})", kind, id, step, err);
            failed += 1;
        }

        if failed > 0 {
            return Err(InternalError::CascadeIncomplete {
                kind,
                id,
                failed,
                total,
            }
            .into());
        }

        Ok(())
    }
}

use sea_orm::DatabaseConnection;

use crate::server::{
    data::document::DocumentRepository,
    error::AppError,
    model::{
        athlete::{Athlete, AthleteProfile},
        document::{Kind, Stored},
        identity::Identity,
    },
    service::relationship::RelationshipService,
};

/// Result of registering the caller as an athlete.
pub enum Registration {
    /// A new athlete was created.
    Created(Stored<Athlete>),
    /// The caller was already registered.
    Existing(Stored<Athlete>),
}

pub struct AthleteService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AthleteService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers `identity` as an athlete unless it already is one
    ///
    /// The lookup and the insert are separate operations, so two concurrent first-time
    /// registrations of the same identity can both create an athlete.
    pub async fn register(&self, identity: &Identity) -> Result<Registration, AppError> {
        let repo = DocumentRepository::new(self.db);

        if let Some(existing) = repo
            .find_first::<Athlete, _>(|athlete| athlete.sub_id == identity.sub)
            .await?
        {
            return Ok(Registration::Existing(existing));
        }

        let athlete = repo.create(Athlete::register(identity)).await?;

        tracing::info!("Registered athlete {} for {}", athlete.id, identity.sub);

        Ok(Registration::Created(athlete))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Stored<Athlete>>, AppError> {
        let repo = DocumentRepository::new(self.db);

        Ok(repo.get::<Athlete>(id).await?)
    }

    /// Merges supplied profile fields
    pub async fn update(
        &self,
        athlete: Stored<Athlete>,
        profile: AthleteProfile,
    ) -> Result<Stored<Athlete>, AppError> {
        self.save(athlete.id, |athlete| athlete.apply(profile.clone())).await
    }

    /// Replaces all profile fields, keeping races and owner
    pub async fn replace(
        &self,
        athlete: Stored<Athlete>,
        profile: AthleteProfile,
    ) -> Result<Stored<Athlete>, AppError> {
        self.save(athlete.id, |athlete| athlete.replace(profile.clone())).await
    }

    /// Withdraws the athlete from every race, then deletes it
    pub async fn delete(&self, athlete: Stored<Athlete>) -> Result<(), AppError> {
        if !RelationshipService::new(self.db)
            .delete_athlete(athlete.id)
            .await?
        {
            return Err(AppError::not_found(Kind::Athlete));
        }

        Ok(())
    }

    /// Applies `change` to the current copy and writes it.
    async fn save(
        &self,
        id: i32,
        change: impl FnMut(&mut Athlete),
    ) -> Result<Stored<Athlete>, AppError> {
        let repo = DocumentRepository::new(self.db);

        repo.update::<Athlete, _>(id, change)
            .await?
            .ok_or_else(|| AppError::not_found(Kind::Athlete))
    }
}

use sea_orm::DatabaseConnection;

use crate::server::{
    data::document::DocumentRepository,
    error::AppError,
    model::{
        document::{Kind, Stored},
        identity::Identity,
        race::{Race, RaceFields, RacePatch},
    },
    service::relationship::RelationshipService,
};

pub struct RaceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RaceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a race owned by `creator`
    pub async fn create(
        &self,
        fields: RaceFields,
        creator: &Identity,
    ) -> Result<Stored<Race>, AppError> {
        let repo = DocumentRepository::new(self.db);

        let race = repo.create(Race::new(fields, creator)).await?;

        Ok(race)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Stored<Race>>, AppError> {
        let repo = DocumentRepository::new(self.db);

        Ok(repo.get::<Race>(id).await?)
    }

    /// Merges supplied fields, keeping course, athletes and creator
    pub async fn update(
        &self,
        race: Stored<Race>,
        patch: RacePatch,
    ) -> Result<Stored<Race>, AppError> {
        self.save(race.id, |race| race.apply(patch.clone())).await
    }

    /// Replaces name, type and max entries, keeping course, athletes and creator
    pub async fn replace(
        &self,
        race: Stored<Race>,
        fields: RaceFields,
    ) -> Result<Stored<Race>, AppError> {
        self.save(race.id, |race| race.replace(fields.clone())).await
    }

    /// Detaches the race from its course and athletes, then deletes it
    ///
    /// # Returns
    /// - `Ok(())` - Race deleted
    /// - `Err(AppError::InternalErr)` - A detachment failed; the race is kept
    pub async fn delete(&self, race: Stored<Race>) -> Result<(), AppError> {
        if !RelationshipService::new(self.db)
            .delete_race(race.id)
            .await?
        {
            return Err(AppError::not_found(Kind::Race));
        }

        Ok(())
    }

    /// Applies `change` to the freshest copy and writes it, leaving relationship lists
    /// written meanwhile intact
    async fn save(
        &self,
        id: i32,
        change: impl FnMut(&mut Race),
    ) -> Result<Stored<Race>, AppError> {
        let repo = DocumentRepository::new(self.db);

        repo.update::<Race, _>(id, change)
            .await?
            .ok_or_else(|| AppError::not_found(Kind::Race))
    }
}

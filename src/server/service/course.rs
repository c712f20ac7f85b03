use sea_orm::DatabaseConnection;

use crate::server::{
    data::document::DocumentRepository,
    error::AppError,
    model::{
        course::{Course, CourseFields, CoursePatch},
        document::{Kind, Stored},
    },
    service::relationship::RelationshipService,
};

pub struct CourseService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CourseService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a course with no races
    pub async fn create(&self, fields: CourseFields) -> Result<Stored<Course>, AppError> {
        let repo = DocumentRepository::new(self.db);

        let course = repo.create(Course::new(fields)).await?;

        Ok(course)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Stored<Course>>, AppError> {
        let repo = DocumentRepository::new(self.db);

        Ok(repo.get::<Course>(id).await?)
    }

    /// Merges supplied fields into the course, keeping its races
    pub async fn update(
        &self,
        course: Stored<Course>,
        patch: CoursePatch,
    ) -> Result<Stored<Course>, AppError> {
        self.save(course.id, |course| course.apply(patch.clone())).await
    }

    /// Replaces the course's fields, keeping its races
    pub async fn replace(
        &self,
        course: Stored<Course>,
        fields: CourseFields,
    ) -> Result<Stored<Course>, AppError> {
        self.save(course.id, |course| course.replace(fields.clone())).await
    }

    /// Clears the course from every assigned race, then deletes it
    ///
    /// # Returns
    /// - `Ok(())` - Course deleted
    /// - `Err(AppError::InternalErr)` - A race could not be updated; the course is kept
    pub async fn delete(&self, course: Stored<Course>) -> Result<(), AppError> {
        if !RelationshipService::new(self.db)
            .delete_course(course.id)
            .await?
        {
            return Err(AppError::not_found(Kind::Course));
        }

        Ok(())
    }

    /// Applies `change` to the current copy and writes it.
    async fn save(
        &self,
        id: i32,
        change: impl FnMut(&mut Course),
    ) -> Result<Stored<Course>, AppError> {
        let repo = DocumentRepository::new(self.db);

        repo.update::<Course, _>(id, change)
            .await?
            .ok_or_else(|| AppError::not_found(Kind::Course))
    }
}

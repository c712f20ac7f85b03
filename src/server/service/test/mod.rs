use crate::server::{
    data::document::DocumentRepository,
    error::{relationship::RelationshipError, AppError},
    model::{
        athlete::Athlete, course::Course, document::Stored, link::Links, race::Race,
    },
};
use sea_orm::DatabaseConnection;
use test_utils::{builder::TestBuilder, factory, factory::helpers::TEST_BASE_URL};
use url::Url;

mod athlete;

fn links() -> Links {
    Links::new(Url::parse(TEST_BASE_URL).unwrap())
}

async fn fetch_course(db: &DatabaseConnection, id: i32) -> Result<Option<Stored<Course>>, AppError> {
    Ok(DocumentRepository::new(db).get::<Course>(id).await?)
}

async fn fetch_race(db: &DatabaseConnection, id: i32) -> Result<Option<Stored<Race>>, AppError> {
    Ok(DocumentRepository::new(db).get::<Race>(id).await?)
}

async fn fetch_athlete(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<Stored<Athlete>>, AppError> {
    Ok(DocumentRepository::new(db).get::<Athlete>(id).await?)
}

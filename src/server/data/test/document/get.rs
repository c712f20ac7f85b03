use super::*;

/// Tests reading an existing race.
///
/// Expected: Ok(Some) with fields decoded from the stored JSON
#[tokio::test]
async fn decodes_stored_race() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    let race = factory::race::RaceFactory::new(db, "auth0|creator")
        .name("Harvest Run")
        .race_type("10k")
        .max_entries(120)
        .course(course.id)
        .build()
        .await?;

    let repo = DocumentRepository::new(db);
    let fetched = repo.get::<Race>(race.id).await?.unwrap();

    assert_eq!(fetched.document.name, "Harvest Run");
    assert_eq!(fetched.document.race_type, "10k");
    assert_eq!(fetched.document.max_entries, 120);
    assert_eq!(fetched.document.creator_id, "auth0|creator");
    assert_eq!(
        fetched.document.course.map(|reference| reference.id),
        Some(course.id)
    );
    assert!(fetched.document.athletes.is_empty());

    Ok(())
}

/// Tests that a document is invisible through another kind's key space.
///
/// Expected: Ok(None) when reading a course ID as a race
#[tokio::test]
async fn does_not_cross_key_spaces() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;

    let repo = DocumentRepository::new(db);
    assert!(repo.get::<Race>(course.id).await?.is_none());
    assert!(repo.get::<Course>(course.id).await?.is_some());

    Ok(())
}

/// Tests reading an ID that was never assigned.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DocumentRepository::new(db);
    assert!(repo.get::<Athlete>(999).await?.is_none());

    Ok(())
}

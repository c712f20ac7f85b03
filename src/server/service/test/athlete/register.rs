use super::*;

/// Tests registering a new identity.
///
/// Expected: Ok(Registration::Created) with null profile fields and the caller as owner
#[tokio::test]
async fn creates_athlete_for_new_identity() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = AthleteService::new(db);
    let registration = service.register(&Identity::new("auth0|runner")).await?;

    let Registration::Created(athlete) = registration else {
        panic!("expected a new athlete");
    };
    assert_eq!(athlete.document.sub_id, "auth0|runner");
    assert!(athlete.document.first_name.is_none());
    assert!(athlete.document.age.is_none());
    assert!(athlete.document.races.is_empty());
    assert_eq!(fetch_athlete(db, athlete.id).await?.unwrap(), athlete);

    Ok(())
}

/// Tests registering the same identity twice.
///
/// Verifies that the second registration returns the stored athlete instead of
/// creating another one.
///
/// Expected: Ok(Registration::Existing) with the id of the first registration
#[tokio::test]
async fn returns_existing_athlete() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = AthleteService::new(db);
    let identity = Identity::new("auth0|runner");
    let Registration::Created(first) = service.register(&identity).await? else {
        panic!("expected a new athlete");
    };

    let Registration::Existing(second) = service.register(&identity).await? else {
        panic!("expected the existing athlete");
    };

    assert_eq!(first.id, second.id);

    Ok(())
}

/// Tests registering an identity while other athletes exist.
///
/// Expected: Ok(Registration::Existing) for the matching athlete only
#[tokio::test]
async fn matches_on_subject() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::athlete::AthleteFactory::new(db, "auth0|someone-else")
        .build()
        .await?;
    let mine = factory::athlete::AthleteFactory::new(db, "auth0|runner")
        .first_name("Ada")
        .build()
        .await?;

    let service = AthleteService::new(db);
    let registration = service.register(&Identity::new("auth0|runner")).await?;

    let Registration::Existing(athlete) = registration else {
        panic!("expected the existing athlete");
    };
    assert_eq!(athlete.id, mine.id);
    assert_eq!(athlete.document.first_name.as_deref(), Some("Ada"));

    Ok(())
}

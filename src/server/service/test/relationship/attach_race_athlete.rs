use super::*;

/// Tests entering an athlete in a race.
///
/// Expected: Ok with race.athletes listing the athlete and athlete.races listing the race
#[tokio::test]
async fn links_both_sides() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let race = factory::create_race(db, "auth0|creator").await?;
    let athlete = factory::create_athlete(db).await?;
    let race = fetch_race(db, race.id).await?.unwrap();
    let athlete = fetch_athlete(db, athlete.id).await?.unwrap();

    RelationshipService::new(db)
        .attach_race_athlete(&race, &athlete, &links())
        .await?;

    let race_after = fetch_race(db, race.id).await?.unwrap();
    let athlete_after = fetch_athlete(db, athlete.id).await?.unwrap();
    assert!(race_after.document.athletes.contains(athlete.id));
    assert_eq!(
        race_after.document.athletes.get(athlete.id).unwrap().self_link,
        format!("http://localhost/athletes/{}", athlete.id)
    );
    assert!(athlete_after.document.races.contains(race.id));

    Ok(())
}

/// Tests entering an athlete twice.
///
/// Verifies that the athlete's own race list is the source of truth for the check.
///
/// Expected: Err(RelationshipError::AlreadyEntered) with no duplicate entries
#[tokio::test]
async fn rejects_athlete_already_entered() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let race = factory::create_race(db, "auth0|creator").await?;
    let athlete = factory::create_athlete(db).await?;

    let service = RelationshipService::new(db);
    let race_doc = fetch_race(db, race.id).await?.unwrap();
    let athlete_doc = fetch_athlete(db, athlete.id).await?.unwrap();
    service
        .attach_race_athlete(&race_doc, &athlete_doc, &links())
        .await?;

    let athlete_doc = fetch_athlete(db, athlete.id).await?.unwrap();
    let result = service
        .attach_race_athlete(&race_doc, &athlete_doc, &links())
        .await;

    assert!(matches!(
        result,
        Err(AppError::RelationshipErr(RelationshipError::AlreadyEntered { .. }))
    ));
    assert_eq!(fetch_race(db, race.id).await?.unwrap().document.athletes.len(), 1);
    assert_eq!(fetch_athlete(db, athlete.id).await?.unwrap().document.races.len(), 1);

    Ok(())
}

/// Tests re-entering an athlete whose race side is already written.
///
/// Verifies that the race side write is idempotent when only the athlete side is
/// missing, so a retried attach completes the pairing without duplicating entries.
///
/// Expected: Ok with exactly one entry on each side
#[tokio::test]
async fn completes_one_sided_entry() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let athlete = factory::create_athlete(db).await?;
    let race = factory::race::RaceFactory::new(db, "auth0|creator")
        .athlete(athlete.id)
        .build()
        .await?;
    let race = fetch_race(db, race.id).await?.unwrap();
    let athlete = fetch_athlete(db, athlete.id).await?.unwrap();

    RelationshipService::new(db)
        .attach_race_athlete(&race, &athlete, &links())
        .await?;

    assert_eq!(fetch_race(db, race.id).await?.unwrap().document.athletes.len(), 1);
    assert_eq!(fetch_athlete(db, athlete.id).await?.unwrap().document.races.len(), 1);

    Ok(())
}

/// Tests entering two athletes in the same race at once.
///
/// Verifies that neither entry overwrites the other's write to `race.athletes`.
///
/// Expected: Ok for both, the race lists both athletes and each athlete lists the race
#[tokio::test]
async fn keeps_concurrent_entries() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let race = factory::create_race(db, "auth0|creator").await?;
    let first = factory::create_athlete(db).await?;
    let second = factory::create_athlete(db).await?;
    let race = fetch_race(db, race.id).await?.unwrap();
    let first = fetch_athlete(db, first.id).await?.unwrap();
    let second = fetch_athlete(db, second.id).await?.unwrap();

    let service = RelationshipService::new(db);
    let links = links();
    let (first_result, second_result) = futures::join!(
        service.attach_race_athlete(&race, &first, &links),
        service.attach_race_athlete(&race, &second, &links),
    );
    first_result?;
    second_result?;

    let race_after = fetch_race(db, race.id).await?.unwrap();
    assert!(race_after.document.athletes.contains(first.id));
    assert!(race_after.document.athletes.contains(second.id));
    for athlete_id in [first.id, second.id] {
        let athlete = fetch_athlete(db, athlete_id).await?.unwrap();
        assert!(athlete.document.races.contains(race.id));
    }

    Ok(())
}

/// Tests entering an athlete whose stored document cannot be decoded.
///
/// Verifies that a store error on the athlete side leaves the race side in place and is
/// reported as a half-applied change.
///
/// Expected: Err(InternalError::HalfApplied) with the race listing the athlete
#[tokio::test]
async fn reports_half_applied_entry() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let race = factory::create_race(db, "auth0|creator").await?;
    let broken = insert_document(db, kind::ATHLETES, json!({ "races": "not a list" })).await?;
    let race = fetch_race(db, race.id).await?.unwrap();
    let athlete = Stored {
        id: broken.id,
        document: Athlete::register(&Identity::new("auth0|broken")),
    };

    let result = RelationshipService::new(db)
        .attach_race_athlete(&race, &athlete, &links())
        .await;

    assert!(matches!(
        result,
        Err(AppError::InternalErr(InternalError::HalfApplied { .. }))
    ));
    assert!(fetch_race(db, race.id).await?.unwrap().document.athletes.contains(broken.id));

    Ok(())
}

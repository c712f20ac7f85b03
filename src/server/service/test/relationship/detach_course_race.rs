use super::*;

/// Tests removing a race from its course.
///
/// Expected: Ok with neither side referencing the other
#[tokio::test]
async fn unlinks_both_sides() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    let other = factory::create_race(db, "auth0|creator").await?;
    let race = factory::create_race(db, "auth0|creator").await?;

    let service = RelationshipService::new(db);
    service
        .attach_course_race(course.id, other.id, &links())
        .await?;
    service
        .attach_course_race(course.id, race.id, &links())
        .await?;

    service.detach_course_race(course.id, race.id).await?;

    let course_after = fetch_course(db, course.id).await?.unwrap();
    let race_after = fetch_race(db, race.id).await?.unwrap();
    assert_eq!(course_after.document.races.ids().collect::<Vec<_>>(), vec![other.id]);
    assert!(race_after.document.course.is_none());
    assert!(fetch_race(db, other.id).await?.unwrap().document.course.is_some());

    Ok(())
}

/// Tests detaching a race that belongs to a different course.
///
/// Expected: Err(RelationshipError::CourseNotAssigned) and the race keeps its course
#[tokio::test]
async fn rejects_race_of_other_course() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_course(db).await?;
    let other = factory::create_course(db).await?;
    let race = factory::create_race(db, "auth0|creator").await?;

    let service = RelationshipService::new(db);
    service
        .attach_course_race(owner.id, race.id, &links())
        .await?;

    let result = service.detach_course_race(other.id, race.id).await;

    assert!(matches!(
        result,
        Err(AppError::RelationshipErr(RelationshipError::CourseNotAssigned))
    ));
    let race_after = fetch_race(db, race.id).await?.unwrap();
    assert_eq!(race_after.document.course.map(|course| course.id), Some(owner.id));

    Ok(())
}

/// Tests detaching a race without a course.
///
/// Expected: Err(RelationshipError::CourseNotAssigned)
#[tokio::test]
async fn rejects_unassigned_race() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    let race = factory::create_race(db, "auth0|creator").await?;

    let result = RelationshipService::new(db)
        .detach_course_race(course.id, race.id)
        .await;

    assert!(matches!(
        result,
        Err(AppError::RelationshipErr(RelationshipError::CourseNotAssigned))
    ));

    Ok(())
}

/// Tests detaching when the course side is already missing the race.
///
/// Verifies that a one-sided relationship left behind by an interrupted write is
/// repaired: the race still points at the course, so the detach proceeds and clears it.
///
/// Expected: Ok with race.course cleared
#[tokio::test]
async fn repairs_one_sided_reference() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    let race = factory::race::RaceFactory::new(db, "auth0|creator")
        .course(course.id)
        .build()
        .await?;

    RelationshipService::new(db)
        .detach_course_race(course.id, race.id)
        .await?;

    assert!(fetch_race(db, race.id).await?.unwrap().document.course.is_none());

    Ok(())
}

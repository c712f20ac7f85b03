use super::*;

/// Tests deleting a course with three races.
///
/// Verifies that every race's course reference is cleared before the course is
/// removed.
///
/// Expected: Ok with all three races unassigned and the course absent
#[tokio::test]
async fn clears_course_on_every_race() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    let relationships = RelationshipService::new(db);
    let mut race_ids = Vec::new();
    for _ in 0..3 {
        let race = factory::create_race(db, "auth0|creator").await?;
        relationships
            .attach_course_race(course.id, race.id, &links())
            .await?;
        race_ids.push(race.id);
    }

    let service = CourseService::new(db);
    let stored = service.get(course.id).await?.unwrap();
    assert_eq!(stored.document.races.len(), 3);
    service.delete(stored).await?;

    assert!(fetch_course(db, course.id).await?.is_none());
    for race_id in race_ids {
        let race = fetch_race(db, race_id).await?.unwrap();
        assert!(race.document.course.is_none());
    }

    Ok(())
}

/// Tests deleting a course listing a race that has moved to another course.
///
/// Verifies that the clear is conditional on the race still pointing at the deleted
/// course.
///
/// Expected: Ok with the race keeping its new course
#[tokio::test]
async fn leaves_reassigned_race_alone() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let current = factory::create_course(db).await?;
    let race = factory::race::RaceFactory::new(db, "auth0|creator")
        .course(current.id)
        .build()
        .await?;
    let stale = factory::course::CourseFactory::new(db)
        .race(race.id)
        .build()
        .await?;

    let service = CourseService::new(db);
    let stored = service.get(stale.id).await?.unwrap();
    service.delete(stored).await?;

    assert!(fetch_course(db, stale.id).await?.is_none());
    let race_after = fetch_race(db, race.id).await?.unwrap();
    assert_eq!(race_after.document.course.map(|course| course.id), Some(current.id));

    Ok(())
}

use super::*;

/// Tests assigning a race to a course.
///
/// Verifies that both sides of the relationship are written: the course lists the race
/// and the race references the course, each with a self link.
///
/// Expected: Ok with course.races containing the race and race.course.id == course id
#[tokio::test]
async fn links_both_sides() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    let race = factory::create_race(db, "auth0|creator").await?;

    RelationshipService::new(db)
        .attach_course_race(course.id, race.id, &links())
        .await?;

    let course_after = fetch_course(db, course.id).await?.unwrap();
    let race_after = fetch_race(db, race.id).await?.unwrap();

    assert_eq!(course_after.document.races.ids().collect::<Vec<_>>(), vec![race.id]);
    assert_eq!(
        course_after.document.races.get(race.id).unwrap().self_link,
        format!("http://localhost/races/{}", race.id)
    );
    let reference = race_after.document.course.unwrap();
    assert_eq!(reference.id, course.id);
    assert_eq!(reference.self_link, format!("http://localhost/courses/{}", course.id));

    Ok(())
}

/// Tests assigning a race that already has a course.
///
/// Verifies that the conflict is detected before any write, so neither course nor
/// race changes.
///
/// Expected: Err(RelationshipError::RaceHasCourse) with both documents unchanged
#[tokio::test]
async fn rejects_race_with_course() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_course(db).await?;
    let second = factory::create_course(db).await?;
    let race = factory::race::RaceFactory::new(db, "auth0|creator")
        .course(first.id)
        .build()
        .await?;
    let second_before = fetch_course(db, second.id).await?.unwrap();
    let race_before = fetch_race(db, race.id).await?.unwrap();

    let result = RelationshipService::new(db)
        .attach_course_race(second.id, race.id, &links())
        .await;

    assert!(matches!(
        result,
        Err(AppError::RelationshipErr(RelationshipError::RaceHasCourse { course_id, .. }))
            if course_id == first.id
    ));
    assert_eq!(fetch_course(db, second.id).await?.unwrap(), second_before);
    assert_eq!(fetch_race(db, race.id).await?.unwrap(), race_before);

    Ok(())
}

/// Tests assigning a race to a course that does not exist.
///
/// Expected: Err(RelationshipError::CourseOrRaceNotFound) and the race is unchanged
#[tokio::test]
async fn rejects_missing_course() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let race = factory::create_race(db, "auth0|creator").await?;

    let result = RelationshipService::new(db)
        .attach_course_race(race.id + 100, race.id, &links())
        .await;

    assert!(matches!(
        result,
        Err(AppError::RelationshipErr(RelationshipError::CourseOrRaceNotFound))
    ));
    assert!(fetch_race(db, race.id).await?.unwrap().document.course.is_none());

    Ok(())
}

/// Tests that a race ID is not accepted in place of a course ID.
///
/// Expected: Err(RelationshipError::CourseOrRaceNotFound)
#[tokio::test]
async fn rejects_ids_from_other_key_spaces() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let race = factory::create_race(db, "auth0|creator").await?;
    let other_race = factory::create_race(db, "auth0|creator").await?;

    let result = RelationshipService::new(db)
        .attach_course_race(other_race.id, race.id, &links())
        .await;

    assert!(matches!(
        result,
        Err(AppError::RelationshipErr(RelationshipError::CourseOrRaceNotFound))
    ));

    Ok(())
}

/// Tests assigning one race to two courses at once.
///
/// Verifies that the race-side check runs against the current race, so only one
/// assignment wins and the losing course does not keep listing the race.
///
/// Expected: one Ok and one Err(RelationshipError::RaceHasCourse); only the course set
/// on the race lists it
#[tokio::test]
async fn assigns_contested_race_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_course(db).await?;
    let second = factory::create_course(db).await?;
    let race = factory::create_race(db, "auth0|creator").await?;

    let service = RelationshipService::new(db);
    let links = links();
    let (first_result, second_result) = futures::join!(
        service.attach_course_race(first.id, race.id, &links),
        service.attach_course_race(second.id, race.id, &links),
    );

    let refused = |result: &Result<(), AppError>| {
        matches!(
            result,
            Err(AppError::RelationshipErr(RelationshipError::RaceHasCourse { .. }))
        )
    };
    assert!(
        (first_result.is_ok() && refused(&second_result))
            || (second_result.is_ok() && refused(&first_result))
    );

    let assigned = fetch_race(db, race.id).await?.unwrap().document.course.unwrap().id;
    for course_id in [first.id, second.id] {
        let course = fetch_course(db, course_id).await?.unwrap();
        assert_eq!(course.document.races.contains(race.id), course_id == assigned);
    }

    Ok(())
}

/// Tests assigning a race to a course while the course is being deleted.
///
/// Expected: course deleted and the race references no course
#[tokio::test]
async fn leaves_no_reference_to_deleted_course() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;
    let race = factory::create_race(db, "auth0|creator").await?;
    let stored = fetch_course(db, course.id).await?.unwrap();

    let links = links();
    let relationships = RelationshipService::new(db);
    let courses = CourseService::new(db);
    let (attached, deleted) = futures::join!(
        relationships.attach_course_race(course.id, race.id, &links),
        courses.delete(stored),
    );

    deleted?;
    assert!(matches!(
        attached,
        Ok(()) | Err(AppError::RelationshipErr(RelationshipError::CourseOrRaceNotFound))
    ));
    assert!(fetch_course(db, course.id).await?.is_none());
    assert!(fetch_race(db, race.id).await?.unwrap().document.course.is_none());

    Ok(())
}

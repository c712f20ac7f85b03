use super::*;

/// Tests a partial course update.
///
/// Expected: Ok with the new state, unchanged other fields and races preserved
#[tokio::test]
async fn patch_preserves_races() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::course::CourseFactory::new(db)
        .name("Riverside Loop")
        .race(11)
        .build()
        .await?;

    let service = CourseService::new(db);
    let stored = service.get(course.id).await?.unwrap();
    service
        .update(
            stored,
            CoursePatch {
                state: Some("WA".to_string()),
                distance: Some(10000),
                ..Default::default()
            },
        )
        .await?;

    let fetched = fetch_course(db, course.id).await?.unwrap();
    assert_eq!(fetched.document.name, "Riverside Loop");
    assert_eq!(fetched.document.state, "WA");
    assert_eq!(fetched.document.distance, 10000);
    assert_eq!(fetched.document.city, "Corvallis");
    assert!(fetched.document.races.contains(11));

    Ok(())
}

/// Tests updating a course deleted after it was read.
///
/// Expected: Err(AppError::NotFound) and the course is not recreated
#[tokio::test]
async fn does_not_resurrect_deleted_course() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let course = factory::create_course(db).await?;

    let service = CourseService::new(db);
    let stored = service.get(course.id).await?.unwrap();
    CourseService::new(db).delete(stored.clone()).await?;

    let result = service.update(stored, CoursePatch::default()).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(fetch_course(db, course.id).await?.is_none());

    Ok(())
}

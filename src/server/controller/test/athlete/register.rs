use super::*;

/// Tests registering the caller twice.
///
/// Verifies that the first registration creates an athlete and the second returns it.
///
/// Expected: 201 then 200 with the same athlete
#[tokio::test]
async fn registers_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (status, created) = send(
        app(db),
        request(Method::POST, "/athletes", Some(RUNNER_TOKEN), None),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["sub_id"], json!(RUNNER_SUB));
    assert_eq!(created["first_name"], Value::Null);
    assert_eq!(created["races"], json!([]));

    let (status, existing) = send(
        app(db),
        request(Method::POST, "/athletes", Some(RUNNER_TOKEN), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(existing["id"], created["id"]);

    Ok(())
}

/// Tests registering without a bearer token.
///
/// Expected: 401 and no athlete created
#[tokio::test]
async fn requires_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (status, _) = send(app(db), request(Method::POST, "/athletes", None, None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, page) = send(app(db), request(Method::GET, "/athletes", None, None)).await;
    assert_eq!(page["athletes"], json!([]));

    Ok(())
}

/// Tests updating the registered athlete's profile.
///
/// Expected: 200 with the supplied fields and a numeric-string age coerced to an integer
#[tokio::test]
async fn owner_updates_profile() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let athlete = factory::athlete::AthleteFactory::new(db, RUNNER_SUB)
        .build()
        .await?;

    let (status, body) = send(
        app(db),
        request(
            Method::PATCH,
            &format!("/athletes/{}", athlete.id),
            Some(RUNNER_TOKEN),
            Some(json!({ "first_name": "Ada", "age": "21" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], json!("Ada"));
    assert_eq!(body["age"], json!(21));

    Ok(())
}

/// Tests updating an athlete with a forbidden character in a text field.
///
/// Expected: 403 and the athlete unchanged
#[tokio::test]
async fn rejects_invalid_profile() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let athlete = factory::athlete::AthleteFactory::new(db, RUNNER_SUB)
        .school("Oregon State")
        .build()
        .await?;

    let (status, _) = send(
        app(db),
        request(
            Method::PUT,
            &format!("/athletes/{}", athlete.id),
            Some(RUNNER_TOKEN),
            Some(json!({ "school": "Drop <table>" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = send(
        app(db),
        request(
            Method::GET,
            &format!("/athletes/{}", athlete.id),
            Some(RUNNER_TOKEN),
            None,
        ),
    )
    .await;
    assert_eq!(body["school"], json!("Oregon State"));

    Ok(())
}

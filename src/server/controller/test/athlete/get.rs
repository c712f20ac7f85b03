use super::*;

/// Tests reading an athlete with the owner's token.
///
/// Expected: 200 with the athlete and its self link
#[tokio::test]
async fn owner_reads_athlete() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let athlete = factory::athlete::AthleteFactory::new(db, RUNNER_SUB)
        .first_name("Ada")
        .build()
        .await?;

    let (status, body) = send(
        app(db),
        request(
            Method::GET,
            &format!("/athletes/{}", athlete.id),
            Some(RUNNER_TOKEN),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(athlete.id));
    assert_eq!(body["first_name"], json!("Ada"));
    assert_eq!(body["sub_id"], json!(RUNNER_SUB));
    assert_eq!(
        body["self"],
        json!(format!("http://localhost/athletes/{}", athlete.id))
    );

    Ok(())
}

/// Tests reading an athlete with another identity's token.
///
/// Expected: 403 with an error body
#[tokio::test]
async fn stranger_is_forbidden() -> Result<(), AppError> {
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
            Method::GET,
            &format!("/athletes/{}", athlete.id),
            Some(STRANGER_TOKEN),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].is_string());

    Ok(())
}

/// Tests reading an athlete without a bearer token.
///
/// Expected: 401
#[tokio::test]
async fn requires_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let athlete = factory::create_athlete(db).await?;

    let (status, _) = send(
        app(db),
        request(Method::GET, &format!("/athletes/{}", athlete.id), None, None),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Tests reading an athlete with a token the identity provider does not know.
///
/// Expected: 401
#[tokio::test]
async fn rejects_unknown_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let athlete = factory::create_athlete(db).await?;

    let (status, _) = send(
        app(db),
        request(
            Method::GET,
            &format!("/athletes/{}", athlete.id),
            Some("forged-token"),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Tests reading athletes by IDs that cannot exist.
///
/// Verifies that missing, non-numeric and race IDs all answer 404.
///
/// Expected: 404 for each
#[tokio::test]
async fn unknown_ids_are_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let race = factory::create_race(db, RUNNER_SUB).await?;

    for path in [
        "/athletes/9999".to_string(),
        "/athletes/not-a-number".to_string(),
        format!("/athletes/{}", race.id),
    ] {
        let (status, body) = send(
            app(db),
            request(Method::GET, &path, Some(RUNNER_TOKEN), None),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND, "{}", path);
        assert_eq!(body["error"], json!("No athlete with this athlete_id exists."));
    }

    Ok(())
}

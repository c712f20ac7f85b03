use super::*;

/// Tests walking twelve athletes with a page size of five.
///
/// Verifies that `next` links can be followed and that the last page has none.
///
/// Expected: pages of 5, 5 and 2 athletes
#[tokio::test]
async fn follows_next_links() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..12 {
        factory::create_athlete(db).await?;
    }

    let mut sizes = Vec::new();
    let mut uri = "/athletes".to_string();
    loop {
        let (status, body) = send(app(db), request(Method::GET, &uri, None, None)).await;
        assert_eq!(status, StatusCode::OK);

        sizes.push(body["athletes"].as_array().unwrap().len());
        match body["next"].as_str() {
            Some(next) => {
                let next = next.strip_prefix("http://localhost").unwrap();
                uri = next.to_string();
            }
            None => break,
        }
    }

    assert_eq!(sizes, vec![5, 5, 2]);

    Ok(())
}

/// Tests listing with a cursor that was never issued.
///
/// Expected: 400
#[tokio::test]
async fn rejects_malformed_cursor() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (status, body) = send(
        app(db),
        request(Method::GET, "/athletes?cursor=abc", None, None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    Ok(())
}

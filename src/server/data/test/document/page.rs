use super::*;

/// Tests walking 12 athletes in pages of 5.
///
/// Verifies that pages follow ascending ID order, that each cursor resumes after the
/// last document of its page and that the final page carries no cursor.
///
/// Expected: Ok with pages of 5, 5 and 2 documents
#[tokio::test]
async fn pages_through_key_space() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mut ids = Vec::new();
    for _ in 0..12 {
        ids.push(factory::create_athlete(db).await?.id);
    }
    // Courses share the table but must not show up in athlete pages.
    factory::create_course(db).await?;

    let repo = DocumentRepository::new(db);

    let first = repo.page::<Athlete>(None, 5).await?;
    let second = repo.page::<Athlete>(first.next, 5).await?;
    let third = repo.page::<Athlete>(second.next, 5).await?;

    let page_ids = |page: &Page<Athlete>| {
        page.items.iter().map(|athlete| athlete.id).collect::<Vec<_>>()
    };
    assert_eq!(page_ids(&first), ids[0..5].to_vec());
    assert_eq!(page_ids(&second), ids[5..10].to_vec());
    assert_eq!(page_ids(&third), ids[10..12].to_vec());

    assert_eq!(first.next, Some(Cursor::after(ids[4])));
    assert_eq!(second.next, Some(Cursor::after(ids[9])));
    assert!(third.next.is_none());

    Ok(())
}

/// Tests a key space holding exactly one page of documents.
///
/// Expected: Ok with all documents and no cursor
#[tokio::test]
async fn omits_cursor_when_page_is_exactly_full() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..5 {
        factory::create_course(db).await?;
    }

    let repo = DocumentRepository::new(db);
    let page = repo.page::<Course>(None, 5).await?;

    assert_eq!(page.items.len(), 5);
    assert!(page.next.is_none());

    Ok(())
}

/// Tests an empty key space.
///
/// Expected: Ok with an empty page and no cursor
#[tokio::test]
async fn returns_empty_page_for_empty_key_space() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DocumentRepository::new(db);
    let page = repo.page::<Race>(None, 5).await?;

    assert!(page.items.is_empty());
    assert!(page.next.is_none());

    Ok(())
}

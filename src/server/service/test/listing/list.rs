use super::*;

/// Tests walking twelve courses with a page size of five.
///
/// Expected: Ok with pages of 5, 5 and 2 courses and no cursor after the last page
#[tokio::test]
async fn walks_all_pages() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mut created = Vec::new();
    for _ in 0..12 {
        created.push(factory::create_course(db).await?.id);
    }

    let service = ListingService::new(db, 5);
    let mut seen = Vec::new();
    let mut sizes = Vec::new();
    let mut cursor: Option<Cursor> = None;
    loop {
        let page = service.list::<Course>(cursor, None).await?;
        sizes.push(page.items.len());
        seen.extend(page.items.iter().map(|course| course.id));
        match page.next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    assert_eq!(sizes, vec![5, 5, 2]);
    assert_eq!(seen, created);

    Ok(())
}

/// Tests listing races with documents of other kinds in the table.
///
/// Expected: Ok with only races returned
#[tokio::test]
async fn lists_one_kind() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_course(db).await?;
    let race = factory::create_race(db, "auth0|creator").await?;
    factory::create_athlete(db).await?;

    let service = ListingService::new(db, 5);
    let page = service.list::<Race>(None, None).await?;

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, race.id);
    assert!(page.next.is_none());

    Ok(())
}

/// Tests listing athletes for an owner.
///
/// Verifies that the owner filter is applied to the fetched page, so a page can come
/// back short while a cursor still points at later athletes.
///
/// Expected: Ok with the first page holding only the caller's athlete and a next cursor
#[tokio::test]
async fn filters_owner_after_paging() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mine = factory::athlete::AthleteFactory::new(db, "auth0|runner")
        .build()
        .await?;
    for _ in 0..5 {
        factory::create_athlete(db).await?;
    }
    let later = factory::athlete::AthleteFactory::new(db, "auth0|runner")
        .build()
        .await?;

    let service = ListingService::new(db, 5);
    let identity = Identity::new("auth0|runner");
    let first = service.list::<Athlete>(None, Some(&identity)).await?;

    assert_eq!(
        first.items.iter().map(|athlete| athlete.id).collect::<Vec<_>>(),
        vec![mine.id]
    );
    let cursor = first.next.unwrap();

    let second = service.list::<Athlete>(Some(cursor), Some(&identity)).await?;

    assert_eq!(
        second.items.iter().map(|athlete| athlete.id).collect::<Vec<_>>(),
        vec![later.id]
    );
    assert!(second.next.is_none());

    Ok(())
}

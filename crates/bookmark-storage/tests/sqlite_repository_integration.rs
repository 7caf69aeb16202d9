use bookmark_core::{BookmarkDraft, BookmarkId};
use bookmark_storage::{ListQuery, ReadRepository, Repository, SqliteRepository};

struct Fixture {
    repo: SqliteRepository,
}

impl Fixture {
    async fn start() -> Self {
        let repo = SqliteRepository::in_memory().await.expect("open sqlite");
        repo.migrate().await.expect("create schema");
        Self { repo }
    }
}

fn draft(url: &str, title: &str, tags: &[&str]) -> BookmarkDraft {
    BookmarkDraft::builder()
        .url(url)
        .title(title)
        .description(format!("{title} description"))
        .tags(tags.iter().map(|t| t.to_string()).collect())
        .build()
}

#[tokio::test]
async fn insert_and_get_round_trip() {
    let fixture = Fixture::start().await;

    let stored = fixture
        .repo
        .insert(draft("https://example.com", "Example", &["a", "b"]))
        .await
        .unwrap();

    assert_eq!(stored.id, BookmarkId::new(1));
    assert_eq!(stored.url, "https://example.com");
    assert_eq!(stored.description, "Example description");
    assert_eq!(stored.tags, vec!["a".to_string(), "b".to_string()]);

    let got = fixture.repo.get(stored.id).await.unwrap().unwrap();
    assert_eq!(got, stored);
}

#[tokio::test]
async fn migrate_is_idempotent() {
    let fixture = Fixture::start().await;

    fixture.repo.migrate().await.unwrap();
    assert_eq!(fixture.repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn list_is_newest_first() {
    let fixture = Fixture::start().await;

    let first = fixture
        .repo
        .insert(draft("https://one.example", "One", &[]))
        .await
        .unwrap();
    let second = fixture
        .repo
        .insert(draft("https://two.example", "Two", &[]))
        .await
        .unwrap();

    let listed = fixture.repo.list(&ListQuery::all()).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn tag_filter_is_exact_containment() {
    let fixture = Fixture::start().await;

    fixture
        .repo
        .insert(draft("https://seed.com", "Seed Bookmark", &["seed"]))
        .await
        .unwrap();
    fixture
        .repo
        .insert(draft("https://other.com", "Other", &["other"]))
        .await
        .unwrap();
    fixture
        .repo
        .insert(draft("https://cat.com", "Cat", &["cat", "pets"]))
        .await
        .unwrap();

    let seeded = fixture.repo.list(&ListQuery::tagged("Seed")).await.unwrap();
    assert_eq!(seeded.len(), 1);
    assert_eq!(seeded[0].title, "Seed Bookmark");

    let pets = fixture.repo.list(&ListQuery::tagged("pets")).await.unwrap();
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].title, "Cat");

    let substring = fixture.repo.list(&ListQuery::tagged("a")).await.unwrap();
    assert!(substring.is_empty());

    let all = fixture.repo.list(&ListQuery::tagged("  ")).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn update_keeps_identity() {
    let fixture = Fixture::start().await;
    let stored = fixture
        .repo
        .insert(draft("https://update-me.com", "Update Me", &["old"]))
        .await
        .unwrap();

    let updated = fixture
        .repo
        .update(stored.id, draft("https://updated.com", "Updated Title", &["new"]))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, stored.id);
    assert_eq!(updated.created_at, stored.created_at);
    assert_eq!(updated.url, "https://updated.com");
    assert_eq!(updated.tags, vec!["new".to_string()]);
}

#[tokio::test]
async fn update_missing_row_creates_nothing() {
    let fixture = Fixture::start().await;

    let result = fixture
        .repo
        .update(BookmarkId::new(9999), draft("https://nope.com", "Nope", &[]))
        .await
        .unwrap();

    assert!(result.is_none());
    assert_eq!(fixture.repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn delete_is_permanent_and_ids_are_not_reused() {
    let fixture = Fixture::start().await;
    let first = fixture
        .repo
        .insert(draft("https://gone.com", "Gone", &[]))
        .await
        .unwrap();

    assert!(fixture.repo.delete(first.id).await.unwrap());
    assert!(fixture.repo.get(first.id).await.unwrap().is_none());
    assert!(!fixture.repo.delete(first.id).await.unwrap());

    let second = fixture
        .repo
        .insert(draft("https://next.com", "Next", &[]))
        .await
        .unwrap();
    assert!(second.id > first.id);
}

#[tokio::test]
async fn file_database_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookmarks.db");
    let url = format!("sqlite://{}", path.display());

    {
        let repo = SqliteRepository::connect(&url).await.unwrap();
        repo.migrate().await.unwrap();
        repo.insert(draft("https://durable.com", "Durable", &["keep"]))
            .await
            .unwrap();
        repo.pool().close().await;
    }

    let reopened = SqliteRepository::connect(&url).await.unwrap();
    reopened.migrate().await.unwrap();
    let listed = reopened.list(&ListQuery::tagged("keep")).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Durable");

    reopened.pool().close().await;
    dir.close().unwrap();
}

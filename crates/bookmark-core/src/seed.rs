use crate::bookmark::BookmarkDraft;
use crate::repository::{Repository, Result};
use tracing::info;

/// What [`seed_if_empty`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already held bookmarks and was left alone.
    Skipped,
    /// The store was empty and this many sample bookmarks were inserted.
    Seeded(usize),
}

/// The fixed set of sample bookmarks.
pub fn sample_bookmarks() -> Vec<BookmarkDraft> {
    vec![
        sample(
            "https://docs.djangoproject.com/",
            "Django Documentation",
            "Official documentation for the Django web framework.",
            &["python", "django", "docs"],
        ),
        sample(
            "https://nextjs.org/docs",
            "Next.js Documentation",
            "Learn about Next.js features and API reference.",
            &["javascript", "react", "nextjs"],
        ),
        sample(
            "https://github.com",
            "GitHub",
            "Where the world builds software. Millions of developers collaborate here.",
            &["git", "development", "tools"],
        ),
        sample(
            "https://tailwindcss.com/docs",
            "Tailwind CSS Documentation",
            "A utility-first CSS framework for rapid UI development.",
            &["css", "tailwind", "frontend"],
        ),
        sample(
            "https://www.django-rest-framework.org/",
            "Django REST Framework",
            "A powerful and flexible toolkit for building Web APIs in Django.",
            &["python", "django", "api"],
        ),
    ]
}

fn sample(url: &str, title: &str, description: &str, tags: &[&str]) -> BookmarkDraft {
    BookmarkDraft::builder()
        .url(url)
        .title(title)
        .description(description)
        .tags(tags.iter().map(|tag| tag.to_string()).collect())
        .build()
}

/// Populates an empty store with [`sample_bookmarks`].
///
/// Does nothing if the store holds at least one bookmark.
pub async fn seed_if_empty<R>(repository: &R) -> Result<SeedOutcome>
where
    R: Repository + ?Sized,
{
    if repository.count().await? > 0 {
        info!("bookmarks already exist, skipping seed");
        return Ok(SeedOutcome::Skipped);
    }

    let samples = sample_bookmarks();
    let total = samples.len();
    for draft in samples {
        repository.insert(draft).await?;
    }

    info!(count = total, "seeded sample bookmarks");
    Ok(SeedOutcome::Seeded(total))
}

//! Startup seeding: the initial admin account and optional sample posts.

use chrono::{DateTime, Utc};

use inkpost_core::SessionAuthenticator;
use inkpost_core::domain::Post;
use inkpost_core::error::RepoError;
use inkpost_core::ports::{AdminRepository, AuthError, PostRepository};

const SAMPLE_POSTS: [(&str, &str, i64, &str); 3] = [
    (
        "1",
        "Getting Started with Next.js",
        1_705_312_800,
        "Next.js is a popular React framework for building server-rendered and statically \
         generated web applications. This post walks through setting up a project and creating \
         your first pages, then looks at routing, data fetching and composing components.",
    ),
    (
        "2",
        "Tailwind CSS for Modern UIs",
        1_705_761_000,
        "Tailwind CSS is a utility-first CSS framework for rapid UI development. Instead of \
         writing custom stylesheets you compose predefined utility classes in your markup, which \
         keeps designs consistent. This guide shows how to add Tailwind to a project and build \
         responsive interfaces with it.",
    ),
    (
        "3",
        "Understanding Server Components in Next.js 14",
        1_706_778_000,
        "Next.js 14 brings major improvements to Server Components, which render UI on the \
         server and ship less JavaScript to the browser. This article covers how they work, \
         where they help, and a few practical patterns for building faster applications.",
    ),
];

/// The demo posts shown on a fresh install.
pub fn sample_posts() -> Vec<Post> {
    SAMPLE_POSTS
        .iter()
        .map(|(id, title, created_secs, content)| Post {
            id: (*id).to_string(),
            title: (*title).to_string(),
            content: (*content).to_string(),
            created_at: DateTime::<Utc>::from_timestamp(*created_secs, 0).unwrap_or_default(),
        })
        .collect()
}

/// Insert the sample posts when the posts table is empty.
/// Returns how many posts were written.
pub async fn seed_sample_posts(posts: &dyn PostRepository) -> Result<usize, RepoError> {
    if posts.count().await? > 0 {
        tracing::debug!("Posts table not empty, skipping sample posts");
        return Ok(0);
    }

    let samples = sample_posts();
    let seeded = samples.len();
    posts.insert_many(samples).await?;

    tracing::info!(count = seeded, "Seeded sample posts");
    Ok(seeded)
}

/// Create the initial admin when no admin exists yet.
///
/// Returns `true` if an account was created. Without a password nothing is
/// created and a warning is logged, since nobody could log in.
pub async fn seed_admin(
    auth: &SessionAuthenticator,
    admins: &dyn AdminRepository,
    username: &str,
    password: Option<&str>,
) -> Result<bool, AuthError> {
    if admins.count().await? > 0 {
        return Ok(false);
    }

    let Some(password) = password.filter(|p| !p.is_empty()) else {
        tracing::warn!("No admin account exists and ADMIN_PASSWORD is not set; logins will fail");
        return Ok(false);
    };

    auth.provision_admin(username, password).await?;
    Ok(true)
}

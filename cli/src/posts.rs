use anyhow::{bail, Context, Result};
use bakebook_core::{load_blog_listing, BlogListing, DirectusClient};

pub async fn list_posts(url: Option<&str>) -> Result<()> {
    let Some(url) = url else {
        bail!("No blog URL configured. Pass --url or set BAKEBOOK_BLOG_URL.");
    };
    let client = DirectusClient::new(url).context("Failed to create blog client")?;

    match load_blog_listing(&client).await {
        BlogListing::Posts(posts) => {
            for post in &posts {
                let date = post
                    .published_at_utc()
                    .map(|dt| dt.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "undated".to_string());
                println!("{}  {}  ({})", date, post.title, post.slug);
                if let Some(description) = &post.description {
                    println!("            {}", description);
                }
            }
        }
        BlogListing::Empty => println!("No posts published yet"),
        BlogListing::Unavailable(reason) => {
            eprintln!("Blog unavailable: {}", reason);
        }
    }
    Ok(())
}

//! Thumbnail assignment for new recipes.

use rand::seq::SliceRandom;

/// Fixed pool of cosmetic thumbnails a new recipe draws from.
pub const THUMBNAILS: &[&str] = &[
    "/images/chocolate-chip-cookies.jpg",
    "/images/sourdough-bread.jpg",
    "/images/vanilla-cupcakes.jpg",
    "/images/apple-pie.jpg",
    "/images/cinnamon-rolls.jpg",
    "/images/blueberry-muffins.jpg",
];

/// Chooses a thumbnail from the pool. Injected into the store so tests can be deterministic.
pub trait ThumbnailPicker: Send + Sync {
    fn pick(&self, pool: &[&'static str]) -> &'static str;
}

/// Uniform random choice.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomThumbnail;

impl ThumbnailPicker for RandomThumbnail {
    fn pick(&self, pool: &[&'static str]) -> &'static str {
        pool.choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or_default()
    }
}

impl<F> ThumbnailPicker for F
where
    F: Fn(&[&'static str]) -> &'static str + Send + Sync,
{
    fn pick(&self, pool: &[&'static str]) -> &'static str {
        self(pool)
    }
}

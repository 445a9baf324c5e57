//! Related-post selection.

use crate::content::Post;

/// Number of related posts shown under a post.
pub const RELATED_LIMIT: usize = 3;

/// Bonus for sharing the current post's category.
const SAME_CATEGORY_SCORE: usize = 2;

/// Pick up to `limit` posts related to `current`.
///
/// Score = shared tags + 2 for the same category. Higher scores first, then
/// newer posts, then slug. Zero-scored posts still qualify, so short lists are
/// filled with the most recent remaining posts.
pub fn related_posts<'a>(current: &Post, posts: &'a [Post], limit: usize) -> Vec<&'a Post> {
    let mut scored: Vec<(usize, &Post)> = posts
        .iter()
        .filter(|post| post.slug != current.slug)
        .map(|post| (score(current, post), post))
        .collect();

    scored.sort_by(|(score_a, a), (score_b, b)| {
        score_b
            .cmp(score_a)
            .then_with(|| b.date.cmp(&a.date))
            .then_with(|| a.slug.cmp(&b.slug))
    });
    scored.into_iter().take(limit).map(|(_, post)| post).collect()
}

fn score(current: &Post, other: &Post) -> usize {
    let shared = other.tags.iter().filter(|tag| current.has_tag(tag)).count();
    let category = if other.category == current.category {
        SAME_CATEGORY_SCORE
    } else {
        0
    };
    shared + category
}

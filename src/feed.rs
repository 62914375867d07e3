//! Client-side post feed.
//!
//! Liking a post here only changes local state: the flag flips and the
//! counter moves optimistically. Nothing is sent to `/increment-likes`.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Author {
    pub username: String,
    pub avatar_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FeedPost {
    pub id: String,
    pub author: Author,
    pub image_url: String,
    pub caption: String,
    pub hashtags: Vec<String>,
    pub likes: u32,
    pub liked: bool,
    pub created_at: String,
}

impl FeedPost {
    /// Builds a post whose hashtags are taken from the caption.
    pub fn new(
        id: &str,
        author: Author,
        image_url: &str,
        caption: &str,
        likes: u32,
        created_at: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            author,
            image_url: image_url.to_string(),
            caption: caption.to_string(),
            hashtags: extract_hashtags(caption),
            likes,
            liked: false,
            created_at: created_at.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Feed {
    posts: Vec<FeedPost>,
}

impl Feed {
    pub fn new(posts: Vec<FeedPost>) -> Self {
        Self { posts }
    }

    /// The mock feed shown before any backend is connected.
    pub fn sample() -> Self {
        let luna = Author {
            username: "luna_the_husky".to_string(),
            avatar_url: "/avatars/luna.jpg".to_string(),
        };
        let mochi = Author {
            username: "mochi.cat".to_string(),
            avatar_url: "/avatars/mochi.jpg".to_string(),
        };

        Self::new(vec![
            FeedPost::new(
                "1",
                luna.clone(),
                "/posts/snow-zoomies.jpg",
                "First snow of the year! #husky #snow #zoomies",
                128,
                "2025-01-06T08:03:00+00:00",
            ),
            FeedPost::new(
                "2",
                mochi,
                "/posts/box.jpg",
                "If it fits, I sits #cat #CatsOfPetoGram",
                56,
                "2025-01-05T17:40:00+00:00",
            ),
            FeedPost::new(
                "3",
                luna,
                "/posts/groomer.jpg",
                "Spa day at the groomer #husky #selfcare",
                0,
                "2025-01-04T09:12:00+00:00",
            ),
        ])
    }

    pub fn posts(&self) -> &[FeedPost] {
        &self.posts
    }

    pub fn get(&self, id: &str) -> Option<&FeedPost> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Flips the viewer's like on a post. Unknown ids leave the feed as is.
    pub fn toggle_like(&mut self, id: &str) -> Option<&FeedPost> {
        let post = self.posts.iter_mut().find(|p| p.id == id)?;
        post.liked = !post.liked;
        post.likes = if post.liked {
            post.likes.saturating_add(1)
        } else {
            post.likes.saturating_sub(1)
        };
        Some(&*post)
    }

    /// Posts carrying `tag`, with or without the leading `#`.
    pub fn tagged<'a>(&'a self, tag: &str) -> impl Iterator<Item = &'a FeedPost> + 'a {
        let tag = tag.trim_start_matches('#').to_lowercase();
        self.posts
            .iter()
            .filter(move |p| p.hashtags.iter().any(|h| *h == tag))
    }
}

fn hashtag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"#(\w+)").expect("Regex should compile"))
}

/// Lower-cased hashtags of a caption, first occurrence order, no repeats.
pub fn extract_hashtags(caption: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for caps in hashtag_regex().captures_iter(caption) {
        let tag = caps[1].to_lowercase();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use super::{LikeStore, StoreError};
use crate::core::helpers::now_iso;
use crate::models::PostRecord;

/// Process-local store used by the native server and tests.
///
/// One mutex guards all rows; holding it across the read and the write is
/// what makes `increment_likes` atomic.
#[derive(Default)]
pub struct MemoryStore {
    posts: Mutex<HashMap<String, PostRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with a few posts so a fresh server has something
    /// to like.
    pub fn seeded() -> Self {
        let store = Self::new();
        for likes in [128, 56, 0] {
            // Ignore the result: a brand new mutex cannot be poisoned.
            let _ = store.insert(PostRecord {
                id: Uuid::new_v4().to_string(),
                likes_count: likes,
                created_at: now_iso(),
                updated_at: None,
            });
        }
        store
    }

    pub fn insert(&self, post: PostRecord) -> Result<(), StoreError> {
        self.lock()?.insert(post.id.clone(), post);
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, PostRecord>>, StoreError> {
        self.posts
            .lock()
            .map_err(|_| StoreError::Connection("Memory store lock poisoned".to_string()))
    }
}

impl LikeStore for MemoryStore {
    fn increment_likes(&self, post_id: &str) -> Result<Vec<PostRecord>, StoreError> {
        let mut posts = self.lock()?;
        match posts.get_mut(post_id) {
            Some(post) => {
                post.likes_count = post
                    .likes_count
                    .checked_add(1)
                    .ok_or_else(|| StoreError::Query(format!("likes_count overflow for {post_id}")))?;
                post.updated_at = Some(now_iso());
                Ok(vec![post.clone()])
            }
            None => Ok(Vec::new()),
        }
    }

    fn get_post(&self, post_id: &str) -> Result<Option<PostRecord>, StoreError> {
        Ok(self.lock()?.get(post_id).cloned())
    }

    fn list_posts(&self) -> Result<Vec<PostRecord>, StoreError> {
        let mut posts: Vec<PostRecord> = self.lock()?.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(posts)
    }
}

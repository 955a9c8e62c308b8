use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::blog::Blog;
use crate::repositories::blog_repository::BlogRepository;
use crate::repositories::errors::blog_repository_errors::BlogRepositoryError;

#[derive(Default)]
pub struct InMemoryBlogRepository {
    blogs: RwLock<HashMap<String, Blog>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn create_blog(&self, blog: &Blog) -> Result<(), BlogRepositoryError> {
        let mut blogs = self.blogs.write().await;
        if blogs.contains_key(&blog.id) {
            return Err(BlogRepositoryError::AlreadyExists);
        }
        blogs.insert(blog.id.clone(), blog.clone());
        Ok(())
    }

    async fn get_blog_by_id(&self, blog_id: &str) -> Result<Blog, BlogRepositoryError> {
        self.blogs
            .read()
            .await
            .get(blog_id)
            .cloned()
            .ok_or(BlogRepositoryError::NotFound)
    }

    async fn list_blogs(&self) -> Result<Vec<Blog>, BlogRepositoryError> {
        Ok(self.blogs.read().await.values().cloned().collect())
    }
}

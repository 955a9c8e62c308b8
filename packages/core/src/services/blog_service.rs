use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::models::auth::IdentityClaim;
use crate::models::blog::{Blog, BlogResponse, CreateBlogRequest};
use crate::models::pagination::{MetaPagination, PaginationRequest};
use crate::models::user::User;
use crate::repositories::blog_repository::BlogRepository;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::blog_service_errors::BlogServiceError;

pub const BLOG_DEFAULT_LIMIT: i64 = 5;

pub struct BlogService {
    blogs: Arc<dyn BlogRepository + Send + Sync>,
    users: Arc<dyn UserRepository + Send + Sync>,
}

impl BlogService {
    pub fn new(
        blogs: Arc<dyn BlogRepository + Send + Sync>,
        users: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        BlogService { blogs, users }
    }

    /// Stores a post authored by whoever the verified claim names.
    pub async fn create(
        &self,
        request: CreateBlogRequest,
        author: &IdentityClaim,
    ) -> Result<BlogResponse, BlogServiceError> {
        if request.title.trim().is_empty() || request.body.trim().is_empty() {
            return Err(BlogServiceError::Validation(
                "Title and body cannot be empty".to_string(),
            ));
        }

        let owner = self.users.get_user_by_id(&author.subject_id).await?;
        let blog = Blog::new(request.title, request.body, request.image, owner.id.clone());
        self.blogs.create_blog(&blog).await?;
        debug!("User {} created blog {}", owner.id, blog.id);
        Ok(BlogResponse::new(blog, &owner))
    }

    /// Newest first. Search matches title, body or author name, ignoring case.
    /// Posts whose author no longer exists are left out.
    pub async fn find_all_paginated(
        &self,
        params: &PaginationRequest,
    ) -> Result<(MetaPagination, Vec<BlogResponse>), BlogServiceError> {
        let (page, limit) = params.normalized_with(BLOG_DEFAULT_LIMIT);
        let needle = params.search.trim().to_lowercase();

        let owners: HashMap<String, User> = self
            .users
            .list_users()
            .await?
            .into_iter()
            .map(|user| (user.id.clone(), user))
            .collect();

        let mut blogs: Vec<BlogResponse> = self
            .blogs
            .list_blogs()
            .await?
            .into_iter()
            .filter_map(|blog| {
                let owner = owners.get(&blog.user_id)?;
                Some(BlogResponse::new(blog, owner))
            })
            .filter(|blog| {
                needle.is_empty()
                    || blog.title.to_lowercase().contains(&needle)
                    || blog.body.to_lowercase().contains(&needle)
                    || blog.owner.to_lowercase().contains(&needle)
            })
            .collect();
        blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let meta = MetaPagination::new(page, limit, blogs.len() as i64);
        let data = blogs
            .into_iter()
            .skip(PaginationRequest::offset(page, limit))
            .take(limit as usize)
            .collect();
        Ok((meta, data))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<BlogResponse, BlogServiceError> {
        let blog = self.blogs.get_blog_by_id(id).await?;
        let owner = match self.users.get_user_by_id(&blog.user_id).await {
            Ok(owner) => owner,
            Err(UserRepositoryError::NotFound) => return Err(BlogServiceError::BlogNotFound),
            Err(e) => return Err(BlogServiceError::UserRepository(e)),
        };
        Ok(BlogResponse::new(blog, &owner))
    }
}

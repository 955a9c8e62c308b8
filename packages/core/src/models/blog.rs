use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::User;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Blog {
    pub id: String,
    pub title: String,
    pub body: String,
    pub image: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    pub fn new(title: String, body: String, image: String, user_id: String) -> Self {
        let now = Utc::now();
        Blog {
            id: format!("blog-{}", Uuid::new_v4()),
            title,
            body,
            image,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateBlogRequest {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub image: String,
}

/// A post joined with its author's username.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    pub id: String,
    pub title: String,
    pub body: String,
    pub image: String,
    pub user_id: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogResponse {
    pub fn new(blog: Blog, owner: &User) -> Self {
        BlogResponse {
            id: blog.id,
            title: blog.title,
            body: blog.body,
            image: blog.image,
            user_id: blog.user_id,
            owner: owner.username.clone(),
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Role;

    #[test]
    fn test_new_blog_gets_prefixed_id() {
        let blog = Blog::new(
            "Title".to_string(),
            "Body".to_string(),
            String::new(),
            "user-1".to_string(),
        );

        assert!(blog.id.starts_with("blog-"));
        assert_eq!(blog.created_at, blog.updated_at);
    }

    #[test]
    fn test_response_carries_owner_name() {
        let owner = User::new(
            "author@example.com".to_string(),
            "author".to_string(),
            "hash".to_string(),
            Role::User,
        );
        let blog = Blog::new(
            "Title".to_string(),
            "Body".to_string(),
            "cover.png".to_string(),
            owner.id.clone(),
        );

        let json = serde_json::to_value(BlogResponse::new(blog, &owner)).unwrap();
        assert_eq!(json["owner"], "author");
        assert_eq!(json["userId"], owner.id.as_str());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_create_request_image_is_optional() {
        let request: CreateBlogRequest =
            serde_json::from_str(r#"{"title":"Hello","body":"World"}"#).unwrap();
        assert_eq!(request.image, "");
        assert!(serde_json::from_str::<CreateBlogRequest>(r#"{"title":"Hello"}"#).is_err());
    }
}

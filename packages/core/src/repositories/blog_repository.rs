use crate::models::blog::Blog;
use crate::repositories::errors::blog_repository_errors::BlogRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_attribute_value, to_item};

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbBlogRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbBlogRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn create_blog(&self, blog: &Blog) -> Result<(), BlogRepositoryError>;
    async fn get_blog_by_id(&self, blog_id: &str) -> Result<Blog, BlogRepositoryError>;
    async fn list_blogs(&self) -> Result<Vec<Blog>, BlogRepositoryError>;
}

#[async_trait]
impl BlogRepository for DynamoDbBlogRepository {
    async fn create_blog(&self, blog: &Blog) -> Result<(), BlogRepositoryError> {
        let item = to_item(blog).map_err(|e| BlogRepositoryError::Serialization(e.to_string()))?;
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("ConditionalCheckFailedException") {
                    Err(BlogRepositoryError::AlreadyExists)
                } else {
                    Err(BlogRepositoryError::DynamoDb(error_str))
                }
            }
        }
    }

    async fn get_blog_by_id(&self, blog_id: &str) -> Result<Blog, BlogRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(
                "id",
                to_attribute_value(blog_id)
                    .map_err(|e| BlogRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| BlogRepositoryError::DynamoDb(e.to_string()))?;
        match output.item {
            Some(item) => {
                from_item(item).map_err(|e| BlogRepositoryError::Serialization(e.to_string()))
            }
            None => Err(BlogRepositoryError::NotFound),
        }
    }

    async fn list_blogs(&self) -> Result<Vec<Blog>, BlogRepositoryError> {
        let mut blogs = Vec::new();
        let mut start_key = None;
        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| BlogRepositoryError::DynamoDb(e.to_string()))?;

            for item in output.items.unwrap_or_default() {
                let blog: Blog = from_item(item)
                    .map_err(|e| BlogRepositoryError::Serialization(e.to_string()))?;
                blogs.push(blog);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }
        Ok(blogs)
    }
}

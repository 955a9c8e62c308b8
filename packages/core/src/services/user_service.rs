use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::models::auth::requests::{
    LoginRequest, RefreshTokenRequest, RegisterRequest, UserUpdateRequest,
};
use crate::models::auth::responses::{RefreshTokenResponse, TokenPair};
use crate::models::pagination::{MetaPagination, PaginationRequest};
use crate::models::user::{User, UserResponse};
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::user_service_errors::UserServiceError;
use crate::services::password::{hash_password, meets_policy, verify_password, PASSWORD_POLICY};
use crate::services::refresh_rotator::RefreshRotator;
use crate::services::token_issuer::TokenIssuer;

pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
    issuer: Arc<TokenIssuer>,
    rotator: Arc<RefreshRotator>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository + Send + Sync>,
        issuer: Arc<TokenIssuer>,
        rotator: Arc<RefreshRotator>,
    ) -> Self {
        UserService {
            repository,
            issuer,
            rotator,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<UserResponse, UserServiceError> {
        if request.email.is_empty()
            || request.username.is_empty()
            || request.password.is_empty()
            || request.confirm_password.is_empty()
        {
            return Err(UserServiceError::Validation(
                "Email, username, password, or confirm password cannot be empty".to_string(),
            ));
        }
        if !is_valid_email(&request.email) {
            return Err(UserServiceError::Validation(
                "Email must be a valid email address".to_string(),
            ));
        }
        if request.password != request.confirm_password {
            return Err(UserServiceError::Validation(
                "Password and Confirm Password do not match".to_string(),
            ));
        }
        if !meets_policy(&request.password) {
            return Err(UserServiceError::Validation(PASSWORD_POLICY.to_string()));
        }
        if self.repository.email_exists(&request.email).await? {
            return Err(UserServiceError::UserAlreadyExists);
        }

        let user = User::new(
            request.email,
            request.username,
            hash_password(&request.password)?,
            request.role,
        );
        self.repository.create_user(&user).await?;
        debug!("Registered user {} with role {}", user.id, user.role);
        Ok(user.into())
    }

    /// Checks credentials and mints a fresh token pair. Unknown email and
    /// wrong password fail the same way.
    pub async fn login(&self, request: LoginRequest) -> Result<TokenPair, UserServiceError> {
        if request.email.is_empty() || request.password.is_empty() {
            return Err(UserServiceError::Validation(
                "Email or password cannot be empty".to_string(),
            ));
        }

        let user = match self.repository.get_user_by_email(&request.email).await {
            Ok(user) => user,
            Err(UserRepositoryError::NotFound) => {
                warn!("Login attempt for unknown email");
                return Err(UserServiceError::InvalidCredentials);
            }
            Err(e) => return Err(UserServiceError::Repository(e)),
        };

        if !verify_password(&request.password, &user.password)? {
            warn!("Login attempt with wrong password for {}", user.id);
            return Err(UserServiceError::InvalidCredentials);
        }

        Ok(self.issuer.issue_pair(&user.identity())?)
    }

    pub fn refresh(
        &self,
        request: &RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, UserServiceError> {
        if request.refresh_token.trim().is_empty() {
            return Err(UserServiceError::Validation(
                "Refresh token cannot be empty".to_string(),
            ));
        }
        let access_token = self.rotator.rotate(request.refresh_token.trim())?;
        Ok(RefreshTokenResponse { access_token })
    }

    pub async fn find_all(&self) -> Result<Vec<UserResponse>, UserServiceError> {
        let mut users = self.repository.list_users().await?;
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Case-insensitive substring search over username and email.
    pub async fn find_all_paginated(
        &self,
        params: &PaginationRequest,
    ) -> Result<(MetaPagination, Vec<UserResponse>), UserServiceError> {
        let (page, limit) = params.normalized();
        let needle = params.search.trim().to_lowercase();

        let mut users: Vec<User> = self
            .repository
            .list_users()
            .await?
            .into_iter()
            .filter(|u| {
                needle.is_empty()
                    || u.username.to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
            })
            .collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let meta = MetaPagination::new(page, limit, users.len() as i64);
        let offset = PaginationRequest::offset(page, limit);
        let data = users
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .map(UserResponse::from)
            .collect();
        Ok((meta, data))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<UserResponse, UserServiceError> {
        if id.is_empty() {
            return Err(UserServiceError::Validation(
                "User ID cannot be empty".to_string(),
            ));
        }
        Ok(self.repository.get_user_by_id(id).await?.into())
    }

    pub async fn update_by_id(
        &self,
        id: &str,
        request: UserUpdateRequest,
    ) -> Result<UserResponse, UserServiceError> {
        let mut user = self.repository.get_user_by_id(id).await?;

        if let Some(email) = request.email.filter(|e| *e != user.email) {
            if !is_valid_email(&email) {
                return Err(UserServiceError::Validation(
                    "Email must be a valid email address".to_string(),
                ));
            }
            if self.repository.email_exists(&email).await? {
                return Err(UserServiceError::UserAlreadyExists);
            }
            user.email = email;
        }
        if let Some(username) = request.username {
            if username.is_empty() {
                return Err(UserServiceError::Validation(
                    "Username cannot be empty".to_string(),
                ));
            }
            user.username = username;
        }
        if let Some(role) = request.role {
            user.role = role;
        }
        user.updated_at = Utc::now();

        self.repository.update_user(&user).await?;
        debug!("Updated user {}", user.id);
        Ok(user.into())
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), UserServiceError> {
        if id.is_empty() {
            return Err(UserServiceError::Validation(
                "User ID cannot be empty".to_string(),
            ));
        }
        self.repository.delete_user(id).await?;
        debug!("Deleted user {}", id);
        Ok(())
    }
}

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use crate::models::auth::{IdentityClaim, Role};
    use crate::models::pagination::MAX_LIMIT;
    use crate::repositories::user_repository::MockUserRepository;
    use crate::services::clock::FixedClock;
    use crate::services::errors::token_errors::TokenError;
    use crate::services::token_verifier::TokenVerifier;
    use chrono::{DateTime, Duration};
    use mockall::predicate::eq;

    struct Fixture {
        clock: Arc<FixedClock>,
        verifier: Arc<TokenVerifier>,
        service: UserService,
    }

    fn fixture(repository: MockUserRepository) -> Fixture {
        let config = AuthConfig::new("access-secret", "refresh-secret").unwrap();
        let clock = Arc::new(FixedClock::new(Utc::now()));
        let issuer = Arc::new(TokenIssuer::new(config.clone(), clock.clone()));
        let verifier = Arc::new(TokenVerifier::new(config, clock.clone()));
        let rotator = Arc::new(RefreshRotator::new(verifier.clone(), issuer.clone()));
        Fixture {
            service: UserService::new(Arc::new(repository), issuer, rotator),
            clock,
            verifier,
        }
    }

    fn register_request(password: &str, confirm: &str) -> RegisterRequest {
        RegisterRequest {
            email: "writer@example.com".to_string(),
            username: "writer".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
            role: Role::User,
        }
    }

    fn stored_user(email: &str, username: &str, password: &str, role: Role) -> User {
        User::new(
            email.to_string(),
            username.to_string(),
            hash_password(password).unwrap(),
            role,
        )
    }

    #[tokio::test]
    async fn test_register_success_hashes_password() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_email_exists()
            .with(eq("writer@example.com"))
            .returning(|_| Ok(false));
        repository
            .expect_create_user()
            .withf(|user| user.password.starts_with("$argon2") && user.role == Role::User)
            .times(1)
            .returning(|_| Ok(()));

        let f = fixture(repository);
        let response = f
            .service
            .register(register_request("P@ssw0rd", "P@ssw0rd"))
            .await
            .unwrap();

        assert_eq!(response.email, "writer@example.com");
        assert!(response.id.starts_with("user-"));
    }

    #[tokio::test]
    async fn test_register_password_mismatch() {
        let f = fixture(MockUserRepository::new());
        let err = f
            .service
            .register(register_request("P@ssw0rd", "P@ssw0rd!"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Password and Confirm Password do not match");
    }

    #[tokio::test]
    async fn test_register_weak_password() {
        let f = fixture(MockUserRepository::new());
        let err = f
            .service
            .register(register_request("password", "password"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), PASSWORD_POLICY);
    }

    #[tokio::test]
    async fn test_register_invalid_email() {
        let f = fixture(MockUserRepository::new());
        let mut request = register_request("P@ssw0rd", "P@ssw0rd");
        request.email = "not-an-email".to_string();

        assert!(matches!(
            f.service.register(request).await,
            Err(UserServiceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockUserRepository::new();
        repository.expect_email_exists().returning(|_| Ok(true));
        repository.expect_create_user().never();

        let f = fixture(repository);
        assert!(matches!(
            f.service
                .register(register_request("P@ssw0rd", "P@ssw0rd"))
                .await,
            Err(UserServiceError::UserAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_login_issues_pair_for_stored_identity() {
        let user = stored_user("admin@example.com", "admin", "P@ssw0rd", Role::Admin);
        let expected = IdentityClaim::new(user.id.clone(), Role::Admin);
        let mut repository = MockUserRepository::new();
        repository
            .expect_get_user_by_email()
            .returning(move |_| Ok(user.clone()));

        let f = fixture(repository);
        let pair = f
            .service
            .login(LoginRequest {
                email: "admin@example.com".to_string(),
                password: "P@ssw0rd".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(f.verifier.verify_access(&pair.access_token), Ok(expected.clone()));
        assert_eq!(f.verifier.verify_refresh(&pair.refresh_token), Ok(expected));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let user = stored_user("known@example.com", "known", "P@ssw0rd", Role::User);
        let mut repository = MockUserRepository::new();
        repository
            .expect_get_user_by_email()
            .returning(move |email| {
                if email == "known@example.com" {
                    Ok(user.clone())
                } else {
                    Err(UserRepositoryError::NotFound)
                }
            });

        let f = fixture(repository);
        let unknown = f
            .service
            .login(LoginRequest {
                email: "unknown@example.com".to_string(),
                password: "P@ssw0rd".to_string(),
            })
            .await
            .unwrap_err();
        let wrong_password = f
            .service
            .login(LoginRequest {
                email: "known@example.com".to_string(),
                password: "Wr0ng!pass".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(unknown.to_string(), "Invalid email or password");
        assert_eq!(wrong_password.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn test_refresh_returns_new_access_token() {
        let user = stored_user("reader@example.com", "reader", "P@ssw0rd", Role::User);
        let expected = user.identity();
        let mut repository = MockUserRepository::new();
        repository
            .expect_get_user_by_email()
            .returning(move |_| Ok(user.clone()));

        let f = fixture(repository);
        let pair = f
            .service
            .login(LoginRequest {
                email: "reader@example.com".to_string(),
                password: "P@ssw0rd".to_string(),
            })
            .await
            .unwrap();

        f.clock.advance(Duration::minutes(20));
        assert_eq!(
            f.verifier.verify_access(&pair.access_token),
            Err(TokenError::ExpiredToken)
        );

        let refreshed = f
            .service
            .refresh(&RefreshTokenRequest {
                refresh_token: pair.refresh_token,
            })
            .unwrap();
        assert_eq!(f.verifier.verify_access(&refreshed.access_token), Ok(expected));
    }

    #[test]
    fn test_refresh_rejects_empty_and_wrong_tokens() {
        let f = fixture(MockUserRepository::new());

        assert!(matches!(
            f.service.refresh(&RefreshTokenRequest {
                refresh_token: "  ".to_string()
            }),
            Err(UserServiceError::Validation(_))
        ));
        assert!(matches!(
            f.service.refresh(&RefreshTokenRequest {
                refresh_token: "garbage".to_string()
            }),
            Err(UserServiceError::Token(TokenError::InvalidToken))
        ));
    }

    #[tokio::test]
    async fn test_find_all_paginated_filters_and_slices() {
        let base = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let users: Vec<User> = (0..12)
            .map(|i| {
                let mut user = User::new(
                    format!("member{i}@example.com"),
                    if i % 2 == 0 {
                        format!("Alice{i}")
                    } else {
                        format!("bob{i}")
                    },
                    "hash".to_string(),
                    Role::User,
                );
                user.created_at = base + Duration::seconds(i);
                user
            })
            .rev()
            .collect();
        let mut repository = MockUserRepository::new();
        repository
            .expect_list_users()
            .returning(move || Ok(users.clone()));

        let f = fixture(repository);

        let (meta, page) = f
            .service
            .find_all_paginated(&PaginationRequest {
                page: 2,
                limit: 5,
                search: String::new(),
            })
            .await
            .unwrap();
        assert_eq!(meta, MetaPagination::new(2, 5, 12));
        assert_eq!(meta.total_page, 3);
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].email, "member5@example.com");

        let (meta, page) = f
            .service
            .find_all_paginated(&PaginationRequest {
                page: 0,
                limit: 0,
                search: "alice".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(meta.total_data, 6);
        assert_eq!((meta.page, meta.limit), (1, 10));
        assert!(page.iter().all(|u| u.username.starts_with("Alice")));
    }

    #[tokio::test]
    async fn test_find_all_paginated_handles_extreme_page_and_limit() {
        let users = vec![
            stored_user("one@example.com", "one", "P@ssw0rd", Role::User),
            stored_user("two@example.com", "two", "P@ssw0rd", Role::User),
        ];
        let mut repository = MockUserRepository::new();
        repository
            .expect_list_users()
            .returning(move || Ok(users.clone()));

        let f = fixture(repository);

        let (meta, page) = f
            .service
            .find_all_paginated(&PaginationRequest {
                page: i64::MAX,
                limit: 10,
                search: String::new(),
            })
            .await
            .unwrap();
        assert_eq!(meta.page, i64::MAX);
        assert!(page.is_empty());

        let (meta, page) = f
            .service
            .find_all_paginated(&PaginationRequest {
                page: 1,
                limit: i64::MAX,
                search: String::new(),
            })
            .await
            .unwrap();
        assert_eq!(meta.limit, MAX_LIMIT);
        assert_eq!(meta.total_page, 1);
        assert_eq!(page.len(), 2);
    }

    #[tokio::test]
    async fn test_update_changes_only_provided_fields() {
        let user = stored_user("old@example.com", "old", "P@ssw0rd", Role::User);
        let id = user.id.clone();
        let mut repository = MockUserRepository::new();
        repository
            .expect_get_user_by_id()
            .with(eq(id.clone()))
            .returning(move |_| Ok(user.clone()));
        repository
            .expect_update_user()
            .withf(|u| u.email == "old@example.com" && u.username == "renamed")
            .times(1)
            .returning(|_| Ok(()));

        let f = fixture(repository);
        let response = f
            .service
            .update_by_id(
                &id,
                UserUpdateRequest {
                    username: Some("renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(response.username, "renamed");
        assert_eq!(response.role, Role::User);
    }

    #[tokio::test]
    async fn test_missing_user_maps_to_not_found() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_get_user_by_id()
            .returning(|_| Err(UserRepositoryError::NotFound));
        repository
            .expect_delete_user()
            .returning(|_| Err(UserRepositoryError::NotFound));

        let f = fixture(repository);
        assert!(matches!(
            f.service.find_by_id("user-missing").await,
            Err(UserServiceError::UserNotFound)
        ));
        assert!(matches!(
            f.service.delete_by_id("user-missing").await,
            Err(UserServiceError::UserNotFound)
        ));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@b.io"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.io"));
        assert!(!is_valid_email("a b@c.io"));
        assert!(!is_valid_email("a@@b.io"));
    }
}

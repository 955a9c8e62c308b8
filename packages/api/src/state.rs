use std::sync::Arc;

use blog_core::config::AuthConfig;
use blog_core::repositories::blog_repository::BlogRepository;
use blog_core::repositories::user_repository::UserRepository;
use blog_core::services::access_guard::AccessGuard;
use blog_core::services::blog_service::BlogService;
use blog_core::services::clock::{Clock, SystemClock};
use blog_core::services::refresh_rotator::RefreshRotator;
use blog_core::services::token_issuer::TokenIssuer;
use blog_core::services::token_verifier::TokenVerifier;
use blog_core::services::user_service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub blog_service: Arc<BlogService>,
    pub access_guard: Arc<AccessGuard>,
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(
        auth: AuthConfig,
        api_key: Option<String>,
        users: Arc<dyn UserRepository + Send + Sync>,
        blogs: Arc<dyn BlogRepository + Send + Sync>,
    ) -> Self {
        Self::with_clock(auth, api_key, users, blogs, Arc::new(SystemClock))
    }

    pub fn with_clock(
        auth: AuthConfig,
        api_key: Option<String>,
        users: Arc<dyn UserRepository + Send + Sync>,
        blogs: Arc<dyn BlogRepository + Send + Sync>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let issuer = Arc::new(TokenIssuer::new(auth.clone(), clock.clone()));
        let verifier = Arc::new(TokenVerifier::new(auth, clock));
        let rotator = Arc::new(RefreshRotator::new(verifier.clone(), issuer.clone()));

        AppState {
            user_service: Arc::new(UserService::new(users.clone(), issuer, rotator)),
            blog_service: Arc::new(BlogService::new(blogs, users)),
            access_guard: Arc::new(AccessGuard::new(verifier)),
            api_key: api_key.map(Arc::from),
        }
    }
}

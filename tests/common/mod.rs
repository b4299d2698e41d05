#![allow(dead_code)]

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, header};
use axum_test::TestServer;
use blog_app::application::services::{AuthService, CommentService, PostService};
use blog_app::domain::entities::{
    Comment, NewComment, NewPost, NewSession, NewUser, Post, PostPatch, Role, Session, User,
};
use blog_app::domain::identity::AdminPolicy;
use blog_app::domain::repositories::{
    CommentRepository, PostRepository, SessionRepository, UserRepository,
};
use blog_app::error::AppError;
use blog_app::routes::{RouterOptions, router};
use blog_app::state::AppState;
use blog_app::utils::cookie::SessionCookie;
use blog_app::utils::token::{TokenHasher, generate_token};
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use std::sync::{Arc, Mutex};

pub const SECRET: &str = "integration-test-signing-secret";
pub const COOKIE_NAME: &str = "_blog_app_session";
pub const PASSWORD: &str = "correct horse battery";

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    sessions: Vec<Session>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn author_name(&self, user_id: i64) -> String {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.name.clone())
            .unwrap_or_default()
    }
}

/// In-memory stand-in for PostgreSQL implementing every repository trait.
#[derive(Default)]
pub struct MemoryDb {
    tables: Mutex<Tables>,
}

impl MemoryDb {
    pub fn post_count(&self) -> usize {
        self.tables.lock().unwrap().posts.len()
    }

    pub fn posts(&self) -> Vec<Post> {
        self.tables.lock().unwrap().posts.clone()
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.tables.lock().unwrap().comments.clone()
    }

    pub fn session_count(&self) -> usize {
        self.tables.lock().unwrap().sessions.len()
    }

    /// Inserts a post with a fixed id, as if created earlier.
    pub fn insert_post(&self, id: i64, author_id: i64, title: &str) -> Post {
        let mut t = self.tables.lock().unwrap();
        t.next_id = t.next_id.max(id);
        let now = Utc::now();
        let post = Post {
            id,
            author_id,
            author_name: t.author_name(author_id),
            title: title.to_string(),
            content: format!("Body of {title}"),
            created_at: now,
            updated_at: now,
        };
        t.posts.push(post.clone());
        post
    }

    pub fn insert_comment(&self, post_id: i64, author_id: i64, content: &str) -> Comment {
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        let now = Utc::now();
        let comment = Comment {
            id,
            post_id,
            author_id,
            author_name: t.author_name(author_id),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };
        t.comments.push(comment.clone());
        comment
    }

    pub fn insert_session(&self, user_id: i64, token_hash: String, expires_at: DateTime<Utc>) {
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        t.sessions.push(Session {
            id,
            user_id,
            token_hash,
            created_at: Utc::now(),
            expires_at,
        });
    }
}

#[async_trait]
impl UserRepository for MemoryDb {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut t = self.tables.lock().unwrap();
        if t.users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict("Unique constraint violation", json!({})));
        }
        let user = User {
            id: t.next_id(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at: Utc::now(),
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.tables.lock().unwrap().users.clone())
    }

    async fn set_role(&self, id: i64, role: Role) -> Result<User, AppError> {
        let mut t = self.tables.lock().unwrap();
        let user = t
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("User not found", json!({ "user_id": id })))?;
        user.role = role;
        Ok(user.clone())
    }
}

#[async_trait]
impl PostRepository for MemoryDb {
    async fn create(&self, new_post: NewPost) -> Result<Post, AppError> {
        let mut t = self.tables.lock().unwrap();
        let now = Utc::now();
        let post = Post {
            id: t.next_id(),
            author_id: new_post.author_id,
            author_name: t.author_name(new_post.author_id),
            title: new_post.title,
            content: new_post.content,
            created_at: now,
            updated_at: now,
        };
        t.posts.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Post>, AppError> {
        let t = self.tables.lock().unwrap();
        let mut posts = t.posts.clone();
        posts.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(posts
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.lock().unwrap().posts.len() as i64)
    }

    async fn update(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, AppError> {
        let mut t = self.tables.lock().unwrap();
        Ok(t.posts.iter_mut().find(|p| p.id == id).map(|post| {
            post.title = patch.title;
            post.content = patch.content;
            post.updated_at = Utc::now();
            post.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.posts.len();
        t.posts.retain(|p| p.id != id);
        if t.posts.len() == before {
            return Ok(false);
        }
        t.comments.retain(|c| c.post_id != id);
        Ok(true)
    }
}

#[async_trait]
impl CommentRepository for MemoryDb {
    async fn create(&self, new_comment: NewComment) -> Result<Comment, AppError> {
        let mut t = self.tables.lock().unwrap();
        let now = Utc::now();
        let comment = Comment {
            id: t.next_id(),
            post_id: new_comment.post_id,
            author_id: new_comment.author_id,
            author_name: t.author_name(new_comment.author_id),
            content: new_comment.content,
            created_at: now,
            updated_at: now,
        };
        t.comments.push(comment.clone());
        Ok(comment)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, content: String) -> Result<Option<Comment>, AppError> {
        let mut t = self.tables.lock().unwrap();
        Ok(t.comments.iter_mut().find(|c| c.id == id).map(|comment| {
            comment.content = content;
            comment.updated_at = Utc::now();
            comment.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.comments.len();
        t.comments.retain(|c| c.id != id);
        Ok(t.comments.len() != before)
    }
}

#[async_trait]
impl SessionRepository for MemoryDb {
    async fn create(&self, new_session: NewSession) -> Result<Session, AppError> {
        let mut t = self.tables.lock().unwrap();
        let session = Session {
            id: t.next_id(),
            user_id: new_session.user_id,
            token_hash: new_session.token_hash,
            created_at: Utc::now(),
            expires_at: new_session.expires_at,
        };
        t.sessions.push(session.clone());
        Ok(session)
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.sessions
            .iter()
            .find(|s| s.token_hash == token_hash)
            .cloned())
    }

    async fn delete_by_token_hash(&self, token_hash: &str) -> Result<bool, AppError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.sessions.len();
        t.sessions.retain(|s| s.token_hash != token_hash);
        Ok(t.sessions.len() != before)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.sessions.len();
        t.sessions.retain(|s| s.expires_at > now);
        Ok((before - t.sessions.len()) as u64)
    }
}

/// The full router over an in-memory database, with rate limiting off.
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<MemoryDb>,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_policy(AdminPolicy::RoleFlag)
    }

    pub fn with_policy(policy: AdminPolicy) -> Self {
        let db = Arc::new(MemoryDb::default());
        let state = create_test_state(db.clone(), policy);
        let options = RouterOptions {
            rate_limit: false,
            ..RouterOptions::default()
        };
        let server = TestServer::new(router(state.clone(), options)).unwrap();

        Self { server, db, state }
    }

    /// Registers an account and gives it `role`.
    pub async fn seed_user(&self, name: &str, email: &str, role: Role) -> User {
        let user = self
            .state
            .auth_service
            .register(name, email, PASSWORD)
            .await
            .unwrap();
        UserRepository::set_role(self.db.as_ref(), user.id, role)
            .await
            .unwrap()
    }

    /// Opens a session for `user` and returns its `Cookie` header.
    pub async fn sign_in(&self, user: &User) -> (HeaderName, HeaderValue) {
        let token = self.state.auth_service.open_session(user.id).await.unwrap();
        cookie_header(&token)
    }

    pub async fn admin(&self) -> (User, (HeaderName, HeaderValue)) {
        let user = self.seed_user("Ada", "ada@blog.io", Role::Admin).await;
        let cookie = self.sign_in(&user).await;
        (user, cookie)
    }

    pub async fn member(&self) -> (User, (HeaderName, HeaderValue)) {
        let user = self.seed_user("Bob", "bob@blog.io", Role::Member).await;
        let cookie = self.sign_in(&user).await;
        (user, cookie)
    }

    /// A well-formed token whose stored session expired an hour ago.
    pub fn expired_session(&self, user: &User) -> (HeaderName, HeaderValue) {
        let token = generate_token();
        let hash = TokenHasher::new(SECRET).hash(&token);
        self.db
            .insert_session(user.id, hash, Utc::now() - Duration::hours(1));
        cookie_header(&token)
    }
}

pub fn cookie_header(token: &str) -> (HeaderName, HeaderValue) {
    (
        header::COOKIE,
        HeaderValue::from_str(&format!("{COOKIE_NAME}={token}")).unwrap(),
    )
}

pub fn create_test_state(db: Arc<MemoryDb>, policy: AdminPolicy) -> AppState {
    let auth_service = Arc::new(AuthService::new(
        db.clone(),
        db.clone(),
        SECRET,
        Duration::hours(1),
        policy,
    ));
    let post_service = Arc::new(PostService::new(db.clone()));
    let comment_service = Arc::new(CommentService::new(db.clone(), db));

    let cookie = SessionCookie {
        name: COOKIE_NAME.to_string(),
        max_age_seconds: 3600,
        secure: false,
    };

    AppState::new(auth_service, post_service, comment_service, cookie)
}

#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use wishlist_api::auth::generate_token;
use wishlist_api::config::AppConfig;
use wishlist_api::database::models::{FamilyMember, FamilyMemberCreate, User, UserCreate};
use wishlist_api::database::{FamilyMemberStore, MemoryStore, UserStore};
use wishlist_api::{app, AppState};

/// Router wired to a fresh in-memory store, driven in-process
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub config: AppConfig,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Result<Value> {
        serde_json::from_slice(&self.body).context("response body is not JSON")
    }

    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.clone()).context("response body is not UTF-8")
    }

    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let config = AppConfig::development();
        let router = app(AppState::new(store.clone(), config.clone()));

        Self { router, store, config }
    }

    pub async fn user(&self, email: &str, is_superuser: bool) -> Result<User> {
        self.insert_user(email, is_superuser, true).await
    }

    pub async fn inactive_user(&self, email: &str) -> Result<User> {
        self.insert_user(email, false, false).await
    }

    async fn insert_user(&self, email: &str, is_superuser: bool, is_active: bool) -> Result<User> {
        let user = UserCreate {
            email: email.to_string(),
            is_active,
            is_superuser,
            full_name: Some(format!("Head of {}", email)),
            address: Some("12 Elm Street".to_string()),
            phone: Some("555-0100".to_string()),
            hashed_password: "opaque-hash".to_string(),
        }
        .into_user();

        Ok(self.store.insert_user(user).await?)
    }

    pub async fn member(&self, owner: &User, given_name: &str) -> Result<FamilyMember> {
        let member = FamilyMemberCreate {
            given_name: Some(given_name.to_string()),
            family_role: Some("Child".to_string()),
            age: 8,
            practical_wish: Some("winter boots".to_string()),
            ..Default::default()
        }
        .into_member(owner.id);

        Ok(self.store.insert_family_member(member).await?)
    }

    /// Family members across every owner
    pub async fn store_count(&self) -> Result<i64> {
        Ok(self.store.count_family_members(None).await?)
    }

    pub fn token(&self, user: &User) -> Result<String> {
        Ok(generate_token(user.id, &self.config.security)?)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Result<TestResponse> {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> Result<TestResponse> {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        self.request(Method::DELETE, uri, token, None).await
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await?.to_vec();

        Ok(TestResponse { status, headers, body })
    }
}

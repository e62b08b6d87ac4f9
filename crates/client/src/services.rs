//! Typed access to the API resources.

use std::marker::PhantomData;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tola_core::types::DbId;

use crate::api::{to_value, ApiClient};
use crate::error::ClientError;
use crate::models::{
    Category, Contact, ContactSubmission, DashboardStats, HomePage, ProductType, Project,
    Subscriber, Testimonial, Tile,
};
use crate::storage::TokenStore;

/// CRUD calls for one collection (`/tiles`, `/categories`, ...).
pub struct Resource<'a, S, T> {
    client: &'a ApiClient<S>,
    path: &'static str,
    _item: PhantomData<T>,
}

impl<'a, S: TokenStore, T: DeserializeOwned> Resource<'a, S, T> {
    fn new(client: &'a ApiClient<S>, path: &'static str) -> Self {
        Self {
            client,
            path,
            _item: PhantomData,
        }
    }

    pub async fn list<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<Vec<T>, ClientError> {
        self.client
            .send_json(Method::GET, self.path, Some(to_value(query)?), None)
            .await
    }

    pub async fn get(&self, id: DbId) -> Result<T, ClientError> {
        self.client
            .send_json(Method::GET, &format!("{}/{id}", self.path), None, None)
            .await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<T, ClientError> {
        self.client
            .send_json(Method::POST, self.path, None, Some(to_value(body)?))
            .await
    }

    /// Partial update: fields absent from `body` are kept.
    pub async fn update<B: Serialize + ?Sized>(&self, id: DbId, body: &B) -> Result<T, ClientError> {
        self.client
            .send_json(
                Method::PUT,
                &format!("{}/{id}", self.path),
                None,
                Some(to_value(body)?),
            )
            .await
    }

    pub async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        self.client
            .send_empty(Method::DELETE, &format!("{}/{id}", self.path), None, None)
            .await
    }
}

impl<S: TokenStore> ApiClient<S> {
    pub fn tiles(&self) -> Resource<'_, S, Tile> {
        Resource::new(self, "/tiles")
    }

    pub fn categories(&self) -> Resource<'_, S, Category> {
        Resource::new(self, "/categories")
    }

    pub fn product_types(&self) -> Resource<'_, S, ProductType> {
        Resource::new(self, "/product-types")
    }

    pub fn projects(&self) -> Resource<'_, S, Project> {
        Resource::new(self, "/projects")
    }

    pub fn testimonials(&self) -> Resource<'_, S, Testimonial> {
        Resource::new(self, "/testimonials")
    }

    pub async fn submit_contact(&self, form: &ContactSubmission) -> Result<Contact, ClientError> {
        self.send_json(Method::POST, "/contacts", None, Some(to_value(form)?))
            .await
    }

    pub async fn subscribe(&self, email: &str, name: Option<&str>) -> Result<Subscriber, ClientError> {
        let body = serde_json::json!({ "email": email, "name": name });
        self.send_json(Method::POST, "/newsletter/subscribe", None, Some(body))
            .await
    }

    pub async fn unsubscribe(&self, email: &str) -> Result<(), ClientError> {
        let body = serde_json::json!({ "email": email });
        self.send_empty(Method::POST, "/newsletter/unsubscribe", None, Some(body))
            .await
    }

    pub async fn home(&self) -> Result<HomePage, ClientError> {
        self.send_json(Method::GET, "/home", None, None).await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ClientError> {
        self.send_json(Method::GET, "/dashboard/stats", None, None)
            .await
    }
}

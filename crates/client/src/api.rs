use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use common::types::Health;
use service::auth::domain::{AuthUser, RegisterInput};
use service::owner::domain::{OwnerInput, OwnerPatch, OwnerRecord, OwnerWithPets};
use service::pet::domain::{PetInput, PetPatch, PetView};

use crate::errors::{ClientError, ClientResult};
use crate::session::{Session, SessionUser};

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: SessionUser,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    fields: BTreeMap<String, Vec<String>>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// One method per HTTP endpoint of the registry.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url: base_url.into().trim_end_matches('/').to_string(), http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(resp: Response) -> ClientResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body: ErrorBody = resp.json().await.unwrap_or_default();
        let message = if body.message.is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            body.message
        };
        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized(message));
        }
        Err(ClientError::Api { status: status.as_u16(), message, fields: body.fields })
    }

    async fn public(&self, req: RequestBuilder) -> ClientResult<Response> {
        Self::check(req.send().await?).await
    }

    /// Attach the session token; a 401 ends the session.
    async fn authed(&self, session: &mut Session, req: RequestBuilder) -> ClientResult<Response> {
        let token = session.require_auth()?.token.clone();
        match Self::check(req.bearer_auth(token).send().await?).await {
            Err(ClientError::Unauthorized(msg)) => {
                debug!("token rejected, clearing session");
                session.logout()?;
                Err(ClientError::Unauthorized(msg))
            }
            other => other,
        }
    }

    async fn json<T: DeserializeOwned>(resp: Response) -> ClientResult<T> {
        Ok(resp.json().await?)
    }

    pub async fn health(&self) -> ClientResult<Health> {
        Self::json(self.public(self.http.get(self.url("/health"))).await?).await
    }

    pub async fn register(&self, input: &RegisterInput) -> ClientResult<AuthUser> {
        Self::json(self.public(self.http.post(self.url("/users/register")).json(input)).await?).await
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let req = self.http.post(self.url("/auth/login")).json(&Credentials { email, password });
        Self::json(self.public(req).await?).await
    }

    pub async fn me(&self, session: &mut Session) -> ClientResult<AuthUser> {
        let req = self.http.get(self.url("/auth/me"));
        Self::json(self.authed(session, req).await?).await
    }

    pub async fn create_owner(&self, session: &mut Session, input: &OwnerInput) -> ClientResult<OwnerRecord> {
        let req = self.http.post(self.url("/owner")).json(input);
        Self::json(self.authed(session, req).await?).await
    }

    pub async fn get_owner(&self, session: &mut Session, id: Uuid) -> ClientResult<OwnerWithPets> {
        let req = self.http.get(self.url(&format!("/owner/{id}")));
        Self::json(self.authed(session, req).await?).await
    }

    pub async fn update_owner(&self, session: &mut Session, id: Uuid, patch: &OwnerPatch) -> ClientResult<OwnerWithPets> {
        let req = self.http.patch(self.url(&format!("/owner/{id}"))).json(patch);
        Self::json(self.authed(session, req).await?).await
    }

    pub async fn delete_owner(&self, session: &mut Session, id: Uuid) -> ClientResult<()> {
        let req = self.http.delete(self.url(&format!("/owner/{id}")));
        self.authed(session, req).await.map(drop)
    }

    pub async fn create_pet(&self, session: &mut Session, input: &PetInput) -> ClientResult<PetView> {
        let req = self.http.post(self.url("/pets")).json(input);
        Self::json(self.authed(session, req).await?).await
    }

    pub async fn list_pets(&self, session: &mut Session) -> ClientResult<Vec<PetView>> {
        let req = self.http.get(self.url("/pets"));
        Self::json(self.authed(session, req).await?).await
    }

    pub async fn get_pet(&self, session: &mut Session, id: Uuid) -> ClientResult<PetView> {
        let req = self.http.get(self.url(&format!("/pets/{id}")));
        Self::json(self.authed(session, req).await?).await
    }

    pub async fn list_pets_by_owner(&self, session: &mut Session, owner_id: Uuid) -> ClientResult<Vec<PetView>> {
        let req = self.http.get(self.url(&format!("/pets/owner/{owner_id}")));
        Self::json(self.authed(session, req).await?).await
    }

    pub async fn update_pet(&self, session: &mut Session, id: Uuid, patch: &PetPatch) -> ClientResult<PetView> {
        let req = self.http.patch(self.url(&format!("/pets/{id}"))).json(patch);
        Self::json(self.authed(session, req).await?).await
    }

    pub async fn delete_pet(&self, session: &mut Session, id: Uuid) -> ClientResult<()> {
        let req = self.http.delete(self.url(&format!("/pets/{id}")));
        self.authed(session, req).await.map(drop)
    }
}

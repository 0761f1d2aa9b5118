//! Calls to the kudos server. Every function here only fetches and parses;
//! nothing in this module touches the view.

use log::{debug, trace};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::model::{Id, KudosEntry, User};

mod error;
mod payloads;

pub use error::Error;
pub use payloads::Moderation;

use payloads::{KudosList, Login, SendKudos, UserList, Whoami};

pub type Result<T> = std::result::Result<T, Error>;

pub struct Api {
    http: Client,
    base_url: String,
}

impl Api {
    /// Create a client for the server at `base_url`.
    ///
    /// The server tracks the login through a session cookie, so the
    /// underlying client keeps a cookie store.
    pub fn new(base_url: &str) -> Result<Api> {
        let http = Client::builder().cookie_store(true).build()?;
        Ok(Api {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and turn any non-success status into an [`Error`].
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        trace!("{} answered {}", response.url().path(), status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        Err(Error::from_failure(status, &body))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        Ok(self.send(request).await?.json::<T>().await?)
    }

    pub async fn users(&self) -> Result<Vec<User>> {
        debug!("Fetching user roster");
        let list: UserList = self.fetch_json(self.http.get(self.url("/api/users"))).await?;
        Ok(list.users)
    }

    pub async fn whoami(&self) -> Result<Option<User>> {
        debug!("Resolving current identity");
        let whoami: Whoami = self.fetch_json(self.http.get(self.url("/api/whoami"))).await?;
        Ok(whoami.user)
    }

    /// Get up to `limit` entries. Ordering and truncation are the server's.
    pub async fn kudos(&self, limit: u32) -> Result<Vec<KudosEntry>> {
        debug!("Fetching feed (limit: {})", limit);
        let request = self
            .http
            .get(self.url("/api/kudos"))
            .query(&[("limit", limit)]);
        let list: KudosList = self.fetch_json(request).await?;
        Ok(list.kudos)
    }

    pub async fn login(&self, user_id: Id) -> Result<()> {
        debug!("Logging in as user {}", user_id);
        let request = self.http.post(self.url("/login")).json(&Login { user_id });
        self.send(request).await?;
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        debug!("Logging out");
        self.send(self.http.post(self.url("/logout"))).await?;
        Ok(())
    }

    pub async fn send_kudos(&self, recipient_id: Option<Id>, message: &str) -> Result<()> {
        debug!("Sending kudos to {:?}", recipient_id);
        let body = SendKudos {
            recipient_id,
            message,
        };
        let request = self.http.post(self.url("/api/kudos")).json(&body);
        self.send(request).await?;
        Ok(())
    }

    pub async fn moderate(&self, id: Id, moderation: &Moderation) -> Result<()> {
        debug!("Moderating kudos {} ({})", id, moderation.name());
        let path = format!("/api/kudos/{}/moderate", id);
        let request = self.http.post(self.url(&path)).json(moderation);
        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn lists_users() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/users")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"users": [{"id": 1, "username": "alice", "is_admin": false}, {"id": 3, "username": "carol", "is_admin": true}]}"#)
            .create_async()
            .await;

        let api = Api::new(&server.url()).unwrap();
        let users = api.users().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username, "alice");
        assert!(users[1].is_admin);
    }

    #[tokio::test]
    async fn whoami_without_a_session() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/whoami")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"user": null}"#)
            .create_async()
            .await;

        let api = Api::new(&server.url()).unwrap();
        assert_eq!(api.whoami().await.unwrap(), None);
    }

    #[tokio::test]
    async fn feed_passes_the_limit() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/api/kudos")
            .match_query(Matcher::UrlEncoded("limit".into(), "50".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"kudos": [{"id": 7, "sender": "alice", "recipient": "bob", "message": "Thanks!", "created_at": "2024-05-01T10:00:00"}]}"#)
            .expect(1)
            .create_async()
            .await;

        let api = Api::new(&server.url()).unwrap();
        let kudos = api.kudos(50).await.unwrap();

        m.assert_async().await;
        assert_eq!(kudos[0].id, Id::from(7));
    }

    #[tokio::test]
    async fn failed_send_carries_the_server_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/api/kudos")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"recipient_id": 2, "message": ""})))
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": false, "error": "Message required"}"#)
            .create_async()
            .await;

        let api = Api::new(&server.url()).unwrap();
        let err = api.send_kudos(Some(Id::from(2)), "").await.unwrap_err();

        assert_eq!(err.server_message(), Some("Message required"));
        assert_eq!(err.status(), Some(reqwest::StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn failure_status_wins_over_body() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/users")
            .with_status(503)
            .with_header("content-type", "application/json")
            .with_body(r#"{"users": []}"#)
            .create_async()
            .await;

        let api = Api::new(&server.url()).unwrap();
        let err = api.users().await.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::SERVICE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn moderation_posts_the_action() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/api/kudos/7/moderate")
            .match_body(Matcher::Json(json!({"action": "hide", "reason": "spam"})))
            .with_status(200)
            .with_body(r#"{"ok": true}"#)
            .expect(1)
            .create_async()
            .await;

        let api = Api::new(&server.url()).unwrap();
        let hide = Moderation::Hide {
            reason: "spam".into(),
        };
        api.moderate(Id::from(7), &hide).await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn login_keeps_the_session_cookie() {
        let mut server = Server::new_async().await;
        let _login = server
            .mock("POST", "/login")
            .match_body(Matcher::Json(json!({"user_id": 1})))
            .with_status(200)
            .with_header("set-cookie", "session=abc; Path=/")
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;
        let whoami = server
            .mock("GET", "/api/whoami")
            .match_header("cookie", Matcher::Regex("session=abc".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"user": {"id": 1, "username": "alice", "is_admin": false}}"#)
            .expect(1)
            .create_async()
            .await;

        let api = Api::new(&server.url()).unwrap();
        api.login(Id::from(1)).await.unwrap();
        let user = api.whoami().await.unwrap().unwrap();

        whoami.assert_async().await;
        assert_eq!(user.username, "alice");
    }
}

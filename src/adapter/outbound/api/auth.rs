//! Authentication operations. Neither attaches the stored credential.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde_json::Value;

use super::client::{ApiClient, Auth};
use crate::domain::{LoginForm, RegisterRequest};
use crate::error::Result;
use crate::port::AuthApi;

impl ApiClient {
    /// `POST /auth/token`, body form-urlencoded as `username` and `password`.
    ///
    /// Resolves to the token response body; storing the token is the
    /// caller's job (see `Session::login`).
    pub async fn login(&self, form: &LoginForm) -> Result<Value> {
        self.send(self.login_request(form)?).await
    }

    /// `POST /auth/register` with a JSON body.
    pub async fn register(&self, user: &RegisterRequest) -> Result<Value> {
        self.send(self.register_request(user)?).await
    }

    fn login_request(&self, form: &LoginForm) -> Result<RequestBuilder> {
        Ok(self
            .request(Method::POST, &["auth", "token"], Auth::Anonymous)?
            .form(form))
    }

    fn register_request(&self, user: &RegisterRequest) -> Result<RequestBuilder> {
        Ok(self
            .request(Method::POST, &["auth", "register"], Auth::Anonymous)?
            .json(user))
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, form: &LoginForm) -> Result<Value> {
        Self::login(self, form).await
    }

    async fn register(&self, user: &RegisterRequest) -> Result<Value> {
        Self::register(self, user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::credential::CredentialStore;
    use crate::domain::Credential;
    use crate::testkit::storage::MemoryCredentialStorage;
    use url::Url;

    fn client() -> ApiClient {
        let store = CredentialStore::load(MemoryCredentialStorage::with_token("tok")).unwrap();
        ApiClient::new(Url::parse("http://localhost:8000").unwrap(), store)
    }

    #[test]
    fn login_body_is_form_encoded() {
        let client = client();
        let request = client
            .login_request(&LoginForm::new("a@b.com", "pw"))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(
            request.headers()["content-type"],
            "application/x-www-form-urlencoded"
        );
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, b"username=a%40b.com&password=pw");
        assert!(request.headers().get("authorization").is_none());
    }

    #[test]
    fn register_body_is_json() {
        let client = client();
        client.set_auth_header(Some(Credential::new("other")));
        let request = client
            .register_request(&RegisterRequest {
                email: "a@b.com".into(),
                password: "pw".into(),
                full_name: Some("Ada".into()),
            })
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.headers()["content-type"], "application/json");
        let body: Value =
            serde_json::from_slice(request.body().and_then(|b| b.as_bytes()).unwrap()).unwrap();
        assert_eq!(body["email"], "a@b.com");
        assert_eq!(body["full_name"], "Ada");
        assert!(request.headers().get("authorization").is_none());
    }
}

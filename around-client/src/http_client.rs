use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{AroundClientError, AroundClientResult};
use crate::models::{
    AvatarPatch, Card, Credentials, Identity, LikeRequest, NewCard, ProfilePatch, User,
};
use crate::ports::{AuthApi, ProfileApi};
use crate::wire::{CardDto, EnvelopeDto, ErrorResponseDto, IdentityDto, TokenDto, UserDto};

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Serialize)]
struct CredentialsDto<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct ProfilePatchDto<'a> {
    name: &'a str,
    about: &'a str,
}

#[derive(Debug, Serialize)]
struct AvatarPatchDto<'a> {
    avatar: &'a str,
}

#[derive(Debug, Serialize)]
struct NewCardDto<'a> {
    name: &'a str,
    link: &'a str,
}

fn like_method(is_liked: bool) -> Method {
    if is_liked {
        Method::DELETE
    } else {
        Method::PUT
    }
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API сервиса профилей и сервиса авторизации.
///
/// Один и тот же тип реализует [`ProfileApi`] и [`AuthApi`]; если сервисы
/// живут на разных адресах, создаются два экземпляра.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт клиент с базовым URL и таймаутами по умолчанию (5 с на
    /// соединение, 15 с на запрос).
    pub fn new(base_url: impl Into<String>) -> AroundClientResult<Self> {
        Self::with_timeouts(base_url, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Создаёт клиент с явными таймаутами.
    pub fn with_timeouts(
        base_url: impl Into<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> AroundClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Базовый URL клиента.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let mut request = self.client.request(method, self.endpoint(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn decode_error(response: reqwest::Response) -> AroundClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body.into_message(),
            Err(_) => None,
        };
        AroundClientError::from_status(status.as_u16(), message)
    }

    async fn execute(request: RequestBuilder) -> AroundClientResult<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(AroundClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    async fn fetch<TRes>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> AroundClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let response = Self::execute(self.request(method, path, token)).await?;
        response
            .json::<TRes>()
            .await
            .map_err(AroundClientError::from_reqwest)
    }

    /// универсальный helper для отправки запросов с json-payload
    async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
        token: Option<&str>,
    ) -> AroundClientResult<TRes>
    where
        TReq: Serialize,
        TRes: DeserializeOwned,
    {
        let response = Self::execute(self.request(method, path, token).json(body)).await?;
        response
            .json::<TRes>()
            .await
            .map_err(AroundClientError::from_reqwest)
    }
}

#[async_trait(?Send)]
impl ProfileApi for HttpClient {
    async fn get_user_info(&self, token: &str) -> AroundClientResult<User> {
        let dto: UserDto = self.fetch(Method::GET, "/users/me", Some(token)).await?;
        Ok(dto.into())
    }

    async fn update_user(&self, token: &str, patch: &ProfilePatch) -> AroundClientResult<User> {
        let payload = ProfilePatchDto {
            name: &patch.name,
            about: &patch.about,
        };
        let dto: UserDto = self
            .send_json(Method::PATCH, "/users/me", &payload, Some(token))
            .await?;
        Ok(dto.into())
    }

    async fn update_avatar(&self, token: &str, patch: &AvatarPatch) -> AroundClientResult<User> {
        let payload = AvatarPatchDto {
            avatar: &patch.avatar,
        };
        let dto: UserDto = self
            .send_json(Method::PATCH, "/users/me/avatar", &payload, Some(token))
            .await?;
        Ok(dto.into())
    }

    async fn get_initial_cards(&self, token: &str) -> AroundClientResult<Vec<Card>> {
        let dtos: Vec<CardDto> = self.fetch(Method::GET, "/cards", Some(token)).await?;
        Ok(dtos.into_iter().map(Card::from).collect())
    }

    async fn add_card(&self, token: &str, card: &NewCard) -> AroundClientResult<Card> {
        let payload = NewCardDto {
            name: &card.name,
            link: &card.link,
        };
        let dto: CardDto = self
            .send_json(Method::POST, "/cards", &payload, Some(token))
            .await?;
        Ok(dto.into())
    }

    async fn delete_card(&self, token: &str, card_id: &str) -> AroundClientResult<()> {
        Self::execute(self.request(Method::DELETE, &format!("/cards/{card_id}"), Some(token)))
            .await?;
        Ok(())
    }

    async fn like_card(&self, token: &str, request: &LikeRequest) -> AroundClientResult<Card> {
        let path = format!("/cards/likes/{}", request.card_id);
        let dto: CardDto = self
            .fetch(like_method(request.is_liked), &path, Some(token))
            .await?;
        Ok(dto.into())
    }
}

#[async_trait(?Send)]
impl AuthApi for HttpClient {
    async fn login(&self, credentials: &Credentials) -> AroundClientResult<String> {
        let payload = CredentialsDto {
            email: &credentials.email,
            password: &credentials.password,
        };
        let dto: TokenDto = self
            .send_json(Method::POST, "/signin", &payload, None)
            .await?;
        Ok(dto.into_token())
    }

    async fn register(&self, credentials: &Credentials) -> AroundClientResult<Identity> {
        let payload = CredentialsDto {
            email: &credentials.email,
            password: &credentials.password,
        };
        let dto: EnvelopeDto<IdentityDto> = self
            .send_json(Method::POST, "/signup", &payload, None)
            .await?;
        Ok(dto.into_inner().into())
    }

    async fn get_user_token(&self, token: &str) -> AroundClientResult<Identity> {
        let dto: EnvelopeDto<IdentityDto> =
            self.fetch(Method::GET, "/users/me", Some(token)).await?;
        Ok(dto.into_inner().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = HttpClient::new("http://localhost:3000/").expect("client must build");
        let full = client.endpoint("/cards/likes/42");
        assert_eq!(full, "http://localhost:3000/cards/likes/42");
    }

    #[test]
    fn like_method_depends_on_current_state() {
        assert_eq!(like_method(false), Method::PUT);
        assert_eq!(like_method(true), Method::DELETE);
    }
}

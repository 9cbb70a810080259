use around_client::wire::{CardDto, EnvelopeDto, ErrorResponseDto, IdentityDto, TokenDto, UserDto};
use around_client::{
    AroundClientError, AroundClientResult, AuthApi, AvatarPatch, Card, Credentials, Identity,
    LikeRequest, NewCard, ProfileApi, ProfilePatch, User,
};
use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

const API_BASE_URL: &str = match option_env!("AROUND_API_URL") {
    Some(value) => value,
    None => "http://127.0.0.1:3000",
};

const AUTH_BASE_URL: &str = match option_env!("AROUND_AUTH_URL") {
    Some(value) => value,
    None => API_BASE_URL,
};

fn network(err: gloo_net::Error) -> AroundClientError {
    AroundClientError::Network(err.to_string())
}

async fn parse_error_body(response: Response) -> AroundClientError {
    let status = response.status();
    let message = response
        .json::<ErrorResponseDto>()
        .await
        .ok()
        .and_then(ErrorResponseDto::into_message);
    AroundClientError::from_status(status, message)
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> AroundClientResult<T> {
    if !response.ok() {
        return Err(parse_error_body(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|err| AroundClientError::Decode(err.to_string()))
}

fn bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &format!("Bearer {token}"))
}

/// Реализация портов поверх `fetch`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FetchApi {
    base_url: &'static str,
}

impl FetchApi {
    pub(crate) fn profile() -> Self {
        Self {
            base_url: API_BASE_URL,
        }
    }

    pub(crate) fn auth() -> Self {
        Self {
            base_url: AUTH_BASE_URL,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        builder: RequestBuilder,
        body: &B,
    ) -> AroundClientResult<T> {
        let response = builder
            .json(body)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        parse_json(response).await
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> AroundClientResult<T> {
        let response = builder.send().await.map_err(network)?;
        parse_json(response).await
    }
}

#[async_trait(?Send)]
impl ProfileApi for FetchApi {
    async fn get_user_info(&self, token: &str) -> AroundClientResult<User> {
        let dto: UserDto = Self::send(bearer(Request::get(&self.endpoint("/users/me")), token)).await?;
        Ok(dto.into())
    }

    async fn update_user(&self, token: &str, patch: &ProfilePatch) -> AroundClientResult<User> {
        let builder = bearer(Request::patch(&self.endpoint("/users/me")), token);
        let dto: UserDto = Self::send_json(builder, patch).await?;
        Ok(dto.into())
    }

    async fn update_avatar(&self, token: &str, patch: &AvatarPatch) -> AroundClientResult<User> {
        let builder = bearer(Request::patch(&self.endpoint("/users/me/avatar")), token);
        let dto: UserDto = Self::send_json(builder, patch).await?;
        Ok(dto.into())
    }

    async fn get_initial_cards(&self, token: &str) -> AroundClientResult<Vec<Card>> {
        let dtos: Vec<CardDto> =
            Self::send(bearer(Request::get(&self.endpoint("/cards")), token)).await?;
        Ok(dtos.into_iter().map(Card::from).collect())
    }

    async fn add_card(&self, token: &str, card: &NewCard) -> AroundClientResult<Card> {
        let builder = bearer(Request::post(&self.endpoint("/cards")), token);
        let dto: CardDto = Self::send_json(builder, card).await?;
        Ok(dto.into())
    }

    async fn delete_card(&self, token: &str, card_id: &str) -> AroundClientResult<()> {
        let url = self.endpoint(&format!("/cards/{card_id}"));
        let response = bearer(Request::delete(&url), token)
            .send()
            .await
            .map_err(network)?;
        if !response.ok() {
            return Err(parse_error_body(response).await);
        }
        Ok(())
    }

    async fn like_card(&self, token: &str, request: &LikeRequest) -> AroundClientResult<Card> {
        let url = self.endpoint(&format!("/cards/likes/{}", request.card_id));
        let builder = if request.is_liked {
            Request::delete(&url)
        } else {
            Request::put(&url)
        };
        let dto: CardDto = Self::send(bearer(builder, token)).await?;
        Ok(dto.into())
    }
}

#[async_trait(?Send)]
impl AuthApi for FetchApi {
    async fn login(&self, credentials: &Credentials) -> AroundClientResult<String> {
        let dto: TokenDto =
            Self::send_json(Request::post(&self.endpoint("/signin")), credentials).await?;
        Ok(dto.into_token())
    }

    async fn register(&self, credentials: &Credentials) -> AroundClientResult<Identity> {
        let dto: EnvelopeDto<IdentityDto> =
            Self::send_json(Request::post(&self.endpoint("/signup")), credentials).await?;
        Ok(dto.into_inner().into())
    }

    async fn get_user_token(&self, token: &str) -> AroundClientResult<Identity> {
        let dto: EnvelopeDto<IdentityDto> =
            Self::send(bearer(Request::get(&self.endpoint("/users/me")), token)).await?;
        Ok(dto.into_inner().into())
    }
}

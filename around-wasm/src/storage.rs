use around_client::{AroundClientError, AroundClientResult, TokenStore, parse_token};

const TOKEN_KEY: &str = "jwt";

fn local_storage() -> Result<web_sys::Storage, String> {
    let window = web_sys::window().ok_or_else(|| "window is not available".to_string())?;
    window
        .local_storage()
        .map_err(|_| "failed to access localStorage".to_string())?
        .ok_or_else(|| "localStorage is not available".to_string())
}

fn read_token() -> Result<Option<String>, String> {
    local_storage()?
        .get_item(TOKEN_KEY)
        .map_err(|_| "failed to read token".to_string())
}

/// Сырое значение из `localStorage` в результат хранилища: отсутствие
/// токена это `None`, недоступное хранилище это ошибка.
fn stored_token(raw: Result<Option<String>, String>) -> AroundClientResult<Option<String>> {
    let raw = raw.map_err(AroundClientError::Storage)?;
    Ok(raw.as_deref().and_then(parse_token))
}

pub(crate) fn load_token() -> AroundClientResult<Option<String>> {
    stored_token(read_token())
}

pub(crate) fn save_token(token: &str) -> Result<(), String> {
    local_storage()?
        .set_item(TOKEN_KEY, token)
        .map_err(|_| "failed to save token".to_string())
}

pub(crate) fn clear_token() -> Result<(), String> {
    local_storage()?
        .remove_item(TOKEN_KEY)
        .map_err(|_| "failed to clear token".to_string())
}

/// Токен в `localStorage` браузера под ключом `jwt`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LocalStorageTokenStore;

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> AroundClientResult<Option<String>> {
        load_token()
    }

    fn save(&self, token: &str) -> AroundClientResult<()> {
        save_token(token).map_err(AroundClientError::Storage)
    }

    fn clear(&self) -> AroundClientResult<()> {
        clear_token().map_err(AroundClientError::Storage)
    }
}

#[cfg(test)]
mod tests {
    use super::stored_token;
    use around_client::AroundClientError;

    #[test]
    fn stored_token_reports_unavailable_storage() {
        let result = stored_token(Err("localStorage is not available".to_string()));
        assert!(matches!(
            result,
            Err(AroundClientError::Storage(message)) if message == "localStorage is not available"
        ));
    }

    #[test]
    fn stored_token_treats_missing_or_blank_as_none() {
        assert!(matches!(stored_token(Ok(None)), Ok(None)));
        assert!(matches!(stored_token(Ok(Some("   ".to_string()))), Ok(None)));
    }

    #[test]
    fn stored_token_trims_value() {
        assert_eq!(
            stored_token(Ok(Some(" jwt \n".to_string()))).ok().flatten().as_deref(),
            Some("jwt")
        );
    }
}

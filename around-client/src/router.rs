//! Маршруты приложения и охрана защищённой ленты.
//!
//! Модуль не зависит от DOM: браузерный и консольный клиенты только
//! применяют результат [`resolve`].

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Маршрут приложения.
pub enum Route {
    /// Корень, всегда перенаправляет.
    #[default]
    Root,
    /// Вход.
    Login,
    /// Регистрация.
    Register,
    /// Лента (требует входа).
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Итог разрешения пути.
pub enum Navigation {
    /// Показать маршрут.
    Render(Route),
    /// Перейти на другой маршрут.
    Redirect(Route),
}

impl Navigation {
    /// Маршрут, который окажется на экране.
    pub fn target(self) -> Route {
        match self {
            Self::Render(route) | Self::Redirect(route) => route,
        }
    }
}

impl Route {
    /// Разбирает путь. Регистр и завершающий `/` не важны; любой
    /// неизвестный путь попадает в защищённую ленту.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Self::Root;
        }
        if trimmed.eq_ignore_ascii_case("/login") {
            Self::Login
        } else if trimmed.eq_ignore_ascii_case("/register") {
            Self::Register
        } else {
            Self::Home
        }
    }

    /// Канонический путь маршрута.
    pub fn to_path(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Home => "/home",
        }
    }

    /// Требует ли маршрут подтверждённой сессии.
    pub fn requires_auth(self) -> bool {
        matches!(self, Self::Home)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// Решает, что показать по пути `path` при состоянии входа `is_logged`.
pub fn resolve(path: &str, is_logged: bool) -> Navigation {
    resolve_route(Route::from_path(path), is_logged)
}

/// То же, что [`resolve`], для уже разобранного маршрута.
pub fn resolve_route(route: Route, is_logged: bool) -> Navigation {
    match route {
        Route::Root if is_logged => Navigation::Redirect(Route::Home),
        Route::Root => Navigation::Redirect(Route::Register),
        route if route.requires_auth() && !is_logged => Navigation::Redirect(Route::Login),
        route => Navigation::Render(route),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_redirects_by_session() {
        assert_eq!(resolve("/", true), Navigation::Redirect(Route::Home));
        assert_eq!(resolve("/", false), Navigation::Redirect(Route::Register));
        assert_eq!(resolve("", false), Navigation::Redirect(Route::Register));
    }

    #[test]
    fn feed_is_guarded() {
        assert_eq!(resolve("/home", true), Navigation::Render(Route::Home));
        assert_eq!(resolve("/home", false), Navigation::Redirect(Route::Login));
    }

    #[test]
    fn unknown_paths_fall_into_protected_feed() {
        assert_eq!(resolve("/whatever", false), Navigation::Redirect(Route::Login));
        assert_eq!(resolve("/whatever", true), Navigation::Render(Route::Home));
    }

    #[test]
    fn auth_pages_match_any_case() {
        assert_eq!(Route::from_path("/Login"), Route::Login);
        assert_eq!(Route::from_path("/login/"), Route::Login);
        assert_eq!(Route::from_path("/REGISTER?ref=x"), Route::Register);
        assert_eq!(resolve("/Register", false), Navigation::Render(Route::Register));
    }

    #[test]
    fn paths_are_canonical_lowercase() {
        for route in [Route::Root, Route::Login, Route::Register, Route::Home] {
            assert_eq!(Route::from_path(route.to_path()), route);
            assert_eq!(route.to_string(), route.to_path());
        }
    }
}

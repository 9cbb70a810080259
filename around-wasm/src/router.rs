//! Связка маршрутов с History API браузера.

use around_client::{Navigation, Route, resolve, resolve_route};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Текущий маршрут и переходы между маршрутами.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Router {
    route: RwSignal<Route>,
    is_logged: Signal<bool>,
}

impl Router {
    pub(crate) fn new(is_logged: Signal<bool>) -> Self {
        let router = Self {
            route: RwSignal::new(Route::default()),
            is_logged,
        };
        router.apply(resolve(&current_path(), is_logged.get_untracked()), false);
        router.init_popstate_listener();
        router
    }

    pub(crate) fn route(&self) -> Route {
        self.route.get()
    }

    /// Переход по пути из ссылки.
    pub(crate) fn navigate(&self, path: &str) {
        self.apply(resolve(path, self.is_logged.get_untracked()), true);
    }

    /// Переход на маршрут с проверкой сессии.
    pub(crate) fn go(&self, route: Route) {
        self.apply(resolve_route(route, self.is_logged.get_untracked()), true);
    }

    fn apply(&self, navigation: Navigation, use_push: bool) {
        let target = navigation.target();
        if let Navigation::Redirect(_) = navigation {
            web_sys::console::log_1(&format!("[Router] redirect to {target}").into());
        }
        if use_push {
            push_history_state(target.to_path());
        } else {
            replace_history_state(target.to_path());
        }
        self.route.set(target);
    }

    fn init_popstate_listener(&self) {
        let router = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            router.apply(resolve(&current_path(), router.is_logged.get_untracked()), false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // слушатель живёт всё время работы страницы
        closure.forget();
    }
}

use around_client::{Credentials, Route};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::actions;
use crate::router::Router;
use crate::state::AppState;

fn read_credentials(email: RwSignal<String>, password: RwSignal<String>) -> Credentials {
    Credentials {
        email: email.get().trim().to_string(),
        password: password.get(),
    }
}

#[component]
pub(crate) fn LoginPage(state: AppState, router: Router) -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let on_login = move |ev: SubmitEvent| {
        ev.prevent_default();
        state.clear_error();
        actions::login(state, router, read_credentials(email, password));
    };

    view! {
        <section class="auth">
            <h2>"Вход"</h2>
            <form on:submit=on_login>
                <input
                    placeholder="Email"
                    type="email"
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    placeholder="Пароль"
                    type="password"
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || state.is_busy()>"Войти"</button>
            </form>
            <p>
                "Ещё не зарегистрированы? "
                <a href="#" on:click=move |ev| {
                    ev.prevent_default();
                    router.go(Route::Register);
                }>"Регистрация"</a>
            </p>
        </section>
    }
}

#[component]
pub(crate) fn RegisterPage(state: AppState, router: Router) -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let on_register = move |ev: SubmitEvent| {
        ev.prevent_default();
        state.clear_error();
        actions::register(state, router, read_credentials(email, password));
    };

    view! {
        <section class="auth">
            <h2>"Регистрация"</h2>
            <form on:submit=on_register>
                <input
                    placeholder="Email"
                    type="email"
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    placeholder="Пароль"
                    type="password"
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || state.is_busy()>
                    "Зарегистрироваться"
                </button>
            </form>
            <p>
                "Уже зарегистрированы? "
                <a href="#" on:click=move |ev| {
                    ev.prevent_default();
                    router.go(Route::Login);
                }>"Войти"</a>
            </p>
        </section>
    }
}

use std::time::{SystemTime, UNIX_EPOCH};

use around_client::{App, Credentials, MemoryTokenStore, NewCard, ProfilePatch, Route, TokenStore};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

#[tokio::test]
#[ignore = "requires running profile and auth services"]
async fn http_smoke_flow() {
    let api_url =
        std::env::var("AROUND_API_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
    let auth_url = std::env::var("AROUND_AUTH_URL").unwrap_or_else(|_| api_url.clone());
    let store = MemoryTokenStore::new();
    let mut app =
        App::over_http(&api_url, &auth_url, store.clone()).expect("http client must build");

    let email = format!("smoke_{}@example.com", unique_suffix());
    let credentials = Credentials {
        email: email.clone(),
        password: "password123".to_string(),
    };

    let identity = app
        .register(credentials.clone())
        .await
        .expect("register must succeed");
    assert_eq!(identity.email, email);
    assert_eq!(app.route(), Route::Login);

    app.login(credentials).await.expect("login must succeed");
    assert!(app.session().is_logged());
    assert!(store.load().expect("token must be readable").is_some());
    assert!(app.session().user().is_some());

    let user = app
        .update_profile(ProfilePatch {
            name: "Smoke Tester".to_string(),
            about: "Checks the happy path".to_string(),
        })
        .await
        .expect("update_profile must succeed");
    assert_eq!(user.name, "Smoke Tester");

    let before = app.cards().len();
    let created = app
        .add_card(NewCard {
            name: "Smoke".to_string(),
            link: "https://example.com/smoke.jpg".to_string(),
        })
        .await
        .expect("add_card must succeed");
    assert_eq!(app.cards().first(), Some(&created));
    assert_eq!(app.cards().len(), before + 1);

    let liked = app.toggle_like(&created.id).await.expect("like must succeed");
    assert!(liked.is_liked_by(&user.id));
    let unliked = app.toggle_like(&created.id).await.expect("unlike must succeed");
    assert!(!unliked.is_liked_by(&user.id));

    app.request_delete(&created.id).expect("card must be in the feed");
    app.confirm_delete().await.expect("delete must succeed");
    assert!(app.cards().get(&created.id).is_none());

    app.logout();
    assert!(store.load().expect("token must be readable").is_none());
    assert!(app.failures().is_empty());
}

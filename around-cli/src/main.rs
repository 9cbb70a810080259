use std::process;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use around_client::{
    App, AroundClientError, AvatarPatch, Card, Credentials, FileTokenStore, HttpClient, NewCard,
    ProfilePatch, Session, User,
};
use clap::{Parser, Subcommand};
use tracing::debug;

mod logging;
mod settings;

use logging::init_logging;
use settings::Settings;

type CliApp = App<HttpClient, HttpClient, FileTokenStore>;

#[derive(Debug, Parser)]
#[command(name = "around-cli", version, about = "CLI клиент для сервиса фотокарточек Around")]
struct Cli {
    /// Адрес сервиса профилей и карточек (перекрывает AROUND_API_URL).
    #[arg(long, global = true)]
    api: Option<String>,

    /// Адрес сервиса авторизации (перекрывает AROUND_AUTH_URL).
    #[arg(long, global = true)]
    auth: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Регистрация пользователя.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Вход пользователя, токен сохраняется в файл.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Выход: сохранённый токен удаляется.
    Logout,
    /// Текущий профиль (требует токен).
    Me,
    /// Лента карточек (требует токен).
    Cards,
    /// Поставить или снять лайк (требует токен).
    Like {
        #[arg(long)]
        id: String,
    },
    /// Добавить карточку (требует токен).
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        link: String,
    },
    /// Удалить карточку (требует токен).
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Изменить имя и описание (требует токен).
    Profile {
        #[arg(long)]
        name: String,
        #[arg(long)]
        about: String,
    },
    /// Изменить аватар (требует токен).
    Avatar {
        #[arg(long)]
        url: String,
    },
    /// Показать, куда приведёт путь при текущей сессии.
    Route {
        #[arg(long)]
        path: String,
    },
}

impl Command {
    fn requires_session(&self) -> bool {
        !matches!(
            self,
            Self::Register { .. } | Self::Login { .. } | Self::Logout | Self::Route { .. }
        )
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let settings = Settings::from_env()?.with_overrides(cli.api, cli.auth);
    init_logging(&settings.log_level)?;
    debug!(api = %settings.api_url, auth = %settings.auth_url, "settings loaded");

    let mut app = build_app(&settings)?;

    if cli.command.requires_session() && !app.start().await {
        bail!(
            "требуется авторизация: выполните `around-cli login ...` или `around-cli register ...`"
        );
    }

    execute(&mut app, cli.command).await?;

    for failure in app.take_failures() {
        eprintln!("Предупреждение [{}]: {}", failure.operation, failure.message);
    }
    Ok(())
}

fn build_app(settings: &Settings) -> Result<CliApp> {
    let connect = Duration::from_secs(settings.connect_timeout_secs);
    let request = Duration::from_secs(settings.request_timeout_secs);

    let profile = HttpClient::with_timeouts(settings.api_url.clone(), connect, request)
        .context("не удалось создать HTTP-клиент для API")?;
    let auth = HttpClient::with_timeouts(settings.auth_url.clone(), connect, request)
        .context("не удалось создать HTTP-клиент для авторизации")?;
    let store = FileTokenStore::new(&settings.token_file);

    Ok(App::new(profile, auth, store))
}

async fn execute(app: &mut CliApp, command: Command) -> Result<()> {
    match command {
        Command::Register { email, password } => {
            let identity = app
                .register(Credentials { email, password })
                .await
                .map_err(map_client_error)?;
            println!("Регистрация успешна");
            println!("id: {}", identity.id);
            println!("email: {}", identity.email);
        }
        Command::Login { email, password } => {
            app.login(Credentials { email, password })
                .await
                .map_err(map_client_error)?;
            print_session("Вход выполнен", app.session());
        }
        Command::Logout => {
            app.logout();
            println!("Выход выполнен");
        }
        Command::Me => print_session("Сессия", app.session()),
        Command::Cards => print_cards(app.cards().as_slice(), app.session()),
        Command::Like { id } => {
            let card = app.toggle_like(&id).await.map_err(map_client_error)?;
            print_card("Карточка обновлена", &card, app.session());
        }
        Command::Add { name, link } => {
            app.open_add_place();
            let card = app
                .add_card(NewCard { name, link })
                .await
                .map_err(map_client_error)?;
            print_card("Карточка добавлена", &card, app.session());
        }
        Command::Delete { id } => {
            let owned = app
                .cards()
                .get(&id)
                .zip(app.session().current_user_id())
                .is_some_and(|(card, me)| card.is_owned_by(me));
            if !owned {
                bail!("удалять можно только свои карточки из ленты: id={id}");
            }
            app.request_delete(&id).map_err(map_client_error)?;
            app.confirm_delete().await.map_err(map_client_error)?;
            println!("Карточка удалена: id={id}");
        }
        Command::Profile { name, about } => {
            app.open_edit_profile();
            let user = app
                .update_profile(ProfilePatch { name, about })
                .await
                .map_err(map_client_error)?;
            print_user("Профиль обновлён", &user);
        }
        Command::Avatar { url } => {
            app.open_edit_avatar();
            let user = app
                .update_avatar(AvatarPatch { avatar: url })
                .await
                .map_err(map_client_error)?;
            print_user("Аватар обновлён", &user);
        }
        Command::Route { path } => {
            app.start().await;
            let navigation = app.navigate(&path);
            println!("{path} -> {:?}", navigation);
        }
    }

    Ok(())
}

fn map_client_error(err: AroundClientError) -> anyhow::Error {
    let message = match err {
        AroundClientError::Unauthorized => {
            "требуется авторизация: выполните `around-cli login ...` или `around-cli register ...`"
                .to_string()
        }
        AroundClientError::NotFound => "ресурс не найден".to_string(),
        AroundClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        AroundClientError::Validation { field, message } => {
            format!("некорректное поле {field}: {message}")
        }
        AroundClientError::Http(err) => format!("ошибка HTTP: {err}"),
        AroundClientError::Network(message) => format!("ошибка сети: {message}"),
        AroundClientError::Decode(message) => format!("не удалось разобрать ответ: {message}"),
        AroundClientError::Storage(message) => format!("ошибка хранения токена: {message}"),
    };
    anyhow::anyhow!(message)
}

fn print_session(title: &str, session: &Session) {
    println!("{title}");
    println!("email: {}", session.email());
    match session.user() {
        Some(user) => print_user("user:", user),
        None => println!("user: не загружен"),
    }
}

fn print_user(title: &str, user: &User) {
    println!("{title}");
    println!("  id: {}", user.id);
    println!("  name: {}", user.name);
    println!("  about: {}", user.about);
    println!("  avatar: {}", user.avatar_url);
}

fn like_marker(card: &Card, session: &Session) -> &'static str {
    match session.current_user_id() {
        Some(me) if card.is_liked_by(me) => "♥",
        _ => "♡",
    }
}

fn print_card(title: &str, card: &Card, session: &Session) {
    println!("{title}");
    println!("id: {}", card.id);
    println!("name: {}", card.name);
    println!("link: {}", card.image_url);
    println!("owner_id: {}", card.owner_id);
    println!("likes: {} {}", like_marker(card, session), card.like_count());
    if let Some(created_at) = card.created_at {
        println!("created_at: {created_at}");
    }
}

fn print_cards(cards: &[Card], session: &Session) {
    println!("Карточек: {}", cards.len());

    for card in cards {
        println!(
            "- [{}] {} {} {} (owner_id={})",
            card.id,
            card.name,
            like_marker(card, session),
            card.like_count(),
            card.owner_id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(likes: &[&str]) -> Card {
        Card {
            id: "c1".to_string(),
            name: "Peaks".to_string(),
            image_url: "http://x".to_string(),
            owner_id: "u1".to_string(),
            likes: likes.iter().map(|id| id.to_string()).collect(),
            created_at: None,
        }
    }

    #[test]
    fn session_free_commands_skip_start() {
        assert!(!Command::Logout.requires_session());
        assert!(
            !Command::Route {
                path: "/".to_string()
            }
            .requires_session()
        );
        assert!(Command::Cards.requires_session());
        assert!(
            Command::Like {
                id: "c1".to_string()
            }
            .requires_session()
        );
    }

    #[test]
    fn like_marker_is_empty_for_anonymous_session() {
        let session = Session::anonymous();
        assert_eq!(like_marker(&card(&["u1"]), &session), "♡");
    }

    #[test]
    fn cli_parses_global_urls_after_subcommand() {
        let cli = Cli::try_parse_from([
            "around-cli",
            "add",
            "--name",
            "Peaks",
            "--link",
            "http://x",
            "--api",
            "localhost:3000",
        ])
        .expect("arguments must parse");
        assert_eq!(cli.api.as_deref(), Some("localhost:3000"));
        assert!(matches!(cli.command, Command::Add { .. }));
    }

    #[test]
    fn map_client_error_mentions_login_for_unauthorized() {
        let err = map_client_error(AroundClientError::Unauthorized);
        assert!(err.to_string().contains("around-cli login"));
    }
}

use std::fs;
use std::io;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use marketplace_client::{AdListing, Advertisement, ListAdsParams, MarketClient, MarketClientError, User};

const TOKEN_FILE: &str = ".market_token";
const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";
const SERVER_ENV: &str = "MARKET_SERVER_URL";

#[derive(Debug, Parser)]
#[command(name = "marketplace-cli", version, about = "CLI клиент для marketplace-server")]
struct Cli {
    /// Адрес сервера (по умолчанию переменная MARKET_SERVER_URL или localhost).
    #[arg(long, global = true)]
    server: Option<String>,

    /// Печатать ответы в формате JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Регистрация пользователя.
    Register {
        #[arg(long)]
        login: String,
        #[arg(long)]
        password: String,
    },
    /// Вход пользователя.
    Login {
        #[arg(long)]
        login: String,
        #[arg(long)]
        password: String,
    },
    /// Размещение объявления (требует токен).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        image_url: String,
        #[arg(long)]
        price: f64,
    },
    /// Лента объявлений.
    List {
        /// Номер страницы, начиная с 1. 0 отключает пагинацию.
        #[arg(long)]
        page: Option<u32>,
        /// Размер страницы.
        #[arg(long)]
        limit: Option<u32>,
        /// Поле сортировки: created_at или price.
        #[arg(long)]
        sort_by: Option<String>,
        /// Направление сортировки: asc или desc.
        #[arg(long)]
        sort_order: Option<String>,
        /// Минимальная цена.
        #[arg(long)]
        min_price: Option<f64>,
        /// Максимальная цена.
        #[arg(long)]
        max_price: Option<f64>,
    },
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

    let server = resolve_server(cli.server);
    let mut client = MarketClient::new(server);

    if let Some(token) = load_token().context("не удалось прочитать .market_token")? {
        client.set_token(token);
    }

    match cli.command {
        Command::Register { login, password } => {
            let user = client
                .register(&login, &password)
                .await
                .map_err(map_client_error)?;
            if cli.json {
                print_json(&user)?;
            } else {
                print_user("Регистрация успешна", &user);
            }
        }
        Command::Login { login, password } => {
            let token = client
                .login(&login, &password)
                .await
                .map_err(map_client_error)?;
            persist_token(&client).context("не удалось сохранить токен")?;
            if cli.json {
                println!("{}", serde_json::json!({ "token": token }));
            } else {
                println!("Вход выполнен");
                println!("token: {token}");
            }
        }
        Command::Create {
            title,
            description,
            image_url,
            price,
        } => {
            let ad = client
                .create_ad(&title, &description, &image_url, price)
                .await
                .map_err(map_client_error)?;
            if cli.json {
                print_json(&ad)?;
            } else {
                print_ad("Объявление размещено", &ad);
            }
        }
        Command::List {
            page,
            limit,
            sort_by,
            sort_order,
            min_price,
            max_price,
        } => {
            let params = ListAdsParams {
                page,
                limit,
                sort_by,
                sort_order,
                min_price,
                max_price,
            };
            let listings = client.list_ads(params).await.map_err(map_client_error)?;
            if cli.json {
                print_json(&listings)?;
            } else {
                print_listings(&listings);
            }
        }
    }

    Ok(())
}

fn resolve_server(server: Option<String>) -> String {
    let raw = server
        .or_else(|| std::env::var(SERVER_ENV).ok())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());
    normalize_server(raw)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_token_content(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn load_token() -> io::Result<Option<String>> {
    if !Path::new(TOKEN_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(TOKEN_FILE)?;
    Ok(parse_token_content(&raw))
}

fn persist_token(client: &MarketClient) -> io::Result<()> {
    if let Some(token) = client.get_token() {
        fs::write(TOKEN_FILE, token)?;
    }
    Ok(())
}

fn map_client_error(err: MarketClientError) -> anyhow::Error {
    let message = match err {
        MarketClientError::Unauthorized => {
            "требуется авторизация: выполните `marketplace-cli login ...`".to_string()
        }
        MarketClientError::NotFound => "ресурс не найден".to_string(),
        MarketClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        MarketClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_user(title: &str, user: &User) {
    println!("{title}");
    println!("id: {}", user.id);
    println!("login: {}", user.login);
}

fn print_ad(title: &str, ad: &Advertisement) {
    println!("{title}");
    println!("id: {}", ad.id);
    println!("title: {}", ad.title);
    println!("description: {}", ad.description);
    println!("image_url: {}", ad.image_url);
    println!("price: {}", ad.price);
    println!("user_id: {}", ad.user_id);
    println!("created_at: {}", ad.created_at);
}

fn print_listings(listings: &[AdListing]) {
    println!("Объявлений: {}", listings.len());

    for ad in listings {
        let owner = if ad.is_owner { " (моё)" } else { "" };
        println!(
            "- [{}] {} (price={}, author={}){}",
            ad.id, ad.title, ad.price, ad.author_login, owner
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8080".to_string());
        assert_eq!(s, "https://example.com:8080");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:8080".to_string());
        assert_eq!(s, "http://127.0.0.1:8080");
    }

    #[test]
    fn resolve_server_uses_custom_value() {
        let server = resolve_server(Some("localhost:9999".to_string()));
        assert_eq!(server, "http://localhost:9999");
    }

    #[test]
    fn parse_token_content_trims_whitespace() {
        let token = parse_token_content("  abc.def.ghi  ");
        assert_eq!(token.as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn parse_token_content_rejects_blank() {
        let token = parse_token_content("   ");
        assert!(token.is_none());
    }
}

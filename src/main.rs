use clap::Parser;
use std::io::Write;
use tubelist::adapters::titles;
use tubelist::config::Command;
use tubelist::core::auth::OAuthSettings;
use tubelist::core::preview::TitlePreviewer;
use tubelist::domain::ports::{ConfigProvider, CredentialStore};
use tubelist::utils::error::ErrorSeverity;
use tubelist::utils::{logger, validation::Validate};
use tubelist::{
    AppError, AuthSession, CliConfig, FileCredentialStore, PlaylistAssembler, SpotifyCatalog,
    TomlConfig,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, cli.log_format);

    tracing::info!("Starting tubelist");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ tubelist failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        // 輸出用戶友好的錯誤信息
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: &CliConfig) -> tubelist::Result<()> {
    let config = cli.resolve()?;

    // 驗證配置
    config.validate()?;

    let store = FileCredentialStore::from_config_path(config.token_path());

    match &cli.command {
        Command::Login { redirect_url } => login(&config, &store, redirect_url.as_deref()).await,
        Command::Logout => {
            store.clear().await?;
            println!("✅ Logged out, removed {}", store.path().display());
            Ok(())
        }
        Command::Build {
            titles: source,
            name,
            json_input,
            json,
        } => {
            let titles = titles::read_titles(source, *json_input)?;
            build(&config, &store, &titles, name.as_deref(), *json).await
        }
        Command::Preview {
            titles: source,
            json_input,
        } => {
            preview(&titles::read_titles(source, *json_input)?);
            Ok(())
        }
    }
}

async fn login(
    config: &TomlConfig,
    store: &FileCredentialStore,
    redirect_url: Option<&str>,
) -> tubelist::Result<()> {
    let client_id = config.validate_for_login()?;
    let authorize_url = AuthSession::authorize_url(&OAuthSettings {
        accounts_base_url: config.accounts_base_url().to_string(),
        client_id: client_id.to_string(),
        redirect_uri: config.redirect_uri().to_string(),
    })?;

    let redirect = match redirect_url {
        Some(url) => url.to_string(),
        None => {
            println!("🔑 Open this URL in your browser and approve access:\n\n  {}\n", authorize_url);
            print!("Paste the URL you were redirected to: ");
            std::io::stdout().flush()?;
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            line
        }
    };

    let session = AuthSession::complete_login(&redirect, chrono::Utc::now().timestamp_millis())?;
    let credential = session.credential().ok_or_else(|| AppError::Login {
        message: "No access token received".to_string(),
    })?;
    store.save(credential).await?;

    let valid_until = chrono::DateTime::from_timestamp_millis(credential.expires_at_epoch_ms)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| credential.expires_at_epoch_ms.to_string());
    tracing::info!("Stored access token at {}", store.path().display());
    println!("✅ Logged in, token valid until {}", valid_until);
    Ok(())
}

async fn build(
    config: &TomlConfig,
    store: &FileCredentialStore,
    titles: &[String],
    name: Option<&str>,
    json: bool,
) -> tubelist::Result<()> {
    if titles.is_empty() {
        return Err(AppError::ConfigError {
            message: "No songs found in the title list".to_string(),
        });
    }

    let auth = AuthSession::new(store.load().await?);
    let catalog = SpotifyCatalog::from_config(config)?;
    let assembler = PlaylistAssembler::new(catalog).with_description(config.playlist_description());
    let name = name.unwrap_or(config.default_playlist_name());

    println!(
        "🎵 Found {} songs. Creating Spotify playlist '{}'...",
        titles.len(),
        name
    );
    let report = assembler.assemble(titles, name, &auth).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.is_complete() {
        println!("✅ Playlist created successfully!");
    } else {
        println!("⚠️ Playlist created, some songs were not found");
    }
    println!(
        "Added {} of {} songs.",
        report.matched_count, report.requested_count
    );
    println!("🔗 Open in Spotify: {}", report.playlist_url);
    if !report.unmatched_titles.is_empty() {
        println!("Not found:");
        for title in &report.unmatched_titles {
            println!("  ✗ {}", title);
        }
    }
    Ok(())
}

fn preview(titles: &[String]) {
    tracing::info!("🔍 DRY RUN MODE - no requests will be sent");

    let previews = TitlePreviewer::default().preview(titles);
    for preview in &previews {
        println!("{}", preview.raw);
        println!("  normalized: {}", preview.search_text);
        println!(
            "  artist: {:?}  title: {:?}",
            preview.query.artist_or_empty(),
            preview.query.title
        );
        println!("  queries: {}", preview.planned_queries().join("  |  "));
    }
    println!("{} unique titles", previews.len());
}

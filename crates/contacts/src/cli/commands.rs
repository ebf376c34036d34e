//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Uses `std::process::exit` (through `main`)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Logging, configuration, the HTTP-backed API and the saved view state
//! 3. **Dispatch**: Route commands to handlers
//! 4. **Output Formatting**: Delegate to `render`
//! 5. **State Persistence**: Save the view state after every command, failed or not

use super::render;
use super::setup::{parse_cli, Cli, Commands, ExportFormatArg, ThemeArg};
use anyhow::Result;
use contactsapp::api::{parse_contact_id, ContactsApi};
use contactsapp::commands::CmdMessage;
use contactsapp::config::{ContactsConfig, ContactsPaths};
use contactsapp::error::ContactsError;
use contactsapp::model::{ContactFormData, ContactPatch};
use contactsapp::state::ViewState;
use contactsapp::store::http::HttpStore;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: ContactsApi<HttpStore>,
    paths: ContactsPaths,
    state: ViewState,
}

pub async fn run() -> Result<()> {
    let cli = parse_cli();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;
    let command = cli.command.unwrap_or(Commands::List {
        search: None,
        favourites: false,
        all: false,
        page: None,
    });

    let outcome = dispatch(&mut ctx, command).await;
    let saved = ctx.state.save(&ctx.paths.state_file());
    outcome?;
    saved?;
    Ok(())
}

/// `RUST_LOG` wins; otherwise warnings only, or debug for our crates with
/// `--verbose`. Logs go to stderr.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,contactsapp=debug,contacts=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let paths = ContactsPaths::resolve()?;
    let mut config = ContactsConfig::load(&paths.config_dir)?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url.clone());
    }
    debug!("using backend {}", config.base_url());

    let store = HttpStore::from_config(&config)?;
    let state = ViewState::load(&paths.state_file());

    Ok(AppContext {
        api: ContactsApi::new(store, config),
        paths,
        state,
    })
}

async fn dispatch(ctx: &mut AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::List {
            search,
            favourites,
            all,
            page,
        } => handle_list(ctx, search, favourites, all, page).await,
        Commands::Next => handle_next(ctx).await,
        Commands::Prev => handle_prev(ctx).await,
        Commands::View { id } => handle_view(ctx, &id).await,
        Commands::Add {
            name,
            email,
            phone,
            address,
            favourite,
        } => {
            let form = ContactFormData::new(name, email, phone, address).with_favourite(favourite);
            handle_add(ctx, form).await
        }
        Commands::Edit {
            id,
            name,
            email,
            phone,
            address,
            favourite,
        } => {
            let patch = ContactPatch {
                name,
                email,
                phone,
                address,
                favourite,
            };
            handle_edit(ctx, &id, patch).await
        }
        Commands::Delete { id } => handle_delete(ctx, &id).await,
        Commands::Fav { ids } => handle_favourite(ctx, &ids, true).await,
        Commands::Unfav { ids } => handle_favourite(ctx, &ids, false).await,
        Commands::Export { format, dir } => handle_export(ctx, format, dir).await,
        Commands::Reset => handle_reset(ctx),
        Commands::Theme { theme } => handle_theme(ctx, theme),
        Commands::Config => handle_config(ctx),
    }
}

async fn handle_list(
    ctx: &mut AppContext,
    search: Option<String>,
    favourites: bool,
    all: bool,
    page: Option<usize>,
) -> Result<()> {
    if let Some(search) = search {
        ctx.state.set_search(search);
    }
    if favourites {
        ctx.state.set_favourites_only(true);
    } else if all {
        ctx.state.set_favourites_only(false);
    }
    if let Some(page) = page {
        ctx.state.set_page(page);
    }
    show_current_page(ctx).await
}

async fn handle_next(ctx: &mut AppContext) -> Result<()> {
    let query = ctx
        .api
        .query(ctx.state.page, &ctx.state.search, ctx.state.favourites_only);
    let current = ctx.api.fetch_page(&query).await.inspect_err(hint_retry)?;

    let before = ctx.state.page;
    ctx.state.next_page(current.total_pages);
    if ctx.state.page == before {
        render::print_messages(&[CmdMessage::info("Already on the last page.")]);
        return Ok(());
    }
    show_current_page(ctx).await
}

async fn handle_prev(ctx: &mut AppContext) -> Result<()> {
    if ctx.state.page <= 1 {
        render::print_messages(&[CmdMessage::info("Already on the first page.")]);
        return Ok(());
    }
    ctx.state.prev_page();
    show_current_page(ctx).await
}

async fn show_current_page(ctx: &AppContext) -> Result<()> {
    let state = &ctx.state;
    let result = ctx
        .api
        .list_contacts(state.page, &state.search, state.favourites_only)
        .await
        .inspect_err(hint_retry)?;

    let past_the_end = result
        .page
        .as_ref()
        .is_some_and(|page| page.total > 0 && page.data.is_empty());
    if !past_the_end {
        render::print_contacts(
            &result.listed_contacts,
            &state.search,
            state.favourites_only,
            state.dark_mode,
        );
    }
    if let Some(page) = &result.page {
        render::print_pagination(page);
    }
    render::print_messages(&result.messages);
    Ok(())
}

fn hint_retry(err: &ContactsError) {
    if matches!(err, ContactsError::Network(_) | ContactsError::Backend { .. }) {
        render::print_retry_hint();
    }
}

async fn handle_view(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.get_contact(id).await?;
    for contact in &result.listed_contacts {
        render::print_contact_detail(contact);
        ctx.state.select_contact(contact.id.clone());
    }
    Ok(())
}

async fn handle_add(ctx: &mut AppContext, form: ContactFormData) -> Result<()> {
    ctx.state.open_create_form();
    match ctx.api.create_contact(form).await {
        Ok(result) => {
            ctx.state.after_create();
            render::print_messages(&result.messages);
            Ok(())
        }
        Err(e) => {
            ctx.state.close_form();
            Err(e.into())
        }
    }
}

async fn handle_edit(ctx: &mut AppContext, id: &str, patch: ContactPatch) -> Result<()> {
    ctx.state.open_edit_form(parse_contact_id(id)?);
    let outcome = ctx.api.update_contact(id, &patch).await;
    ctx.state.close_form();
    render::print_messages(&outcome?.messages);
    Ok(())
}

async fn handle_delete(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.delete_contact(id).await?;
    render::print_messages(&result.messages);
    if let Some(contact) = result.affected_contacts.into_iter().next() {
        ctx.state.record_deleted(contact);
    }
    Ok(())
}

async fn handle_favourite(ctx: &mut AppContext, ids: &[String], favourite: bool) -> Result<()> {
    let result = if favourite {
        ctx.api.favourite_contacts(ids).await?
    } else {
        ctx.api.unfavourite_contacts(ids).await?
    };
    render::print_messages(&result.messages);
    Ok(())
}

async fn handle_export(
    ctx: &mut AppContext,
    format: ExportFormatArg,
    dir: Option<PathBuf>,
) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let result = ctx
        .api
        .export_contacts(
            &ctx.state.search,
            ctx.state.favourites_only,
            format.into(),
            &dir,
        )
        .await?;
    render::print_messages(&result.messages);
    Ok(())
}

fn handle_reset(ctx: &mut AppContext) -> Result<()> {
    ctx.state.reset_filters();
    render::print_messages(&[CmdMessage::success("Search and filters cleared.")]);
    Ok(())
}

fn handle_theme(ctx: &mut AppContext, theme: ThemeArg) -> Result<()> {
    ctx.state.set_dark_mode(theme == ThemeArg::Dark);
    let name = match theme {
        ThemeArg::Dark => "dark",
        ThemeArg::Light => "light",
    };
    render::print_messages(&[CmdMessage::success(format!("Theme set to {}.", name))]);
    Ok(())
}

fn handle_config(ctx: &AppContext) -> Result<()> {
    let value = serde_json::json!({
        "config": ctx.api.config(),
        "paths": {
            "config_dir": ctx.paths.config_dir.display().to_string(),
            "data_dir": ctx.paths.data_dir.display().to_string(),
            "state_file": ctx.paths.state_file().display().to_string(),
        },
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

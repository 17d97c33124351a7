//! Subcommand handlers

use crate::cli::{Command, ResourceKind};
use anyhow::{Context, anyhow, bail};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{BranchProductFilters, Entity, UpdateStockDto};
use shared::{EntityState, PaginatedResponse};
use sicme_client::error::UNKNOWN_ERROR_MESSAGE;
use sicme_client::list::{CrudOperations, EntityScreen, ScreenForm, ServerPagination};
use sicme_client::{AdminContext, CrudOperation, Repository};
use std::sync::Arc;

/// Run `$handler(repository, args...)` for the repository behind `$resource`
macro_rules! with_repository {
    ($ctx:expr, $resource:expr, $handler:ident($($arg:expr),* $(,)?)) => {
        match $resource {
            ResourceKind::Users => $handler($ctx.users.clone(), $($arg),*).await,
            ResourceKind::Categories => $handler($ctx.categories.clone(), $($arg),*).await,
            ResourceKind::Products => $handler($ctx.products.clone(), $($arg),*).await,
            ResourceKind::Brands => $handler($ctx.brands.clone(), $($arg),*).await,
            ResourceKind::Colors => $handler($ctx.colors.clone(), $($arg),*).await,
            ResourceKind::Suppliers => $handler($ctx.suppliers.clone(), $($arg),*).await,
            ResourceKind::Branches => $handler($ctx.branches.clone(), $($arg),*).await,
            read_only @ (ResourceKind::Countries | ResourceKind::Routes) => {
                Err(anyhow!("{read_only} is a read-only catalog"))
            }
        }
    };
}

pub async fn run(ctx: &AdminContext, command: Command, json: bool) -> anyhow::Result<()> {
    let page_size = ctx.config().list_page_size;

    match command {
        Command::Login { email, password } => {
            let response = ctx.auth.login(&email, &password).await?;
            match response.user {
                Some(user) => println!("Sesión iniciada: {} <{}> ({})", user.name, user.email, user.role),
                None => println!("Sesión iniciada"),
            }
            Ok(())
        }
        Command::Logout => {
            if let Err(e) = ctx.auth.logout().await {
                tracing::warn!(error = %e, "Logout request failed; local session cleared anyway");
            }
            println!("Sesión cerrada");
            Ok(())
        }
        Command::Me => {
            let user = ctx.auth.me().await?;
            print_json(&user)
        }
        Command::List {
            resource: ResourceKind::Countries,
            search,
            page,
        } => list_catalog(ctx.countries.list().await?, search, page, page_size, json),
        Command::List {
            resource: ResourceKind::Routes,
            search,
            page,
        } => list_catalog(ctx.routes.list().await?, search, page, page_size, json),
        Command::List {
            resource,
            search,
            page,
        } => with_repository!(ctx, resource, list_records(page_size, search, page, json)),
        Command::Show {
            resource: ResourceKind::Countries,
            id,
        } => print_json(&ctx.countries.get_by_id(id).await?),
        Command::Show {
            resource: ResourceKind::Routes,
            id,
        } => print_json(&ctx.routes.get_by_id(id).await?),
        Command::Show { resource, id } => with_repository!(ctx, resource, show_record(id)),
        Command::Create { resource, data } => {
            with_repository!(ctx, resource, create_record(page_size, &data))
        }
        Command::Update { resource, id, data } => {
            with_repository!(ctx, resource, update_record(page_size, id, &data))
        }
        Command::SetState { resource, id, state } => {
            with_repository!(ctx, resource, set_state(page_size, id, state.into()))
        }
        Command::Delete { resource, id } => {
            with_repository!(ctx, resource, delete_record(page_size, id))
        }
        Command::Stock {
            branch_id,
            search,
            only_available,
            category_id,
            brand_id,
            page,
        } => {
            let filters = BranchProductFilters {
                search,
                only_available: only_available.then_some(true),
                category_id,
                brand_id,
            };
            browse_stock(ctx, branch_id, filters, page, json).await
        }
        Command::SetStock {
            product_id,
            branch_id,
            quantity,
        } => {
            let row = ctx
                .product_branches
                .update_stock(product_id, branch_id, &UpdateStockDto::from_qty(quantity))
                .await?;
            println!(
                "Producto {} en sucursal {}: {} unidades",
                row.product_id, row.branch_id, row.stock_qty
            );
            Ok(())
        }
    }
}

fn screen_error<R>(screen: &EntityScreen<R>) -> anyhow::Error
where
    R: Repository,
    R::Entity: Entity + Clone,
{
    anyhow!(screen.error_message().unwrap_or(UNKNOWN_ERROR_MESSAGE).to_string())
}

async fn loaded_screen<R>(repository: Arc<R>, page_size: usize) -> anyhow::Result<EntityScreen<R>>
where
    R: Repository,
    R::Entity: Entity + Clone,
{
    let mut screen = EntityScreen::new(repository, page_size);
    if !screen.load().await {
        return Err(screen_error(&screen));
    }
    Ok(screen)
}

async fn list_records<R>(
    repository: Arc<R>,
    page_size: usize,
    search: Option<String>,
    page: usize,
    json: bool,
) -> anyhow::Result<()>
where
    R: Repository,
    R::Entity: Entity + Clone + Serialize,
{
    let mut screen = loaded_screen(repository, page_size).await?;
    if let Some(search) = search {
        screen.set_search(search);
    }
    screen.pagination_mut().set_page(page);

    if json {
        return print_json(&screen.visible());
    }
    for row in screen.visible() {
        let actions = screen.row_actions(row);
        let delete = if actions.delete_disabled { "" } else { "  [eliminar]" };
        println!("{:>6}  {:<40} {}{}", row.id(), row.label(), row.state(), delete);
    }
    let pagination = screen.pagination();
    println!(
        "-- página {}/{} ({} registros)",
        pagination.page(),
        pagination.total_pages(),
        pagination.total_items()
    );
    Ok(())
}

fn list_catalog<E: Entity + Clone + Serialize>(
    items: Vec<E>,
    search: Option<String>,
    page: usize,
    page_size: usize,
    json: bool,
) -> anyhow::Result<()> {
    let needle = search.unwrap_or_default().trim().to_lowercase();
    let filtered = items
        .into_iter()
        .filter(|item| needle.is_empty() || item.matches_search(&needle))
        .collect();
    let mut pagination = sicme_client::list::ListPagination::with_items(filtered, page_size);
    pagination.set_page(page);

    if json {
        return print_json(&pagination.paginated_items());
    }
    for row in pagination.paginated_items() {
        println!("{:>6}  {}", row.id(), row.label());
    }
    println!("-- página {}/{}", pagination.page(), pagination.total_pages());
    Ok(())
}

async fn show_record<R>(repository: Arc<R>, id: i64) -> anyhow::Result<()>
where
    R: Repository,
    R::Entity: Serialize,
{
    let mut crud = CrudOperations::new(repository);
    match crud.get_by_id(id).await {
        Some(entity) => print_json(&entity),
        None => Err(anyhow!(crud.error_message().unwrap_or(UNKNOWN_ERROR_MESSAGE).to_string())),
    }
}

async fn create_record<R>(repository: Arc<R>, page_size: usize, data: &str) -> anyhow::Result<()>
where
    R: Repository,
    R::Entity: Entity + Clone + Serialize,
    R::Create: DeserializeOwned,
{
    let payload: R::Create = serde_json::from_str(data).context("Invalid --data payload")?;
    let mut screen = EntityScreen::new(repository, page_size);
    screen.open_create();
    if !screen.submit(ScreenForm::Create(payload)).await {
        return Err(screen_error(&screen));
    }
    let created = screen
        .items()
        .first()
        .ok_or_else(|| anyhow!(UNKNOWN_ERROR_MESSAGE))?;
    tracing::info!(id = created.id(), "Record created");
    print_json(created)
}

async fn update_record<R>(repository: Arc<R>, page_size: usize, id: i64, data: &str) -> anyhow::Result<()>
where
    R: Repository,
    R::Entity: Entity + Clone + Serialize,
    R::Update: DeserializeOwned,
{
    let payload: R::Update = serde_json::from_str(data).context("Invalid --data payload")?;
    let mut screen = loaded_screen(repository, page_size).await?;
    if !screen.open_edit(id) {
        bail!("Record {id} not found");
    }
    if !screen.submit(ScreenForm::Update(payload)).await {
        return Err(screen_error(&screen));
    }
    match screen.items().iter().find(|item| item.id() == id) {
        Some(updated) => print_json(updated),
        None => Ok(()),
    }
}

async fn set_state<R>(repository: Arc<R>, page_size: usize, id: i64, target: EntityState) -> anyhow::Result<()>
where
    R: Repository,
    R::Entity: Entity + Clone,
{
    if !repository.supports(CrudOperation::UpdateState) {
        bail!("This resource cannot be activated or deactivated");
    }
    let mut screen = loaded_screen(repository, page_size).await?;
    let current = screen
        .items()
        .iter()
        .find(|item| item.id() == id)
        .map(|item| item.state())
        .ok_or_else(|| anyhow!("Record {id} not found"))?;
    if current == target {
        println!("Sin cambios: el registro {id} ya está {target}");
        return Ok(());
    }

    screen.request_toggle_state(id);
    if !screen.confirm().await {
        return Err(screen_error(&screen));
    }
    println!("Registro {id}: {target}");
    Ok(())
}

async fn delete_record<R>(repository: Arc<R>, page_size: usize, id: i64) -> anyhow::Result<()>
where
    R: Repository,
    R::Entity: Entity + Clone,
{
    if !repository.supports(CrudOperation::Delete) {
        bail!("This resource cannot be deleted; deactivate it instead");
    }
    let mut screen = loaded_screen(repository, page_size).await?;
    if !screen.request_delete(id) {
        bail!("Record {id} not found");
    }
    if !screen.confirm().await {
        return Err(screen_error(&screen));
    }
    println!("Registro {id} eliminado");
    Ok(())
}

async fn browse_stock(
    ctx: &AdminContext,
    branch_id: i64,
    filters: BranchProductFilters,
    page: u32,
    json: bool,
) -> anyhow::Result<()> {
    let pagination = ServerPagination::new(
        ctx.product_branches.fetcher(branch_id),
        ctx.config().server_page_size,
        filters,
    );

    let on_interrupt = pagination.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.shutdown();
        }
    });

    pagination.load().await;
    if page > 1 {
        pagination.go_to_page(page).await;
    }
    interrupt.abort();

    let state = pagination.snapshot();
    if let Some(error) = state.error {
        bail!(error);
    }
    if pagination.is_shut_down() {
        bail!("Interrupted");
    }

    if json {
        let response = PaginatedResponse::new(state.data, state.total, state.current_page, state.limit);
        return print_json(&response);
    }
    for row in &state.data {
        let name = row.product.as_ref().map(|p| p.name.as_str()).unwrap_or("-");
        let flag = if row.has_stock { "con stock" } else { "sin stock" };
        println!("{:>6}  {:<40} {:>6}  {}", row.product_id, name, row.stock_qty, flag);
    }
    println!(
        "-- página {}/{} ({} productos)",
        state.current_page, state.total_pages, state.total
    );
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

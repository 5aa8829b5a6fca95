use grocery_client::{CatalogClient, DetailView};

use crate::render::render_details;

/// Fetches the catalog once and prints the product whose id matches.
pub(crate) async fn run(client: CatalogClient, id: Option<String>) -> anyhow::Result<()> {
    print!("{}", show(client, id).await);
    Ok(())
}

pub(crate) async fn show(client: CatalogClient, id: Option<String>) -> String {
    let mut view = DetailView::mount(client, id);
    let state = view.settled().await;
    render_details(&state)
}

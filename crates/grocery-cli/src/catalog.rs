use grocery_client::{CatalogClient, CatalogView};
use grocery_core::ViewState;

use crate::interactive;
use crate::render::render_catalog;

/// Mounts the catalog view, waits for the fetch to settle and prints the
/// grid. With `interactive`, hands the mounted view to the command loop.
pub(crate) async fn run(
    client: CatalogClient,
    state: ViewState,
    interactive: bool,
) -> anyhow::Result<()> {
    let mut view = CatalogView::mount_with_state(client.clone(), state);
    print!("{}", render_catalog(&view.snapshot()));
    view.settled().await;

    if interactive {
        return interactive::run(client, view).await;
    }

    print!("{}", render_catalog(&view.snapshot()));
    view.unmount();
    Ok(())
}

//! Fetch an asset image into the local cache

use crate::{core::AssetKind, Result};

use super::common::CommandContext;

/// Handle the asset command
pub async fn handle_asset(ctx: &CommandContext, kind: AssetKind, name: String, url: Option<String>) -> Result<()> {
    let bytes = ctx
        .assets
        .get_or_fetch(&ctx.client, kind, &name, url.as_deref())
        .await?;
    println!(
        "✓ {} bytes cached at {}",
        bytes.len(),
        ctx.assets.asset_path(kind, &name).display()
    );
    Ok(())
}

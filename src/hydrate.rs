//! Hydrator - fill in the fields a summary payload left pending
//!
//! Hydration fetches a record's detail payload and merges it over the record
//! (last write wins). Asset kinds also download their content. With
//! `recurse`, nested records are hydrated too; a nested record whose kind is
//! already on the current path is hydrated without descending further, so
//! depth is bounded by the kind graph rather than by the data.
//!
//! All work happens on a copy. The caller's record is only replaced once
//! every request along the way has succeeded.

use crate::archive::ArchiveClient;
use crate::error::{ArchiveError, Result};
use crate::model::{Asset, Kind, Node, Record, Resource};
use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, info};

pub struct Hydrator<'c> {
    client: &'c ArchiveClient,
}

impl<'c> Hydrator<'c> {
    pub fn new(client: &'c ArchiveClient) -> Self {
        Self { client }
    }

    /// Hydrate `record` in place. On error the record is left as it was.
    pub async fn hydrate<R: Resource>(&self, record: &mut R, recurse: bool) -> Result<()> {
        let mut working = record.clone();
        self.hydrate_node(&mut working, recurse, &mut Vec::new()).await?;
        *record = working;
        Ok(())
    }

    /// Hydrate a record whose kind is only known at runtime.
    pub async fn hydrate_record(&self, record: &mut Record, recurse: bool) -> Result<()> {
        let mut working = record.clone();
        self.hydrate_node(working.as_node_mut(), recurse, &mut Vec::new()).await?;
        *record = working;
        Ok(())
    }

    fn hydrate_node<'a>(
        &'a self,
        node: &'a mut dyn Node,
        recurse: bool,
        path: &'a mut Vec<Kind>,
    ) -> BoxFuture<'a, Result<()>> {
        async move {
            let kind = node.kind();
            if node.key().is_empty() {
                return Err(ArchiveError::UnidentifiedRecord { kind });
            }

            if kind.def().can_hydrate() {
                let key = node.key().to_string();
                info!("Hydrating {} {}", kind, key);
                let detail = self.client.detail(kind, &key).await?;
                node.merge_detail(&detail)?;

                if let Some(asset) = node.asset() {
                    self.fetch_content(kind, asset).await?;
                }
            }

            if recurse {
                path.push(kind);
                for child in node.children() {
                    let child_kind = child.node.kind();
                    if !child_kind.def().can_hydrate() {
                        continue;
                    }
                    let descend = !path.contains(&child_kind);
                    debug!("Hydrating {}.{} ({})", kind, child.field, child_kind);
                    self.hydrate_node(child.node, descend, path).await?;
                }
                path.pop();
            }

            Ok(())
        }
        .boxed()
    }

    async fn fetch_content(&self, kind: Kind, asset: &mut dyn Asset) -> Result<()> {
        let format = asset.format().ok_or_else(|| {
            ArchiveError::schema(
                kind,
                format!(
                    "unknown content format (extension {:?}, content type {:?})",
                    asset.extension(),
                    asset.content_type()
                ),
            )
        })?;

        let url = match (asset.content_path(), asset.asset_id()) {
            (Some(path), _) => self.client.content_url(path),
            (None, Some(asset_id)) => self.client.asset_url(asset_id),
            (None, None) => return Err(ArchiveError::schema(kind, "asset has no content location")),
        };

        let response = self.client.content(&url).await?;
        if response.body.is_empty() {
            return Err(ArchiveError::schema(kind, format!("empty content at {}", response.url)));
        }

        debug!("Fetched {} bytes of {:?} content for {}", response.body.len(), format, kind);
        asset.store_content(format, response.body);
        Ok(())
    }
}

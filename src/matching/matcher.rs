//! ResourceMatcher - a lazy, restartable search result
//!
//! Construction runs the first request, which fixes `count`. [`all`] then
//! produces a fresh stream each time it is called, re-fetching from page 1,
//! so no cursor state is shared between iterations.
//!
//! [`all`]: ResourceMatcher::all

use super::filters::{normalize, Filters, Query};
use crate::archive::ArchiveClient;
use crate::error::{ArchiveError, Result};
use crate::hydrate::Hydrator;
use crate::model::{resolve, Kind, PayloadShape, Searchable};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde_json::Value;
use tracing::{debug, info};

/// Search results for one kind.
pub struct ResourceMatcher<'c, R: Searchable> {
    client: &'c ArchiveClient,
    query: Query,
    count: usize,
    first_page: Vec<R>,
}

/// Cursor threaded through one iteration of `all()`.
struct PageCursor {
    params: Vec<(String, String)>,
    page: u32,
    fetched: usize,
    done: bool,
}

impl<'c, R: Searchable> ResourceMatcher<'c, R> {
    /// Validate filters and fetch the first page (or the single record for
    /// an `id` lookup).
    pub async fn new(client: &'c ArchiveClient, filters: Filters) -> Result<Self> {
        let kind = R::KIND;
        let query = normalize(kind, &filters)?;

        let (count, first_page) = match &query {
            Query::ById(id) => (1, vec![fetch_by_id::<R>(client, id).await?]),
            Query::Search(params) => {
                let page = client.search_page(kind, params, 1).await?;
                let count = page_count(kind, page.total, page.items.len());
                (count, resolve_page::<R>(&page.items)?)
            },
        };

        info!("{} search {}: {} matches", kind, query, count);
        Ok(Self {
            client,
            query,
            count,
            first_page,
        })
    }

    pub fn kind(&self) -> Kind {
        R::KIND
    }

    /// Total matches reported by the first response. Never recomputed.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// First matching record, served from the page fetched at construction.
    pub fn first(&self) -> Result<R> {
        self.first_page
            .first()
            .cloned()
            .ok_or_else(|| ArchiveError::NotFound {
                kind: R::KIND,
                query: self.query.to_string(),
            })
    }

    /// Every matching record, fetched page by page as the stream is polled.
    ///
    /// A failed page ends the stream with that error.
    pub fn all(&self) -> BoxStream<'c, Result<R>> {
        let client = self.client;
        match &self.query {
            Query::ById(id) => {
                let id = id.clone();
                stream::once(async move { fetch_by_id::<R>(client, &id).await }).boxed()
            },
            Query::Search(_) if self.count == 0 => stream::empty().boxed(),
            Query::Search(params) => {
                let expected = self.count;
                let paginated = R::KIND.def().paginated;
                let page_size = client.items_per_page() as usize;
                let cursor = PageCursor {
                    params: params.clone(),
                    page: 1,
                    fetched: 0,
                    done: false,
                };

                stream::try_unfold(cursor, move |mut cursor| async move {
                    if cursor.done {
                        return Ok(None);
                    }

                    debug!(
                        "{} page {} ({} of {} fetched)",
                        R::KIND,
                        cursor.page,
                        cursor.fetched,
                        expected
                    );
                    let page = client.search_page(R::KIND, &cursor.params, cursor.page).await?;

                    if page.items.is_empty() {
                        if cursor.fetched < expected {
                            return Err(ArchiveError::Pagination {
                                kind: R::KIND,
                                page: cursor.page,
                                fetched: cursor.fetched,
                                expected,
                            });
                        }
                        return Ok(None);
                    }

                    let records = resolve_page::<R>(&page.items)?;
                    cursor.fetched += records.len();
                    cursor.done =
                        !paginated || records.len() < page_size || cursor.fetched >= expected;
                    cursor.page += 1;
                    Ok::<_, ArchiveError>(Some((records, cursor)))
                })
                .map_ok(|records| stream::iter(records.into_iter().map(Ok)))
                .try_flatten()
                .boxed()
            },
        }
    }

    /// Drain [`all`](Self::all) into a vector.
    pub async fn collect_all(&self) -> Result<Vec<R>> {
        self.all().try_collect().await
    }

    /// Fetch every match and hydrate each in turn.
    ///
    /// Records are hydrated sequentially; the first failure stops the run.
    pub async fn hydrate(&self, recurse: bool) -> Result<Vec<R>> {
        let hydrator = Hydrator::new(self.client);
        let mut records = self.collect_all().await?;
        for record in records.iter_mut() {
            hydrator.hydrate(record, recurse).await?;
        }
        info!("Hydrated {} {} records", records.len(), R::KIND);
        Ok(records)
    }
}

/// Count for a first page. Endpoints that do not paginate report no total;
/// everything they match is on the page.
fn page_count(kind: Kind, total: Option<usize>, page_len: usize) -> usize {
    if kind.def().paginated {
        total.unwrap_or(page_len)
    } else {
        page_len
    }
}

fn resolve_page<R: Searchable>(items: &[Value]) -> Result<Vec<R>> {
    items
        .iter()
        .map(|item| resolve::<R>(item, PayloadShape::Summary))
        .collect()
}

async fn fetch_by_id<R: Searchable>(client: &ArchiveClient, id: &str) -> Result<R> {
    match client.detail(R::KIND, id).await {
        Ok(body) => resolve::<R>(&body, PayloadShape::Detail),
        Err(e) if e.http_status() == Some(404) => Err(ArchiveError::NotFound {
            kind: R::KIND,
            query: format!("id {}", id),
        }),
        Err(e) => Err(e),
    }
}

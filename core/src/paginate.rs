use tokio_util::sync::CancellationToken;

use crate::page::{PageParams, PaginatedResult, DEFAULT_PAGE_SIZE};
use crate::source::RecordSource;
use crate::{PageError, Result};

/// Count `source` and fetch the page described by `params`.
///
/// The token is checked before any work and raced against every await of
/// the count and slice; a fired token yields [`PageError::Cancelled`].
pub async fn paginate<S>(
    source: &S,
    params: PageParams,
    cancel: &CancellationToken,
) -> Result<PaginatedResult<S::Record>>
where
    S: RecordSource + ?Sized,
{
    if cancel.is_cancelled() {
        return Err(PageError::Cancelled);
    }

    let work = async {
        let total = source.count().await?;
        let items = source.slice(params.offset(), params.page_size()).await?;
        Ok::<_, PageError>((total, items))
    };

    let (total, items) = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            log::info!("pagination cancelled at page {}", params.page());
            return Err(PageError::Cancelled);
        }
        res = work => res?,
    };

    log::debug!(
        "page {} (size {}): {} of {} records",
        params.page(),
        params.page_size(),
        items.len(),
        total
    );
    Ok(PaginatedResult::new(items, total, &params))
}

#[derive(Debug)]
pub struct PageQuery<S> {
    source: Option<S>,
    page: i64,
    page_size: i64,
    cancel: Option<CancellationToken>,
}

impl<S> Default for PageQuery<S> {
    fn default() -> Self {
        Self {
            source: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE as i64,
            cancel: None,
        }
    }
}

impl<S: RecordSource> PageQuery<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self, source: S) -> Self {
        self.source = Some(source);
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn cancel_with(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Fails with `InvalidArgument("source")` when no source was given.
    pub fn build(self) -> Result<Pager<S>> {
        let source = self.source.ok_or(PageError::InvalidArgument("source"))?;
        Ok(Pager {
            source,
            params: PageParams::new(self.page, self.page_size),
            cancel: self.cancel.unwrap_or_default(),
        })
    }
}

#[derive(Debug)]
pub struct Pager<S> {
    source: S,
    params: PageParams,
    cancel: CancellationToken,
}

impl<S: RecordSource> Pager<S> {
    pub fn params(&self) -> PageParams {
        self.params
    }

    pub async fn fetch(&self) -> Result<PaginatedResult<S::Record>> {
        paginate(&self.source, self.params, &self.cancel).await
    }
}

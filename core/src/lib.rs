pub mod db;
pub mod error;
pub mod filter;
pub mod json;
pub mod model;
pub mod order;
pub mod page;
pub mod paginate;
pub mod source;

pub use db::SelectSource;
pub use error::{PageError, Result};
pub use filter::{IteratorWhereIf, WhereIf};
pub use json::ToJson;
pub use order::{order_query, Direction, OrderBy, OrderQuery, RecordShape};
pub use page::{PageParams, PaginatedResult, PagingMetaData, DEFAULT_PAGE_SIZE};
pub use paginate::{paginate, PageQuery, Pager};
pub use source::{MemorySource, RecordSource};
pub use tokio_util::sync::CancellationToken;

//! Sequential draining of paged collections.

use std::future::Future;

use tracing::debug;

use crate::error::{IngestError, Result};

/// Page size used when callers do not pick one.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// One page of a remote collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Size of the whole collection as reported by the source.
    pub total_record_count: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_record_count: usize) -> Self {
        Self {
            items,
            total_record_count,
        }
    }
}

/// Fetch every page of a collection, one request at a time.
///
/// Pages are requested in index order starting at 0. Fetching stops once
/// the running item count reaches the reported total, or when a page comes
/// back shorter than `page_size`. Items beyond the reported total are
/// dropped. The first failing page aborts the drain and its error is
/// returned as is.
///
/// # Errors
///
/// Returns [`IngestError::InvalidPageSize`] for a zero page size, or the
/// error of the first failing page.
pub async fn collect_pages<T, F, Fut>(
    collection: &str,
    page_size: usize,
    mut fetch: F,
) -> Result<Vec<T>>
where
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    if page_size == 0 {
        return Err(IngestError::InvalidPageSize);
    }

    let mut items: Vec<T> = Vec::new();
    let mut page_index = 0usize;
    loop {
        let page = fetch(page_index, page_size).await?;
        let received = page.items.len();
        let total = page.total_record_count;
        items.extend(page.items);
        debug!(
            collection,
            page_index,
            received,
            fetched = items.len(),
            total,
            "fetched page"
        );

        if items.len() >= total {
            items.truncate(total);
            break;
        }
        if received < page_size {
            break;
        }
        page_index += 1;
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice_page(data: &[u32], total: usize, index: usize, size: usize) -> Page<u32> {
        let start = (index * size).min(data.len());
        let end = (start + size).min(data.len());
        Page::new(data[start..end].to_vec(), total)
    }

    #[tokio::test]
    async fn stops_at_short_page_before_total() {
        let data: Vec<u32> = (0..15).collect();
        let mut requested = Vec::new();
        let items = collect_pages("numbers", 10, |index, size| {
            requested.push(index);
            // Source claims 40 records but only holds 15.
            let page = slice_page(&data, 40, index, size);
            async move { Ok(page) }
        })
        .await
        .expect("collect pages");
        assert_eq!(items, data);
        assert_eq!(requested, vec![0, 1]);
    }

    #[tokio::test]
    async fn zero_page_size_is_rejected() {
        let result = collect_pages::<u32, _, _>("numbers", 0, |_, _| async {
            Ok(Page::new(Vec::new(), 0))
        })
        .await;
        assert!(matches!(result, Err(IngestError::InvalidPageSize)));
    }

    #[tokio::test]
    async fn failing_page_surfaces_error() {
        let data: Vec<u32> = (0..30).collect();
        let result = collect_pages("numbers", 10, |index, size| {
            let page = slice_page(&data, 30, index, size);
            async move {
                if index == 1 {
                    Err(IngestError::Network("reset".to_string()))
                } else {
                    Ok(page)
                }
            }
        })
        .await;
        assert!(matches!(result, Err(IngestError::Network(message)) if message == "reset"));
    }
}

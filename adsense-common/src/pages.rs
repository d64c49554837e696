//! Lazily fetch all pages of a listing.
//!
//! List methods return at most one page of results together with an opaque `nextPageToken`;
//! passing the token to the next call returns the following page. `pages()` turns such a method
//! into a stream of pages which ends after the last page or the first error.

use crate::*;

use futures::stream::{self, Stream, TryStreamExt};
use std::future::Future;

/// A response of a list method.
pub trait ListResponse {
    type Item;

    /// Consume the page, returning the items on it.
    fn into_items(self) -> Vec<Self::Item>;
    /// Token for requesting the next page; `None` or empty on the last page.
    fn next_page_token(&self) -> Option<&str>;
}

enum Cursor {
    First,
    Next(String),
    Done,
}

/// Returns a stream of pages. `fetch` is called with the page token (`None` for the first page)
/// every time the next page is polled; nothing is fetched before that. Each call starts over from
/// the first page.
pub fn pages<Resp, F, Fut>(fetch: F) -> impl Stream<Item = Result<Resp>>
where
    Resp: ListResponse,
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Resp>>,
{
    stream::try_unfold((fetch, Cursor::First), |(mut fetch, cursor)| async move {
        let token = match cursor {
            Cursor::Done => return Ok(None),
            Cursor::First => None,
            Cursor::Next(token) => Some(token),
        };
        let page = fetch(token).await?;
        let next = match page.next_page_token() {
            Some(token) if !token.is_empty() => Cursor::Next(token.to_string()),
            _ => Cursor::Done,
        };
        Ok(Some((page, (fetch, next))))
    })
}

/// Like `pages()`, but yields the items of all pages one by one.
pub fn items<Resp, F, Fut>(fetch: F) -> impl Stream<Item = Result<Resp::Item>>
where
    Resp: ListResponse,
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Resp>>,
{
    pages(fetch)
        .map_ok(|page| stream::iter(page.into_items().into_iter().map(Ok::<_, Error>)))
        .try_flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Default)]
    struct Page {
        items: Vec<u32>,
        next: Option<String>,
    }

    impl ListResponse for Page {
        type Item = u32;
        fn into_items(self) -> Vec<u32> {
            self.items
        }
        fn next_page_token(&self) -> Option<&str> {
            self.next.as_deref()
        }
    }

    /// Serves three pages and records the tokens it was called with.
    fn fake_listing(
        calls: Arc<Mutex<Vec<Option<String>>>>,
    ) -> impl FnMut(Option<String>) -> futures::future::Ready<Result<Page>> {
        move |token: Option<String>| {
            calls.lock().unwrap().push(token.clone());
            let page = match token.as_deref() {
                None => Page {
                    items: vec![1, 2],
                    next: Some("p2".into()),
                },
                Some("p2") => Page {
                    items: vec![3],
                    next: Some("p3".into()),
                },
                Some("p3") => Page {
                    items: vec![4, 5],
                    next: Some("".into()),
                },
                Some(other) => {
                    return futures::future::ready(Err(ApiError::InputDataError(format!(
                        "unknown token {}",
                        other
                    ))
                    .into()))
                }
            };
            futures::future::ready(Ok(page))
        }
    }

    #[tokio::test]
    async fn follows_page_tokens() {
        let calls = Arc::new(Mutex::new(vec![]));
        let all: Vec<Page> = pages(fake_listing(calls.clone()))
            .try_collect()
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(
            *calls.lock().unwrap(),
            vec![None, Some("p2".to_string()), Some("p3".to_string())]
        );
    }

    #[tokio::test]
    async fn flattens_items() {
        let calls = Arc::new(Mutex::new(vec![]));
        let all: Vec<u32> = items(fake_listing(calls)).try_collect().await.unwrap();
        assert_eq!(all, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn fetches_lazily() {
        let calls = Arc::new(Mutex::new(vec![]));
        let first: Vec<Result<Page>> = pages(fake_listing(calls.clone())).take(1).collect().await;
        assert_eq!(first.len(), 1);
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn restarts_from_first_page() {
        let calls = Arc::new(Mutex::new(vec![]));
        for _ in 0..2 {
            let _: Vec<Page> = pages(fake_listing(calls.clone()))
                .try_collect()
                .await
                .unwrap();
        }
        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 6);
        assert_eq!(calls[3], None);
    }

    #[tokio::test]
    async fn stops_after_error() {
        let mut n = 0;
        let failing = move |_token: Option<String>| {
            n += 1;
            let r: Result<Page> = if n == 1 {
                Ok(Page {
                    items: vec![1],
                    next: Some("bad".into()),
                })
            } else {
                Err(ApiError::InputDataError("boom".into()).into())
            };
            futures::future::ready(r)
        };
        let results: Vec<Result<Page>> = pages(failing).collect().await;
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}

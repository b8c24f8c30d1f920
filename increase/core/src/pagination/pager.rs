use std::collections::VecDeque;
use std::sync::Arc;

use futures::Stream;
use serde::de::DeserializeOwned;

use super::page::{Page, PageRequest};
use crate::client::ApiClient;
use crate::error::IncreaseError;
use crate::transport::{HttpTransport, Transport};

#[derive(Debug)]
enum PagerState<R, T> {
    /// Nothing fetched yet.
    Empty,
    Loaded(Page<R, T>),
    /// The last page has been consumed.
    Exhausted,
    /// A fetch failed; the list must be re-issued to continue. The page
    /// loaded before the failure stays readable.
    Failed(Option<Page<R, T>>),
}

/// A lazy, forward-only walk over every page of a list.
///
/// Nothing is sent until [`next_page`](Self::next_page) is first called.
/// Pages are fetched one at a time, in order, and never prefetched.
///
/// ## Examples
///
/// ```rust,ignore
/// use futures::TryStreamExt;
///
/// let accounts: Vec<Account> = client
///     .list_auto_paging("accounts", &AccountListParams::default(), &options)?
///     .into_stream()
///     .try_collect()
///     .await?;
/// ```
#[derive(Debug)]
pub struct Pager<R, T = HttpTransport> {
    client: ApiClient<T>,
    request: Arc<PageRequest>,
    state: PagerState<R, T>,
}

impl<R, T> Pager<R, T> {
    pub(crate) fn new(client: ApiClient<T>, request: Arc<PageRequest>) -> Self {
        Self {
            client,
            request,
            state: PagerState::Empty,
        }
    }

    /// The most recently fetched page, if any.
    ///
    /// A failed fetch leaves the previous page in place.
    pub fn page(&self) -> Option<&Page<R, T>> {
        match &self.state {
            PagerState::Loaded(page) | PagerState::Failed(Some(page)) => Some(page),
            _ => None,
        }
    }

    /// The item under the cursor of the current page.
    ///
    /// ## Errors
    ///
    /// Returns [`IncreaseError::OutOfRange`] when there is no page to read
    /// and past the last item of the current page.
    pub fn current(&self) -> Result<&R, IncreaseError> {
        match self.page() {
            Some(page) => page.current(),
            None => Err(IncreaseError::OutOfRange { index: 0, len: 0 }),
        }
    }

    /// Moves the cursor within the current page.
    ///
    /// Returns `false` when there is no page or the cursor is past its end.
    pub fn advance(&mut self) -> bool {
        match &mut self.state {
            PagerState::Loaded(page) | PagerState::Failed(Some(page)) => page.advance(),
            _ => false,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, PagerState::Exhausted)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, PagerState::Failed(_))
    }
}

impl<R: DeserializeOwned, T: Transport> Pager<R, T> {
    /// Fetches the next page and makes it current.
    ///
    /// The first call fetches the first page. Once the last page has been
    /// returned, the next call yields `Ok(None)` and so do all later calls.
    ///
    /// ## Errors
    ///
    /// Returns the [`IncreaseError`] of the failed request. The pager then
    /// stops: later calls return `Ok(None)`.
    pub async fn next_page(&mut self) -> Result<Option<&Page<R, T>>, IncreaseError> {
        let cursor = match &self.state {
            PagerState::Empty => None,
            PagerState::Loaded(page) => match page.next_cursor() {
                Some(cursor) => Some(cursor.to_string()),
                None => {
                    self.state = PagerState::Exhausted;
                    return Ok(None);
                }
            },
            PagerState::Exhausted | PagerState::Failed(_) => return Ok(None),
        };

        let fetched = Page::fetch(
            self.client.clone(),
            Arc::clone(&self.request),
            cursor.as_deref(),
        )
        .await;
        match fetched {
            Ok(page) => {
                self.state = PagerState::Loaded(page);
                Ok(self.page())
            }
            Err(err) => {
                let last = match std::mem::replace(&mut self.state, PagerState::Failed(None)) {
                    PagerState::Loaded(page) => Some(page),
                    _ => None,
                };
                self.state = PagerState::Failed(last);
                Err(err)
            }
        }
    }

    /// Yields every item across all pages in server order.
    ///
    /// The stream ends after the last page or after yielding an error.
    pub fn into_stream(self) -> impl Stream<Item = Result<R, IncreaseError>> {
        futures::stream::try_unfold(
            (self, VecDeque::new()),
            |(mut pager, mut buffer)| async move {
                loop {
                    if let Some(item) = buffer.pop_front() {
                        return Ok(Some((item, (pager, buffer))));
                    }
                    match pager.next_page().await {
                        Ok(Some(_)) => {}
                        Ok(None) => return Ok(None),
                        Err(err) => return Err(err),
                    }
                    if let PagerState::Loaded(page) = &mut pager.state {
                        buffer.extend(page.take_data());
                    }
                }
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{CancelSignal, RequestOptions};
    use crate::error::TransportError;
    use crate::test_support::ScriptedTransport;
    use futures::TryStreamExt;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u32,
    }

    fn three_pages() -> ScriptedTransport {
        ScriptedTransport::new()
            .respond(200, json!({ "data": [{ "id": 1 }, { "id": 2 }], "next_cursor": "c2" }))
            .respond(200, json!({ "data": [{ "id": 3 }], "next_cursor": "c3" }))
            .respond(200, json!({ "data": [{ "id": 4 }], "next_cursor": null }))
    }

    fn pager(transport: ScriptedTransport) -> Pager<Item, ScriptedTransport> {
        ApiClient::with_transport(transport)
            .list_auto_paging("items", &(), &RequestOptions::default())
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_state_sends_nothing() {
        let pager = pager(three_pages());
        assert!(matches!(
            pager.current(),
            Err(IncreaseError::OutOfRange { .. })
        ));
        assert!(pager.page().is_none());
        assert!(pager.client.transport().seen().is_empty());
    }

    #[tokio::test]
    async fn test_three_pages_then_exhausted() {
        let mut pager = pager(three_pages());

        let ids = |page: Option<&Page<Item, ScriptedTransport>>| {
            page.map(|p| p.data().iter().map(|i| i.id).collect::<Vec<_>>())
        };
        assert_eq!(ids(pager.next_page().await.unwrap()), Some(vec![1, 2]));
        assert_eq!(pager.current().unwrap().id, 1);
        assert!(pager.advance());
        assert_eq!(pager.current().unwrap().id, 2);

        assert_eq!(ids(pager.next_page().await.unwrap()), Some(vec![3]));
        assert_eq!(ids(pager.next_page().await.unwrap()), Some(vec![4]));
        assert!(pager.next_page().await.unwrap().is_none());
        assert!(pager.is_exhausted());
        assert!(pager.next_page().await.unwrap().is_none());
        assert!(matches!(
            pager.current(),
            Err(IncreaseError::OutOfRange { .. })
        ));
        assert_eq!(pager.client.transport().seen().len(), 3);
    }

    #[tokio::test]
    async fn test_stream_yields_items_in_order() {
        let items: Vec<u32> = pager(three_pages())
            .into_stream()
            .map_ok(|item| item.id)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(items, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_stream_skips_empty_intermediate_page() {
        let transport = ScriptedTransport::new()
            .respond(200, json!({ "data": [], "next_cursor": "c2" }))
            .respond(200, json!({ "data": [{ "id": 9 }] }));
        let items: Vec<Item> = pager(transport).into_stream().try_collect().await.unwrap();
        assert_eq!(items, vec![Item { id: 9 }]);
    }

    #[tokio::test]
    async fn test_failure_is_terminal() {
        let transport = ScriptedTransport::new()
            .respond(200, json!({ "data": [{ "id": 1 }], "next_cursor": "c2" }))
            .fail(TransportError::Connection("reset".into()));
        let mut pager = pager(transport);
        pager.next_page().await.unwrap();
        let err = pager.next_page().await.unwrap_err();
        assert!(err.is_transport());
        assert!(pager.is_failed());
        assert!(pager.next_page().await.unwrap().is_none());
        assert_eq!(pager.client.transport().seen().len(), 2);
    }

    #[tokio::test]
    async fn test_stream_ends_after_error() {
        let transport = ScriptedTransport::new()
            .respond(200, json!({ "data": [{ "id": 1 }], "next_cursor": "c2" }))
            .respond(404, json!({ "status": 404, "type": "not_found_error" }));
        let results: Vec<Result<Item, IncreaseError>> =
            futures::StreamExt::collect(pager(transport).into_stream()).await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().id, 1);
        assert!(results[1].as_ref().unwrap_err().as_api_error().is_some());
    }

    #[tokio::test]
    async fn test_cancelled_fetch_keeps_nothing_loaded() {
        let signal = CancelSignal::new();
        signal.cancel();
        let mut pager: Pager<Item, _> = ApiClient::with_transport(three_pages())
            .list_auto_paging(
                "items",
                &(),
                &RequestOptions::new().cancel_signal(signal),
            )
            .unwrap();
        let err = pager.next_page().await.unwrap_err();
        assert!(err.is_cancelled());
        assert!(pager.is_failed());
        assert!(pager.page().is_none());
    }

    #[tokio::test]
    async fn test_cancelled_fetch_keeps_loaded_page() {
        let signal = CancelSignal::new();
        let mut pager: Pager<Item, _> = ApiClient::with_transport(three_pages())
            .list_auto_paging(
                "items",
                &(),
                &RequestOptions::new().cancel_signal(signal.clone()),
            )
            .unwrap();
        pager.next_page().await.unwrap();
        assert!(pager.advance());

        signal.cancel();
        let err = pager.next_page().await.unwrap_err();
        assert!(err.is_cancelled());
        assert!(pager.is_failed());
        assert_eq!(pager.current().unwrap().id, 2);
        assert_eq!(pager.page().map(|p| p.len()), Some(2));
        assert!(pager.next_page().await.unwrap().is_none());
        assert_eq!(pager.current().unwrap().id, 2);
        assert_eq!(pager.client.transport().seen().len(), 1);
    }
}

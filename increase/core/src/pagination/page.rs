use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use super::CURSOR_PARAM;
use crate::client::{ApiClient, RequestOptions};
use crate::codec::{Extras, query};
use crate::error::{EncodeError, IncreaseError};
use crate::method::RestMethod;
use crate::transport::{HttpTransport, Transport, TransportRequest};

/// The wire shape of a list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<R> {
    pub data: Vec<R>,
    #[serde(default, deserialize_with = "non_empty_cursor")]
    pub next_cursor: Option<String>,
    #[serde(flatten)]
    pub extras: Extras,
}

fn non_empty_cursor<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let cursor = Option::<String>::deserialize(deserializer)?;
    Ok(cursor.filter(|c| !c.is_empty()))
}

/// The list call a page came from: path, flattened query and options.
///
/// The query is flattened once; every page reuses it verbatim and only the
/// `cursor` pair differs.
#[derive(Debug, Clone)]
pub struct PageRequest {
    path: String,
    template: Vec<(String, String)>,
    options: RequestOptions,
}

impl PageRequest {
    /// Flattens `query` into the request template.
    ///
    /// ## Errors
    ///
    /// Returns an [`EncodeError`] if `query` cannot be flattened.
    pub fn new<Q: Serialize + ?Sized>(
        path: impl Into<String>,
        query: &Q,
        options: RequestOptions,
    ) -> Result<Self, EncodeError> {
        Ok(Self {
            path: path.into(),
            template: query::to_pairs(query)?,
            options,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn template(&self) -> &[(String, String)] {
        &self.template
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// The query for a page: the template as is for the first page, or the
    /// template with `cursor` set to the given token.
    pub fn query_for(&self, cursor: Option<&str>) -> Vec<(String, String)> {
        let Some(cursor) = cursor else {
            return self.template.clone();
        };
        let mut pairs = self.template.clone();
        match pairs.iter_mut().find(|(key, _)| key == CURSOR_PARAM) {
            Some((_, value)) => *value = cursor.to_string(),
            None => pairs.push((CURSOR_PARAM.to_string(), cursor.to_string())),
        }
        pairs
    }
}

/// One page of a list endpoint.
///
/// Holds the items in server order, the continuation token, and a position
/// used by [`current`](Self::current) and [`advance`](Self::advance).
/// Fetching another page never changes this one; [`next_page`](Self::next_page)
/// returns a new value.
///
/// ## Examples
///
/// ```rust,ignore
/// let mut page = client.list::<_, Account>("accounts", &query, &options).await?;
/// loop {
///     for account in page.data() {
///         println!("{:?}", account.id);
///     }
///     match page.next_page().await? {
///         Some(next) => page = next,
///         None => break,
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Page<R, T = HttpTransport> {
    client: ApiClient<T>,
    request: Arc<PageRequest>,
    data: Vec<R>,
    next_cursor: Option<String>,
    extras: Extras,
    index: usize,
}

impl<R, T> Page<R, T> {
    /// Items of this page in server order.
    pub fn data(&self) -> &[R] {
        &self.data
    }

    pub fn into_data(self) -> Vec<R> {
        self.data
    }

    pub(crate) fn take_data(&mut self) -> Vec<R> {
        std::mem::take(&mut self.data)
    }

    /// The continuation token, or `None` on the last page.
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    pub fn has_next_page(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// Members of the list response other than `data` and `next_cursor`.
    pub fn extras(&self) -> &Extras {
        &self.extras
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Position of the cursor within this page.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    /// The item under the cursor. No network call is made.
    ///
    /// ## Errors
    ///
    /// Returns [`IncreaseError::OutOfRange`] if the page is empty or the
    /// cursor has moved past its last item.
    pub fn current(&self) -> Result<&R, IncreaseError> {
        self.data.get(self.index).ok_or(IncreaseError::OutOfRange {
            index: self.index,
            len: self.data.len(),
        })
    }

    /// Moves the cursor to the next item of this page.
    ///
    /// Returns `false` once the cursor is past the last item.
    pub fn advance(&mut self) -> bool {
        if self.index < self.data.len() {
            self.index += 1;
        }
        self.index < self.data.len()
    }
}

impl<R: DeserializeOwned, T: Transport> Page<R, T> {
    /// Fetches a page; `cursor` is `None` for the first page.
    pub(crate) async fn fetch(
        client: ApiClient<T>,
        request: Arc<PageRequest>,
        cursor: Option<&str>,
    ) -> Result<Self, IncreaseError> {
        debug!(path = request.path(), cursor, "fetching page");
        let transport_request = TransportRequest::new(RestMethod::Get, request.path())
            .with_query(request.query_for(cursor));
        let response: ListResponse<R> = client
            .execute(transport_request, request.options())
            .await?;
        debug!(
            path = request.path(),
            items = response.data.len(),
            has_more = response.next_cursor.is_some(),
            "fetched page"
        );
        Ok(Self {
            client,
            request,
            data: response.data,
            next_cursor: response.next_cursor,
            extras: response.extras,
            index: 0,
        })
    }

    /// Fetches the page after this one.
    ///
    /// Returns `Ok(None)` when this is the last page; that is the end of the
    /// list, not an error.
    ///
    /// ## Errors
    ///
    /// Returns the [`IncreaseError`] of the failed request. This page stays
    /// usable; retrying means calling `next_page` again or re-issuing the list.
    pub async fn next_page(&self) -> Result<Option<Self>, IncreaseError> {
        let Some(cursor) = self.next_cursor.as_deref() else {
            return Ok(None);
        };
        let page = Self::fetch(self.client.clone(), Arc::clone(&self.request), Some(cursor)).await?;
        Ok(Some(page))
    }
}

//! In-memory listing service for tests

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::{ListPage, ObjectListingApi};
use crate::types::{ListerError, ListerResult};

/// A request received by [`MockObjectListingApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Requested bucket
    pub bucket: String,
    /// Requested prefix
    pub prefix: String,
    /// Continuation token sent with the request
    pub continuation_token: Option<String>,
}

enum Backing {
    /// Responses keyed by the continuation token that requests them
    Scripted(HashMap<Option<String>, Result<ListPage, String>>),
    /// A bucket's keys, filtered by prefix and split into pages of `page_size`
    Store { keys: Vec<String>, page_size: usize },
}

/// Listing service that answers from memory and records every request
pub struct MockObjectListingApi {
    backing: Backing,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockObjectListingApi {
    /// Scripted service with no pages; add them with [`Self::with_page`]
    #[must_use]
    pub fn scripted() -> Self {
        Self {
            backing: Backing::Scripted(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Emulates a bucket holding `keys`, returning at most `page_size` keys per page
    ///
    /// # Panics
    ///
    /// Panics if `page_size` is zero
    #[must_use]
    pub fn with_objects<I, S>(keys: I, page_size: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        assert!(page_size > 0, "page_size must be positive");
        Self {
            backing: Backing::Store {
                keys: keys.into_iter().map(Into::into).collect(),
                page_size,
            },
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answers requests carrying `continuation_token` with `page`
    #[must_use]
    pub fn with_page(mut self, continuation_token: Option<&str>, page: ListPage) -> Self {
        self.script(continuation_token, Ok(page));
        self
    }

    /// Fails requests carrying `continuation_token` with a service error
    #[must_use]
    pub fn with_failure(mut self, continuation_token: Option<&str>, message: &str) -> Self {
        self.script(continuation_token, Err(message.to_string()));
        self
    }

    /// Requests received so far, oldest first
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn script(&mut self, continuation_token: Option<&str>, response: Result<ListPage, String>) {
        match &mut self.backing {
            Backing::Scripted(responses) => {
                responses.insert(continuation_token.map(ToString::to_string), response);
            }
            Backing::Store { .. } => panic!("cannot script pages of an object store mock"),
        }
    }
}

fn store_page(
    keys: &[String],
    page_size: usize,
    prefix: &str,
    continuation_token: Option<&str>,
) -> ListerResult<ListPage> {
    let start = match continuation_token {
        None => 0,
        Some(token) => token.parse::<usize>().map_err(|_| {
            ListerError::ServiceRequestFailure(
                format!("InvalidArgument: invalid continuation token {token}").into(),
            )
        })?,
    };

    let matching: Vec<&String> = keys.iter().filter(|key| key.starts_with(prefix)).collect();
    let end = (start + page_size).min(matching.len());
    let page_keys = matching
        .get(start..end)
        .unwrap_or_default()
        .iter()
        .map(|key| (*key).clone());

    if end < matching.len() {
        Ok(ListPage::truncated(page_keys, end.to_string()))
    } else {
        Ok(ListPage::last(page_keys))
    }
}

#[async_trait::async_trait]
impl ObjectListingApi for MockObjectListingApi {
    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<&str>,
    ) -> ListerResult<ListPage> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                bucket: bucket.to_string(),
                prefix: prefix.to_string(),
                continuation_token: continuation_token.map(ToString::to_string),
            });

        match &self.backing {
            Backing::Scripted(responses) => {
                match responses.get(&continuation_token.map(ToString::to_string)) {
                    Some(Ok(page)) => Ok(page.clone()),
                    Some(Err(message)) => {
                        Err(ListerError::ServiceRequestFailure(message.clone().into()))
                    }
                    None => Err(ListerError::ServiceRequestFailure(
                        format!(
                            "InvalidArgument: unexpected continuation token {continuation_token:?}"
                        )
                        .into(),
                    )),
                }
            }
            Backing::Store { keys, page_size } => {
                store_page(keys, *page_size, prefix, continuation_token)
            }
        }
    }
}

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::segmenter::ThreadChunk;
use crate::kernel::BaseThreadClient;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("nothing to publish")]
    EmptyThread,

    /// A post failed. Posts before `position` stay live.
    #[error("post {position}/{total} failed: {source}")]
    Post {
        position: usize,
        total: usize,
        root_id: Option<String>,
        #[source]
        source: anyhow::Error,
    },

    #[error("thread {root_id} posted but account handle lookup failed: {source}")]
    Handle {
        root_id: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Posts chunks as a linear reply chain.
pub struct ThreadPublisher {
    client: Arc<dyn BaseThreadClient>,
}

impl ThreadPublisher {
    pub fn new(client: Arc<dyn BaseThreadClient>) -> Self {
        Self { client }
    }

    /// Publish `chunks` in index order and return the root post's URL.
    pub async fn publish(&self, chunks: &[ThreadChunk]) -> Result<String, PublishError> {
        let mut ordered: Vec<&ThreadChunk> = chunks.iter().collect();
        ordered.sort_by_key(|c| c.index);

        let total = ordered.len();
        let mut root_id: Option<String> = None;
        let mut previous: Option<String> = None;

        for (i, chunk) in ordered.into_iter().enumerate() {
            let text = chunk.render();
            let id = match self.client.create_post(&text, previous.as_deref()).await {
                Ok(id) => id,
                Err(source) => {
                    if root_id.is_some() {
                        warn!(
                            root_id = ?root_id,
                            posted = i,
                            total,
                            "Thread left partially published"
                        );
                    }
                    return Err(PublishError::Post {
                        position: i + 1,
                        total,
                        root_id,
                        source,
                    });
                }
            };

            debug!(post_id = %id, position = i + 1, total, "Posted thread chunk");
            if root_id.is_none() {
                root_id = Some(id.clone());
            }
            previous = Some(id);
        }

        let Some(root_id) = root_id else {
            return Err(PublishError::EmptyThread);
        };

        let handle = match self.client.account_handle().await {
            Ok(handle) => handle,
            Err(source) => return Err(PublishError::Handle { root_id, source }),
        };

        let url = self.client.post_url(&handle, &root_id);
        info!(thread_url = %url, posts = total, "Thread published");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::threads::segmenter::segment_with_budget;
    use crate::kernel::test_dependencies::MockThreadClient;

    fn chunks() -> Vec<ThreadChunk> {
        segment_with_budget("one two\nthree four\nfive six seven", 20)
    }

    #[tokio::test]
    async fn test_publish_reply_chain() {
        let client = Arc::new(MockThreadClient::new().with_handle("HuttAgendas"));
        let publisher = ThreadPublisher::new(client.clone());

        let url = publisher.publish(&chunks()).await.unwrap();
        assert_eq!(url, "https://x.com/HuttAgendas/status/1001");

        let posts = client.posts();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].text, "one two three four (1/2)");
        assert_eq!(posts[0].in_reply_to, None);
        assert_eq!(posts[1].text, "five six seven (2/2)");
        assert_eq!(posts[1].in_reply_to.as_deref(), Some("1001"));
    }

    #[tokio::test]
    async fn test_publish_follows_index_order() {
        let client = Arc::new(MockThreadClient::new());
        let publisher = ThreadPublisher::new(client.clone());

        let mut reversed = chunks();
        reversed.reverse();
        publisher.publish(&reversed).await.unwrap();

        assert!(client.posts()[0].text.ends_with("(1/2)"));
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_root() {
        let client = Arc::new(MockThreadClient::new().failing_on_attempt(2));
        let publisher = ThreadPublisher::new(client.clone());

        match publisher.publish(&chunks()).await {
            Err(PublishError::Post {
                position,
                total,
                root_id,
                ..
            }) => {
                assert_eq!(position, 2);
                assert_eq!(total, 2);
                assert_eq!(root_id.as_deref(), Some("1001"));
            }
            other => panic!("expected Post error, got {:?}", other),
        }
        assert_eq!(client.posts().len(), 1);
    }

    #[tokio::test]
    async fn test_handle_failure_after_posting() {
        let client = Arc::new(MockThreadClient::new().failing_handle_lookup());
        let publisher = ThreadPublisher::new(client.clone());

        let err = publisher.publish(&chunks()).await.unwrap_err();
        assert!(matches!(err, PublishError::Handle { ref root_id, .. } if root_id == "1001"));
        assert_eq!(client.posts().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_thread() {
        let publisher = ThreadPublisher::new(Arc::new(MockThreadClient::new()));
        assert!(matches!(
            publisher.publish(&[]).await,
            Err(PublishError::EmptyThread)
        ));
    }
}

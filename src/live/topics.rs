use crate::models::live::MatchFrame;
use hashbrown::HashMap;
use tokio::sync::RwLock;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

/// Per-match broadcast topics. Every committed revision of a match is
/// published to its topic and delivered to all subscribers in commit
/// order; the unbounded channel keeps a slow subscriber from ever
/// delaying the commit path.
#[derive(Default)]
pub struct MatchTopics {
    topics: RwLock<HashMap<Uuid, Vec<UnboundedSender<MatchFrame>>>>,
}

impl MatchTopics {
    pub async fn subscribe(&self, match_id: Uuid) -> UnboundedReceiver<MatchFrame> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.topics
            .write()
            .await
            .entry(match_id)
            .or_default()
            .push(tx);
        rx
    }

    /// Sends a frame to every open subscriber of the match, dropping the
    /// ones that have gone away.
    pub async fn publish(&self, match_id: Uuid, frame: MatchFrame) {
        let mut topics = self.topics.write().await;
        let Some(senders) = topics.get_mut(&match_id) else {
            return;
        };

        senders.retain(|sender| sender.send(frame.clone()).is_ok());
        if senders.is_empty() {
            topics.remove(&match_id);
        }
    }

    /// Drops the topic. Subscribers drain whatever was already queued and
    /// then observe the channel closing.
    pub async fn close(&self, match_id: Uuid) {
        self.topics.write().await.remove(&match_id);
    }

    /// Drops senders whose receiver has gone away without waiting for the
    /// next publish to do it.
    pub async fn prune(&self, match_id: Uuid) {
        let mut topics = self.topics.write().await;
        if let Some(senders) = topics.get_mut(&match_id) {
            senders.retain(|sender| !sender.is_closed());
            if senders.is_empty() {
                topics.remove(&match_id);
            }
        }
    }

    pub async fn subscriber_count(&self, match_id: Uuid) -> usize {
        self.topics
            .read()
            .await
            .get(&match_id)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

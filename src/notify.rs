use serde::Serialize;
use sqlx::PgPool;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// A notification to be delivered to every user. Published by mutating
/// handlers; persisted off the request path by the fan-out worker.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationEvent {
    pub title: String,
    pub message: String,
    pub link: String,
}

/// Broadcast handle shared through `AppState`. Publishing never blocks and
/// never fails the surrounding request; delivery is best-effort.
#[derive(Clone)]
pub struct Notifier {
    tx: broadcast::Sender<NotificationEvent>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, event: NotificationEvent) {
        // send only errors when no receiver is attached (worker not running,
        // e.g. in unit tests); the event is simply dropped then
        if self.tx.send(event).is_err() {
            warn!("notification published with no fan-out worker attached");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.tx.subscribe()
    }
}

/// Spawns the background task that turns published events into one
/// notification row per user. A single INSERT .. SELECT covers all users, so
/// the request path never carries the O(users) write loop.
pub fn spawn_fanout_worker(db: PgPool, notifier: &Notifier) -> JoinHandle<()> {
    let mut rx = notifier.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Err(e) = fan_out(&db, &event).await {
                        error!(error = %e, title = %event.title, "notification fan-out failed");
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "notification worker lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

async fn fan_out(db: &PgPool, event: &NotificationEvent) -> anyhow::Result<()> {
    let result = sqlx::query(
        r#"
        INSERT INTO notifications (user_id, title, message, link)
        SELECT id, $1, $2, $3 FROM users
        "#,
    )
    .bind(&event.title)
    .bind(&event.message)
    .bind(&event.link)
    .execute(db)
    .await?;

    info!(
        recipients = result.rows_affected(),
        title = %event.title,
        "notification fanned out"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(title: &str) -> NotificationEvent {
        NotificationEvent {
            title: title.into(),
            message: format!("{} happened", title),
            link: "/events".into(),
        }
    }

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let notifier = Notifier::new(8);
        let mut rx = notifier.subscribe();

        notifier.publish(event("New Event"));

        let received = rx.recv().await.expect("event should arrive");
        assert_eq!(received.title, "New Event");
        assert_eq!(received.link, "/events");
    }

    #[tokio::test]
    async fn publish_without_subscriber_does_not_panic() {
        let notifier = Notifier::new(8);
        notifier.publish(event("Nobody listening"));
    }

    #[tokio::test]
    async fn events_are_delivered_in_order() {
        let notifier = Notifier::new(8);
        let mut rx = notifier.subscribe();

        notifier.publish(event("first"));
        notifier.publish(event("second"));

        assert_eq!(rx.recv().await.unwrap().title, "first");
        assert_eq!(rx.recv().await.unwrap().title, "second");
    }
}

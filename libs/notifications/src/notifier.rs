use crate::models::Notification;
use async_trait::async_trait;
use eyre::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// A sink for notifications (mail relay, chat webhook, log)
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &Notification) -> Result<()>;

    fn name(&self) -> &'static str;
}

pub type SharedNotifier = Arc<dyn Notifier>;

/// Fire-and-forget delivery. The returned handle is only useful to tests;
/// callers normally drop it.
pub fn dispatch(notifier: SharedNotifier, notification: Notification) -> JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.notify(&notification).await {
            Ok(()) => tracing::debug!(
                notifier = notifier.name(),
                kind = notification.kind(),
                "Notification delivered"
            ),
            Err(e) => tracing::warn!(
                notifier = notifier.name(),
                kind = notification.kind(),
                error = %e,
                "Notification failed"
            ),
        }
    })
}

/// Writes each notification as a structured `info` event on the
/// `notifications` target. Default sink until a mail relay is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> Result<()> {
        let payload = serde_json::to_string(notification)?;
        tracing::info!(
            target: "notifications",
            kind = notification.kind(),
            recipient = notification.recipient(),
            %payload,
            "Notification"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Captures notifications in memory; can be told to fail every call.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    failure: Option<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(message.into()),
        }
    }

    pub async fn sent(&self) -> Vec<Notification> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &Notification) -> Result<()> {
        if let Some(message) = &self.failure {
            return Err(eyre::eyre!(message.clone()));
        }
        self.sent.lock().await.push(notification.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn contact() -> Notification {
        Notification::ContactReceived {
            message_id: Uuid::now_v7(),
            name: "Sam".to_string(),
            email: "sam@uni.test".to_string(),
            subject: "Hello".to_string(),
        }
    }

    #[tokio::test]
    async fn test_dispatch_delivers() {
        let recorder = Arc::new(RecordingNotifier::new());
        dispatch(recorder.clone(), contact()).await.unwrap();

        assert_eq!(recorder.sent_count().await, 1);
        assert_eq!(recorder.sent().await[0].kind(), "contact_received");
    }

    #[tokio::test]
    async fn test_dispatch_swallows_failures() {
        let failing = Arc::new(RecordingNotifier::failing("relay down"));
        // task completes normally even though the sink errors
        dispatch(failing.clone(), contact()).await.unwrap();
        assert_eq!(failing.sent_count().await, 0);
    }

    #[tokio::test]
    async fn test_failing_notifier_reports_message() {
        let err = RecordingNotifier::failing("relay down")
            .notify(&contact())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("relay down"));
    }

    #[tokio::test]
    async fn test_log_notifier_accepts_everything() {
        assert!(LogNotifier.notify(&contact()).await.is_ok());
        assert_eq!(LogNotifier.name(), "log");
    }
}

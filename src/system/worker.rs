use crate::models::Listing;
use crate::system::source::ListingSource;
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// 목록 가져오기 결과 (요청한 경로와 함께)
#[derive(Debug)]
pub struct ListingLoaded {
    pub path: String,
    pub result: Result<Listing>,
}

/// 목록 요청을 tokio 태스크로 실행하는 워커
///
/// 새 요청이 들어오면 진행 중인 이전 요청을 중단한다. 중단 직전에 이미
/// 보낸 결과는 채널에 남을 수 있으므로, 받는 쪽은 경로를 비교해야 한다.
pub struct ListingWorker {
    source: Arc<dyn ListingSource>,
    result_tx: UnboundedSender<ListingLoaded>,
    result_rx: UnboundedReceiver<ListingLoaded>,
    in_flight: Option<JoinHandle<()>>,
}

impl ListingWorker {
    pub fn new(source: Arc<dyn ListingSource>) -> Self {
        let (result_tx, result_rx) = mpsc::unbounded_channel();
        Self {
            source,
            result_tx,
            result_rx,
            in_flight: None,
        }
    }

    /// 목록 요청. tokio 런타임 안에서 호출해야 한다.
    pub fn request(&mut self, path: impl Into<String>) {
        self.cancel();

        let path = path.into();
        let source = Arc::clone(&self.source);
        let result_tx = self.result_tx.clone();
        tracing::debug!(%path, "listing fetch started");

        self.in_flight = Some(tokio::spawn(async move {
            let result = source.fetch_listing(&path).await;
            // 수신 측이 사라졌으면 결과는 버린다
            let _ = result_tx.send(ListingLoaded { path, result });
        }));
    }

    /// 진행 중인 요청 중단
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                tracing::debug!("aborting in-flight listing fetch");
            }
            handle.abort();
        }
    }

    /// 다음 결과 대기
    pub async fn recv(&mut self) -> Option<ListingLoaded> {
        self.result_rx.recv().await
    }

    /// 도착한 결과가 있으면 반환 (대기하지 않음)
    pub fn try_recv(&mut self) -> Option<ListingLoaded> {
        self.result_rx.try_recv().ok()
    }
}

impl Drop for ListingWorker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FeedBrowserError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::Notify;

    /// 경로별로 응답 시점을 조절할 수 있는 소스
    #[derive(Default)]
    struct GatedSource {
        gates: HashMap<String, Arc<Notify>>,
    }

    #[async_trait]
    impl ListingSource for GatedSource {
        async fn fetch_listing(&self, path: &str) -> Result<Listing> {
            if let Some(gate) = self.gates.get(path) {
                gate.notified().await;
            }
            if path.ends_with("broken") {
                return Err(FeedBrowserError::FetchFailed {
                    path: path.to_string(),
                    reason: "server error".to_string(),
                });
            }
            Ok(Listing::new(path, Vec::new(), vec!["child".to_string()]))
        }
    }

    #[tokio::test]
    async fn test_request_delivers_listing() {
        let mut worker = ListingWorker::new(Arc::new(GatedSource::default()));
        worker.request("/feed/pl-x_1/a");

        let loaded = worker.recv().await.unwrap();
        assert_eq!(loaded.path, "/feed/pl-x_1/a");
        assert_eq!(loaded.result.unwrap().folders, vec!["child".to_string()]);
    }

    #[tokio::test]
    async fn test_request_delivers_error() {
        let mut worker = ListingWorker::new(Arc::new(GatedSource::default()));
        worker.request("/feed/pl-x_1/broken");

        let loaded = worker.recv().await.unwrap();
        assert!(matches!(loaded.result, Err(FeedBrowserError::FetchFailed { .. })));
    }

    #[tokio::test]
    async fn test_new_request_aborts_previous() {
        let slow_gate = Arc::new(Notify::new());
        let mut source = GatedSource::default();
        source
            .gates
            .insert("/feed/pl-x_1/slow".to_string(), Arc::clone(&slow_gate));
        let mut worker = ListingWorker::new(Arc::new(source));

        worker.request("/feed/pl-x_1/slow");
        worker.request("/feed/pl-x_1/fast");

        let loaded = worker.recv().await.unwrap();
        assert_eq!(loaded.path, "/feed/pl-x_1/fast");

        // 중단된 요청은 게이트가 열려도 결과를 보내지 않는다
        slow_gate.notify_waiters();
        tokio::task::yield_now().await;
        assert!(worker.try_recv().is_none());
    }
}

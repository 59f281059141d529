use {
    super::{client::AnalysisProvider, error::AnalysisError, session::Ticket},
    crate::{
        config::DF,
        domain::{AnalysisResult, AnalysisSettings},
        utils::AppInstant,
    },
    eframe::egui::Context,
    std::sync::{
        Arc,
        mpsc::{self, Receiver},
    },
};

#[cfg(not(target_arch = "wasm32"))]
use {std::thread, tokio::runtime::Runtime};

/// Provider handle shared with the background task.
#[cfg(not(target_arch = "wasm32"))]
pub type SharedProvider = Arc<dyn AnalysisProvider + Send + Sync>;
#[cfg(target_arch = "wasm32")]
pub type SharedProvider = Arc<dyn AnalysisProvider>;

/// What comes back from [`spawn_analysis`].
#[derive(Debug)]
pub struct JobResult {
    pub ticket: Ticket,
    pub duration_ms: u128,
    pub result: Result<AnalysisResult, AnalysisError>,
}

/// The unit of work handed to the background task.
#[derive(Debug, Clone)]
pub struct JobRequest {
    pub ticket: Ticket,
    pub image_data_uri: String,
    pub settings: AnalysisSettings,
}

async fn run_job(provider: SharedProvider, req: JobRequest) -> JobResult {
    let start = AppInstant::now();
    let result = provider.analyze(&req.image_data_uri, &req.settings).await;
    let duration_ms = start.elapsed().as_millis();

    if DF.log_performance && duration_ms > DF.slow_request_ms {
        log::warn!(
            "🐢 SLOW ANALYSIS: {} took {}ms on {}",
            req.ticket,
            duration_ms,
            provider.model()
        );
    }

    JobResult {
        ticket: req.ticket,
        duration_ms,
        result,
    }
}

/// Run one analysis off the render loop. The receiver yields exactly one [`JobResult`];
/// the UI is asked to repaint when it lands.
pub fn spawn_analysis(
    provider: SharedProvider,
    req: JobRequest,
    ctx: Context,
) -> Receiver<JobResult> {
    let (tx, rx) = mpsc::channel();

    #[cfg(not(target_arch = "wasm32"))]
    thread::spawn(move || {
        let ticket = req.ticket;
        let outcome = match Runtime::new() {
            Ok(rt) => rt.block_on(run_job(provider, req)),
            Err(e) => JobResult {
                ticket,
                duration_ms: 0,
                result: Err(AnalysisError::Worker(e.to_string())),
            },
        };
        let _ = tx.send(outcome);
        ctx.request_repaint();
    });

    #[cfg(target_arch = "wasm32")]
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = run_job(provider, req).await;
        let _ = tx.send(outcome);
        ctx.request_repaint();
    });

    rx
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::engine::{
        AnalysisSession,
        fakes::{FixedProvider, PanickingProvider},
    };
    use std::time::Duration;

    fn request(ticket: Ticket) -> JobRequest {
        JobRequest {
            ticket,
            image_data_uri: "data:image/png;base64,AAAA".into(),
            settings: AnalysisSettings::default(),
        }
    }

    #[test]
    fn worker_result_settles_session() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin();
        let rx = spawn_analysis(
            Arc::new(FixedProvider::succeeding()),
            request(ticket),
            Context::default(),
        );

        let job = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(job.ticket, ticket);
        assert!(session.resolve(job.ticket, job.result, job.duration_ms));
        assert!(session.result().is_some());
    }

    #[test]
    fn worker_failure_is_delivered() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin();
        let rx = spawn_analysis(
            Arc::new(FixedProvider::failing()),
            request(ticket),
            Context::default(),
        );

        let job = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        session.resolve(job.ticket, job.result, job.duration_ms);
        assert!(session.error().is_some());
    }

    #[test]
    fn panicking_provider_disconnects_the_channel() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin();
        let rx = spawn_analysis(Arc::new(PanickingProvider), request(ticket), Context::default());

        assert!(matches!(
            rx.recv_timeout(Duration::from_secs(5)),
            Err(mpsc::RecvTimeoutError::Disconnected)
        ));
    }
}

use {
    super::error::AnalysisError,
    crate::domain::AnalysisResult,
    chrono::{DateTime, Local},
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Identifies one submission. Later submissions always carry larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A finished analysis and when it landed.
#[derive(Debug, Clone)]
pub struct Completed {
    pub result: AnalysisResult,
    pub finished_at: DateTime<Local>,
    pub duration_ms: u128,
}

#[derive(Debug, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading {
        ticket: Ticket,
    },
    Succeeded(Completed),
    Failed(AnalysisError),
}

/// Request lifecycle for the single chart being analyzed.
///
/// Tickets fence out superseded requests: a resolution for anything but the latest
/// submission is dropped. Clearing does not cancel the in-flight request, so a resolution
/// for the latest ticket that arrives after a clear still settles the state.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    state: RequestState,
    latest: Option<Ticket>,
    issued: u64,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request. Any previous result or error is dropped.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.latest = Some(ticket);
        self.state = RequestState::Loading { ticket };

        #[cfg(debug_assertions)]
        if DF.log_session {
            log::info!("Session: submitted {}", ticket);
        }
        ticket
    }

    /// Apply a worker's outcome. Returns false when the ticket was superseded.
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        outcome: Result<AnalysisResult, AnalysisError>,
        duration_ms: u128,
    ) -> bool {
        if self.latest != Some(ticket) {
            #[cfg(debug_assertions)]
            if DF.log_session {
                log::info!("Session: dropped stale resolution {}", ticket);
            }
            return false;
        }

        self.state = match outcome {
            Ok(result) => RequestState::Succeeded(Completed {
                result,
                finished_at: Local::now(),
                duration_ms,
            }),
            Err(e) => RequestState::Failed(e),
        };

        #[cfg(debug_assertions)]
        if DF.log_session {
            log::info!("Session: settled {} after {}ms", ticket, duration_ms);
        }
        true
    }

    /// Back to idle. An outstanding request keeps running.
    pub fn clear(&mut self) {
        self.state = RequestState::Idle;
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading { .. })
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            RequestState::Succeeded(done) => Some(&done.result),
            _ => None,
        }
    }

    pub fn completed(&self) -> Option<&Completed> {
        match &self.state {
            RequestState::Succeeded(done) => Some(done),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match &self.state {
            RequestState::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn latest_ticket(&self) -> Option<Ticket> {
        self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::sample_result;

    #[test]
    fn begin_enters_loading_and_clears_previous_result() {
        let mut session = AnalysisSession::new();
        let first = session.begin();
        assert!(session.resolve(first, Ok(sample_result()), 10));
        assert!(session.result().is_some());

        session.begin();
        assert!(session.is_loading());
        assert!(session.result().is_none());
        assert!(session.error().is_none());
    }

    #[test]
    fn success_and_failure_settle() {
        let mut session = AnalysisSession::new();
        let t = session.begin();
        session.resolve(t, Ok(sample_result()), 1200);
        let done = session.completed().unwrap();
        assert_eq!(done.duration_ms, 1200);
        assert!(!session.is_loading());

        let t = session.begin();
        session.resolve(t, Err(AnalysisError::EmptyResponse), 5);
        assert!(matches!(session.error(), Some(AnalysisError::EmptyResponse)));
        assert!(session.result().is_none());
    }

    #[test]
    fn tickets_increase() {
        let mut session = AnalysisSession::new();
        let a = session.begin();
        let b = session.begin();
        assert!(b > a);
        assert_eq!(session.latest_ticket(), Some(b));
    }

    #[test]
    fn stale_resolution_is_ignored() {
        let mut session = AnalysisSession::new();
        let old = session.begin();
        let new = session.begin();

        assert!(!session.resolve(old, Ok(sample_result()), 1));
        assert!(session.is_loading());

        assert!(session.resolve(new, Err(AnalysisError::EmptyResponse), 1));
        assert!(!session.resolve(old, Ok(sample_result()), 1));
        assert!(session.error().is_some());
    }

    #[test]
    fn clear_while_loading_does_not_cancel() {
        let mut session = AnalysisSession::new();
        let t = session.begin();
        session.clear();
        assert!(matches!(session.state(), RequestState::Idle));

        assert!(session.resolve(t, Ok(sample_result()), 1));
        assert!(session.result().is_some());
    }

    #[test]
    fn clear_after_settle_returns_to_idle() {
        let mut session = AnalysisSession::new();
        let t = session.begin();
        session.resolve(t, Err(AnalysisError::MissingApiKey), 0);
        session.clear();
        assert!(matches!(session.state(), RequestState::Idle));
        assert!(session.error().is_none());
    }
}

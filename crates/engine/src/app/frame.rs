use std::time::{Duration, Instant};

/// Caps how often the update/render body runs. Elapsed time is accumulated
/// across skipped callbacks and the remainder past one budget carries over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLimiter {
    budget: Duration,
    accumulated: Duration,
}

impl FrameLimiter {
    pub fn from_fps(max_fps: u32) -> Self {
        Self {
            budget: Duration::from_nanos(1_000_000_000 / u64::from(max_fps.max(1))),
            accumulated: Duration::ZERO,
        }
    }

    #[cfg(test)]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    #[cfg(test)]
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    pub fn admit(&mut self, elapsed: Duration) -> bool {
        self.accumulated = self.accumulated.saturating_add(elapsed);
        if self.accumulated < self.budget {
            return false;
        }
        let remainder_nanos = self.accumulated.as_nanos() % self.budget.as_nanos().max(1);
        self.accumulated = Duration::from_nanos(remainder_nanos as u64);
        true
    }

    pub fn time_until_due(&self) -> Duration {
        self.budget.saturating_sub(self.accumulated)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDecision {
    Run { elapsed: Duration },
    Skip,
    Stale,
}

#[derive(Debug)]
pub struct FrameScheduler {
    limiter: Option<FrameLimiter>,
    pending: Option<FrameRequest>,
    next_request_id: u64,
    last_callback: Option<Instant>,
    last_run: Option<Instant>,
}

impl FrameScheduler {
    pub fn new(max_fps: Option<u32>) -> Self {
        Self {
            limiter: max_fps.filter(|fps| *fps > 0).map(FrameLimiter::from_fps),
            pending: None,
            next_request_id: 0,
            last_callback: None,
            last_run: None,
        }
    }

    pub fn is_limited(&self) -> bool {
        self.limiter.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<FrameRequest> {
        self.pending
    }

    pub fn start(&mut self, now: Instant) -> FrameRequest {
        self.last_callback = Some(now);
        self.last_run = Some(now);
        if let Some(limiter) = self.limiter.as_mut() {
            limiter.accumulated = Duration::ZERO;
        }
        self.schedule()
    }

    pub fn stop(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn on_callback(&mut self, request: FrameRequest, now: Instant) -> FrameDecision {
        if self.pending != Some(request) {
            return FrameDecision::Stale;
        }
        let since_callback = self
            .last_callback
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last_callback = Some(now);
        self.schedule();

        if let Some(limiter) = self.limiter.as_mut() {
            if !limiter.admit(since_callback) {
                return FrameDecision::Skip;
            }
        }

        let elapsed = self
            .last_run
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last_run = Some(now);
        FrameDecision::Run { elapsed }
    }

    pub fn time_until_due(&self, now: Instant) -> Duration {
        let Some(limiter) = self.limiter else {
            return Duration::ZERO;
        };
        let since_callback = self
            .last_callback
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        limiter.time_until_due().saturating_sub(since_callback)
    }

    fn schedule(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next_request_id);
        self.next_request_id = self.next_request_id.saturating_add(1);
        self.pending = Some(request);
        request
    }
}

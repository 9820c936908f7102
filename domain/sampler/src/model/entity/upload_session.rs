use crate::exception::{SamplerException, SamplerResult};
use crate::model::vo::UploadTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Accumulating,
    Finalized,
}

/// What a single chunk request does to its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The target already holds its artifact; accept and do nothing.
    Acknowledge,
    /// Persist the payload as chunk `nth`.
    StoreChunk(u32),
    /// Reassemble chunks `1..chunk_count` followed by the inline payload.
    Finalize,
}

/// An in-flight chunked upload for one logical target.
///
/// Chunks may arrive in any order; only the request whose index equals
/// `chunk_count` imposes order, by reassembling everything before it.
#[derive(Debug, Clone)]
pub struct UploadSession {
    pub target: UploadTarget,
    pub chunk_count: u32,
    pub state: SessionState,
}

impl UploadSession {
    /// Opens a session view for a request declaring `chunk_count` chunks.
    ///
    /// `finalized` is the target's durable guard. Only data targets have one.
    pub fn new(target: UploadTarget, chunk_count: u32, finalized: bool) -> Self {
        let state = if finalized && target.is_data() {
            SessionState::Finalized
        } else {
            SessionState::NotStarted
        };
        Self {
            target,
            chunk_count,
            state,
        }
    }

    pub fn next(&self, nth: u32) -> SamplerResult<Transition> {
        if self.state == SessionState::Finalized {
            return Ok(Transition::Acknowledge);
        }
        if self.chunk_count == 0 || nth == 0 || nth > self.chunk_count {
            return Err(SamplerException::UnexpectedChunkIndex {
                nth,
                chunks: self.chunk_count,
            });
        }
        Ok(if nth < self.chunk_count {
            Transition::StoreChunk(nth)
        } else {
            Transition::Finalize
        })
    }

    /// Records a transition that was carried out successfully.
    pub fn apply(&mut self, transition: Transition) {
        self.state = match transition {
            Transition::Acknowledge => self.state,
            Transition::StoreChunk(_) => SessionState::Accumulating,
            // A finished log upload leaves room for the next one.
            Transition::Finalize if self.target.is_data() => SessionState::Finalized,
            Transition::Finalize => SessionState::NotStarted,
        };
    }
}

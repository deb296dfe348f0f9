use std::collections::{HashMap, VecDeque};

use uuid::Uuid;

/// FIFO request queue with out-of-band responses keyed by request id.
///
/// Requests stay queued until a response for them arrives or they are
/// removed; the page may poll the same request more than once.
#[derive(Debug)]
pub(crate) struct RequestQueue<Req, Resp> {
    requests: VecDeque<(Uuid, Req)>,
    responses: HashMap<Uuid, Resp>,
}

impl<Req, Resp> RequestQueue<Req, Resp> {
    pub fn new() -> Self {
        Self { requests: VecDeque::new(), responses: HashMap::new() }
    }

    pub fn add_request(&mut self, id: Uuid, request: Req) {
        self.requests.push_back((id, request));
    }

    pub fn has_request(&self, id: &Uuid) -> bool {
        self.requests.iter().any(|(request_id, _)| request_id == id)
    }

    /// Peeks at the next pending request without removing it.
    pub fn read_request(&self) -> Option<&Req> {
        self.requests.front().map(|(_, request)| request)
    }

    pub fn remove_request(&mut self, id: &Uuid) {
        self.requests.retain(|(request_id, _)| request_id != id);
    }

    pub fn add_response(&mut self, id: Uuid, response: Resp) {
        self.responses.insert(id, response);
    }

    /// Takes the response for `id`, removing it from the queue.
    pub fn take_response(&mut self, id: &Uuid) -> Option<Resp> {
        self.responses.remove(id)
    }
}

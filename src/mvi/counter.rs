//! Monotonic submit trigger.

/// Counter that drives a side-effecting request.
///
/// Controllers compare the value before and after dispatching a submit intent
/// and issue exactly one request per increment. Unrelated re-renders never
/// change the value, so they never re-issue the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmitCounter(u64);

impl SubmitCounter {
    pub fn bump(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

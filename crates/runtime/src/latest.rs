/// Single-slot mailbox that keeps only the most recent submission.
///
/// Label passes are not cancellable, so a caller that receives viewport
/// updates faster than it can recompute parks them here and runs the next
/// pass on whatever is newest. Older submissions are dropped, never queued.
#[derive(Debug)]
pub struct Latest<T> {
    pending: Option<T>,
    superseded: u64,
}

impl<T> Default for Latest<T> {
    fn default() -> Self {
        Self {
            pending: None,
            superseded: 0,
        }
    }
}

impl<T> Latest<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value`, returning the pending value it replaced.
    pub fn submit(&mut self, value: T) -> Option<T> {
        let replaced = self.pending.replace(value);
        if replaced.is_some() {
            self.superseded += 1;
        }
        replaced
    }

    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of submissions dropped because a newer one arrived first.
    pub fn superseded(&self) -> u64 {
        self.superseded
    }
}

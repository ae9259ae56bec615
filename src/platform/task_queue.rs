//! Virtual-time task queue
//!
//! Frames and intervals become due against a millisecond clock that only
//! moves when the host asks for work up to some time. Host input (clicks,
//! resizes, restarts) is delivered before any timer at the current time.

use std::collections::VecDeque;

use super::{Task, TimerId, Timers};

#[derive(Debug, Clone, Copy)]
struct Interval {
    id: TimerId,
    period_ms: f64,
    next_due_ms: f64,
}

/// Single-owner event loop implementing [`Timers`]
#[derive(Debug)]
pub struct TaskQueue {
    now_ms: f64,
    frame_period_ms: f64,
    next_id: u64,
    frame: Option<(TimerId, f64)>,
    intervals: Vec<Interval>,
    inbox: VecDeque<Task>,
}

impl TaskQueue {
    pub fn new(frame_period_ms: f64) -> Self {
        Self {
            now_ms: 0.0,
            frame_period_ms: frame_period_ms.max(f64::EPSILON),
            next_id: 1,
            frame: None,
            intervals: Vec::new(),
            inbox: VecDeque::new(),
        }
    }

    /// Current virtual time
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Queue host input for delivery at the current time
    pub fn push(&mut self, task: Task) {
        self.inbox.push_back(task);
    }

    /// Whether a frame request is outstanding
    pub fn frame_pending(&self) -> bool {
        self.frame.is_some()
    }

    /// Number of running intervals
    pub fn active_intervals(&self) -> usize {
        self.intervals.len()
    }

    /// Pop the next task due at or before `until_ms`.
    ///
    /// Returns `None` once nothing else is due; the clock is then moved to
    /// `until_ms`.
    pub fn next_task(&mut self, until_ms: f64) -> Option<Task> {
        if let Some(task) = self.inbox.pop_front() {
            return Some(task);
        }

        let frame_due = self.frame.map(|(_, due)| due);
        let interval = self
            .intervals
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.next_due_ms.total_cmp(&b.next_due_ms))
            .map(|(idx, i)| (idx, i.next_due_ms));

        let next = match (frame_due, interval) {
            (Some(f), Some((_, i))) if f <= i => Some(f),
            (Some(f), None) => Some(f),
            (_, Some((_, i))) => Some(i),
            (None, None) => None,
        };

        match next {
            Some(due) if due <= until_ms => {
                self.now_ms = self.now_ms.max(due);
                if frame_due == Some(due) {
                    let (id, _) = self.frame.take()?;
                    return Some(Task::Frame(id));
                }
                let (idx, _) = interval?;
                let timer = &mut self.intervals[idx];
                timer.next_due_ms += timer.period_ms;
                Some(Task::Interval(timer.id))
            }
            _ => {
                self.now_ms = self.now_ms.max(until_ms);
                None
            }
        }
    }

    fn allocate(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Timers for TaskQueue {
    fn request_frame(&mut self) -> TimerId {
        if let Some((id, _)) = self.frame {
            return id;
        }
        let id = self.allocate();
        self.frame = Some((id, self.now_ms + self.frame_period_ms));
        id
    }

    fn cancel_frame(&mut self, id: TimerId) {
        if self.frame.is_some_and(|(pending, _)| pending == id) {
            self.frame = None;
        }
    }

    fn set_interval(&mut self, period_ms: u32) -> TimerId {
        let id = self.allocate();
        let period_ms = f64::from(period_ms.max(1));
        self.intervals.push(Interval {
            id,
            period_ms,
            next_due_ms: self.now_ms + period_ms,
        });
        id
    }

    fn clear_interval(&mut self, id: TimerId) {
        self.intervals.retain(|i| i.id != id);
    }
}

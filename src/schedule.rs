/// A set of events pending at millisecond deadlines. `pop_due` hands back
/// what is due by `now`, ordered by deadline and, for equal deadlines, by
/// scheduling order. The game engine never blocks on a timer; all of its
/// choreography goes through one of these.
#[derive(Clone)]
pub struct Timeline<T> {
    pending: Vec<Entry<T>>,
    seq: usize,
}

#[derive(Clone)]
struct Entry<T> {
    deadline: f64,
    seq: usize,
    event: T,
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Timeline {
            pending: Vec::new(),
            seq: 0,
        }
    }

    pub fn schedule(&mut self, deadline: f64, event: T) {
        self.pending.push(Entry {
            deadline,
            seq: self.seq,
            event,
        });
        self.seq += 1;
    }

    /// Removes and returns the earliest event with `deadline <= now`, paired
    /// with its deadline so the caller can schedule follow-ups relative to the
    /// instant the event was due rather than the instant it was observed.
    /// Events an application handler schedules inside the same window are
    /// picked up by the next call.
    pub fn pop_due(&mut self, now: f64) -> Option<(f64, T)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by(|(_, a), (_, b)| {
                a.deadline
                    .partial_cmp(&b.deadline)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.seq.cmp(&b.seq))
            })
            .map(|(i, _)| i)?;
        let entry = self.pending.remove(index);
        Some((entry.deadline, entry.event))
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn drain<T>(timeline: &mut Timeline<T>, now: f64) -> Vec<(f64, T)> {
        let mut due = Vec::new();
        while let Some(event) = timeline.pop_due(now) {
            due.push(event);
        }
        due
    }

    #[test]
    fn test_due_events_in_deadline_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(400., "b");
        timeline.schedule(100., "a");
        timeline.schedule(800., "c");

        assert_eq!(drain(&mut timeline, 400.), vec![(100., "a"), (400., "b")]);
        assert!(!timeline.is_empty());
        assert_eq!(drain(&mut timeline, 800.), vec![(800., "c")]);
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_ties_keep_scheduling_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(400., 1);
        timeline.schedule(400., 2);
        timeline.schedule(400., 3);

        assert_eq!(
            drain(&mut timeline, 1000.),
            vec![(400., 1), (400., 2), (400., 3)]
        );
    }

    #[test]
    fn test_nothing_due_yet() {
        let mut timeline = Timeline::new();
        timeline.schedule(500., ());
        assert_eq!(timeline.pop_due(499.), None);
        assert_eq!(timeline.pop_due(500.), Some((500., ())));
        assert_eq!(timeline.pop_due(500.), None);
    }
}

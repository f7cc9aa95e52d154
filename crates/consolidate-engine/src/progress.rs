/// Receives transfer progress ticks.
///
/// `activity` names the running transfer (e.g. "Moving new"), `item` is the
/// entry just processed relative to the project root and `percent` is the
/// completion of the directory level it belongs to.
pub trait ProgressSink {
    fn report(&mut self, activity: &str, item: &str, percent: u8);
}

impl<F> ProgressSink for F
where
    F: FnMut(&str, &str, u8),
{
    fn report(&mut self, activity: &str, item: &str, percent: u8) {
        self(activity, item, percent)
    }
}

/// Ignores progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _activity: &str, _item: &str, _percent: u8) {}
}

pub(crate) fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done.min(total) * 100) / total) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_bounds() {
        assert_eq!(percent(0, 0), 100);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(3, 3), 100);
        assert_eq!(percent(5, 3), 100);
    }

    #[test]
    fn test_closure_is_a_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |_activity: &str, item: &str, percent: u8| {
                seen.push((item.to_string(), percent))
            };
            sink.report("Moving", "a", 50);
        }
        assert_eq!(seen, vec![("a".to_string(), 50)]);
    }
}

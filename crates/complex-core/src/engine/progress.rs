#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// The assembly started from `chains` chains and aims for `target`.
    AssemblyStart { chains: u64, target: u64 },
    /// A fragment is being tried.
    FragmentAttempt { iteration: usize, fragment: String },
    /// A chain joined the complex, which now holds `total` chains.
    ChainMerged { label: String, total: u64 },
    AssemblyFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::Message("nobody listens".to_string()));
    }

    #[test]
    fn reporter_forwards_events_in_order() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            seen.lock().unwrap().push(event);
        }));

        reporter.report(Progress::AssemblyStart {
            chains: 2,
            target: 4,
        });
        reporter.report(Progress::ChainMerged {
            label: "C".to_string(),
            total: 3,
        });
        drop(reporter);

        let seen = seen.into_inner().unwrap();
        assert_eq!(
            seen,
            vec![
                Progress::AssemblyStart {
                    chains: 2,
                    target: 4
                },
                Progress::ChainMerged {
                    label: "C".to_string(),
                    total: 3
                },
            ]
        );
    }
}

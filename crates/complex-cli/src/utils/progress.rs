use complexbuilder::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::time::Duration;

const SPINNER_TICK_MS: u64 = 80;

/// Renders assembly progress on stderr: a spinner while a phase is set up, then a bar
/// counting chains up to the target stoichiometry.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: ProgressBar,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), target).with_style(spinner_style());
        pb.finish_and_clear();
        Self { pb }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb = self.pb.clone();
        Box::new(move |progress: Progress| render(&pb, progress))
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn render(pb: &ProgressBar, progress: Progress) {
    match progress {
        Progress::PhaseStart { name } => {
            pb.reset();
            pb.set_length(0);
            pb.set_style(spinner_style());
            pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
            pb.set_message(name);
        }
        Progress::AssemblyStart { chains, target } => {
            pb.disable_steady_tick();
            pb.reset();
            pb.set_style(bar_style());
            pb.set_length(target);
            pb.set_position(chains.min(target));
            pb.set_message("Assembling");
        }
        Progress::FragmentAttempt {
            iteration,
            fragment,
        } => pb.set_message(format!("#{iteration} {fragment}")),
        Progress::ChainMerged { label, total } => {
            let target = pb.length().unwrap_or(total);
            pb.set_position(total.min(target));
            pb.println(format!("  + chain {label} ({total}/{target})"));
        }
        // Abandoning keeps the bar at the chain count actually reached.
        Progress::AssemblyFinish => pb.abandon(),
        Progress::PhaseFinish => {
            pb.disable_steady_tick();
            pb.abandon_with_message("✓ Done");
        }
        Progress::Message(msg) if pb.is_finished() => pb.set_message(msg),
        Progress::Message(msg) => pb.println(format!("  {msg}")),
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg:<28} [{bar:40.cyan/blue}] {pos}/{len} chains ({secs})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .with_key("secs", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.1}s", state.elapsed().as_secs_f64());
        })
        .progress_chars("##-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden_handler() -> CliProgressHandler {
        CliProgressHandler::with_draw_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn handler_starts_finished_and_empty() {
        let handler = hidden_handler();
        assert_eq!(handler.pb.length(), Some(0));
        assert!(handler.pb.is_finished());
    }

    #[test]
    fn bar_follows_an_assembly_run() {
        let handler = hidden_handler();
        let callback = handler.get_callback();
        let pb = &handler.pb;

        callback(Progress::PhaseStart { name: "Assembly" });
        assert_eq!(pb.message(), "Assembly");
        assert!(!pb.is_finished());

        callback(Progress::AssemblyStart {
            chains: 2,
            target: 6,
        });
        assert_eq!((pb.position(), pb.length()), (2, Some(6)));

        callback(Progress::FragmentAttempt {
            iteration: 1,
            fragment: "b_c.pdb".to_string(),
        });
        assert_eq!(pb.message(), "#1 b_c.pdb");

        callback(Progress::ChainMerged {
            label: "C".to_string(),
            total: 3,
        });
        assert_eq!(pb.position(), 3);

        callback(Progress::AssemblyFinish);
        assert!(pb.is_finished());
        assert_eq!(pb.position(), 3);

        callback(Progress::PhaseFinish);
        assert_eq!(pb.message(), "✓ Done");
    }

    #[test]
    fn stopped_assembly_keeps_the_reached_chain_count() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Assembly" });
        callback(Progress::AssemblyStart {
            chains: 2,
            target: 6,
        });
        callback(Progress::ChainMerged {
            label: "C".to_string(),
            total: 3,
        });
        callback(Progress::AssemblyFinish);
        callback(Progress::PhaseFinish);

        assert!(handler.pb.is_finished());
        assert_eq!(handler.pb.position(), 3);
        assert_eq!(handler.pb.length(), Some(6));
        assert_eq!(handler.pb.message(), "✓ Done");
    }

    #[test]
    fn position_is_capped_at_the_target() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        callback(Progress::AssemblyStart {
            chains: 5,
            target: 4,
        });
        callback(Progress::ChainMerged {
            label: "F".to_string(),
            total: 6,
        });

        assert_eq!(handler.pb.position(), 4);
    }

    #[test]
    fn messages_after_the_run_replace_the_status_line() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        callback(Progress::Message("wrote macrocomplex.pdb".to_string()));

        assert_eq!(handler.pb.message(), "wrote macrocomplex.pdb");
    }

    #[test]
    fn callback_can_move_to_another_thread() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        std::thread::spawn(move || {
            callback(Progress::PhaseStart { name: "Threaded" });
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        assert!(handler.pb.is_finished());
        assert_eq!(handler.pb.message(), "✓ Done");
    }
}

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use surfdock::engine::progress::{Progress, ProgressCallback};
use tokio::sync::{mpsc, watch};
use tracing::warn;

const EVENT_CHANNEL_CAPACITY: usize = 4096;
const SPINNER_TICK_MS: u64 = 80;

#[derive(Debug)]
pub enum UiEvent {
    Progress(Progress),
    Log(String),
}

/// Owns the terminal while a command runs: one spinner per phase, with log lines and
/// docking output printed above it.
pub struct UiManager {
    mp: Arc<MultiProgress>,
    state: BarState,
    event_receiver: mpsc::Receiver<UiEvent>,
    shutdown_receiver: watch::Receiver<bool>,
    _sentinel_bar: ProgressBar,
}

#[derive(Default)]
struct BarState {
    active_bar: Option<ProgressBar>,
    base_message: String,
}

impl UiManager {
    pub fn new() -> (Self, mpsc::Sender<UiEvent>, watch::Sender<bool>) {
        let (event_sender, event_receiver) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (shutdown_sender, shutdown_receiver) = watch::channel(false);
        let mp = Arc::new(MultiProgress::new());
        mp.set_draw_target(ProgressDrawTarget::stderr_with_hz(12));
        let _sentinel_bar = mp.add(ProgressBar::hidden());
        let manager = Self {
            mp,
            state: BarState::default(),
            event_receiver,
            shutdown_receiver,
            _sentinel_bar,
        };

        (manager, event_sender, shutdown_sender)
    }

    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(event) = self.event_receiver.recv() => {
                    self.handle_event(event);
                }
                result = self.shutdown_receiver.changed() => {
                    if result.is_err() || *self.shutdown_receiver.borrow() {
                        break;
                    }
                }
            }
        }
        while let Ok(event) = self.event_receiver.try_recv() {
            self.handle_event(event);
        }
        if let Some(bar) = self.state.active_bar.take() {
            bar.finish_and_clear();
        }
        self._sentinel_bar.finish_and_clear();
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Log(msg) => {
                self.mp.println(msg).ok();
            }
            UiEvent::Progress(progress) => self.handle_progress(progress),
        }
    }

    fn handle_progress(&mut self, progress: Progress) {
        match progress {
            Progress::PhaseStart { name } => {
                if let Some(bar) = self.state.active_bar.take() {
                    bar.finish_and_clear();
                }

                let pb = self.mp.add(ProgressBar::new_spinner());
                pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                pb.set_style(Self::spinner_style());
                pb.set_message(name.to_string());

                self.state.active_bar = Some(pb);
                self.state.base_message = name.to_string();
            }
            Progress::PhaseFinish => {
                if let Some(bar) = self.state.active_bar.take() {
                    bar.finish_and_clear();
                }

                let final_message = format!("✓ {}", self.state.base_message);
                self.mp.println(final_message).ok();

                self.state.base_message.clear();
            }
            Progress::ProcessStarted { pid } => {
                if let Some(bar) = self.state.active_bar.as_ref() {
                    bar.set_message(format!("{} (pid {})", self.state.base_message, pid));
                }
                self.mp.println(format!("  Started docking process {}", pid)).ok();
            }
            Progress::ProcessOutput(line) => {
                self.mp.println(format!("  │ {}", line)).ok();
            }
            Progress::Message(msg) => {
                self.mp.println(format!("  {}", msg)).ok();
            }
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
    }
}

#[derive(Clone)]
pub struct CliProgressHandler {
    sender: mpsc::Sender<UiEvent>,
}

impl CliProgressHandler {
    pub fn new(sender: mpsc::Sender<UiEvent>) -> Self {
        Self { sender }
    }

    /// Forwards engine progress to the UI task. Events are dropped with a warning when the
    /// channel is full; the docking log keeps the complete output.
    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let sender = self.sender.clone();
        Box::new(move |progress: Progress| {
            if let Err(e) = sender.try_send(UiEvent::Progress(progress)) {
                warn!("Failed to send progress update to UI channel: {}", e);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_drops_events_on_a_full_channel_without_blocking() {
        let (sender, mut receiver) = mpsc::channel(1);
        let callback = CliProgressHandler::new(sender).get_callback();

        callback(Progress::ProcessOutput("first".to_string()));
        callback(Progress::ProcessOutput("second".to_string()));

        match receiver.try_recv() {
            Ok(UiEvent::Progress(Progress::ProcessOutput(line))) => assert_eq!(line, "first"),
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(receiver.try_recv().is_err());
    }

    fn setup_manager() -> (UiManager, mpsc::Sender<UiEvent>) {
        let (manager, sender, _) = UiManager::new();
        manager.mp.set_draw_target(ProgressDrawTarget::hidden());
        (manager, sender)
    }

    #[test]
    fn handle_phase_start_creates_new_spinner() {
        let (mut manager, _) = setup_manager();
        assert!(manager.state.active_bar.is_none());

        manager.handle_event(UiEvent::Progress(Progress::PhaseStart { name: "Validation" }));

        let bar = manager.state.active_bar.as_ref().unwrap();
        assert_eq!(bar.message(), "Validation");
        assert_eq!(manager.state.base_message, "Validation");
    }

    #[test]
    fn handle_phase_start_replaces_existing_bar() {
        let (mut manager, _) = setup_manager();
        manager.handle_event(UiEvent::Progress(Progress::PhaseStart { name: "Validation" }));
        manager.handle_event(UiEvent::Progress(Progress::PhaseStart { name: "Docking" }));

        let bar = manager.state.active_bar.as_ref().unwrap();
        assert_eq!(bar.message(), "Docking");
        assert_eq!(manager.state.base_message, "Docking");
    }

    #[test]
    fn handle_phase_finish_clears_active_bar() {
        let (mut manager, _) = setup_manager();
        manager.handle_event(UiEvent::Progress(Progress::PhaseStart { name: "Preparation" }));

        manager.handle_event(UiEvent::Progress(Progress::PhaseFinish));

        assert!(manager.state.active_bar.is_none());
        assert!(manager.state.base_message.is_empty());
    }

    #[test]
    fn process_start_annotates_spinner_with_pid() {
        let (mut manager, _) = setup_manager();
        manager.handle_event(UiEvent::Progress(Progress::PhaseStart { name: "Docking" }));

        manager.handle_event(UiEvent::Progress(Progress::ProcessStarted { pid: 4242 }));

        let bar = manager.state.active_bar.as_ref().unwrap();
        assert_eq!(bar.message(), "Docking (pid 4242)");
    }

    #[test]
    fn process_output_and_messages_are_printed() {
        let (mut manager, _) = setup_manager();
        manager.handle_event(UiEvent::Progress(Progress::ProcessOutput(
            "protocols.surface_docking: cycle 1".to_string(),
        )));
        manager.handle_event(UiEvent::Progress(Progress::Message("note".to_string())));
        manager.handle_event(UiEvent::Log("log line".to_string()));
        assert!(manager.state.active_bar.is_none());
    }

    #[tokio::test]
    async fn cli_progress_handler_sends_progress_event() {
        let (sender, mut receiver) = mpsc::channel(1);
        let handler = CliProgressHandler::new(sender);
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Testing" });

        match receiver.recv().await {
            Some(UiEvent::Progress(Progress::PhaseStart { name })) => assert_eq!(name, "Testing"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn manager_drains_pending_events_on_shutdown() {
        let (manager, sender, shutdown) = UiManager::new();
        manager.mp.set_draw_target(ProgressDrawTarget::hidden());
        let handle = tokio::spawn(manager.run());

        sender.send(UiEvent::Log("last words".to_string())).await.unwrap();
        shutdown.send(true).unwrap();
        handle.await.unwrap();
    }
}

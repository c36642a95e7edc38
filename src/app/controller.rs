//! Application controller and coordination layer
//!
//! The controller owns the overlay for one session. It captures the work
//! area, feeds overlay events into the [`Session`] one at a time and carries
//! out the returned commands against the [`WindowSystem`]. Every event is
//! fully handled, including any foreground wait it triggers, before the next
//! one is read.

use std::collections::VecDeque;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::app::state::{
    AbortReason, Command, Session, SessionEvent, SessionOutcome, TargetCandidate,
};
use crate::config::{ConfigError, SettingsStore};
use crate::domain::core::Rect;
use crate::domain::grid::{GridError, TileCount};
use crate::input::{Key, OverlayEvent};
use crate::platform::{PlatformError, WindowId, WindowSystem};
use crate::ui::frame::{self, OverlayFrame, SharedFrame};

/// Application errors that end the process
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No monitor found for window {0:?}")]
    NoMonitor(WindowId),
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("tile-screen only runs on Windows")]
    UnsupportedPlatform,
}

/// Timing of the foreground waits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Time between foreground window checks
    pub poll_interval: Duration,
    /// Give up waiting after this long; `None` waits until the overlay goes away
    pub target_timeout: Option<Duration>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            target_timeout: None,
        }
    }
}

/// How a foreground wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WaitOutcome {
    Foreground(Option<WindowId>),
    Cancelled,
    Destroyed,
    TimedOut,
}

/// Drives one overlay session
pub struct SessionController<W: WindowSystem> {
    windows: W,
    settings: SettingsStore,
    config: ControllerConfig,
    frame: SharedFrame,
}

impl<W: WindowSystem> SessionController<W> {
    pub fn new(windows: W, settings: SettingsStore, config: ControllerConfig) -> Self {
        let config = ControllerConfig {
            poll_interval: config.poll_interval.max(Duration::from_millis(1)),
            ..config
        };
        Self {
            windows,
            settings,
            config,
            frame: frame::share(OverlayFrame::default()),
        }
    }

    pub fn window_system(&self) -> &W {
        &self.windows
    }

    pub fn frame(&self) -> &SharedFrame {
        &self.frame
    }

    /// Runs a whole session: create the overlay, capture the work area,
    /// then handle overlay events until the session finishes
    ///
    /// # Returns
    /// The session outcome, or `AppError` for environment failures
    pub async fn run(&self, tile_count: TileCount) -> Result<SessionOutcome, AppError> {
        let (sender, mut events) = mpsc::unbounded_channel();
        let overlay =
            self.windows
                .create_overlay(Rect::default(), self.frame.clone(), sender)?;
        self.windows.minimize(overlay);

        let work_area = match self.capture_work_area(overlay, &mut events).await? {
            Ok(work_area) => work_area,
            Err(reason) => {
                if reason != AbortReason::OverlayDestroyed {
                    self.windows.close(overlay);
                }
                info!(?reason, "session ended before the work area was captured");
                return Ok(SessionOutcome::Aborted(reason));
            }
        };

        let session = match Session::new(work_area, tile_count) {
            Ok(session) => session,
            Err(err) => {
                self.windows.close(overlay);
                return Err(err.into());
            }
        };
        frame::publish(&self.frame, session.frame());
        self.windows.show_overlay(overlay, work_area)?;
        info!(?work_area, %tile_count, "overlay ready");

        self.drive(overlay, session, &mut events).await
    }

    /// Waits for the user to leave the minimized overlay and returns the
    /// work area of the monitor they landed on
    ///
    /// The inner `Err` carries why the session ended before that happened.
    pub async fn capture_work_area(
        &self,
        overlay: WindowId,
        events: &mut UnboundedReceiver<OverlayEvent>,
    ) -> Result<Result<Rect, AbortReason>, AppError> {
        let outcome = self
            .wait_for_foreground(events, |foreground| {
                foreground.is_some_and(|window| window != overlay)
            })
            .await;

        let window = match outcome {
            WaitOutcome::Foreground(Some(window)) => window,
            WaitOutcome::Foreground(None) => return Ok(Err(AbortReason::NoTarget)),
            WaitOutcome::Cancelled => return Ok(Err(AbortReason::Cancelled)),
            WaitOutcome::Destroyed => return Ok(Err(AbortReason::OverlayDestroyed)),
            WaitOutcome::TimedOut => return Ok(Err(AbortReason::TimedOut)),
        };

        let monitor = self
            .windows
            .monitor_for_window(window)
            .ok_or(AppError::NoMonitor(window))?;
        let work_area = self.windows.monitor_work_area(monitor)?;
        debug!(?window, ?monitor, ?work_area, "work area captured");
        Ok(Ok(work_area))
    }

    /// Feeds overlay events into `session` until it finishes
    pub async fn drive(
        &self,
        overlay: WindowId,
        mut session: Session,
        events: &mut UnboundedReceiver<OverlayEvent>,
    ) -> Result<SessionOutcome, AppError> {
        loop {
            if let Some(outcome) = session.outcome() {
                info!(?outcome, "session finished");
                return Ok(outcome);
            }

            let event = match events.recv().await {
                Some(event) => event,
                None => OverlayEvent::Destroyed,
            };
            let Some(event) = session_event(event) else {
                continue;
            };

            let commands = session.handle(event);
            self.execute(overlay, &mut session, commands, events).await;
        }
    }

    async fn execute(
        &self,
        overlay: WindowId,
        session: &mut Session,
        commands: Vec<Command>,
        events: &mut UnboundedReceiver<OverlayEvent>,
    ) {
        let mut pending = VecDeque::from(commands);
        while let Some(command) = pending.pop_front() {
            debug!(?command, "executing");
            match command {
                Command::Invalidate => {
                    frame::publish(&self.frame, session.frame());
                    self.windows.invalidate(overlay);
                }
                Command::MinimizeOverlay => self.windows.minimize(overlay),
                Command::AwaitTarget => {
                    let event = self.await_target(overlay, events).await;
                    pending.extend(session.handle(event));
                }
                Command::RestoreWindow(window) => self.windows.restore(window),
                Command::ApplyGeometry { window, geometry } => {
                    if let Err(err) = self.windows.set_window_geometry(window, geometry) {
                        warn!(%err, ?geometry, "failed to place window");
                    } else {
                        info!(?window, ?geometry, "window placed");
                    }
                }
                Command::PersistTileCount(count) => {
                    if let Err(err) = self.settings.save(count) {
                        debug!(%err, "tile count not persisted");
                    }
                }
                Command::CloseOverlay => self.windows.close(overlay),
            }
        }
    }

    /// Waits for the target window and describes it to the session
    async fn await_target(
        &self,
        overlay: WindowId,
        events: &mut UnboundedReceiver<OverlayEvent>,
    ) -> SessionEvent {
        let outcome = self
            .wait_for_foreground(events, |foreground| foreground != Some(overlay))
            .await;

        match outcome {
            WaitOutcome::Foreground(foreground) => {
                SessionEvent::TargetResolved(self.describe_target(foreground))
            }
            WaitOutcome::Cancelled => SessionEvent::Cancel,
            WaitOutcome::Destroyed => SessionEvent::OverlayDestroyed,
            WaitOutcome::TimedOut => {
                warn!("no target window activated in time");
                SessionEvent::TargetWaitTimedOut
            }
        }
    }

    fn describe_target(&self, foreground: Option<WindowId>) -> TargetCandidate {
        let Some(window) = foreground else {
            warn!("no foreground window");
            return TargetCandidate::Missing;
        };
        if self.windows.is_desktop(window) {
            warn!("desktop activated, nothing to place");
            return TargetCandidate::Desktop;
        }

        let work_area = match self.windows.monitor_for_window(window) {
            Some(monitor) => match self.windows.monitor_work_area(monitor) {
                Ok(work_area) => Some(work_area),
                Err(err) => {
                    warn!(%err, "target monitor unreadable");
                    None
                }
            },
            None => {
                warn!(?window, "target window is on no monitor");
                None
            }
        };
        TargetCandidate::Window { window, work_area }
    }

    /// Polls the foreground window every tick until `accept` approves it
    ///
    /// Escape, destruction of the overlay (or its event channel closing) and
    /// the optional timeout end the wait early. Other overlay events are
    /// dropped.
    async fn wait_for_foreground(
        &self,
        events: &mut UnboundedReceiver<OverlayEvent>,
        accept: impl Fn(Option<WindowId>) -> bool,
    ) -> WaitOutcome {
        let period = self.config.poll_interval;
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let deadline = self.config.target_timeout.map(|timeout| Instant::now() + timeout);
        let timeout = async move {
            match deadline {
                Some(deadline) => time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::pin!(timeout);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let foreground = self.windows.foreground_window();
                    if accept(foreground) {
                        return WaitOutcome::Foreground(foreground);
                    }
                }
                event = events.recv() => match event {
                    None | Some(OverlayEvent::Destroyed) => return WaitOutcome::Destroyed,
                    Some(OverlayEvent::Key(Key::Escape)) => return WaitOutcome::Cancelled,
                    Some(event) => debug!(?event, "ignored while waiting for foreground"),
                },
                () = &mut timeout => return WaitOutcome::TimedOut,
            }
        }
    }
}

/// Translates a raw overlay event; `None` for keys the session ignores
fn session_event(event: OverlayEvent) -> Option<SessionEvent> {
    match event {
        OverlayEvent::PointerDown(point) => Some(SessionEvent::PointerDown(point)),
        OverlayEvent::PointerMove(point) => Some(SessionEvent::PointerMove(point)),
        OverlayEvent::PointerUp => Some(SessionEvent::PointerUp),
        OverlayEvent::Key(Key::Digit(digit)) => Some(SessionEvent::TileCountKey(digit)),
        OverlayEvent::Key(Key::Escape) => Some(SessionEvent::Cancel),
        OverlayEvent::Key(Key::Other(_)) => None,
        OverlayEvent::Destroyed => Some(SessionEvent::OverlayDestroyed),
    }
}

/// Runs one session against the Win32 desktop on a single-threaded runtime
#[cfg(windows)]
pub fn launch(config: &crate::config::AppConfig) -> Result<SessionOutcome, AppError> {
    use crate::platform::windows::Win32WindowSystem;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    let settings = config.settings_store();
    let tile_count = config.initial_tile_count(&settings);
    let controller = SessionController::new(Win32WindowSystem::new(), settings, config.controller());

    runtime.block_on(controller.run(tile_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::Placement;
    use crate::domain::core::{Geometry, Point};
    use crate::platform::MonitorId;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio::sync::mpsc::UnboundedSender;

    const OVERLAY: WindowId = WindowId(1);
    const APP: WindowId = WindowId(10);
    const TARGET: WindowId = WindowId(20);
    const DESKTOP: WindowId = WindowId(99);

    const LEFT_MONITOR: Rect = Rect {
        left: 0,
        top: 0,
        right: 1920,
        bottom: 1080,
    };
    const RIGHT_MONITOR: Rect = Rect {
        left: 1920,
        top: 0,
        right: 3840,
        bottom: 1080,
    };

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        CreateOverlay,
        ShowOverlay(Rect),
        Minimize(WindowId),
        Restore(WindowId),
        Close(WindowId),
        Invalidate,
        SetGeometry(WindowId, Geometry),
    }

    /// Scripted desktop: foreground values are consumed in order and the
    /// last one repeats
    #[derive(Default)]
    struct FakeWindows {
        foreground: Mutex<VecDeque<Option<WindowId>>>,
        work_areas: HashMap<WindowId, Rect>,
        on_show: Vec<OverlayEvent>,
        fail_geometry: bool,
        sender: Mutex<Option<UnboundedSender<OverlayEvent>>>,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeWindows {
        fn new(foreground: &[Option<WindowId>], on_show: &[OverlayEvent]) -> Self {
            Self {
                foreground: Mutex::new(foreground.iter().copied().collect()),
                work_areas: HashMap::from([
                    (APP, LEFT_MONITOR),
                    (TARGET, RIGHT_MONITOR),
                    (DESKTOP, LEFT_MONITOR),
                ]),
                on_show: on_show.to_vec(),
                ..Default::default()
            }
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn placed(&self) -> bool {
            self.calls()
                .iter()
                .any(|call| matches!(call, Call::SetGeometry(..)))
        }
    }

    impl WindowSystem for FakeWindows {
        fn create_overlay(
            &self,
            _bounds: Rect,
            _frame: SharedFrame,
            events: UnboundedSender<OverlayEvent>,
        ) -> Result<WindowId, PlatformError> {
            self.record(Call::CreateOverlay);
            *self.sender.lock().unwrap() = Some(events);
            Ok(OVERLAY)
        }

        fn show_overlay(&self, _overlay: WindowId, work_area: Rect) -> Result<(), PlatformError> {
            self.record(Call::ShowOverlay(work_area));
            if let Some(sender) = self.sender.lock().unwrap().as_ref() {
                for event in &self.on_show {
                    sender.send(*event).unwrap();
                }
            }
            Ok(())
        }

        fn minimize(&self, window: WindowId) {
            self.record(Call::Minimize(window));
        }

        fn restore(&self, window: WindowId) {
            self.record(Call::Restore(window));
        }

        fn close(&self, window: WindowId) {
            self.record(Call::Close(window));
            if let Some(sender) = self.sender.lock().unwrap().take() {
                let _ = sender.send(OverlayEvent::Destroyed);
            }
        }

        fn invalidate(&self, _window: WindowId) {
            self.record(Call::Invalidate);
        }

        fn foreground_window(&self) -> Option<WindowId> {
            let mut script = self.foreground.lock().unwrap();
            if script.len() > 1 {
                script.pop_front().flatten()
            } else {
                script.front().copied().flatten()
            }
        }

        fn is_desktop(&self, window: WindowId) -> bool {
            window == DESKTOP
        }

        fn monitor_for_window(&self, window: WindowId) -> Option<MonitorId> {
            self.work_areas
                .contains_key(&window)
                .then_some(MonitorId(window.0))
        }

        fn monitor_work_area(&self, monitor: MonitorId) -> Result<Rect, PlatformError> {
            self.work_areas
                .get(&WindowId(monitor.0))
                .copied()
                .ok_or(PlatformError::MonitorInfoFailed(monitor))
        }

        fn set_window_geometry(
            &self,
            window: WindowId,
            geometry: Geometry,
        ) -> Result<(), PlatformError> {
            self.record(Call::SetGeometry(window, geometry));
            if self.fail_geometry {
                Err(PlatformError::PositionFailed(window))
            } else {
                Ok(())
            }
        }
    }

    fn drag(from: Point, to: Point) -> Vec<OverlayEvent> {
        vec![
            OverlayEvent::PointerDown(from),
            OverlayEvent::PointerMove(to),
            OverlayEvent::PointerUp,
        ]
    }

    fn controller(
        windows: FakeWindows,
        dir: &tempfile::TempDir,
        target_timeout: Option<Duration>,
    ) -> SessionController<FakeWindows> {
        let settings = SettingsStore::new(Some(dir.path().join("screen_tile.set")));
        let config = ControllerConfig {
            target_timeout,
            ..ControllerConfig::default()
        };
        SessionController::new(windows, settings, config)
    }

    fn stored(dir: &tempfile::TempDir) -> Option<Vec<u8>> {
        std::fs::read(dir.path().join("screen_tile.set")).ok()
    }

    #[tokio::test(start_paused = true)]
    async fn places_window_on_target_monitor() {
        let dir = tempfile::tempdir().unwrap();
        let windows = FakeWindows::new(
            &[Some(OVERLAY), Some(APP), Some(OVERLAY), Some(TARGET)],
            &drag(Point::new(1000, 600), Point::new(1100, 700)),
        );
        let controller = controller(windows, &dir, None);

        let outcome = controller.run(TileCount::default()).await.unwrap();

        let geometry = Geometry::new(2880, 540, 960, 540);
        assert_eq!(
            outcome,
            SessionOutcome::Placed(Placement {
                window: TARGET,
                geometry
            })
        );

        let calls = controller.window_system().calls();
        assert_eq!(calls[0], Call::CreateOverlay);
        assert_eq!(calls[1], Call::Minimize(OVERLAY));
        assert_eq!(calls[2], Call::ShowOverlay(LEFT_MONITOR));
        assert_eq!(
            &calls[calls.len() - 4..],
            &[
                Call::Minimize(OVERLAY),
                Call::Restore(TARGET),
                Call::SetGeometry(TARGET, geometry),
                Call::Close(OVERLAY),
            ]
        );
        assert_eq!(stored(&dir), Some(vec![2]));
    }

    #[tokio::test(start_paused = true)]
    async fn tile_count_key_changes_grid_and_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut events = vec![OverlayEvent::Key(Key::Digit(3))];
        events.extend(drag(Point::new(10, 10), Point::new(10, 10)));
        let windows = FakeWindows::new(&[Some(APP), Some(OVERLAY), Some(APP)], &events);
        let controller = controller(windows, &dir, None);

        let outcome = controller.run(TileCount::default()).await.unwrap();

        assert_eq!(
            outcome,
            SessionOutcome::Placed(Placement {
                window: APP,
                geometry: Geometry::new(0, 0, 640, 360)
            })
        );
        assert_eq!(stored(&dir), Some(vec![3]));
    }

    #[tokio::test(start_paused = true)]
    async fn desktop_target_aborts_without_placing() {
        let dir = tempfile::tempdir().unwrap();
        let windows = FakeWindows::new(
            &[Some(APP), Some(DESKTOP)],
            &drag(Point::new(10, 10), Point::new(500, 500)),
        );
        let controller = controller(windows, &dir, None);

        let outcome = controller.run(TileCount::default()).await.unwrap();

        assert_eq!(outcome, SessionOutcome::Aborted(AbortReason::DesktopTarget));
        assert!(!controller.window_system().placed());
        assert!(
            controller
                .window_system()
                .calls()
                .contains(&Call::Close(OVERLAY))
        );
        assert_eq!(stored(&dir), None);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_foreground_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let windows = FakeWindows::new(
            &[Some(APP), None],
            &drag(Point::new(10, 10), Point::new(20, 20)),
        );
        let controller = controller(windows, &dir, None);

        let outcome = controller.run(TileCount::default()).await.unwrap();
        assert_eq!(outcome, SessionOutcome::Aborted(AbortReason::NoTarget));
        assert!(!controller.window_system().placed());
    }

    #[tokio::test(start_paused = true)]
    async fn target_without_monitor_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let stray = WindowId(55);
        let windows = FakeWindows::new(
            &[Some(APP), Some(stray)],
            &drag(Point::new(10, 10), Point::new(20, 20)),
        );
        let controller = controller(windows, &dir, None);

        let outcome = controller.run(TileCount::default()).await.unwrap();
        assert_eq!(outcome, SessionOutcome::Aborted(AbortReason::NoMonitor));
        assert!(!controller.window_system().placed());
    }

    #[tokio::test(start_paused = true)]
    async fn overlay_destruction_interrupts_target_wait() {
        let dir = tempfile::tempdir().unwrap();
        let mut events = drag(Point::new(10, 10), Point::new(20, 20));
        events.push(OverlayEvent::Destroyed);
        // Foreground never leaves the overlay after the selection
        let windows = FakeWindows::new(&[Some(APP), Some(OVERLAY)], &events);
        let controller = controller(windows, &dir, None);

        let outcome = controller.run(TileCount::default()).await.unwrap();

        assert_eq!(outcome, SessionOutcome::Aborted(AbortReason::OverlayDestroyed));
        let calls = controller.window_system().calls();
        assert!(!calls.contains(&Call::Close(OVERLAY)));
        assert!(!controller.window_system().placed());
    }

    #[tokio::test(start_paused = true)]
    async fn escape_cancels_target_wait() {
        let dir = tempfile::tempdir().unwrap();
        let mut events = drag(Point::new(10, 10), Point::new(20, 20));
        events.push(OverlayEvent::PointerMove(Point::new(300, 300)));
        events.push(OverlayEvent::Key(Key::Escape));
        let windows = FakeWindows::new(&[Some(APP), Some(OVERLAY)], &events);
        let controller = controller(windows, &dir, None);

        let outcome = controller.run(TileCount::default()).await.unwrap();

        assert_eq!(outcome, SessionOutcome::Aborted(AbortReason::Cancelled));
        assert!(
            controller
                .window_system()
                .calls()
                .contains(&Call::Close(OVERLAY))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn optional_timeout_ends_target_wait() {
        let dir = tempfile::tempdir().unwrap();
        let windows = FakeWindows::new(
            &[Some(APP), Some(OVERLAY)],
            &drag(Point::new(10, 10), Point::new(20, 20)),
        );
        let controller = controller(windows, &dir, Some(Duration::from_secs(5)));

        let started = Instant::now();
        let outcome = controller.run(TileCount::default()).await.unwrap();

        assert_eq!(outcome, SessionOutcome::Aborted(AbortReason::TimedOut));
        assert!(started.elapsed() >= Duration::from_secs(5));
        assert!(
            controller
                .window_system()
                .calls()
                .contains(&Call::Close(OVERLAY))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn startup_without_monitor_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let stray = WindowId(55);
        let windows = FakeWindows::new(&[Some(stray)], &[]);
        let controller = controller(windows, &dir, None);

        let result = controller.run(TileCount::default()).await;
        assert!(matches!(result, Err(AppError::NoMonitor(window)) if window == stray));
    }

    #[tokio::test(start_paused = true)]
    async fn startup_waits_for_a_real_window() {
        let dir = tempfile::tempdir().unwrap();
        let windows = FakeWindows::new(&[None, Some(OVERLAY), None, Some(TARGET)], &[]);
        let controller = controller(windows, &dir, None);
        let (_sender, mut events) = mpsc::unbounded_channel();

        let started = Instant::now();
        let captured = controller
            .capture_work_area(OVERLAY, &mut events)
            .await
            .unwrap();

        assert_eq!(captured, Ok(RIGHT_MONITOR));
        assert_eq!(started.elapsed(), Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_placement_still_closes_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let mut windows = FakeWindows::new(
            &[Some(APP), Some(TARGET)],
            &drag(Point::new(10, 10), Point::new(20, 20)),
        );
        windows.fail_geometry = true;
        let controller = controller(windows, &dir, None);

        let outcome = controller.run(TileCount::default()).await.unwrap();

        assert!(matches!(outcome, SessionOutcome::Placed(_)));
        assert_eq!(
            controller.window_system().calls().last(),
            Some(&Call::Close(OVERLAY))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn closed_channel_counts_as_destroyed() {
        let dir = tempfile::tempdir().unwrap();
        let controller = controller(FakeWindows::new(&[Some(OVERLAY)], &[]), &dir, None);
        let session = Session::new(LEFT_MONITOR, TileCount::default()).unwrap();

        let (sender, mut events) = mpsc::unbounded_channel();
        for event in drag(Point::new(5, 5), Point::new(6, 6)) {
            sender.send(event).unwrap();
        }
        drop(sender);

        let outcome = controller.drive(OVERLAY, session, &mut events).await.unwrap();
        assert_eq!(outcome, SessionOutcome::Aborted(AbortReason::OverlayDestroyed));
    }

    #[tokio::test(start_paused = true)]
    async fn drive_publishes_frames() {
        let dir = tempfile::tempdir().unwrap();
        let controller = controller(FakeWindows::new(&[Some(OVERLAY)], &[]), &dir, None);
        let session = Session::new(LEFT_MONITOR, TileCount::default()).unwrap();

        let (sender, mut events) = mpsc::unbounded_channel();
        sender.send(OverlayEvent::PointerDown(Point::new(40, 40))).unwrap();
        sender.send(OverlayEvent::PointerMove(Point::new(80, 20))).unwrap();
        sender.send(OverlayEvent::Key(Key::Other(0x41))).unwrap();
        sender.send(OverlayEvent::Key(Key::Escape)).unwrap();

        let outcome = controller.drive(OVERLAY, session, &mut events).await.unwrap();

        assert_eq!(outcome, SessionOutcome::Aborted(AbortReason::Cancelled));
        let frame = frame::snapshot(controller.frame());
        assert_eq!(frame.selection, Some(Rect::new(40, 20, 80, 40)));
        assert_eq!(
            controller
                .window_system()
                .calls()
                .iter()
                .filter(|call| **call == Call::Invalidate)
                .count(),
            2
        );
    }
}

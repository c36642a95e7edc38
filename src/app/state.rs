//! Session state machine
//!
//! One [`Session`] exists per overlay session. It consumes [`SessionEvent`]s
//! one at a time and answers with the [`Command`]s the controller must carry
//! out. It never touches the desktop itself, which keeps every transition
//! testable without a window system.

use tracing::debug;

use crate::domain::core::{Geometry, Point, Rect};
use crate::domain::grid::{GridError, TileCount, TileGrid};
use crate::domain::selection::Selection;
use crate::domain::snap::snap_selection;
use crate::platform::WindowId;
use crate::ui::frame::OverlayFrame;

/// Where the session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Overlay shown, no button pressed yet
    Idle,
    /// Button held; the selection grows with every move
    Selecting(Selection),
    /// Button released, overlay minimized, waiting for the user to pick a window
    AwaitingTarget { selection: Rect },
    /// Target window resolved and placed
    Done(Placement),
    /// Session ended without placing anything
    Aborted(AbortReason),
}

/// Geometry resolved for the target window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub window: WindowId,
    pub geometry: Geometry,
}

/// Why a session ended without a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Escape pressed
    Cancelled,
    /// The desktop was activated
    DesktopTarget,
    /// No window is in the foreground
    NoTarget,
    /// The activated window is on no monitor, or its work area is unreadable
    NoMonitor,
    /// The target monitor's work area cannot hold the grid
    InvalidWorkArea,
    /// The overlay was destroyed from outside
    OverlayDestroyed,
    /// The configured target wait elapsed
    TimedOut,
}

/// What the foreground window turned out to be after the overlay minimized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetCandidate {
    /// A regular window; `work_area` is `None` when no monitor could be read
    Window {
        window: WindowId,
        work_area: Option<Rect>,
    },
    /// The desktop or shell window
    Desktop,
    /// No foreground window at all
    Missing,
}

/// Inputs to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Digit key pressed
    TileCountKey(u8),
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    /// Foreground changed away from the overlay
    TargetResolved(TargetCandidate),
    /// Escape pressed
    Cancel,
    /// Overlay window destroyed
    OverlayDestroyed,
    /// Target wait exceeded its timeout
    TargetWaitTimedOut,
}

/// Side effects requested by the state machine, executed in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Publish a new frame and repaint the overlay
    Invalidate,
    MinimizeOverlay,
    /// Start waiting for the foreground window to change
    AwaitTarget,
    RestoreWindow(WindowId),
    ApplyGeometry { window: WindowId, geometry: Geometry },
    PersistTileCount(TileCount),
    CloseOverlay,
}

/// Final result of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Placed(Placement),
    Aborted(AbortReason),
}

/// State of one overlay session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Work area of the monitor the overlay covers
    work_area: Rect,
    tile_count: TileCount,
    state: SessionState,
}

impl Session {
    /// Creates a session over `work_area`
    ///
    /// # Arguments
    /// * `work_area` - Work area captured at startup (screen coordinates)
    /// * `tile_count` - Initial tile count
    ///
    /// # Returns
    /// An idle session, or `GridError` if the work area cannot hold the grid
    pub fn new(work_area: Rect, tile_count: TileCount) -> Result<Self, GridError> {
        TileGrid::new(work_area, tile_count)?;
        Ok(Self {
            work_area,
            tile_count,
            state: SessionState::Idle,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn tile_count(&self) -> TileCount {
        self.tile_count
    }

    pub fn work_area(&self) -> Rect {
        self.work_area
    }

    /// True once the session reached `Done` or `Aborted`
    pub fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }

    /// Returns the outcome of a finished session
    pub fn outcome(&self) -> Option<SessionOutcome> {
        match self.state {
            SessionState::Done(placement) => Some(SessionOutcome::Placed(placement)),
            SessionState::Aborted(reason) => Some(SessionOutcome::Aborted(reason)),
            _ => None,
        }
    }

    /// Snapshot for the paint handler
    pub fn frame(&self) -> OverlayFrame {
        let selection = match &self.state {
            SessionState::Selecting(selection) => selection.rect(),
            SessionState::AwaitingTarget { selection } => Some(*selection),
            _ => None,
        };
        OverlayFrame {
            work_area: self.work_area,
            tile_count: self.tile_count,
            selection,
        }
    }

    /// Processes one event and returns the commands to execute
    pub fn handle(&mut self, event: SessionEvent) -> Vec<Command> {
        if self.is_finished() {
            debug!(?event, "session finished, ignoring event");
            return Vec::new();
        }

        match event {
            SessionEvent::Cancel => self.abort(AbortReason::Cancelled),
            SessionEvent::OverlayDestroyed => {
                self.state = SessionState::Aborted(AbortReason::OverlayDestroyed);
                debug!("overlay destroyed, session aborted");
                Vec::new()
            }
            SessionEvent::TileCountKey(digit) => self.change_tile_count(digit),
            SessionEvent::PointerDown(point) => self.pointer_down(point),
            SessionEvent::PointerMove(point) => self.pointer_move(point),
            SessionEvent::PointerUp => self.pointer_up(),
            SessionEvent::TargetResolved(candidate) => self.resolve_target(candidate),
            SessionEvent::TargetWaitTimedOut => match self.state {
                SessionState::AwaitingTarget { .. } => self.abort(AbortReason::TimedOut),
                _ => Vec::new(),
            },
        }
    }

    fn change_tile_count(&mut self, digit: u8) -> Vec<Command> {
        if self.state != SessionState::Idle {
            return Vec::new();
        }
        let Ok(count) = TileCount::new(u32::from(digit)) else {
            return Vec::new();
        };
        if let Err(err) = TileGrid::new(self.work_area, count) {
            debug!(%err, "tile count rejected");
            return Vec::new();
        }

        debug!(from = %self.tile_count, to = %count, "tile count changed");
        self.tile_count = count;
        vec![Command::Invalidate]
    }

    fn pointer_down(&mut self, point: Point) -> Vec<Command> {
        if let SessionState::Selecting(selection) = &mut self.state {
            return match selection.begin(point) {
                Ok(()) => vec![Command::Invalidate],
                Err(_) => Vec::new(),
            };
        }
        if self.state != SessionState::Idle {
            return Vec::new();
        }

        let mut selection = Selection::new();
        if selection.begin(point).is_err() {
            return Vec::new();
        }
        debug!(?point, "selection started");
        self.state = SessionState::Selecting(selection);
        vec![Command::Invalidate]
    }

    fn pointer_move(&mut self, point: Point) -> Vec<Command> {
        let SessionState::Selecting(selection) = &mut self.state else {
            return Vec::new();
        };
        match selection.extend(point) {
            Ok(true) => vec![Command::Invalidate],
            _ => Vec::new(),
        }
    }

    fn pointer_up(&mut self) -> Vec<Command> {
        let SessionState::Selecting(selection) = &mut self.state else {
            return Vec::new();
        };
        let Ok(rect) = selection.freeze() else {
            return Vec::new();
        };

        debug!(?rect, "selection frozen, waiting for target window");
        self.state = SessionState::AwaitingTarget { selection: rect };
        vec![Command::MinimizeOverlay, Command::AwaitTarget]
    }

    fn resolve_target(&mut self, candidate: TargetCandidate) -> Vec<Command> {
        let SessionState::AwaitingTarget { selection } = self.state else {
            return Vec::new();
        };

        let (window, work_area) = match candidate {
            TargetCandidate::Desktop => return self.abort(AbortReason::DesktopTarget),
            TargetCandidate::Missing => return self.abort(AbortReason::NoTarget),
            TargetCandidate::Window {
                work_area: None, ..
            } => return self.abort(AbortReason::NoMonitor),
            TargetCandidate::Window {
                window,
                work_area: Some(work_area),
            } => (window, work_area),
        };

        let grid = match TileGrid::new(work_area, self.tile_count) {
            Ok(grid) => grid,
            Err(err) => {
                debug!(%err, "target work area cannot hold the grid");
                return self.abort(AbortReason::InvalidWorkArea);
            }
        };

        let geometry = snap_selection(&grid, selection);
        debug!(?window, ?geometry, "target resolved");
        self.state = SessionState::Done(Placement { window, geometry });

        vec![
            Command::RestoreWindow(window),
            Command::ApplyGeometry { window, geometry },
            Command::PersistTileCount(self.tile_count),
            Command::CloseOverlay,
        ]
    }

    fn abort(&mut self, reason: AbortReason) -> Vec<Command> {
        debug!(?reason, "session aborted");
        self.state = SessionState::Aborted(reason);
        vec![Command::CloseOverlay]
    }
}

//=========================================================================
// Platform Subsystem
//
// Bridges winit (OS-level events) with the session thread.
//
// Architecture:
// ```text
//  Main Thread:                     Session Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  EventCollector  │
//  │   ↓                      │    │   ↓ stamps       │
//  │  InputProcessor          │    │  TimedEvent      │
//  │   ├─ Converts winit      │    │   ↓              │
//  │   └─ Tracks modifiers    │    │  menu → game     │
//  │   ↓                      │    │   ↓              │
//  │  InputBuffer             │    │  SessionLoop     │
//  │   ├─ discrete: ordered   │    └──────────────────┘
//  │   └─ motion: summed      │             ↑
//  │   ↓                      │             │
//  │  RedrawRequested (flush) │             │
//  │   ↓                      │             │
//  │  bounded channel ────────┼─────────────┘
//  │                          │    PlatformEvent
//  │  user_event  <───────────┼──── EventLoopProxy
//  │   ├─ MouseGrab: cursor   │    SessionEvent
//  │   └─ Shutdown: exit      │
//  └──────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: all buffered input is sent as
//   one message, keeping arrival order within the frame
// - **Raw motion**: pointer deltas come from device events so they keep
//   flowing while the cursor is grabbed
// - **Session drives shutdown**: the session sends `Shutdown` when its
//   loop ends; a disconnected channel on flush is treated the same way
// - **Main thread requirement**: winit mandates the main thread on
//   macOS/iOS, so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::{Sender, TrySendError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::{CursorGrabMode, Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{
    PlatformError, PlatformEvent, PlatformHandle, SessionEvent, TickControl,
};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Constants ===========================================================

const WINDOW_TITLE: &str = "Session Engine";

/// Twice the native 320x200 screen.
const WINDOW_SIZE: (u32, u32) = (640, 400);

//=== Event Loop ==========================================================

/// Creates the event loop the platform runs on.
///
/// Must be called on the main thread. The session thread gets a proxy
/// from it before the platform starts.
pub(crate) fn create_event_loop() -> Result<EventLoop<SessionEvent>, PlatformError> {
    EventLoop::<SessionEvent>::with_user_event()
        .build()
        .map_err(|e| PlatformError::EventLoopCreation(e.to_string()))
}

impl PlatformHandle for EventLoopProxy<SessionEvent> {
    fn notify(&self, event: SessionEvent) -> bool {
        self.send_event(event).is_ok()
    }
}

//=== Platform ============================================================

/// Window owner and input forwarder.
///
/// Not `Send`: it stays on the main thread. Input goes out over the
/// channel; session requests come back as winit user events.
pub(crate) struct Platform {
    /// Created lazily in `resumed()`.
    window: Option<Window>,
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    input_processor: InputProcessor,
    /// Last grab policy from the session; applied to new windows too.
    mouse_grabbed: bool,
    /// Set once the session thread is known to be gone.
    session_ended: bool,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub fn new(event_sender: Sender<PlatformEvent>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
            mouse_grabbed: false,
            session_ended: false,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes or the session
    /// shuts down.
    ///
    /// # Errors
    ///
    /// [`PlatformError`] if the event loop fails.
    pub fn run(mut self, event_loop: EventLoop<SessionEvent>) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends this frame's input to the session thread.
    ///
    /// A full channel drops the frame's input (the session is behind); a
    /// disconnected one means the session already ended, and the platform
    /// follows it out.
    fn flush_input_buffer(&mut self) {
        let Some((discrete, continuous)) = self.buffer.drain() else {
            return;
        };
        let count = discrete.len() + continuous.len();

        trace!(target: "platform::input", "Flushing {} events", count);

        match self.event_sender.try_send(PlatformEvent::Inputs { discrete, continuous }) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(target: "platform::input", "Session behind, dropping {} events", count);
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(target: "platform::input", "Session ended, dropping {} events", count);
                self.session_ended = true;
            }
        }
    }

    /// Applies a session request. Returns `Exit` for a shutdown.
    fn handle_session_event(&mut self, event: SessionEvent) -> TickControl {
        match event {
            SessionEvent::MouseGrab(grab) => {
                self.set_mouse_grab(grab);
                TickControl::Continue
            }
            SessionEvent::Shutdown => {
                self.session_ended = true;
                TickControl::Exit
            }
        }
    }

    fn set_mouse_grab(&mut self, grab: bool) {
        self.mouse_grabbed = grab;
        if let Some(window) = &self.window {
            apply_cursor_grab(window, grab);
        }
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        let _ = self.event_sender.send(PlatformEvent::WindowClosed);
        event_loop.exit();
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

/// Confines (or failing that, locks) and hides the cursor, or releases it.
fn apply_cursor_grab(window: &Window, grab: bool) {
    let result = if grab {
        window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
    } else {
        window.set_cursor_grab(CursorGrabMode::None)
    };
    if let Err(e) = result {
        warn!(target: "platform", "Cursor grab change failed: {}", e);
    }
    window.set_cursor_visible(!grab);
}

//=== Winit Integration ===================================================

impl ApplicationHandler<SessionEvent> for Platform {
    /// Creates the window on first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                apply_cursor_grab(&window, self.mouse_grabbed);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.close(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.close(event_loop);
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push_discrete(event);
                } else {
                    trace!(target: "platform::input", "Unmapped key ignored");
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();
                if self.session_ended {
                    info!(target: "platform", "Session ended, closing");
                    event_loop.exit();
                } else if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: SessionEvent) {
        trace!(target: "platform", "Session event: {:?}", event);
        if self.handle_session_event(event) == TickControl::Exit {
            info!(target: "platform", "Session shut down, closing");
            event_loop.exit();
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            let event = self.input_processor.process_mouse_motion(dx, dy);
            self.buffer.push_continuous(event);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{bounded, unbounded};
    use crate::core::input::{InputEvent, KeyCode, Modifiers};

    fn space() -> InputEvent {
        InputEvent::KeyDown { key: KeyCode::Space, modifiers: Modifiers::NONE }
    }

    #[test]
    fn window_is_created_lazily() {
        let (tx, _rx) = unbounded();
        let platform = Platform::new(tx);
        assert!(platform.window().is_none());
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(tx);

        platform.flush_input_buffer();

        assert!(rx.try_recv().is_err(), "No events should be sent for empty buffer");
    }

    #[test]
    fn flush_sends_one_message_per_frame() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(tx);

        platform.buffer.push_discrete(space());
        platform.buffer.push_continuous(InputEvent::MouseMotion { dx: 1.0, dy: 0.0 });
        platform.buffer.push_continuous(InputEvent::MouseMotion { dx: 2.0, dy: 0.0 });
        platform.flush_input_buffer();
        platform.flush_input_buffer();

        match rx.try_recv() {
            Ok(PlatformEvent::Inputs { discrete, continuous }) => {
                assert_eq!(discrete, vec![space()]);
                assert_eq!(continuous.len(), 1);
            }
            other => panic!("Expected Inputs event, got {:?}", other),
        }
        assert!(rx.try_recv().is_err(), "Second flush should not send");
    }

    #[test]
    fn flush_survives_full_and_disconnected_channels() {
        let (tx, rx) = bounded(1);
        let mut platform = Platform::new(tx);

        platform.buffer.push_discrete(space());
        platform.flush_input_buffer();
        platform.buffer.push_discrete(space());
        platform.flush_input_buffer();
        assert_eq!(rx.len(), 1);

        drop(rx);
        platform.buffer.push_discrete(space());
        platform.flush_input_buffer();
    }

    //--- Session Events ---------------------------------------------------

    #[test]
    fn ended_session_marks_platform_for_exit() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(tx);

        platform.buffer.push_discrete(space());
        platform.flush_input_buffer();
        assert!(!platform.session_ended);

        drop(rx);
        platform.buffer.push_discrete(space());
        platform.flush_input_buffer();
        assert!(platform.session_ended);
    }

    #[test]
    fn shutdown_event_exits() {
        let (tx, _rx) = unbounded();
        let mut platform = Platform::new(tx);

        assert_eq!(platform.handle_session_event(SessionEvent::MouseGrab(false)), TickControl::Continue);
        assert_eq!(platform.handle_session_event(SessionEvent::Shutdown), TickControl::Exit);
        assert!(platform.session_ended);
    }

    #[test]
    fn grab_policy_is_kept_for_the_window() {
        let (tx, _rx) = unbounded();
        let mut platform = Platform::new(tx);
        assert!(!platform.mouse_grabbed);

        platform.handle_session_event(SessionEvent::MouseGrab(true));
        assert!(platform.mouse_grabbed);

        platform.handle_session_event(SessionEvent::MouseGrab(false));
        assert!(!platform.mouse_grabbed);
    }
}

//! In-memory window and desktop doubles for engine tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{Desktop, Error, Padding, Point, Rect, VisualState, Window, WindowResult};

static NEXT_HANDLE: AtomicUsize = AtomicUsize::new(0x1000);

#[derive(Debug)]
struct FakeState {
    title: String,
    class: String,
    executable: String,
    resizable: bool,
    visible: bool,
    state: VisualState,
    position: Rect,
    /// Offset between workspace and screen coordinates.
    screen_origin: Point,
    /// Invisible border between the legacy rect and the visible frame.
    border: Padding,
    compositor: bool,
    topmost: bool,
    closed: bool,
    moves: Vec<Rect>,
    /// Number of upcoming attribute queries that report "not resizable".
    not_ready_for: usize,
}

/// A scriptable window whose clones share state.
#[derive(Debug, Clone)]
pub struct FakeWindow {
    handle: usize,
    state: Arc<Mutex<FakeState>>,
}

pub struct FakeWindowBuilder {
    state: FakeState,
}

impl FakeWindowBuilder {
    pub fn title(mut self, title: &str) -> Self {
        self.state.title = title.to_string();
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.state.class = class.to_string();
        self
    }

    pub fn executable(mut self, executable: &str) -> Self {
        self.state.executable = executable.to_string();
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.state.resizable = resizable;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.state.visible = visible;
        self
    }

    pub fn state(mut self, state: VisualState) -> Self {
        self.state.state = state;
        self
    }

    pub fn position(mut self, position: Rect) -> Self {
        self.state.position = position;
        self
    }

    pub fn screen_origin(mut self, origin: Point) -> Self {
        self.state.screen_origin = origin;
        self
    }

    pub fn border(mut self, border: Padding) -> Self {
        self.state.border = border;
        self
    }

    /// Makes frame-bounds queries fail, as they do without a compositor.
    pub fn without_compositor(mut self) -> Self {
        self.state.compositor = false;
        self
    }

    /// Reports the window as not resizable for the first `queries` checks.
    pub fn not_ready_for(mut self, queries: usize) -> Self {
        self.state.not_ready_for = queries;
        self
    }

    pub fn build(self) -> FakeWindow {
        FakeWindow {
            handle: NEXT_HANDLE.fetch_add(1, Ordering::Relaxed),
            state: Arc::new(Mutex::new(self.state)),
        }
    }
}

impl FakeWindow {
    pub fn builder() -> FakeWindowBuilder {
        FakeWindowBuilder {
            state: FakeState {
                title: "Untitled".to_string(),
                class: "FakeWindowClass".to_string(),
                executable: "fake".to_string(),
                resizable: true,
                visible: true,
                state: VisualState::Normal,
                position: Rect::new(100, 100, 600, 500),
                screen_origin: Point::default(),
                border: Padding::ZERO,
                compositor: true,
                topmost: false,
                closed: false,
                moves: Vec::new(),
                not_ready_for: 0,
            },
        }
    }

    /// Simulates the window being destroyed.
    pub fn close(&self) {
        self.lock().closed = true;
    }

    /// Changes the visual state as if the user did it.
    pub fn set_state(&self, state: VisualState) {
        self.lock().state = state;
    }

    /// Changes the position as if the user did it.
    pub fn place(&self, position: Rect) {
        self.lock().position = position;
    }

    pub fn current_position(&self) -> Rect {
        self.lock().position
    }

    /// Every position written by the engine, in order.
    pub fn moves(&self) -> Vec<Rect> {
        self.lock().moves.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn live(&self) -> WindowResult<MutexGuard<'_, FakeState>> {
        let state = self.lock();
        if state.closed {
            Err(Error::WindowGone(self.handle))
        } else {
            Ok(state)
        }
    }
}

impl Window for FakeWindow {
    fn handle(&self) -> usize {
        self.handle
    }

    fn title(&self) -> WindowResult<String> {
        Ok(self.live()?.title.clone())
    }

    fn class(&self) -> WindowResult<String> {
        Ok(self.live()?.class.clone())
    }

    fn executable_name(&self) -> WindowResult<String> {
        Ok(self.live()?.executable.clone())
    }

    fn is_resizable(&self) -> WindowResult<bool> {
        let mut state = self.live()?;
        if state.not_ready_for > 0 {
            state.not_ready_for -= 1;
            return Ok(false);
        }
        Ok(state.resizable)
    }

    fn is_visible(&self) -> WindowResult<bool> {
        Ok(self.live()?.visible)
    }

    fn visual_state(&self) -> WindowResult<VisualState> {
        Ok(self.live()?.state)
    }

    fn set_visual_state(&self, state: VisualState) -> WindowResult<()> {
        self.live()?.state = state;
        Ok(())
    }

    fn window_rect(&self) -> WindowResult<Rect> {
        let state = self.live()?;
        let origin = state.screen_origin;
        Ok(state.position.relative_to(Point {
            x: -origin.x,
            y: -origin.y,
        }))
    }

    fn frame_bounds(&self) -> WindowResult<Rect> {
        let (compositor, border) = {
            let state = self.live()?;
            (state.compositor, state.border)
        };
        if !compositor {
            return Err(Error::Os("desktop composition is disabled".into()));
        }
        Ok(self.window_rect()?.shrink(&border))
    }

    fn position(&self) -> WindowResult<Rect> {
        Ok(self.live()?.position)
    }

    fn set_position(&self, rect: &Rect) -> WindowResult<()> {
        let mut state = self.live()?;
        state.position = *rect;
        state.moves.push(*rect);
        Ok(())
    }

    fn is_topmost(&self) -> WindowResult<bool> {
        Ok(self.live()?.topmost)
    }

    fn set_topmost(&self, topmost: bool) -> WindowResult<()> {
        self.live()?.topmost = topmost;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct FakeDesktopState {
    work_area: Rect,
    windows: Vec<FakeWindow>,
    children: Vec<(usize, FakeWindow)>,
    foreground: Option<FakeWindow>,
}

/// A desktop holding a list of [`FakeWindow`]s.
#[derive(Debug, Default)]
pub struct FakeDesktop {
    state: Mutex<FakeDesktopState>,
}

impl FakeDesktop {
    pub fn new(work_area: Rect) -> Self {
        Self {
            state: Mutex::new(FakeDesktopState {
                work_area,
                ..Default::default()
            }),
        }
    }

    pub fn add(&self, window: &FakeWindow) {
        self.lock().windows.push(window.clone());
    }

    pub fn add_child(&self, parent: &FakeWindow, child: &FakeWindow) {
        self.lock().children.push((parent.handle, child.clone()));
    }

    pub fn focus(&self, window: &FakeWindow) {
        self.lock().foreground = Some(window.clone());
    }

    pub fn set_work_area(&self, work_area: Rect) {
        self.lock().work_area = work_area;
    }

    fn lock(&self) -> MutexGuard<'_, FakeDesktopState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Desktop for FakeDesktop {
    type Window = FakeWindow;

    fn top_level_windows(&self) -> WindowResult<Vec<FakeWindow>> {
        Ok(self
            .lock()
            .windows
            .iter()
            .filter(|w| !w.lock().closed)
            .cloned()
            .collect())
    }

    fn child_windows(&self, parent: &FakeWindow) -> WindowResult<Vec<FakeWindow>> {
        parent.live()?;
        Ok(self
            .lock()
            .children
            .iter()
            .filter(|(p, w)| *p == parent.handle && !w.lock().closed)
            .map(|(_, w)| w.clone())
            .collect())
    }

    fn primary_work_area(&self) -> WindowResult<Rect> {
        Ok(self.lock().work_area)
    }

    fn foreground_window(&self) -> Option<FakeWindow> {
        self.lock().foreground.clone()
    }

    fn window(&self, handle: usize) -> FakeWindow {
        let state = self.lock();
        state
            .windows
            .iter()
            .chain(state.children.iter().map(|(_, w)| w))
            .find(|w| w.handle == handle)
            .cloned()
            .unwrap_or_else(|| {
                let gone = FakeWindow::builder().build();
                gone.close();
                FakeWindow {
                    handle,
                    state: gone.state,
                }
            })
    }
}

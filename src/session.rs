//! Headless board session.
//!
//! Owns everything one mounted board needs: the store, the scale resolver,
//! one drag engine per pressed item, the pointer capture table, the keyboard
//! adapter and the toast queue. Hosts feed it raw screen-space events; the
//! session hit-tests presses, routes captured pointers to their drag engine
//! and keeps drag engines in step with the items that still exist.

use crate::board::BoardState;
use crate::export::{export_with_toast, BoardRasterizer, DownloadSink, ExportOutcome};
use crate::input::{
    CaptureRegistry, CoordinateContext, CoordinateConverter, FocusTarget, ItemDrag, KeyEvent,
    NudgeAdapter, Point, PointerCapture, PointerEvent, point,
};
use crate::intent::BoardIntent;
use crate::notifications::ToastManager;
use crate::perf::PerfMonitor;
use crate::scale::ScaleResolver;
use crate::settings::Settings;
use crate::spatial_index::SpatialIndex;
use crate::store::{BoardStore, Dispatcher};
use crate::types::ItemId;
use crate::view::{render_plan, RenderPlan};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, trace};

pub struct BoardSession {
    store: BoardStore,
    settings: Settings,
    scale: ScaleResolver,
    /// Top-left of the rendered board on screen
    canvas_origin: Point,
    drags: HashMap<ItemId, ItemDrag>,
    capture: CaptureRegistry,
    nudge: NudgeAdapter,
    focus: FocusTarget,
    toasts: ToastManager,
    perf: PerfMonitor,
    rasterizer: BoardRasterizer,
    /// Hit-test tree, kept in step with the store
    index: SpatialIndex,
}

impl Default for BoardSession {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl BoardSession {
    pub fn new(settings: Settings) -> Self {
        let store = BoardStore::new(settings.board.clone());
        info!(board = %store.state().board.id, "Board session started");
        Self {
            scale: ScaleResolver::new(settings.board.width),
            nudge: NudgeAdapter::new(settings.nudge),
            rasterizer: BoardRasterizer::new(settings.text_metrics),
            index: SpatialIndex::from_state(store.state(), &settings.text_metrics),
            store,
            settings,
            canvas_origin: point(0.0, 0.0),
            drags: HashMap::new(),
            capture: CaptureRegistry::new(),
            focus: FocusTarget::default(),
            toasts: ToastManager::new(),
            perf: PerfMonitor::new(),
        }
    }

    /// Resolve relative image paths against `dir` when exporting.
    pub fn with_image_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.rasterizer = self.rasterizer.with_base_dir(dir);
        self
    }

    pub fn state(&self) -> &Arc<BoardState> {
        self.store.state()
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scale(&self) -> f64 {
        self.scale.scale()
    }

    pub fn toasts(&self) -> &ToastManager {
        &self.toasts
    }

    pub fn capture(&self) -> &CaptureRegistry {
        &self.capture
    }

    pub fn perf(&self) -> &PerfMonitor {
        &self.perf
    }

    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    pub fn set_focus(&mut self, focus: FocusTarget) {
        self.focus = focus;
    }

    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.canvas_origin = origin;
    }

    /// True while `id` is being dragged.
    pub fn is_dragging(&self, id: &ItemId) -> bool {
        self.drags.get(id).is_some_and(|d| d.is_dragging())
    }

    /// The hosting surface reported a new width. Returns the new scale if it
    /// changed.
    pub fn set_viewport_width(&mut self, available_width: f64) -> Option<f64> {
        self.scale.observe_width(available_width)
    }

    /// Apply one intent; returns whether the state changed.
    pub fn dispatch(&mut self, intent: BoardIntent) -> bool {
        let changed = self.timed("apply_intent", |s| s.store.apply(&intent));
        if changed {
            self.sync_drags();
            self.sync_index();
        }
        changed
    }

    pub fn render(&self) -> RenderPlan {
        render_plan(self.store.state(), self.scale.scale())
    }

    fn coordinate_context(&self) -> CoordinateContext {
        CoordinateContext::new(self.canvas_origin, self.scale.scale())
    }

    /// Topmost item under a screen-space position.
    pub fn item_at(&self, screen: Point) -> Option<ItemId> {
        let board = CoordinateConverter::screen_to_board(screen, &self.coordinate_context());
        self.index.topmost_at(self.store.state(), board.x, board.y)
    }

    /// Press. Starts a drag on the topmost item under the pointer and returns
    /// its id; presses on empty canvas are ignored.
    pub fn pointer_down(&mut self, event: PointerEvent) -> Option<ItemId> {
        let Some(id) = self.item_at(event.position) else {
            trace!(x = event.position.x, y = event.position.y, "Press on empty canvas");
            return None;
        };
        let item_position = {
            let item = self.store.state().get_item(&id)?;
            point(item.x, item.y)
        };

        let handle = self.scale.handle();
        let drag = self
            .drags
            .entry(id.clone())
            .or_insert_with(|| ItemDrag::new(id.clone(), handle));
        let started = drag.on_pointer_down(&event, item_position, &mut self.capture, &mut self.store);
        started.then_some(id)
    }

    /// Move. Routed to whichever item holds capture of the pointer.
    pub fn pointer_move(&mut self, event: PointerEvent) -> bool {
        let start = Instant::now();
        let Some(owner) = self.capture.owner(event.pointer_id).cloned() else {
            return false;
        };
        let Some(drag) = self.drags.get_mut(&owner) else {
            return false;
        };
        let moved = drag.on_pointer_move(&event, &mut self.store);
        if moved {
            self.sync_index();
        }
        self.perf
            .record_operation("pointer_move", start.elapsed().as_secs_f64() * 1000.0);
        moved
    }

    pub fn pointer_up(&mut self, event: PointerEvent) -> bool {
        let Some(owner) = self.capture.owner(event.pointer_id).cloned() else {
            return false;
        };
        match self.drags.get_mut(&owner) {
            Some(drag) => drag.on_pointer_up(&event, &mut self.capture),
            None => false,
        }
    }

    pub fn pointer_cancel(&mut self, event: PointerEvent) -> bool {
        let Some(owner) = self.capture.owner(event.pointer_id).cloned() else {
            return false;
        };
        match self.drags.get_mut(&owner) {
            Some(drag) => drag.on_pointer_cancel(&event, &mut self.capture),
            None => false,
        }
    }

    /// Key press. Returns true when the host must prevent the key's default
    /// action.
    pub fn key_down(&mut self, event: &KeyEvent) -> bool {
        let state = self.store.snapshot();
        let consumed = self
            .nudge
            .handle_key(&state, event, self.focus, &mut self.store);
        if consumed {
            self.sync_drags();
            self.sync_index();
        }
        consumed
    }

    /// Export the current board through `sink`, reporting the result as a
    /// toast. Toasts whose display time has run out are dropped first.
    pub fn export(&mut self, sink: &mut impl DownloadSink) -> Option<ExportOutcome> {
        let state = self.store.snapshot();
        let (outcome, toast) =
            export_with_toast(&state, &self.rasterizer, sink, &self.settings.export.file_name);
        self.toasts.remove_expired();
        self.toasts.push(toast);
        outcome
    }

    /// Tear down drag engines whose item is gone.
    fn sync_drags(&mut self) {
        let state = self.store.snapshot();
        let capture = &mut self.capture;
        self.drags.retain(|id, drag| {
            if state.get_item(id).is_some() {
                return true;
            }
            drag.abort(capture);
            debug!(item = %id, "Dropped drag engine for removed item");
            false
        });
    }

    fn sync_index(&mut self) {
        self.index.sync(self.store.state(), &self.settings.text_metrics);
    }

    fn timed<T>(&mut self, name: &'static str, f: impl FnOnce(&mut Self) -> T) -> T {
        let start = Instant::now();
        let out = f(self);
        self.perf
            .record_operation(name, start.elapsed().as_secs_f64() * 1000.0);
        out
    }
}

impl Dispatcher for BoardSession {
    fn dispatch(&mut self, intent: BoardIntent) {
        BoardSession::dispatch(self, intent);
    }
}

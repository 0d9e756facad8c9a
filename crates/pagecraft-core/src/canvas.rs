//! Canvas editing state: the document, its history, selection and gestures.

use crate::config::CanvasConfig;
use crate::document::Document;
use crate::element::{Element, ElementId, ElementKind, create_element};
use crate::geometry::{
    ResizeDirection, clamp_to_bounds, compute_drag_position, elements_in_rect, hit_test_handle,
    marquee_rect, resize_element,
};
use crate::history::History;
use crate::input::{
    Gesture, InputState, KeyAction, KeyEvent, Modifiers, MouseButton, PointerEvent, key_action,
    pointer_delta,
};
use crate::selection::Selection;
use crate::storage::{SharedDesign, Storage, StorageError, StorageResult};
use crate::templates::{ParseTemplateError, Template};
use kurbo::{Point, Size, Vec2};

/// Runtime editing state for one page.
///
/// Every document change goes through the mutation methods on this type, which
/// record exactly one history entry each. Undo and redo restore snapshots directly.
#[derive(Debug, Clone)]
pub struct Canvas {
    document: Document,
    history: History,
    selection: Selection,
    input: InputState,
    gesture: Gesture,
    config: CanvasConfig,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with an empty document.
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    /// Create a canvas with custom configuration.
    pub fn with_config(config: CanvasConfig) -> Self {
        let document = Document::from_parts(Vec::new(), config.default_background.clone());
        Self::build(document, config)
    }

    /// Create a canvas editing an existing document.
    pub fn with_document(document: Document) -> Self {
        Self::build(document, CanvasConfig::default())
    }

    fn build(document: Document, config: CanvasConfig) -> Self {
        Self {
            history: History::with_limit(document.clone(), config.max_history),
            document,
            selection: Selection::new(),
            input: InputState::new(),
            gesture: Gesture::Idle,
            config,
        }
    }

    /// The live document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Selection state.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Undo history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Pointer and keyboard state.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// The pointer gesture in progress.
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Configuration in use.
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Resize the viewport that drags are contained in.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.config.viewport_size = Size::new(width, height);
    }

    /// The active element, for property editing.
    pub fn active_element(&self) -> Option<&Element> {
        self.selection.active().and_then(|id| self.document.get(id))
    }

    /// Element being dragged and where it would land, for rendering.
    pub fn drag_preview(&self) -> Option<(ElementId, Point)> {
        match self.gesture {
            Gesture::Drag { id, preview, .. } => Some((id, preview)),
            _ => None,
        }
    }

    fn commit(&mut self) {
        self.history.push(self.document.clone());
    }

    fn prune_selection(&mut self) {
        let document = &self.document;
        self.selection.retain(|id| document.contains(id));
    }

    // --- Mutations ---

    /// Add a new element of `kind` and make it active.
    ///
    /// Without a position the element lands at a random offset near the top-left.
    pub fn add(&mut self, kind: ElementKind, position: Option<Point>) -> ElementId {
        let element = create_element(kind, position);
        let id = element.id();
        log::debug!("Adding {} element {} at {:?}", kind, id, element.position);

        self.document.push(element);
        self.selection.set_active(Some(id));
        self.commit();
        id
    }

    /// Replace the element with the same ID. Unknown IDs are ignored.
    pub fn update(&mut self, element: Element) {
        let id = element.id();
        if self.document.replace(element) {
            self.commit();
        } else {
            log::debug!("Ignoring update of unknown element {}", id);
        }
    }

    /// Delete one element. Unknown IDs are ignored.
    pub fn delete(&mut self, id: ElementId) {
        if self.document.remove_all(&[id]) == 0 {
            return;
        }
        log::debug!("Deleted element {}", id);

        self.selection.remove(id);
        self.commit();
    }

    /// Delete several elements in one history step.
    pub fn delete_many(&mut self, ids: &[ElementId]) {
        let removed = self.document.remove_all(ids);
        if removed == 0 {
            return;
        }
        log::debug!("Deleted {} elements", removed);

        self.prune_selection();
        self.commit();
    }

    /// Delete the selected elements, or the active one when nothing is selected.
    pub fn delete_selected(&mut self) {
        let targets = self.selection.deletion_targets();
        self.delete_many(&targets);
    }

    /// Set the canvas background. The value is passed through unvalidated.
    pub fn set_background(&mut self, color: impl Into<String>) {
        self.document.set_background(color);
        self.commit();
    }

    /// Replace the whole document with a template.
    pub fn load_template(&mut self, template: Template) {
        self.document = template.build();
        log::info!("Loaded {} template with {} elements", template, self.document.len());

        self.gesture = Gesture::Idle;
        self.prune_selection();
        self.commit();
    }

    /// Load a template by picker name.
    pub fn load_template_named(&mut self, name: &str) -> Result<(), ParseTemplateError> {
        let template = name.parse::<Template>().inspect_err(|e| log::warn!("{}", e))?;
        self.load_template(template);
        Ok(())
    }

    /// Copy an element with a fresh ID, offset down and right, and make the copy active.
    pub fn duplicate(&mut self, id: ElementId) -> Option<ElementId> {
        let copy = self.document.get(id)?.duplicate(self.config.duplicate_offset);
        let copy_id = copy.id();
        log::debug!("Duplicated element {} as {}", id, copy_id);

        self.document.push(copy);
        self.selection.set_active(Some(copy_id));
        self.commit();
        Some(copy_id)
    }

    /// Duplicate the active element.
    pub fn duplicate_active(&mut self) -> Option<ElementId> {
        self.selection.active().and_then(|id| self.duplicate(id))
    }

    // --- History ---

    /// Undo the last change. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Redo the last undone change. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn restore(&mut self, snapshot: Document) {
        self.document = snapshot;
        self.gesture = Gesture::Idle;
        self.prune_selection();
    }

    // --- Selection ---

    /// Pointer click on an element.
    pub fn click_element(&mut self, id: ElementId) {
        if self.document.contains(id) {
            self.selection.click_element(id);
        }
    }

    /// Pointer click on empty canvas.
    pub fn click_canvas(&mut self) {
        self.selection.click_canvas();
    }

    /// Select every element.
    pub fn select_all(&mut self) {
        self.selection.select_all(self.document.ids());
    }

    /// Turn multi-select mode on or off.
    pub fn set_multi_select_mode(&mut self, enabled: bool) {
        self.selection.set_multi_select_mode(enabled);
    }

    /// Flip multi-select mode.
    pub fn toggle_multi_select_mode(&mut self) {
        self.selection.toggle_multi_select_mode();
    }

    // --- Input ---

    /// Update modifier keys state.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.input.set_modifiers(modifiers);
    }

    /// Handle a key event, running the editing command it maps to.
    pub fn handle_key_event(&mut self, event: &KeyEvent) -> Option<KeyAction> {
        self.input.handle_key_event(event);
        let action = key_action(event, self.input.modifiers)?;

        match action {
            KeyAction::Delete => self.delete_selected(),
            KeyAction::SelectAll => self.select_all(),
            KeyAction::Undo => {
                self.undo();
            }
            KeyAction::Redo => {
                self.redo();
            }
            KeyAction::Duplicate => {
                self.duplicate_active();
            }
            KeyAction::MultiSelect(enabled) => self.set_multi_select_mode(enabled),
        }
        Some(action)
    }

    /// Handle a pointer event in canvas coordinates.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        self.input.handle_pointer_event(event);

        match *event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            } => self.pointer_up(position),
            _ => {}
        }
    }

    /// Resize handle under `point` on a highlighted element, topmost first.
    fn handle_at(&self, point: Point) -> Option<(ElementId, ResizeDirection)> {
        let tolerance = self.config.handle_hit_tolerance;
        self.document
            .elements()
            .iter()
            .rev()
            .filter(|el| self.selection.is_highlighted(el.id()))
            .find_map(|el| hit_test_handle(el.bounds(), point, tolerance).map(|dir| (el.id(), dir)))
    }

    fn pointer_down(&mut self, position: Point) {
        let hit = self.document.elements_at_point(position).first().copied();

        if hit.is_none() && self.input.is_double_click() {
            self.gesture = Gesture::Idle;
            self.add(ElementKind::Text, Some(position));
            return;
        }

        if let Some((id, direction)) = self.handle_at(position) {
            self.gesture = Gesture::Resize {
                id,
                direction,
                last: position,
            };
            return;
        }

        match hit.and_then(|id| self.document.get(id)) {
            Some(element) => {
                let id = element.id();
                let origin = element.position;
                self.selection.click_element(id);
                self.gesture = Gesture::Drag {
                    id,
                    origin,
                    preview: origin,
                    last: position,
                };
            }
            None => {
                self.selection.click_canvas();
                self.gesture = Gesture::Marquee {
                    start: position,
                    current: position,
                };
            }
        }
    }

    fn pointer_move(&mut self, position: Point) {
        let viewport = self.config.viewport_size;
        let mut resized = None;

        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Drag { id, preview, last, .. } => {
                let delta = pointer_delta(*last, position);
                *last = position;
                if let Some(element) = self.document.get(*id) {
                    let moved = compute_drag_position(*preview, delta);
                    *preview = clamp_to_bounds(moved, element.size, viewport);
                }
            }
            Gesture::Resize { id, direction, last } => {
                let delta = pointer_delta(*last, position);
                *last = position;
                if delta != Vec2::ZERO {
                    resized = self
                        .document
                        .get(*id)
                        .map(|element| resize_element(element, *direction, delta));
                }
            }
            Gesture::Marquee { current, .. } => *current = position,
        }

        // Resizes are committed on every move.
        if let Some(element) = resized {
            self.update(element);
        }
    }

    fn pointer_up(&mut self, position: Point) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Drag {
                id,
                origin,
                preview,
                ..
            } if preview != origin => {
                if let Some(mut element) = self.document.get(id).cloned() {
                    element.position = preview;
                    self.update(element);
                }
            }
            Gesture::Marquee { start, .. } => {
                let rect = marquee_rect(start, position);
                let hits = elements_in_rect(rect, self.document.elements());
                self.selection.apply_marquee(hits);
            }
            _ => {}
        }
    }

    // --- Sharing ---

    /// Store a snapshot of the current document and return its share ID.
    pub async fn share<S: Storage + ?Sized>(&self, storage: &S) -> StorageResult<String> {
        let design = SharedDesign::from_document(&self.document);
        storage.save(&design).await?;
        log::info!("Shared design {} with {} elements", design.id, design.elements.len());
        Ok(design.id)
    }

    /// Replace the document with a shared snapshot and start a fresh history.
    ///
    /// A missing snapshot yields [`StorageError::NotFound`] and leaves the canvas as it was.
    pub async fn open_shared<S: Storage + ?Sized>(
        &mut self,
        storage: &S,
        id: &str,
    ) -> StorageResult<()> {
        let design = match storage.load(id).await {
            Ok(design) => design,
            Err(e @ StorageError::NotFound(_)) => {
                log::warn!("Shared design not found: {}", id);
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        self.document = design.to_document();
        self.history.reset(self.document.clone());
        self.selection.clear();
        self.gesture = Gesture::Idle;
        log::info!("Opened shared design {}", id);
        Ok(())
    }
}

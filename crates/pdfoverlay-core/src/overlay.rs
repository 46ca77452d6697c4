//! Overlay state for the page currently on screen.
//!
//! [`OverlayController`] owns the document's fields, the active page, the
//! rendered page box and the selection. Pixel geometry is always derived
//! from normalized geometry on demand; it is never written back except when
//! a drag or resize gesture ends.
//!
//! Every operation that names a field id silently does nothing when the id
//! is unknown. Hosts deliver UI events asynchronously with respect to
//! document loads, so a stale id is expected rather than exceptional.

use crate::geometry::{PixelRect, pixel_delta_to_normalized, pixel_point_to_normalized, to_pixels};
use crate::model::{Field, FieldPatch, FieldType, FieldValue};

/// On-screen size of the rendered page, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportGeometry {
    pub width: f64,
    pub height: f64,
}

impl ViewportGeometry {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// What an in-flight pointer gesture does to its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Moves the field; positions are absolute pixel coordinates.
    Drag,
    /// Grows or shrinks the field; positions are pixel deltas.
    Resize,
}

/// A gesture between its begin and end phases.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingGesture {
    pub id: String,
    pub kind: GestureKind,
    /// Last pointer position (drag) or delta (resize) reported by the host.
    pub last: (f64, f64),
}

/// A visible field projected into pixel space, ready for the renderer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedField {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub field_type: FieldType,
    pub value: FieldValue,
    pub name: Option<String>,
    pub rect: PixelRect,
    pub selected: bool,
}

/// Live field collection and interaction state for one loaded document.
#[derive(Debug, Clone)]
pub struct OverlayController {
    fields: Vec<Field>,
    page: u32,
    page_count: u32,
    viewport: Option<ViewportGeometry>,
    selected: Option<String>,
    gesture: Option<PendingGesture>,
    rendered: Vec<RenderedField>,
}

impl Default for OverlayController {
    fn default() -> Self {
        Self::new(Vec::new(), 0)
    }
}

impl OverlayController {
    /// Create a controller showing page 1.
    pub fn new(fields: Vec<Field>, page_count: u32) -> Self {
        Self {
            fields,
            page: 1,
            page_count,
            viewport: None,
            selected: None,
            gesture: None,
            rendered: Vec::new(),
        }
    }

    /// Carry a known viewport into a fresh controller.
    pub fn with_viewport(mut self, viewport: Option<ViewportGeometry>) -> Self {
        self.viewport = viewport;
        self.refresh();
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    fn field_mut(&mut self, id: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn viewport(&self) -> Option<ViewportGeometry> {
        self.viewport
    }

    /// Fields on the active page, in collection order.
    pub fn visible_fields(&self) -> Vec<&Field> {
        self.fields.iter().filter(|f| f.page == self.page).collect()
    }

    /// The render list for the active page at the current viewport.
    ///
    /// Empty until the host has reported a viewport.
    pub fn visible(&self) -> &[RenderedField] {
        &self.rendered
    }

    /// Show page `n`. Any page number is accepted; pages without fields
    /// simply render nothing.
    pub fn set_page(&mut self, n: u32) {
        self.page = n;
        self.refresh();
    }

    /// Advance one page, stopping at the last page.
    pub fn next_page(&mut self) {
        if self.page < self.page_count.max(1) {
            self.set_page(self.page + 1);
        }
    }

    /// Go back one page, stopping at page 1.
    pub fn previous_page(&mut self) {
        if self.page > 1 {
            self.set_page(self.page - 1);
        }
    }

    /// Replace the viewport after the rendered page box changed size.
    pub fn on_viewport_resize(&mut self, width: f64, height: f64) {
        self.viewport = Some(ViewportGeometry::new(width, height));
        self.refresh();
    }

    fn refresh(&mut self) {
        self.rendered = match self.viewport {
            Some(vp) => self
                .fields
                .iter()
                .filter(|f| f.page == self.page)
                .map(|f| RenderedField {
                    id: f.id.clone(),
                    field_type: f.field_type,
                    value: f.value.clone(),
                    name: f.name.clone(),
                    rect: to_pixels(&f.rect(), vp.width, vp.height),
                    selected: self.selected.as_deref() == Some(f.id.as_str()),
                })
                .collect(),
            None => Vec::new(),
        };
    }

    pub fn pending_gesture(&self) -> Option<&PendingGesture> {
        self.gesture.as_ref()
    }

    fn begin(&mut self, id: &str, kind: GestureKind, start: (f64, f64)) {
        if self.field(id).is_some() {
            self.gesture = Some(PendingGesture {
                id: id.to_string(),
                kind,
                last: start,
            });
        }
    }

    fn track(&mut self, id: &str, kind: GestureKind, at: (f64, f64)) {
        if let Some(g) = self.gesture.as_mut() {
            if g.id == id && g.kind == kind {
                g.last = at;
            }
        }
    }

    fn finish(&mut self, id: &str, kind: GestureKind) {
        if self
            .gesture
            .as_ref()
            .is_some_and(|g| g.id == id && g.kind == kind)
        {
            self.gesture = None;
        }
    }

    /// Start dragging a field.
    pub fn begin_drag(&mut self, id: &str) {
        let start = self
            .rendered
            .iter()
            .find(|r| r.id == id)
            .map_or((0.0, 0.0), |r| (r.rect.x, r.rect.y));
        self.begin(id, GestureKind::Drag, start);
    }

    /// Record an intermediate drag position. The field is not modified.
    pub fn update_drag(&mut self, id: &str, pixel_x: f64, pixel_y: f64) {
        self.track(id, GestureKind::Drag, (pixel_x, pixel_y));
    }

    /// Commit the drop position of a drag.
    ///
    /// The position is taken as already clamped by the host's drag surface
    /// and is converted without further clamping.
    pub fn end_drag(&mut self, id: &str, pixel_x: f64, pixel_y: f64) {
        self.finish(id, GestureKind::Drag);
        let Some(vp) = self.viewport else {
            return;
        };
        let Ok((x, y)) = pixel_point_to_normalized(pixel_x, pixel_y, vp.width, vp.height) else {
            return;
        };
        if let Some(field) = self.field_mut(id) {
            field.x = x;
            field.y = y;
            #[cfg(feature = "tracing")]
            tracing::debug!(id, x, y, "drag committed");
            self.refresh();
        }
    }

    /// Start resizing a field.
    pub fn begin_resize(&mut self, id: &str) {
        self.begin(id, GestureKind::Resize, (0.0, 0.0));
    }

    /// Record an intermediate resize delta. The field is not modified.
    pub fn update_resize(&mut self, id: &str, dx: f64, dy: f64) {
        self.track(id, GestureKind::Resize, (dx, dy));
    }

    /// Commit a resize by a pixel delta; sizes never go below zero.
    pub fn end_resize(&mut self, id: &str, dx: f64, dy: f64) {
        self.finish(id, GestureKind::Resize);
        let Some(vp) = self.viewport else {
            return;
        };
        let Ok((ndx, ndy)) = pixel_delta_to_normalized(dx, dy, vp.width, vp.height) else {
            return;
        };
        if let Some(field) = self.field_mut(id) {
            field.width = (field.width + ndx).max(0.0);
            field.height = (field.height + ndy).max(0.0);
            self.refresh();
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_field(&self) -> Option<&Field> {
        self.selected.as_deref().and_then(|id| self.field(id))
    }

    /// Select a field. Unknown ids leave the selection as it was.
    pub fn select(&mut self, id: &str) {
        if self.field(id).is_some() {
            self.selected = Some(id.to_string());
            self.refresh();
        }
    }

    pub fn select_none(&mut self) {
        self.selected = None;
        self.refresh();
    }

    /// Topmost visible field under a pixel position.
    pub fn field_at(&self, pixel_x: f64, pixel_y: f64) -> Option<&str> {
        self.rendered
            .iter()
            .rev()
            .find(|r| r.rect.contains(pixel_x, pixel_y))
            .map(|r| r.id.as_str())
    }

    /// Select whatever field is under the pointer, or clear the selection
    /// when the click lands on bare page.
    pub fn click(&mut self, pixel_x: f64, pixel_y: f64) -> Option<String> {
        match self.field_at(pixel_x, pixel_y).map(str::to_string) {
            Some(id) => {
                self.select(&id);
                Some(id)
            }
            None => {
                self.select_none();
                None
            }
        }
    }

    /// Merge property changes into a field. Unknown ids are ignored.
    pub fn update(&mut self, id: &str, patch: &FieldPatch) {
        if let Some(field) = self.field_mut(id) {
            patch.apply(field);
            self.refresh();
        }
    }
}

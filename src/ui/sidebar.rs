//! Sidebar collapse and drag-to-resize interaction state
//!
//! Widths are tracked in logical pixels and rendered at `PX_PER_CELL` pixels
//! per terminal cell, so the main area's leading margin and the sidebar width
//! stay numerically equal with no gap or overlap. One `SidebarState` value
//! owns the whole gesture: the single-active-drag invariant lives here, not
//! in ambient globals.

use ratatui::layout::Rect;

/// Hit zone on the sidebar's trailing edge, logical px.
pub const DRAG_HANDLE_WIDTH: u16 = 6;
pub const MIN_WIDTH: u16 = 140;
pub const MAX_WIDTH: u16 = 400;
pub const DEFAULT_WIDTH: u16 = 220;
/// Width of the collapsed icon rail.
pub const COLLAPSED_WIDTH: u16 = 40;
pub const PX_PER_CELL: u16 = 10;

#[derive(Debug, Clone, Copy)]
struct Drag {
    start_x: i32,
    start_width: u16,
}

#[derive(Debug, Default)]
pub struct SidebarState {
    pub collapsed: bool,
    /// Manual width set by a drag, px. None means the layout default.
    width_override: Option<u16>,
    /// Main-area leading margin, px. Kept equal to `width_override`.
    main_margin: Option<u16>,
    drag: Option<Drag>,
    /// Hover affordance over the resize handle.
    handle_armed: bool,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered sidebar width in logical px.
    pub fn width(&self) -> u16 {
        if self.collapsed {
            COLLAPSED_WIDTH
        } else {
            self.width_override.unwrap_or(DEFAULT_WIDTH)
        }
    }

    /// Main-area leading margin in logical px.
    pub fn main_margin(&self) -> u16 {
        if self.collapsed {
            COLLAPSED_WIDTH
        } else {
            self.main_margin.unwrap_or(DEFAULT_WIDTH)
        }
    }

    pub fn width_cells(&self) -> u16 {
        self.width() / PX_PER_CELL
    }

    pub fn manual_width(&self) -> Option<u16> {
        self.width_override
    }

    pub fn manual_margin(&self) -> Option<u16> {
        self.main_margin
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn handle_armed(&self) -> bool {
        self.handle_armed
    }

    /// Flip collapsed/expanded. Entering the collapsed state clears any
    /// manual resize on both the sidebar and the main-area margin, reverting
    /// to layout defaults.
    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
        if self.collapsed {
            self.width_override = None;
            self.main_margin = None;
            self.drag = None;
            self.handle_armed = false;
        }
    }

    /// Is a pointer x (px) within the trailing-edge hit zone, given the
    /// sidebar's right edge (px)?
    pub fn in_handle(&self, x_px: i32, right_px: i32) -> bool {
        let gap = right_px - x_px;
        (0..=DRAG_HANDLE_WIDTH as i32).contains(&gap)
    }

    /// Update the hover affordance. No-op mid-drag.
    pub fn hover(&mut self, x_px: i32, right_px: i32) {
        if self.drag.is_some() {
            return;
        }
        self.handle_armed = !self.collapsed && self.in_handle(x_px, right_px);
    }

    pub fn leave(&mut self) {
        if self.drag.is_none() {
            self.handle_armed = false;
        }
    }

    /// Begin a drag at pointer x (px). Refused while collapsed or when a
    /// drag is already active.
    pub fn begin_drag(&mut self, x_px: i32) -> bool {
        if self.collapsed || self.drag.is_some() {
            return false;
        }
        self.drag = Some(Drag {
            start_x: x_px,
            start_width: self.width(),
        });
        self.handle_armed = true;
        true
    }

    /// Apply a pointer move at x (px). Returns the new width when dragging.
    pub fn drag_to(&mut self, x_px: i32) -> Option<u16> {
        let drag = self.drag?;
        let delta = x_px - drag.start_x;
        let width = clamp_width(drag.start_width as i32 + delta);
        self.width_override = Some(width);
        self.main_margin = Some(width);
        Some(width)
    }

    /// End the drag unconditionally.
    pub fn end_drag(&mut self) {
        self.drag = None;
        self.handle_armed = false;
    }
}

/// Silently clamp a candidate width into the allowed range.
pub fn clamp_width(width: i32) -> u16 {
    width.clamp(MIN_WIDTH as i32, MAX_WIDTH as i32) as u16
}

/// Logical px of a cell's right edge.
pub fn cell_right_px(col: u16) -> i32 {
    (col as i32 + 1) * PX_PER_CELL as i32
}

/// Logical px of a rect's right edge.
pub fn rect_right_px(rect: Rect) -> i32 {
    (rect.x as i32 + rect.width as i32) * PX_PER_CELL as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dragged_to(start_width: u16, displacement: i32) -> u16 {
        let mut sidebar = SidebarState::new();
        sidebar.width_override = Some(start_width);
        sidebar.main_margin = Some(start_width);
        assert!(sidebar.begin_drag(500));
        sidebar.drag_to(500 + displacement).unwrap()
    }

    #[test]
    fn test_clamp_upper() {
        assert_eq!(dragged_to(200, 1000), 400);
    }

    #[test]
    fn test_clamp_lower() {
        assert_eq!(dragged_to(200, -1000), 140);
    }

    #[test]
    fn test_unclamped_move() {
        assert_eq!(dragged_to(200, 60), 260);
        assert_eq!(dragged_to(200, -30), 170);
    }

    #[test]
    fn test_margin_tracks_width() {
        let mut sidebar = SidebarState::new();
        assert!(sidebar.begin_drag(300));
        sidebar.drag_to(380);
        assert_eq!(sidebar.width(), sidebar.main_margin());
        assert_eq!(sidebar.manual_width(), sidebar.manual_margin());
    }

    #[test]
    fn test_collapse_clears_manual_width() {
        let mut sidebar = SidebarState::new();
        assert!(sidebar.begin_drag(300));
        sidebar.drag_to(380);
        sidebar.end_drag();
        assert_eq!(sidebar.manual_width(), Some(300));

        sidebar.toggle_collapsed();
        assert!(sidebar.collapsed);
        assert_eq!(sidebar.manual_width(), None);
        assert_eq!(sidebar.manual_margin(), None);

        // Expanding again reverts to the layout default.
        sidebar.toggle_collapsed();
        assert_eq!(sidebar.width(), DEFAULT_WIDTH);
        assert_eq!(sidebar.main_margin(), DEFAULT_WIDTH);
    }

    #[test]
    fn test_no_drag_while_collapsed() {
        let mut sidebar = SidebarState::new();
        sidebar.toggle_collapsed();
        assert!(!sidebar.begin_drag(100));
        assert_eq!(sidebar.drag_to(300), None);
    }

    #[test]
    fn test_single_active_drag() {
        let mut sidebar = SidebarState::new();
        assert!(sidebar.begin_drag(100));
        // A second pointer-down does not restart the gesture.
        assert!(!sidebar.begin_drag(900));
        sidebar.drag_to(160);
        assert_eq!(sidebar.width(), 280);
    }

    #[test]
    fn test_end_drag_unconditional() {
        let mut sidebar = SidebarState::new();
        sidebar.end_drag();
        assert!(!sidebar.is_dragging());

        sidebar.begin_drag(100);
        sidebar.end_drag();
        assert!(!sidebar.is_dragging());
        // Moves after pointer-up do nothing.
        assert_eq!(sidebar.drag_to(400), None);
    }

    #[test]
    fn test_handle_hit_zone() {
        let sidebar = SidebarState::new();
        assert!(sidebar.in_handle(220, 220));
        assert!(sidebar.in_handle(214, 220));
        assert!(!sidebar.in_handle(213, 220));
        // Past the edge is not a hit.
        assert!(!sidebar.in_handle(221, 220));
    }

    #[test]
    fn test_hover_arming() {
        let mut sidebar = SidebarState::new();
        sidebar.hover(220, 220);
        assert!(sidebar.handle_armed());
        sidebar.hover(100, 220);
        assert!(!sidebar.handle_armed());

        // Hover state is frozen mid-drag.
        sidebar.begin_drag(220);
        sidebar.hover(100, 220);
        assert!(sidebar.handle_armed());
        sidebar.leave();
        assert!(sidebar.handle_armed());
        sidebar.end_drag();
        assert!(!sidebar.handle_armed());
    }

    #[test]
    fn test_no_arming_while_collapsed() {
        let mut sidebar = SidebarState::new();
        sidebar.toggle_collapsed();
        sidebar.hover(40, 40);
        assert!(!sidebar.handle_armed());
    }

    #[test]
    fn test_px_cell_conversions() {
        assert_eq!(cell_right_px(21), 220);
        let rect = Rect {
            x: 0,
            y: 3,
            width: 22,
            height: 20,
        };
        assert_eq!(rect_right_px(rect), 220);
        // Clicking the last sidebar column lands inside the 6 px hit zone.
        let sidebar = SidebarState::new();
        assert!(sidebar.in_handle(cell_right_px(21), rect_right_px(rect)));
        assert!(!sidebar.in_handle(cell_right_px(20), rect_right_px(rect)));
    }
}

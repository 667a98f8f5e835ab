//! Simulates the pointer-driven interactions: the sidebar drag-resize math,
//! the refresh control's disabled window, and the notification dropdown's
//! outside-click behavior.

const DRAG_HANDLE_WIDTH: i32 = 6;
const MIN_WIDTH: i32 = 140;
const MAX_WIDTH: i32 = 400;
const DEFAULT_WIDTH: i32 = 220;

#[derive(Debug, Default)]
struct MockSidebar {
    collapsed: bool,
    width_override: Option<i32>,
    margin_override: Option<i32>,
    drag: Option<(i32, i32)>, // (start_x, start_width)
}

impl MockSidebar {
    fn width(&self) -> i32 {
        self.width_override.unwrap_or(DEFAULT_WIDTH)
    }

    fn in_handle(&self, x: i32, right_edge: i32) -> bool {
        let offset = right_edge - x;
        (0..=DRAG_HANDLE_WIDTH).contains(&offset)
    }

    fn begin_drag(&mut self, x: i32) -> bool {
        if self.collapsed || self.drag.is_some() {
            return false;
        }
        self.drag = Some((x, self.width()));
        true
    }

    fn drag_to(&mut self, x: i32) -> Option<i32> {
        let (start_x, start_width) = self.drag?;
        let next = (start_width + (x - start_x)).clamp(MIN_WIDTH, MAX_WIDTH);
        self.width_override = Some(next);
        self.margin_override = Some(next);
        Some(next)
    }

    fn end_drag(&mut self) {
        self.drag = None;
    }

    fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
        if self.collapsed {
            self.width_override = None;
            self.margin_override = None;
            self.drag = None;
        }
    }
}

#[test]
fn test_drag_clamps_to_bounds() {
    let mut sidebar = MockSidebar::default();
    sidebar.width_override = Some(200);
    sidebar.margin_override = Some(200);

    assert!(sidebar.begin_drag(200));
    // A wild rightward displacement pins at the maximum.
    assert_eq!(sidebar.drag_to(1200), Some(MAX_WIDTH));
    // And a wild leftward one pins at the minimum.
    assert_eq!(sidebar.drag_to(-800), Some(MIN_WIDTH));
    sidebar.end_drag();
    assert_eq!(sidebar.width(), MIN_WIDTH);
}

#[test]
fn test_drag_moves_width_and_margin_together() {
    let mut sidebar = MockSidebar::default();
    assert!(sidebar.begin_drag(220));
    sidebar.drag_to(300);
    assert_eq!(sidebar.width_override, Some(300));
    assert_eq!(sidebar.margin_override, Some(300));
}

#[test]
fn test_second_press_does_not_restart_an_active_drag() {
    let mut sidebar = MockSidebar::default();
    assert!(sidebar.begin_drag(220));
    sidebar.drag_to(260);
    // Start point must survive a stray second press.
    assert!(!sidebar.begin_drag(400));
    assert_eq!(sidebar.drag_to(280), Some(DEFAULT_WIDTH + 60));
}

#[test]
fn test_handle_zone_is_six_pixels_inside_the_edge() {
    let sidebar = MockSidebar::default();
    let right = 220;
    assert!(sidebar.in_handle(220, right));
    assert!(sidebar.in_handle(214, right));
    assert!(!sidebar.in_handle(213, right));
    assert!(!sidebar.in_handle(221, right));
}

#[test]
fn test_collapse_discards_manual_width() {
    let mut sidebar = MockSidebar::default();
    sidebar.begin_drag(220);
    sidebar.drag_to(330);
    sidebar.end_drag();
    assert_eq!(sidebar.width(), 330);

    sidebar.toggle_collapsed();
    assert!(sidebar.width_override.is_none());
    assert!(sidebar.margin_override.is_none());

    // Expanding again returns to the default, not the dragged width.
    sidebar.toggle_collapsed();
    assert_eq!(sidebar.width(), DEFAULT_WIDTH);
}

#[test]
fn test_collapsed_sidebar_refuses_drags() {
    let mut sidebar = MockSidebar::default();
    sidebar.toggle_collapsed();
    assert!(!sidebar.begin_drag(40));
}

#[derive(Debug, Default)]
struct MockRefresh {
    busy: bool,
    reloads: u32,
}

impl MockRefresh {
    fn press(&mut self) {
        if self.busy {
            return;
        }
        self.busy = true;
    }

    fn complete(&mut self) {
        if self.busy {
            self.busy = false;
            self.reloads += 1;
        }
    }
}

#[test]
fn test_refresh_presses_collapse_while_busy() {
    let mut refresh = MockRefresh::default();
    refresh.press();
    refresh.press();
    refresh.press();
    refresh.complete();
    assert_eq!(refresh.reloads, 1);

    // Re-armed after the reload lands.
    refresh.press();
    refresh.complete();
    assert_eq!(refresh.reloads, 2);
}

#[derive(Debug, Clone, Copy)]
struct MockRect {
    x: u16,
    y: u16,
    width: u16,
    height: u16,
}

fn rect_contains(rect: MockRect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

struct MockDropdown {
    open: bool,
    toggle: MockRect,
    panel: MockRect,
}

impl MockDropdown {
    /// A click either toggles, lands inside, or closes and falls through.
    /// Returns whether the click should keep propagating.
    fn click(&mut self, col: u16, row: u16) -> bool {
        if rect_contains(self.toggle, col, row) {
            self.open = !self.open;
            return false;
        }
        if self.open {
            if rect_contains(self.panel, col, row) {
                return false;
            }
            self.open = false;
        }
        true
    }
}

fn dropdown() -> MockDropdown {
    MockDropdown {
        open: false,
        toggle: MockRect {
            x: 70,
            y: 0,
            width: 10,
            height: 3,
        },
        panel: MockRect {
            x: 34,
            y: 3,
            width: 46,
            height: 9,
        },
    }
}

#[test]
fn test_toggle_click_never_propagates() {
    let mut dropdown = dropdown();
    assert!(!dropdown.click(72, 1));
    assert!(dropdown.open);
    // The same press closes it again without leaking through.
    assert!(!dropdown.click(72, 1));
    assert!(!dropdown.open);
}

#[test]
fn test_inside_click_is_consumed() {
    let mut dropdown = dropdown();
    dropdown.click(72, 1);
    assert!(!dropdown.click(40, 5));
    assert!(dropdown.open);
}

#[test]
fn test_outside_click_closes_and_falls_through() {
    let mut dropdown = dropdown();
    dropdown.click(72, 1);
    assert!(dropdown.open);
    // A press on the table below both closes the panel and reaches the table.
    assert!(dropdown.click(10, 20));
    assert!(!dropdown.open);
}

#[test]
fn test_click_with_closed_dropdown_passes_through() {
    let mut dropdown = dropdown();
    assert!(dropdown.click(10, 20));
    assert!(!dropdown.open);
}

use sizeguard_core::WindowEvent;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    EVENT_OBJECT_DESTROY, EVENT_OBJECT_LOCATIONCHANGE, EVENT_OBJECT_SHOW,
    EVENT_SYSTEM_MINIMIZEEND, EVENT_SYSTEM_MINIMIZESTART, GA_ROOT, GetAncestor,
};

/// Object ID indicating the event applies to the window itself,
/// not a child element like a scrollbar or menu item.
const OBJID_WINDOW: i32 = 0;

/// Lowest event code the WinEvent hook subscribes to.
pub(crate) const EVENT_MIN: u32 = EVENT_SYSTEM_MINIMIZESTART;

/// Highest event code the WinEvent hook subscribes to.
pub(crate) const EVENT_MAX: u32 = EVENT_OBJECT_LOCATIONCHANGE;

/// Translates a raw WinEvent into a platform-agnostic `WindowEvent`.
///
/// Returns `None` for events on child objects (scrollbars, carets) and
/// for event types the size guard does not react to.
pub fn translate(event: u32, hwnd: HWND, id_object: i32) -> Option<WindowEvent> {
    if id_object != OBJID_WINDOW || hwnd.is_invalid() {
        return None;
    }

    classify(event, hwnd.0 as usize, is_root(hwnd))
}

/// Maps an event on a whole window to a `WindowEvent`.
///
/// Opened and visual-state events are only reported for top-level
/// windows; child windows are positioned relative to their parent.
/// Destruction is reported for any window since the handle may already
/// be gone by the time its ancestry could be checked.
fn classify(event: u32, hwnd: usize, root: bool) -> Option<WindowEvent> {
    match event {
        EVENT_OBJECT_DESTROY => Some(WindowEvent::Closed { hwnd }),
        EVENT_OBJECT_SHOW if root => Some(WindowEvent::Opened { hwnd }),
        EVENT_SYSTEM_MINIMIZESTART | EVENT_SYSTEM_MINIMIZEEND | EVENT_OBJECT_LOCATIONCHANGE
            if root =>
        {
            Some(WindowEvent::VisualStateChanged { hwnd })
        }
        _ => None,
    }
}

fn is_root(hwnd: HWND) -> bool {
    // SAFETY: GetAncestor is a simple query.
    unsafe { GetAncestor(hwnd, GA_ROOT) == hwnd }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::Win32::UI::WindowsAndMessaging::EVENT_SYSTEM_FOREGROUND;

    fn fake_hwnd(value: usize) -> HWND {
        HWND(value as *mut _)
    }

    #[test]
    fn destroy_becomes_closed() {
        // Act
        let event = translate(EVENT_OBJECT_DESTROY, fake_hwnd(0x1234), OBJID_WINDOW);

        // Assert
        assert_eq!(event, Some(WindowEvent::Closed { hwnd: 0x1234 }));
    }

    #[test]
    fn minimize_and_location_become_visual_state_changes() {
        // Assert
        for raw in [
            EVENT_SYSTEM_MINIMIZESTART,
            EVENT_SYSTEM_MINIMIZEEND,
            EVENT_OBJECT_LOCATIONCHANGE,
        ] {
            assert_eq!(
                classify(raw, 0x42, true),
                Some(WindowEvent::VisualStateChanged { hwnd: 0x42 })
            );
        }
    }

    #[test]
    fn child_window_changes_are_ignored() {
        // Assert
        for raw in [
            EVENT_OBJECT_SHOW,
            EVENT_SYSTEM_MINIMIZESTART,
            EVENT_SYSTEM_MINIMIZEEND,
            EVENT_OBJECT_LOCATIONCHANGE,
        ] {
            assert_eq!(classify(raw, 0x42, false), None);
        }
    }

    #[test]
    fn shown_top_level_window_becomes_opened() {
        // Act
        let event = classify(EVENT_OBJECT_SHOW, 0x42, true);

        // Assert
        assert_eq!(event, Some(WindowEvent::Opened { hwnd: 0x42 }));
    }

    #[test]
    fn location_change_on_unknown_handle_is_ignored() {
        // Act
        let event = translate(EVENT_OBJECT_LOCATIONCHANGE, fake_hwnd(0x42), OBJID_WINDOW);

        // Assert
        assert_eq!(event, None);
    }

    #[test]
    fn child_objects_are_ignored() {
        // Act
        let event = translate(EVENT_OBJECT_DESTROY, fake_hwnd(0x1234), -1);

        // Assert
        assert_eq!(event, None);
    }

    #[test]
    fn null_window_is_ignored() {
        // Act
        let event = translate(EVENT_OBJECT_DESTROY, fake_hwnd(0), OBJID_WINDOW);

        // Assert
        assert_eq!(event, None);
    }

    #[test]
    fn unrelated_events_are_ignored() {
        // Act
        let event = translate(EVENT_SYSTEM_FOREGROUND, fake_hwnd(0x1234), OBJID_WINDOW);

        // Assert
        assert_eq!(event, None);
    }
}

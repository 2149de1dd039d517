//! Main menu: two buttons and pointer hit testing

use glam::Vec2;

use crate::sim::Rect;

/// What a menu click asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: &'static str,
    pub action: MenuAction,
}

impl Button {
    pub const fn new(rect: Rect, label: &'static str, action: MenuAction) -> Self {
        Self {
            rect,
            label,
            action,
        }
    }
}

/// Start and Exit buttons, centred in the window
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    pub start: Button,
    pub exit: Button,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            start: Button::new(
                Rect::new(450.0, 250.0, 300.0, 70.0),
                "START GAME",
                MenuAction::Start,
            ),
            exit: Button::new(
                Rect::new(450.0, 350.0, 300.0, 70.0),
                "EXIT",
                MenuAction::Exit,
            ),
        }
    }
}

impl Menu {
    /// Buttons in draw order
    pub fn buttons(&self) -> [&Button; 2] {
        [&self.start, &self.exit]
    }

    /// Button under a window position
    pub fn hit(&self, point: Vec2) -> Option<MenuAction> {
        self.buttons()
            .into_iter()
            .find(|b| b.rect.contains(point))
            .map(|b| b.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_start_and_exit() {
        let menu = Menu::default();
        assert_eq!(menu.hit(Vec2::new(600.0, 285.0)), Some(MenuAction::Start));
        assert_eq!(menu.hit(Vec2::new(600.0, 385.0)), Some(MenuAction::Exit));
    }

    #[test]
    fn test_gap_and_outside_miss() {
        let menu = Menu::default();
        // Between the two buttons
        assert_eq!(menu.hit(Vec2::new(600.0, 335.0)), None);
        assert_eq!(menu.hit(Vec2::new(100.0, 100.0)), None);
        assert_eq!(menu.hit(Vec2::new(751.0, 285.0)), None);
    }

    #[test]
    fn test_top_left_corner_is_inside() {
        let menu = Menu::default();
        assert_eq!(menu.hit(Vec2::new(450.0, 250.0)), Some(MenuAction::Start));
    }
}

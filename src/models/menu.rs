/// Identifier passed back to windows when a menu item is chosen.
pub type MenuItemId = i32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub label: String,
}

/// Application-wide menubar.
///
/// Native menu integration belongs to the platform backend; the controller only
/// tracks whether one is installed, since that changes each window's content area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menubar {
    pub items: Vec<MenuItem>,
}

impl Menubar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, id: MenuItemId, label: impl Into<String>) -> Self {
        self.items.push(MenuItem {
            id,
            label: label.into(),
        });
        self
    }
}

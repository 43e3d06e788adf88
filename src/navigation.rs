//! Menu entries and the viewer's open-tab bookkeeping.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuEntry {
    Dashboard,
    Calibration,
    Objects,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 3] = [MenuEntry::Dashboard, MenuEntry::Calibration, MenuEntry::Objects];

    pub fn title(self) -> &'static str {
        match self {
            MenuEntry::Dashboard => "Dashboard",
            MenuEntry::Calibration => "Calibration",
            MenuEntry::Objects => "Objects",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            MenuEntry::Dashboard => "/",
            MenuEntry::Calibration => "/calibration",
            MenuEntry::Objects => "/objects",
        }
    }
}

/// Open tabs in the order they were opened, plus the active one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSet {
    open: Vec<MenuEntry>,
    active: Option<MenuEntry>,
}

impl Default for TabSet {
    fn default() -> Self {
        Self {
            open: vec![MenuEntry::Dashboard],
            active: Some(MenuEntry::Dashboard),
        }
    }
}

impl TabSet {
    pub fn open(&self) -> &[MenuEntry] {
        &self.open
    }

    pub fn active(&self) -> Option<MenuEntry> {
        self.active
    }

    pub fn is_open(&self, entry: MenuEntry) -> bool {
        self.open.contains(&entry)
    }

    pub fn is_active(&self, entry: MenuEntry) -> bool {
        self.active == Some(entry)
    }

    /// Activate `entry`, opening it at the end if it is not open yet.
    /// Returns true if the set changed.
    pub fn show_tab(&mut self, entry: MenuEntry) -> bool {
        let mut changed = false;
        if !self.is_open(entry) {
            self.open.push(entry);
            changed = true;
        }
        if self.active != Some(entry) {
            self.active = Some(entry);
            changed = true;
        }
        changed
    }

    /// Close `entry`. Closing the active tab activates its left neighbour,
    /// or the new first tab when it was leftmost.
    pub fn close_tab(&mut self, entry: MenuEntry) {
        let Some(index) = self.open.iter().position(|e| *e == entry) else {
            return;
        };
        self.open.remove(index);

        if self.active == Some(entry) {
            self.active = self.open.get(index.saturating_sub(1)).copied();
        }
    }
}

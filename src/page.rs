//! Interaction state for the landing page, independent of any DOM binding.
//! Elements the page may not contain are `Option`s on the owning `Page`;
//! events aimed at a missing element do nothing.

pub const NAV_CONDENSE_AT: f64 = 60.0;
pub const SCROLL_TOP_AT: f64 = 400.0;
pub const TOAST_MS: f64 = 4000.0;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct NavBar {
    pub condensed: bool,
}

impl NavBar {
    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.condensed = scroll_y > NAV_CONDENSE_AT;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub smooth: bool,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScrollTopButton {
    pub visible: bool,
}

impl ScrollTopButton {
    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.visible = scroll_y > SCROLL_TOP_AT;
    }

    pub fn click(&self) -> ScrollRequest {
        ScrollRequest {
            top: 0.0,
            smooth: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub label: String,
    /// Id of the panel this tab reveals
    pub target: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub id: String,
    pub active: bool,
}

/// Technology tabs: at most one tab and one panel are active after a click
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TabSet {
    pub tabs: Vec<Tab>,
    pub panels: Vec<Panel>,
}

impl TabSet {
    pub fn new(tabs: &[(&str, &str)], panels: &[&str]) -> Self {
        Self {
            tabs: tabs
                .iter()
                .map(|(label, target)| Tab {
                    label: (*label).to_owned(),
                    target: Some((*target).to_owned()),
                    active: false,
                })
                .collect(),
            panels: panels
                .iter()
                .map(|id| Panel {
                    id: (*id).to_owned(),
                    active: false,
                })
                .collect(),
        }
    }

    pub fn select(&mut self, index: usize) {
        if index >= self.tabs.len() {
            return;
        }
        self.tabs.iter_mut().for_each(|t| t.active = false);
        self.panels.iter_mut().for_each(|p| p.active = false);

        let tab = &mut self.tabs[index];
        tab.active = true;
        if let Some(target) = &tab.target {
            if let Some(panel) = self.panels.iter_mut().find(|p| &p.id == target) {
                panel.active = true;
            }
        }
    }

    pub fn active_panel(&self) -> Option<&str> {
        self.panels.iter().find(|p| p.active).map(|p| p.id.as_str())
    }
}

/// Auto-dismissing acknowledgement. Every show schedules its own hide, and
/// the earliest pending hide wins.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Toast {
    pub shown: bool,
    hide_at: Vec<f64>,
}

impl Toast {
    pub fn show(&mut self, now: f64) {
        self.shown = true;
        self.hide_at.push(now + TOAST_MS);
    }

    pub fn tick(&mut self, now: f64) {
        let before = self.hide_at.len();
        self.hide_at.retain(|at| *at > now);
        if self.hide_at.len() < before {
            self.shown = false;
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ContactForm {
    pub fields: Vec<(String, String)>,
}

impl ContactForm {
    pub fn fill(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some(field) => field.1 = value.to_owned(),
            None => self.fields.push((name.to_owned(), value.to_owned())),
        }
    }

    pub fn reset(&mut self) {
        self.fields.iter_mut().for_each(|(_, v)| v.clear());
    }
}

/// What the host should do with the native submit event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Submit {
    PreventDefault,
    Default,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Page {
    pub nav: Option<NavBar>,
    pub tabs: Option<TabSet>,
    pub scroll_top: Option<ScrollTopButton>,
    pub form: Option<ContactForm>,
    pub toast: Toast,
}

impl Page {
    pub fn on_scroll(&mut self, scroll_y: f64) {
        if let Some(nav) = &mut self.nav {
            nav.on_scroll(scroll_y);
        }
        if let Some(button) = &mut self.scroll_top {
            button.on_scroll(scroll_y);
        }
    }

    pub fn on_tab_click(&mut self, index: usize) {
        if let Some(tabs) = &mut self.tabs {
            tabs.select(index);
        }
    }

    pub fn on_scroll_top_click(&self) -> Option<ScrollRequest> {
        self.scroll_top.as_ref().map(ScrollTopButton::click)
    }

    /// Nothing is sent anywhere: the form is acknowledged and cleared
    pub fn on_submit(&mut self, now: f64) -> Submit {
        match &mut self.form {
            Some(form) => {
                self.toast.show(now);
                form.reset();
                Submit::PreventDefault
            }
            None => Submit::Default,
        }
    }

    pub fn on_timer(&mut self, now: f64) {
        self.toast.tick(now);
    }
}

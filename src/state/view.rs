use crate::session::Session;
use crate::theme::Tone;
use crate::types::Category;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Login,
    Chat,
}

/// One line of inline feedback next to a control.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
}

impl StatusLine {
    pub fn neutral(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Neutral,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Error,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Success,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub status: StatusLine,
    pub pending: bool,
    /// Bumped each time the login view is shown; the view focuses the
    /// username field when it changes.
    pub focus_request: u64,
}

impl LoginForm {
    pub fn reset(&mut self) {
        self.username.clear();
        self.password.clear();
        self.status = StatusLine::default();
        self.pending = false;
        self.focus_request = self.focus_request.wrapping_add(1);
    }
}

/// The chat category `<select>`: which options are enabled and which is picked.
#[derive(Clone, Debug, PartialEq)]
pub struct CategorySelector {
    enabled: Vec<Category>,
    selected: Category,
}

impl Default for CategorySelector {
    fn default() -> Self {
        Self {
            enabled: Vec::new(),
            selected: Category::Public,
        }
    }
}

impl CategorySelector {
    /// Enable exactly the granted categories and select the first of them.
    pub fn configure(&mut self, session: &Session) {
        self.enabled = session.known_categories();
        self.selected = self.enabled.first().copied().unwrap_or(Category::Public);
    }

    /// Every vocabulary entry with whether it can be chosen.
    pub fn options(&self) -> Vec<(Category, bool)> {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.is_enabled(category)))
            .collect()
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        self.enabled.contains(&category)
    }

    pub fn selected(&self) -> Category {
        self.selected
    }

    /// Returns false (and keeps the current value) for disabled options.
    pub fn select(&mut self, category: Category) -> bool {
        if self.is_enabled(category) {
            self.selected = category;
            true
        } else {
            false
        }
    }
}

//! Navigation and view switching utilities.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Components,
    Specifications,
    Grades,
    Market,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Components => "Components",
            View::Specifications => "Specifications",
            View::Grades => "Grades",
            View::Market => "Market",
        }
    }

    pub fn all() -> &'static [View] {
        &[
            View::Components,
            View::Specifications,
            View::Grades,
            View::Market,
        ]
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<View> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> View {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> View {
        let idx = self.index();
        let all = Self::all();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }

    /// Whether the view shows editable form fields.
    pub fn is_form(&self) -> bool {
        !matches!(self, View::Market)
    }
}

//! Text-mode class card
//!
//! Binds to one class and keeps a label per field and method. Labels are
//! reconciled against the class when the caller reports a change, then the
//! card can be drawn as a box:
//!
//! ```text
//! ┌────────────┐
//! │    Car     │
//! ├────────────┤
//! │ int wheels │
//! ├────────────┤
//! │ void drive │
//! └────────────┘
//! ```

use indexmap::IndexMap;
use unicode_width::UnicodeWidthStr;

use umlmodel::model::UmlClass;
use umlmodel::ViewBinder;

/// Box drawing characters for the card
#[derive(Debug, Clone, Copy)]
struct BoxChars {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
    t_right: char,
    t_left: char,
}

impl BoxChars {
    fn new(ascii: bool) -> Self {
        if ascii {
            Self {
                top_left: '+',
                top_right: '+',
                bottom_left: '+',
                bottom_right: '+',
                horizontal: '-',
                vertical: '|',
                t_right: '+',
                t_left: '+',
            }
        } else {
            Self {
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                horizontal: '─',
                vertical: '│',
                t_right: '├',
                t_left: '┤',
            }
        }
    }
}

/// Label state for one displayed class
#[derive(Debug, Default)]
pub struct TextClassView {
    title: String,
    field_labels: IndexMap<String, String>,
    method_labels: IndexMap<String, String>,
    field_separator: bool,
    method_separator: bool,
    x: i32,
    y: i32,
}

/// Rebuild labels from the class's current members, in member order
///
/// Every label is redrawn, so a member removed and re-added under the same
/// name between two syncs shows its new descriptor.
fn reconcile<'a, M: ToString + 'a>(
    labels: &mut IndexMap<String, String>,
    members: impl Iterator<Item = (&'a String, &'a M)>,
) {
    *labels = members
        .map(|(name, member)| (name.clone(), member.to_string()))
        .collect();
}

impl TextClassView {
    /// Bind a new view to `class` and pull its full state
    pub fn new(class: &UmlClass) -> Self {
        let mut view = Self::default();
        view.sync_all(class);
        view
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn field_labels(&self) -> impl Iterator<Item = &str> {
        self.field_labels.values().map(String::as_str)
    }

    pub fn method_labels(&self) -> impl Iterator<Item = &str> {
        self.method_labels.values().map(String::as_str)
    }

    pub fn location(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Draw the card, with pure ASCII when `ascii` is set
    pub fn render(&self, ascii: bool) -> String {
        let chars = BoxChars::new(ascii);
        let labels = std::iter::once(self.title())
            .chain(self.field_labels())
            .chain(self.method_labels());
        let inner = labels.map(UnicodeWidthStr::width).max().unwrap_or(0) + 2;

        let rule = |left: char, right: char| {
            let mut line = String::new();
            line.push(left);
            line.extend(std::iter::repeat(chars.horizontal).take(inner));
            line.push(right);
            line
        };
        let row = |text: &str, centered: bool| {
            let gap = inner.saturating_sub(UnicodeWidthStr::width(text));
            let (left, right) = if centered {
                (gap / 2, gap - gap / 2)
            } else {
                (1, gap.saturating_sub(1))
            };
            format!(
                "{}{}{}{}{}",
                chars.vertical,
                " ".repeat(left),
                text,
                " ".repeat(right),
                chars.vertical
            )
        };

        let mut lines = vec![rule(chars.top_left, chars.top_right)];
        lines.push(row(self.title(), true));
        if self.field_separator {
            lines.push(rule(chars.t_right, chars.t_left));
            lines.extend(self.field_labels().map(|l| row(l, false)));
        }
        if self.method_separator {
            lines.push(rule(chars.t_right, chars.t_left));
            lines.extend(self.method_labels().map(|l| row(l, false)));
        }
        lines.push(rule(chars.bottom_left, chars.bottom_right));
        lines.join("\n")
    }
}

impl ViewBinder for TextClassView {
    fn sync_name(&mut self, class: &UmlClass) {
        self.title = class.name().to_string();
    }

    fn sync_fields(&mut self, class: &UmlClass) {
        reconcile(&mut self.field_labels, class.fields().iter());
        self.field_separator = !self.field_labels.is_empty();
    }

    fn sync_methods(&mut self, class: &UmlClass) {
        reconcile(&mut self.method_labels, class.methods().iter());
        self.method_separator = !self.method_labels.is_empty();
    }

    fn sync_location(&mut self, class: &UmlClass) {
        self.x = class.x();
        self.y = class.y();
    }
}

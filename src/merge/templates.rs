use serde::{Deserialize, Serialize};

/// Identifies a quick-start template whose placeholder lines may still be
/// sitting in a journal field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    Gratitude,
    Reflections,
}

/// How one placeholder line is recognized
#[derive(Debug, Clone, Copy)]
pub enum PlaceholderPattern {
    /// Line starts with this literal prompt text
    Prefix(&'static str),
    /// Bare numbered list marker ("1.", "2.", ...) with nothing after it
    NumberedItem,
}

impl PlaceholderPattern {
    /// Whether `line` is placeholder scaffolding for this pattern
    ///
    /// `NumberedItem` deliberately matches only empty markers: a line like
    /// "1. my dog" is user content and must survive the merge.
    pub fn matches(&self, line: &str) -> bool {
        let line = line.trim();
        match self {
            PlaceholderPattern::Prefix(prefix) => line.starts_with(prefix),
            PlaceholderPattern::NumberedItem => {
                let digits = line.chars().take_while(|ch| ch.is_ascii_digit()).count();
                if digits == 0 || digits > 2 {
                    return false;
                }
                let mut rest = line[digits..].chars();
                rest.next() == Some('.') && rest.all(char::is_whitespace)
            }
        }
    }
}

/// Ordered placeholder matchers for one template
pub struct Template {
    pub id: TemplateId,
    pub placeholders: &'static [PlaceholderPattern],
}

const GRATITUDE_PLACEHOLDERS: &[PlaceholderPattern] = &[
    PlaceholderPattern::Prefix("Today I'm grateful for"),
    PlaceholderPattern::Prefix("Three things that made me smile:"),
    PlaceholderPattern::NumberedItem,
    PlaceholderPattern::Prefix("What brought me joy:"),
];

const REFLECTIONS_PLACEHOLDERS: &[PlaceholderPattern] = &[
    PlaceholderPattern::Prefix("How did today go?"),
    PlaceholderPattern::Prefix("Wins:"),
    PlaceholderPattern::NumberedItem,
    PlaceholderPattern::Prefix("What could have gone better:"),
    PlaceholderPattern::Prefix("Tomorrow I want to"),
];

const GRATITUDE: Template = Template {
    id: TemplateId::Gratitude,
    placeholders: GRATITUDE_PLACEHOLDERS,
};

const REFLECTIONS: Template = Template {
    id: TemplateId::Reflections,
    placeholders: REFLECTIONS_PLACEHOLDERS,
};

/// Look up the placeholder set for a template
pub fn template(id: TemplateId) -> &'static Template {
    match id {
        TemplateId::Gratitude => &GRATITUDE,
        TemplateId::Reflections => &REFLECTIONS,
    }
}

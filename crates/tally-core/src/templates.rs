use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The visual layouts a document can be rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TemplateKind {
    Classic,
    Modern,
    Minimal,
    Bold,
    Corporate,
    Receipt,
}

impl TemplateKind {
    /// Layout used whenever an identifier does not name a known template.
    pub const DEFAULT: Self = Self::Classic;

    /// Map a picker identifier onto a layout. Unknown identifiers take the
    /// default arm rather than failing.
    pub fn from_id(identifier: u32) -> Self {
        match identifier {
            1 => Self::Classic,
            2 => Self::Modern,
            3 => Self::Minimal,
            4 => Self::Bold,
            5 => Self::Corporate,
            6 => Self::Receipt,
            _ => Self::DEFAULT,
        }
    }

    pub const fn id(self) -> u32 {
        match self {
            Self::Classic => 1,
            Self::Modern => 2,
            Self::Minimal => 3,
            Self::Bold => 4,
            Self::Corporate => 5,
            Self::Receipt => 6,
        }
    }

    pub fn is_receipt(self) -> bool {
        matches!(self, Self::Receipt)
    }

    pub fn descriptor(self) -> &'static TemplateDescriptor {
        &TEMPLATES[(self.id() - 1) as usize]
    }
}

impl Default for TemplateKind {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A registry entry: display name plus the 1-based picker identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateDescriptor {
    pub name: &'static str,
    pub identifier: u32,
    pub kind: TemplateKind,
}

static TEMPLATES: [TemplateDescriptor; 6] = [
    descriptor("Classic", TemplateKind::Classic),
    descriptor("Modern", TemplateKind::Modern),
    descriptor("Minimal", TemplateKind::Minimal),
    descriptor("Bold", TemplateKind::Bold),
    descriptor("Corporate", TemplateKind::Corporate),
    descriptor("Receipt", TemplateKind::Receipt),
];

const fn descriptor(name: &'static str, kind: TemplateKind) -> TemplateDescriptor {
    TemplateDescriptor {
        name,
        identifier: kind.id(),
        kind,
    }
}

/// All registered templates, in picker order.
pub fn templates() -> &'static [TemplateDescriptor] {
    &TEMPLATES
}

/// Look up a template by identifier.
pub fn get(identifier: u32) -> Option<&'static TemplateDescriptor> {
    TEMPLATES.iter().find(|t| t.identifier == identifier)
}

/// Resolve an identifier to a layout, falling back to
/// [`TemplateKind::DEFAULT`].
pub fn resolve(identifier: u32) -> TemplateKind {
    get(identifier).map_or(TemplateKind::DEFAULT, |t| t.kind)
}

/// Picker entry handed to a frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TemplateInfo {
    pub name: String,
    pub identifier: u32,
    pub selected: bool,
}

/// Build the picker list with `selected` marked.
pub fn picker(selected: TemplateKind) -> Vec<TemplateInfo> {
    TEMPLATES
        .iter()
        .map(|t| TemplateInfo {
            name: t.name.to_string(),
            identifier: t.identifier,
            selected: t.kind == selected,
        })
        .collect()
}

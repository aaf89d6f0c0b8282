use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hex code applied to tasks created without an explicit color.
pub const DEFAULT_TASK_COLOR: &str = "#87CEEB";

/// Built-in task color palette, in picker order.
pub const DEFAULT_PALETTE: [(&str, &str); 8] = [
    ("sky", "#87CEEB"),
    ("aqua", "#5EB8E0"),
    ("teal", "#2E9FD4"),
    ("mint", "#7FDBDA"),
    ("powder", "#B8E0F0"),
    ("steel", "#4682B4"),
    ("cyan", "#00BCD4"),
    ("light", "#E0F4FF"),
];

/// Errors raised while validating color values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The value is not a `#RGB` or `#RRGGBB` hex code.
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
    /// A palette was built without any colors.
    #[error("palette must contain at least one color")]
    EmptyPalette,
    /// Two palette entries share an id.
    #[error("duplicate palette color id: {0}")]
    DuplicateId(String),
}

/// Normalize a hex color into uppercase `#RRGGBB` form.
///
/// # Errors
/// Returns [`ColorError::InvalidHex`] when the value is not a 3 or 6 digit hex code.
pub fn normalize_hex(value: &str) -> Result<String, ColorError> {
    let trimmed = value.trim();
    let invalid = || ColorError::InvalidHex(value.to_owned());
    let digits = trimmed.strip_prefix('#').ok_or_else(invalid)?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_owned(),
        _ => return Err(invalid()),
    };
    Ok(format!("#{}", expanded.to_ascii_uppercase()))
}

/// Named entry of the task color palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskColor {
    /// Short name used by pickers and the shell.
    pub id: String,
    /// Hex code stored on tasks.
    pub hex: String,
}

impl TaskColor {
    /// Build a color after normalizing its hex code.
    ///
    /// # Errors
    /// Returns [`ColorError::InvalidHex`] for malformed hex codes.
    pub fn new(id: impl Into<String>, hex: &str) -> Result<Self, ColorError> {
        Ok(Self {
            id: id.into(),
            hex: normalize_hex(hex)?,
        })
    }
}

/// Ordered set of task colors. The first entry is the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<TaskColor>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE
                .iter()
                .map(|(id, hex)| TaskColor {
                    id: (*id).to_owned(),
                    hex: (*hex).to_owned(),
                })
                .collect(),
        }
    }
}

impl Palette {
    /// Build a palette from explicit colors.
    ///
    /// # Errors
    /// Rejects empty palettes, duplicate ids and malformed hex codes.
    pub fn new(colors: Vec<TaskColor>) -> Result<Self, ColorError> {
        if colors.is_empty() {
            return Err(ColorError::EmptyPalette);
        }
        let mut normalized: Vec<TaskColor> = Vec::with_capacity(colors.len());
        for color in colors {
            if normalized
                .iter()
                .any(|seen| seen.id.eq_ignore_ascii_case(&color.id))
            {
                return Err(ColorError::DuplicateId(color.id));
            }
            normalized.push(TaskColor::new(color.id, &color.hex)?);
        }
        Ok(Self { colors: normalized })
    }

    /// Move the color matching `key` to the front so it becomes the default.
    /// Returns `false` when no color matches.
    pub fn set_default(&mut self, key: &str) -> bool {
        let Some(pos) = self.position(key) else {
            return false;
        };
        let color = self.colors.remove(pos);
        self.colors.insert(0, color);
        true
    }

    /// Hex code used for tasks created without a color.
    #[must_use]
    pub fn default_color(&self) -> &str {
        self.colors
            .first()
            .map_or(DEFAULT_TASK_COLOR, |color| color.hex.as_str())
    }

    /// All colors in picker order.
    #[must_use]
    pub fn colors(&self) -> &[TaskColor] {
        &self.colors
    }

    /// Resolve a color by id or hex code, both case-insensitive.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&TaskColor> {
        self.position(key).and_then(|pos| self.colors.get(pos))
    }

    fn position(&self, key: &str) -> Option<usize> {
        let key = key.trim();
        let hex = normalize_hex(key).ok();
        self.colors.iter().position(|color| {
            color.id.eq_ignore_ascii_case(key) || hex.as_deref() == Some(color.hex.as_str())
        })
    }
}

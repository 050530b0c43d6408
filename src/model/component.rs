use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ComponentId = Uuid;

/// Colour tags handed out to new components, in order.
pub const COLOR_TAGS: [&str; 4] = ["blue", "purple", "emerald", "amber"];

/// Tag used when the caller does not pick one.
pub const DEFAULT_COLOR_TAG: &str = "slate";

/// A horizontal track grouping activities. Position in `Plan::components`
/// defines the vertical stacking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    #[serde(default = "default_color_tag")]
    pub color_tag: String,
}

impl Component {
    pub fn new(name: impl Into<String>, color_tag: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color_tag: color_tag.into(),
        }
    }
}

fn default_color_tag() -> String {
    DEFAULT_COLOR_TAG.to_string()
}

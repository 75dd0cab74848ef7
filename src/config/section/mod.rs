//! Configuration section definitions.
//!
//! Each module corresponds to a part of `folio.toml`:
//!
//! | Module  | TOML Section    | Purpose                            |
//! |---------|-----------------|------------------------------------|
//! | `site`  | `[site]`        | Title, description, base, head     |
//! | `head`  | `[[site.head]]` | Head tag descriptors               |
//! | `theme` | `[theme]`       | Logo, navigation bar, sidebar      |

mod head;
mod site;
mod theme;

// Re-export section configs
pub use head::{HeadAttrs, HeadTag, render_head, validate_head_tags};
pub use site::SiteSectionConfig;
pub use theme::{
    NavEntry, SidebarConfig, SidebarItem, SidebarMode, SidebarSwitch, ThemeSectionConfig,
};

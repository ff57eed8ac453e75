//! Configuration section definitions.
//!
//! | Module     | Document section                 | Purpose                      |
//! |------------|----------------------------------|------------------------------|
//! | `locale`   | `[locales.<code>]`               | Locale metadata              |
//! | `theme`    | `[locales.<code>.theme]`         | Per-locale UI configuration  |
//! | `nav`      | `theme.nav`                      | Navigation bar entries       |
//! | `sidebar`  | `theme.sidebar`                  | Path-scoped sidebar trees    |
//! | `search`   | `theme.search`                   | Search provider and copy     |
//! | `markdown` | `[markdown]`                     | Renderer passthrough options |

mod locale;
mod markdown;
mod nav;
mod search;
mod sidebar;
mod theme;

pub use locale::LocaleConfig;
pub use markdown::MarkdownOptions;
pub use nav::NavItem;
pub use search::{
    ButtonTranslations, FooterTranslations, LocalizedSearchStrings, ModalTranslations,
    SearchConfig, SearchOptions, SearchProvider, SearchTranslations,
};
pub use sidebar::{SidebarEntry, SidebarGroup, SidebarItem, sidebar_items};
pub use theme::{
    EDIT_PATH_PLACEHOLDER, EditLinkConfig, FooterConfig, LastUpdatedConfig, SocialLink,
    ThemeConfig,
};

//! Projects and blog posts shown under the two-way tab selector.

/// A linkable entry in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentItem {
    /// Card title
    pub title: &'static str,
    /// Link target
    pub url: &'static str,
}

/// Portfolio projects, in display order.
pub const PROJECTS: &[ContentItem] = &[
    ContentItem {
        title: "Dynamic Schema Validator",
        url: "https://github.com/adashexplorer/dynamic-schema-validator",
    },
    ContentItem {
        title: "Real-time Notification System",
        url: "https://github.com/adashexplorer/notification-service",
    },
    ContentItem {
        title: "Custom Analytics Backend",
        url: "https://github.com/adashexplorer/custom-analytics-backend",
    },
];

/// Blog posts, in display order.
pub const BLOG_POSTS: &[ContentItem] = &[
    ContentItem {
        title: "Scaling a Notification System",
        url: "https://github.com/adashexplorer/notification-service/blob/main/README.md",
    },
    ContentItem {
        title: "Kafka vs RabbitMQ",
        url: "https://github.com/adashexplorer/kafka-vs-rabbitmq/blob/main/README.md",
    },
    ContentItem {
        title: "Spring Boot API Patterns",
        url: "https://github.com/adashexplorer/spring-boot-api-patterns/blob/main/README.md",
    },
];

/// Catalog tab selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogTab {
    /// Projects list (index 0)
    #[default]
    Projects,
    /// Blog posts list (index 1)
    Posts,
}

impl CatalogTab {
    /// All tabs in selector order.
    pub const ALL: [Self; 2] = [Self::Projects, Self::Posts];

    /// Selector index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Projects => 0,
            Self::Posts => 1,
        }
    }

    /// Tab for a selector index, if valid.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Projects),
            1 => Some(Self::Posts),
            _ => None,
        }
    }

    /// The other tab.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Projects => Self::Posts,
            Self::Posts => Self::Projects,
        }
    }

    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Projects => "Projects",
            Self::Posts => "Blog Posts",
        }
    }

    /// Card body shown under every item of this tab.
    #[must_use]
    pub const fn blurb(self) -> &'static str {
        match self {
            Self::Projects => {
                "A modern backend tool built with Java, Spring Boot, and microservices architecture."
            }
            Self::Posts => {
                "A deep dive into backend strategies, performance tuning, and resilient design patterns."
            }
        }
    }

    /// Call-to-action label for items of this tab.
    #[must_use]
    pub const fn link_label(self) -> &'static str {
        match self {
            Self::Projects => "View Project →",
            Self::Posts => "Read More →",
        }
    }

    /// Items listed under this tab.
    #[must_use]
    pub const fn items(self) -> &'static [ContentItem] {
        match self {
            Self::Projects => PROJECTS,
            Self::Posts => BLOG_POSTS,
        }
    }
}

/// Read-only catalog with the current tab and item cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    tab: CatalogTab,
    selected: usize,
}

impl Catalog {
    /// Creates a catalog on the Projects tab.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected tab.
    #[must_use]
    pub const fn tab(&self) -> CatalogTab {
        self.tab
    }

    /// Index of the highlighted item within the current tab.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Switch to a tab, resetting the cursor when the tab changes.
    pub fn select_tab(&mut self, tab: CatalogTab) {
        if self.tab != tab {
            self.tab = tab;
            self.selected = 0;
        }
    }

    /// Flip between the two tabs.
    pub fn switch_tab(&mut self) {
        self.select_tab(self.tab.other());
    }

    /// Items of the current tab.
    #[must_use]
    pub const fn items(&self) -> &'static [ContentItem] {
        self.tab.items()
    }

    /// The highlighted item.
    #[must_use]
    pub fn selected_item(&self) -> Option<&'static ContentItem> {
        self.items().get(self.selected)
    }

    /// Move the cursor down, wrapping at the end.
    pub fn select_next(&mut self) {
        let len = self.items().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move the cursor up, wrapping at the start.
    pub fn select_previous(&mut self) {
        let len = self.items().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_index_round_trip() {
        for tab in CatalogTab::ALL {
            assert_eq!(CatalogTab::from_index(tab.index()), Some(tab));
        }
        assert_eq!(CatalogTab::from_index(2), None);
    }

    #[test]
    fn test_catalog_starts_on_projects() {
        let catalog = Catalog::new();
        assert_eq!(catalog.tab(), CatalogTab::Projects);
        assert_eq!(catalog.items(), PROJECTS);
        assert_eq!(
            catalog.selected_item().map(|item| item.title),
            Some("Dynamic Schema Validator")
        );
    }

    #[test]
    fn test_switch_tab_resets_cursor() {
        let mut catalog = Catalog::new();
        catalog.select_next();
        assert_eq!(catalog.selected(), 1);

        catalog.switch_tab();
        assert_eq!(catalog.tab(), CatalogTab::Posts);
        assert_eq!(catalog.selected(), 0);
        assert_eq!(catalog.items(), BLOG_POSTS);

        // Selecting the active tab keeps the cursor
        catalog.select_next();
        catalog.select_tab(CatalogTab::Posts);
        assert_eq!(catalog.selected(), 1);
    }

    #[test]
    fn test_cursor_wraps() {
        let mut catalog = Catalog::new();
        catalog.select_previous();
        assert_eq!(catalog.selected(), PROJECTS.len() - 1);
        catalog.select_next();
        assert_eq!(catalog.selected(), 0);
    }

    #[test]
    fn test_items_have_links() {
        for item in PROJECTS.iter().chain(BLOG_POSTS) {
            assert!(!item.title.is_empty());
            assert!(item.url.starts_with("https://github.com/adashexplorer/"));
        }
    }
}

//! The set of identifiers the application menus need translated.

use std::sync::Arc;

/// Exhaustive list of identifiers used by the top and context menus.
///
/// Any token passed to `translation` that is missing here will never be
/// resolved and renders as a placeholder.
pub const MENU_IDENTIFIERS: &[&str] = &[
    "downloadsManager",
    "confirmClearPasswords",
    "about",
    "quit",
    "addToReadingList",
    "viewPageSource",
    "copyImageAddress",
    "openImageInNewTab",
    "saveImage",
    "copyLinkAddress",
    "openInNewSessionTab",
    "openInNewPrivateTab",
    "openInNewTab",
    "openAllInTabs",
    "disableAdBlock",
    "disableTrackingProtection",
    "muteTab",
    "unmuteTab",
    "pinTab",
    "unpinTab",
    "deleteFolder",
    "deleteBookmark",
    "editFolder",
    "editBookmark",
    "unmuteTabs",
    "muteTabs",
    "addBookmark",
    "addFolder",
    "newTab",
    "closeTab",
    "bookmarkPage",
    "openFile",
    "openLocation",
    "openSearch",
    "importFrom",
    "closeWindow",
    "savePageAs",
    "spreadTheWord",
    "share",
    "undo",
    "redo",
    "cut",
    "copy",
    "paste",
    "pasteWithoutFormatting",
    "delete",
    "selectAll",
    "findNext",
    "findPrevious",
    "file",
    "edit",
    "view",
    "actualSize",
    "zoomIn",
    "zoomOut",
    "toolbars",
    "reloadPage",
    "reloadTab",
    "cleanReload",
    "readingView",
    "tabManager",
    "textEncoding",
    "toggleDeveloperTools",
    "toggleBrowserConsole",
    "toggleFullScreenView",
    "home",
    "back",
    "forward",
    "reopenLastClosedWindow",
    "showAllHistory",
    "clearHistory",
    "bookmarks",
    "addToFavoritesBar",
    "window",
    "minimize",
    "zoom",
    "selectNextTab",
    "selectPreviousTab",
    "moveTabToNewWindow",
    "mergeAllWindows",
    "downloads",
    "history",
    "bringAllToFront",
    "help",
    "sendUsFeedback",
    "services",
    "hideOthers",
    "showAll",
    "newPrivateTab",
    "newSessionTab",
    "newWindow",
    "reopenLastClosedTab",
    "print",
    "findOnPage",
    "checkForUpdates",
    "preferences",
    "bookmarksManager",
    "importBookmarks",
    "reportAnIssue",
    "submitFeedback",
    "bookmarksToolbar",
    "bravery",
    "replaceAds",
    "blockAds",
    "allowAdsAndTracking",
    "block3rdPartyCookie",
    "blockPopups",
    "httpsEverywhere",
];

/// An immutable, ordered set of tokens to resolve on every `init`.
///
/// Cloning is cheap; all clones share the same backing slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierSet {
    tokens: Arc<[String]>,
}

impl IdentifierSet {
    /// Build a set from any list of tokens, dropping later duplicates.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = Vec::<String>::new();
        for token in tokens {
            let token = token.into();
            if !seen.contains(&token) {
                seen.push(token);
            }
        }
        Self { tokens: seen.into() }
    }

    /// The menu identifier set.
    pub fn menu() -> Self {
        Self::new(MENU_IDENTIFIERS.iter().copied())
    }

    /// Tokens in resolution order.
    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    /// Iterate over tokens in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the set has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether `token` is part of the set.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }
}

impl Default for IdentifierSet {
    fn default() -> Self {
        Self::menu()
    }
}

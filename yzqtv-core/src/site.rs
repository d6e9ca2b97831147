//! Site branding context.
//!
//! Carries the site name and announcement to every consumer inside a scope.
//! Scopes are explicit values: providing a config returns a nested context
//! and leaves the enclosing one untouched, so the outer value is back in
//! effect as soon as the nested context goes out of use.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

/// Site name shown when no config has been provided.
pub const DEFAULT_SITE_NAME: &str = "YZQ-TV";

/// Announcement shown when no config has been provided.
pub const DEFAULT_ANNOUNCEMENT: &str = "欢迎来到我搭建的影视网站";

/// Branding strings for the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Display name of the site
    pub site_name: String,
    /// Optional banner text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement: Option<String>,
}

impl SiteConfig {
    /// Creates a config with the given name and announcement.
    pub fn new(site_name: impl Into<String>, announcement: Option<String>) -> Self {
        Self {
            site_name: site_name.into(),
            announcement,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: DEFAULT_SITE_NAME.to_string(),
            announcement: Some(DEFAULT_ANNOUNCEMENT.to_string()),
        }
    }
}

/// One level of the scope chain.
#[derive(Debug)]
struct Scope {
    config: SiteConfig,
    parent: Option<Arc<Scope>>,
}

/// Read-only handle to the site config active in the current scope.
///
/// Cloning is cheap; clones share the same scope chain.
#[derive(Debug, Clone, Default)]
pub struct SiteContext {
    scope: Option<Arc<Scope>>,
}

impl SiteContext {
    /// Context with nothing provided. Reads yield [`SiteConfig::default`].
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a nested context in which `config` is active.
    pub fn provide(&self, config: SiteConfig) -> SiteContext {
        SiteContext {
            scope: Some(Arc::new(Scope {
                config,
                parent: self.scope.clone(),
            })),
        }
    }

    /// Runs `f` inside a nested scope providing `config`.
    pub fn scope<R>(&self, config: SiteConfig, f: impl FnOnce(&SiteContext) -> R) -> R {
        let nested = self.provide(config);
        f(&nested)
    }

    /// Returns the nearest provided config, or the default.
    pub fn read(&self) -> &SiteConfig {
        match &self.scope {
            Some(scope) => &scope.config,
            None => default_site_config(),
        }
    }

    /// Number of provided scopes enclosing this context.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.scope.as_deref();
        while let Some(scope) = current {
            depth += 1;
            current = scope.parent.as_deref();
        }
        depth
    }
}

fn default_site_config() -> &'static SiteConfig {
    static DEFAULT: OnceLock<SiteConfig> = OnceLock::new();
    DEFAULT.get_or_init(SiteConfig::default)
}

//! Link management service
//!
//! Thin request-level facade over `AliasRegistry`: applies the default TTL,
//! normalises optional fields and builds the public short URL.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::analytics::AnalyticsSnapshot;
use crate::config::LinksConfig;
use crate::errors::{Result, TtlinkerError};
use crate::storage::{AliasRecordView, AliasRegistry};
use crate::utils::is_reserved_alias;

// ============ Request/Response DTOs ============

/// Request to create a new link
#[derive(Debug, Clone, Default)]
pub struct CreateLinkRequest {
    /// Target URL
    pub target: String,
    /// Custom alias (optional, generated if not provided)
    pub alias: Option<String>,
    /// Lifetime in seconds (optional, the configured default if not provided)
    pub ttl: Option<u64>,
}

/// Request to rename a link and/or reset its lifetime
#[derive(Debug, Clone, Default)]
pub struct UpdateLinkRequest {
    pub new_alias: Option<String>,
    pub new_ttl: Option<u64>,
}

/// Result of link creation
#[derive(Debug, Clone)]
pub struct LinkCreateResult {
    pub link: AliasRecordView,
    /// `base_url` + alias
    pub short_url: String,
    /// Whether the alias was auto-generated
    pub generated_alias: bool,
}

// ============ LinkService Implementation ============

pub struct LinkService {
    registry: Arc<AliasRegistry>,
    base_url: String,
    default_ttl: u64,
}

impl LinkService {
    pub fn new(registry: Arc<AliasRegistry>, base_url: &str, default_ttl: u64) -> Self {
        let mut base_url = base_url.trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            registry,
            base_url,
            default_ttl,
        }
    }

    pub fn from_config(registry: Arc<AliasRegistry>, config: &LinksConfig) -> Self {
        Self::new(registry, &config.base_url, config.default_ttl)
    }

    pub fn registry(&self) -> &Arc<AliasRegistry> {
        &self.registry
    }

    pub fn short_url(&self, alias: &str) -> String {
        format!("{}{}", self.base_url, alias)
    }

    pub fn create_link(&self, req: CreateLinkRequest) -> Result<LinkCreateResult> {
        let alias = non_empty(req.alias);
        reject_reserved(alias.as_deref())?;
        let generated_alias = alias.is_none();
        let ttl = req.ttl.unwrap_or(self.default_ttl);

        let link = self
            .registry
            .create(&req.target, ttl, alias.as_deref())
            .inspect_err(|e| warn!("Failed to create link: {}", e))?;

        Ok(LinkCreateResult {
            short_url: self.short_url(&link.alias),
            link,
            generated_alias,
        })
    }

    pub fn resolve(&self, alias: &str) -> Result<String> {
        self.registry.resolve(alias)
    }

    pub fn analytics(&self, alias: &str) -> Result<AnalyticsSnapshot> {
        self.registry.analytics(alias)
    }

    pub fn update_link(&self, alias: &str, req: UpdateLinkRequest) -> Result<AliasRecordView> {
        let new_alias = non_empty(req.new_alias);
        reject_reserved(new_alias.as_deref())?;
        debug!(
            "Update request for {}: new_alias={:?}, new_ttl={:?}",
            alias, new_alias, req.new_ttl
        );
        self.registry
            .update(alias, new_alias.as_deref(), req.new_ttl)
    }

    pub fn delete_link(&self, alias: &str) -> Result<()> {
        self.registry.delete(alias)
    }
}

fn reject_reserved(alias: Option<&str>) -> Result<()> {
    match alias {
        Some(a) if is_reserved_alias(a) => Err(TtlinkerError::invalid_input(format!(
            "Alias '{}' is reserved",
            a
        ))),
        _ => Ok(()),
    }
}

/// 空字符串等同于未提供
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> LinkService {
        LinkService::new(Arc::new(AliasRegistry::default()), "http://sho.rt", 120)
    }

    #[test]
    fn test_short_url_normalises_base() {
        let svc = service();
        assert_eq!(svc.short_url("abc"), "http://sho.rt/abc");

        let svc = LinkService::new(Arc::new(AliasRegistry::default()), "http://sho.rt/", 120);
        assert_eq!(svc.short_url("abc"), "http://sho.rt/abc");
    }

    #[test]
    fn test_create_applies_default_ttl() {
        let svc = service();
        let result = svc
            .create_link(CreateLinkRequest {
                target: "http://example.com".to_string(),
                ..Default::default()
            })
            .unwrap();

        assert!(result.generated_alias);
        assert_eq!(result.link.ttl_seconds, 120);
        assert_eq!(result.link.expires_at - result.link.created_at, 120);
        assert_eq!(result.short_url, svc.short_url(&result.link.alias));
    }

    #[test]
    fn test_empty_alias_is_treated_as_absent() {
        let svc = service();
        let result = svc
            .create_link(CreateLinkRequest {
                target: "http://example.com".to_string(),
                alias: Some(String::new()),
                ttl: Some(30),
            })
            .unwrap();
        assert!(result.generated_alias);
        assert_eq!(result.link.alias.len(), 6);

        let updated = svc
            .update_link(
                &result.link.alias,
                UpdateLinkRequest {
                    new_alias: Some(String::new()),
                    new_ttl: None,
                },
            )
            .unwrap();
        assert_eq!(updated.alias, result.link.alias);
    }

    #[test]
    fn test_reserved_aliases_are_rejected() {
        let svc = service();
        let err = svc
            .create_link(CreateLinkRequest {
                target: "http://example.com".to_string(),
                alias: Some("health".to_string()),
                ttl: None,
            })
            .unwrap_err();
        assert!(matches!(err, TtlinkerError::InvalidInput(_)));
        assert!(svc.registry().is_empty());
    }
}

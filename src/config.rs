//! 配置模块，负责加载JSON配置文件并组装元数据提供者

use crate::domain;
use crate::metadata::{
    AttributeBasedMetadataProvider, CachingMetadataProvider, EntityRegistry, HardcodedMetadataProvider,
    LoggingMetadataProvider, MetadataProvider,
};
use crate::visitor::{ExpressionVisitor, VisitorConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_CONNECTOR_NAME: &str = "TIBCO Scribe Platform API (Demo)";

/// Provider chain handed to the host.
pub type SharedMetadataProvider = Box<dyn MetadataProvider + Send + Sync>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("配置文件不存在: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("无法读取配置文件 {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("无法解析JSON配置文件 {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// 元数据来源
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataSource {
    /// 从已注册实体的声明中推导
    #[default]
    Attributes,
    Hardcoded,
}

/// 连接器配置，缺省字段使用默认值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    pub connector_name: String,
    pub throw_on_or_logical_operator: bool,
    pub cache_metadata: bool,
    pub metadata_source: MetadataSource,
    /// Only registered entities in this namespace are scanned.
    pub entity_namespace: String,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            connector_name: DEFAULT_CONNECTOR_NAME.to_string(),
            throw_on_or_logical_operator: false,
            cache_metadata: true,
            metadata_source: MetadataSource::Attributes,
            entity_namespace: domain::NAMESPACE.to_string(),
        }
    }
}

impl ConnectorConfig {
    /// 从JSON文件加载连接器配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), source = ?config.metadata_source, "loaded connector config");
        Ok(config)
    }

    pub fn expression_visitor(&self) -> ExpressionVisitor {
        ExpressionVisitor::with_config(VisitorConfig {
            throw_on_or_logical_operator: self.throw_on_or_logical_operator,
        })
    }

    /// Assembles `Logging(Caching(source))`; the cache layer is optional.
    pub fn build_metadata_provider(&self, registry: EntityRegistry) -> SharedMetadataProvider {
        let source: SharedMetadataProvider = match self.metadata_source {
            MetadataSource::Attributes => {
                let namespace = self.entity_namespace.clone();
                Box::new(AttributeBasedMetadataProvider::new(registry, move |entity| {
                    entity.namespace == namespace
                }))
            }
            MetadataSource::Hardcoded => Box::new(HardcodedMetadataProvider::new()),
        };

        let source: SharedMetadataProvider = if self.cache_metadata {
            Box::new(CachingMetadataProvider::new(source))
        } else {
            source
        };

        debug!(
            connector = %self.connector_name,
            source = ?self.metadata_source,
            cached = self.cache_metadata,
            "built metadata provider"
        );
        Box::new(LoggingMetadataProvider::new(source, self.connector_name.clone()))
    }
}

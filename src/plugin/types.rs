//! 插件系统类型定义
//!
//! 定义 PluginError、ResolvedManifest 等核心类型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::downloader::DownloadError;

/// 插件错误类型
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("清单已注册: {0}")]
    AlreadyRegistered(String),

    #[error("插件尚未注册清单")]
    ManifestNotRegistered,

    #[error("插件尚未注册安装器")]
    InstallerNotRegistered,

    #[error("清单无效: {0}")]
    InvalidManifest(String),

    #[error("清单字段解析失败: {field} - {message}")]
    Resolution { field: String, message: String },

    #[error("不支持的平台: {family}-{arch}")]
    UnsupportedPlatform { family: String, arch: String },

    #[error("不支持的版本: {0}")]
    UnsupportedVersion(String),

    #[error("安装失败: {0}")]
    InstallFailed(String),

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),
}

/// 完全解析后的插件清单
///
/// 所有字段均为字面量，注册完成后宿主只持有这份快照。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedManifest {
    /// 包名称
    pub name: String,
    /// 可安装版本列表
    pub available_version: Vec<String>,
}

impl ResolvedManifest {
    /// 验证清单有效性
    pub fn validate(&self) -> Result<(), PluginError> {
        if self.name.is_empty() {
            return Err(PluginError::InvalidManifest("包名称不能为空".to_string()));
        }
        if self.available_version.is_empty() {
            return Err(PluginError::InvalidManifest(
                "可安装版本列表不能为空".to_string(),
            ));
        }
        Ok(())
    }
}

/// 注册表中的清单条目
///
/// 记录注册时刻，条目本身即不可变快照。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredManifest {
    /// 解析后的清单
    pub manifest: ResolvedManifest,
    /// 注册时间
    pub registered_at: DateTime<Utc>,
}

impl RegisteredManifest {
    /// 创建新的注册条目
    pub fn new(manifest: ResolvedManifest) -> Self {
        Self {
            manifest,
            registered_at: Utc::now(),
        }
    }
}

//! 插件系统模块
//!
//! 提供安装器宿主的插件契约：
//! - 清单注册与延迟字段解析
//! - 安装器注册与调用契约（版本/平台校验）
//! - 安装器依赖的单文件下载器
//! - 示例插件

mod context;
pub mod downloader;
pub mod examples;
mod installer;
mod manifest;
mod types;

pub use context::PluginContext;
pub use downloader::{default_install_root, DownloadError, FileDownloader};
pub use installer::{
    ensure_target_dir, ensure_version_supported, FnInstaller, Installer, PlatformSupport,
};
pub use manifest::{PluginManifest, ResolvableField};
pub use types::{PluginError, RegisteredManifest, ResolvedManifest};

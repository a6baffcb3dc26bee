//! PHP 运行时示例插件
//!
//! 演示插件的完整注册流程：清单（版本列表走解析器闭包）加安装器。
//! 缺省不配置发行源，安装步骤只建目录，不访问网络。

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::host_env::HostEnv;
use crate::plugin::context::PluginContext;
use crate::plugin::downloader::FileDownloader;
use crate::plugin::installer::{
    ensure_target_dir, ensure_version_supported, Installer, PlatformSupport,
};
use crate::plugin::manifest::{PluginManifest, ResolvableField};
use crate::plugin::types::PluginError;

/// PHP 运行时安装器
pub struct PhpRuntimeInstaller {
    /// 支持的平台
    platform: PlatformSupport,
    /// 支持的版本
    versions: Vec<String>,
    /// 下载器
    downloader: FileDownloader,
    /// 发行包基地址，None 时跳过下载（占位模式）
    dist_base: Option<String>,
}

impl PhpRuntimeInstaller {
    /// 创建新实例（占位模式）
    pub fn new() -> Self {
        Self {
            platform: PlatformSupport::new(["unix"], ["x86_64"]),
            versions: vec!["7.4".to_string(), "8.0".to_string()],
            downloader: FileDownloader::new(),
            dist_base: None,
        }
    }

    /// 设置发行包基地址，如 `https://www.php.net/distributions`
    pub fn with_dist_base(mut self, base: impl Into<String>) -> Self {
        self.dist_base = Some(base.into());
        self
    }

    /// 清单中声明的版本列表
    pub fn available_versions(&self) -> Vec<String> {
        self.versions.clone()
    }
}

impl Default for PhpRuntimeInstaller {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Installer for PhpRuntimeInstaller {
    async fn install(
        &self,
        env: &HostEnv,
        version: &str,
        target_dir: &Path,
    ) -> Result<bool, PluginError> {
        ensure_version_supported(&self.versions, version)?;
        self.platform.ensure(env)?;
        ensure_target_dir(target_dir).await?;

        if let Some(base) = &self.dist_base {
            let archive = format!("php-{}.tar.gz", version);
            let src = format!("{}/{}", base.trim_end_matches('/'), archive);
            let dest = target_dir.join(&archive);
            self.downloader.download_file(&src, &dest).await?;
        }

        info!("PHP {} 安装完成: {:?}", version, target_dir);
        Ok(true)
    }
}

/// 向上下文注册 PHP 插件
pub async fn register(ctx: &mut PluginContext) -> Result<(), PluginError> {
    register_with(ctx, PhpRuntimeInstaller::new()).await
}

/// 用指定的安装器实例注册（测试可注入本地发行源）
pub async fn register_with(
    ctx: &mut PluginContext,
    installer: PhpRuntimeInstaller,
) -> Result<(), PluginError> {
    let versions = installer.available_versions();

    ctx.register_manifest(PluginManifest::new(
        "PHP",
        ResolvableField::resolver(move || Ok(versions)),
    ))
    .await?;
    ctx.register_installer(Arc::new(installer))?;
    Ok(())
}
